use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, failed};
use crate::models::messages::{Message, MessageInput};
use crate::repositories::messages;

pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Message>> {
    match messages::fetch_all(ctx).await {
        Ok(messages) => Ok(messages.into_iter().map(Message::from).collect()),
        Err(e) => failed(AppError::MessagesFetchFailed, e),
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, id: &str) -> ServiceResult<Option<Message>> {
    match messages::fetch_one(ctx, id).await {
        Ok(message) => Ok(message.map(Message::from)),
        Err(e) => failed(AppError::MessagesFetchOneFailed, e),
    }
}

pub async fn create<C: Context>(ctx: &C, input: Option<MessageInput>) -> ServiceResult<Message> {
    let input = input.unwrap_or_default();
    match messages::create(ctx, input.name.as_deref(), input.content.as_deref()).await {
        Ok(message) => Ok(Message::from(message)),
        Err(e) => failed(AppError::MessagesCreateFailed, e),
    }
}

pub async fn update<C: Context>(
    ctx: &C,
    id: &str,
    input: Option<MessageInput>,
) -> ServiceResult<Message> {
    let input = input.unwrap_or_default();
    let name = input.name.as_deref();
    let content = input.content.as_deref();
    match messages::update(ctx, id, name, content).await {
        Ok(message) => Ok(Message::from(message)),
        Err(e) => failed(AppError::MessagesUpdateFailed, e),
    }
}

pub async fn delete<C: Context>(ctx: &C, id: &str) -> ServiceResult<Message> {
    match messages::delete(ctx, id).await {
        Ok(message) => Ok(Message::from(message)),
        Err(e) => failed(AppError::MessagesDeleteFailed, e),
    }
}
