use crate::api::RequestContext;
use crate::models::messages::{Message, MessageInput};
use crate::usecases::messages;
use async_graphql::{Context, ErrorExtensions, Object, Result};
use tracing::info;

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn create_message(
        &self,
        ctx: &Context<'_>,
        input: Option<MessageInput>,
    ) -> Result<Option<Message>> {
        let ctx = ctx.data::<RequestContext>()?;
        let message = messages::create(ctx, input).await.map_err(|e| e.extend())?;
        info!(ip = %ctx.request_ip.ip_addr, message_id = %message.id, "Created message");
        Ok(Some(message))
    }

    async fn update_message(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: Option<MessageInput>,
    ) -> Result<Option<Message>> {
        let ctx = ctx.data::<RequestContext>()?;
        let message = messages::update(ctx, &id, input)
            .await
            .map_err(|e| e.extend())?;
        info!(ip = %ctx.request_ip.ip_addr, message_id = %id, "Updated message");
        Ok(Some(message))
    }

    /// Returns the message as it was before deletion.
    async fn delete_message(&self, ctx: &Context<'_>, id: String) -> Result<Option<Message>> {
        let ctx = ctx.data::<RequestContext>()?;
        let message = messages::delete(ctx, &id).await.map_err(|e| e.extend())?;
        info!(
            ip = %ctx.request_ip.ip_addr,
            user_agent = ctx.user_agent.as_deref(),
            message_id = %id,
            "Deleted message"
        );
        Ok(Some(message))
    }
}
