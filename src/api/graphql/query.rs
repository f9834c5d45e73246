use crate::api::RequestContext;
use crate::models::messages::Message;
use crate::usecases::messages;
use async_graphql::{Context, ErrorExtensions, Object, Result};

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn get_messages(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Message>>>> {
        let ctx = ctx.data::<RequestContext>()?;
        let messages = messages::fetch_all(ctx).await.map_err(|e| e.extend())?;
        Ok(Some(messages.into_iter().map(Some).collect()))
    }

    /// Unknown ids resolve to `null`.
    async fn get_message_by_id(&self, ctx: &Context<'_>, id: String) -> Result<Option<Message>> {
        let ctx = ctx.data::<RequestContext>()?;
        messages::fetch_one(ctx, &id).await.map_err(|e| e.extend())
    }
}
