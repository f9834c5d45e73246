use crate::models::messages::{Message, MessageInput};
use anyhow::{Context as _, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

const MESSAGE_FIELDS: &str = "{ id name content }";

pub const GET_MESSAGES: &str =
    const_str::concat!("query GetMessages { getMessages ", MESSAGE_FIELDS, " }");

pub const GET_MESSAGE_BY_ID: &str = const_str::concat!(
    "query GetMessageById($id: String!) { getMessageById(id: $id) ",
    MESSAGE_FIELDS,
    " }"
);

pub const CREATE_MESSAGE: &str = const_str::concat!(
    "mutation CreateMessage($input: MessageInput) { createMessage(input: $input) ",
    MESSAGE_FIELDS,
    " }"
);

pub const UPDATE_MESSAGE: &str = const_str::concat!(
    "mutation UpdateMessage($id: String!, $input: MessageInput) { updateMessage(id: $id, input: $input) ",
    MESSAGE_FIELDS,
    " }"
);

pub const DELETE_MESSAGE: &str = const_str::concat!(
    "mutation DeleteMessage($id: String!) { deleteMessage(id: $id) ",
    MESSAGE_FIELDS,
    " }"
);

/// The operations the board issues against the API.
#[async_trait]
pub trait MessageApi: Send + Sync {
    async fn get_messages(&self) -> anyhow::Result<Vec<Message>>;
    async fn get_message_by_id(&self, id: &str) -> anyhow::Result<Option<Message>>;
    async fn create_message(&self, input: MessageInput) -> anyhow::Result<Message>;
    async fn update_message(&self, id: &str, input: MessageInput) -> anyhow::Result<Message>;
    async fn delete_message(&self, id: &str) -> anyhow::Result<Message>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetMessagesData {
    get_messages: Vec<Message>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetMessageByIdData {
    get_message_by_id: Option<Message>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageData {
    create_message: Message,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMessageData {
    update_message: Message,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteMessageData {
    delete_message: Message,
}

/// GraphQL-over-HTTP client for the message API.
#[derive(Clone)]
pub struct GraphQlClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one operation. Any entry in `errors` fails the call with the
    /// first message, even when partial `data` came back.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<T> {
        let request = GraphQlRequest {
            query,
            operation_name,
            variables,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("{operation_name}: request to {} failed", self.endpoint))?;
        let body: GraphQlResponse = response
            .json()
            .await
            .with_context(|| format!("{operation_name}: malformed response"))?;

        // A failed field is nulled in `data`, so errors win over decoding it.
        if let Some(error) = body.errors.into_iter().next() {
            return Err(anyhow!(error.message));
        }
        let data = body
            .data
            .ok_or_else(|| anyhow!("{operation_name}: response carried no data"))?;
        serde_json::from_value(data).with_context(|| format!("{operation_name}: unexpected data"))
    }
}

#[async_trait]
impl MessageApi for GraphQlClient {
    async fn get_messages(&self) -> anyhow::Result<Vec<Message>> {
        let data: GetMessagesData = self
            .execute("GetMessages", GET_MESSAGES, json!({}))
            .await?;
        Ok(data.get_messages)
    }

    async fn get_message_by_id(&self, id: &str) -> anyhow::Result<Option<Message>> {
        let data: GetMessageByIdData = self
            .execute("GetMessageById", GET_MESSAGE_BY_ID, json!({ "id": id }))
            .await?;
        Ok(data.get_message_by_id)
    }

    async fn create_message(&self, input: MessageInput) -> anyhow::Result<Message> {
        let data: CreateMessageData = self
            .execute("CreateMessage", CREATE_MESSAGE, json!({ "input": input }))
            .await?;
        Ok(data.create_message)
    }

    async fn update_message(&self, id: &str, input: MessageInput) -> anyhow::Result<Message> {
        let data: UpdateMessageData = self
            .execute(
                "UpdateMessage",
                UPDATE_MESSAGE,
                json!({ "id": id, "input": input }),
            )
            .await?;
        Ok(data.update_message)
    }

    async fn delete_message(&self, id: &str) -> anyhow::Result<Message> {
        let data: DeleteMessageData = self
            .execute("DeleteMessage", DELETE_MESSAGE, json!({ "id": id }))
            .await?;
        Ok(data.delete_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_select_every_message_field() {
        for document in [
            GET_MESSAGES,
            GET_MESSAGE_BY_ID,
            CREATE_MESSAGE,
            UPDATE_MESSAGE,
            DELETE_MESSAGE,
        ] {
            assert!(document.ends_with("{ id name content } }"), "{document}");
        }
    }

    #[test]
    fn operations_are_valid_documents() {
        for document in [
            GET_MESSAGES,
            GET_MESSAGE_BY_ID,
            CREATE_MESSAGE,
            UPDATE_MESSAGE,
            DELETE_MESSAGE,
        ] {
            async_graphql::parser::parse_query(document).expect(document);
        }
    }

    #[test]
    fn error_envelope_is_read_with_nulled_field() {
        let body: GraphQlResponse = serde_json::from_value(json!({
            "data": { "deleteMessage": null },
            "errors": [{ "message": "Failed to delete message", "path": ["deleteMessage"] }]
        }))
        .unwrap();
        assert_eq!(body.data, Some(json!({ "deleteMessage": null })));
        assert_eq!(body.errors[0].message, "Failed to delete message");
        assert!(serde_json::from_value::<DeleteMessageData>(body.data.unwrap()).is_err());
    }

    #[test]
    fn input_serializes_nulls_for_missing_fields() {
        let input = MessageInput {
            name: Some("Ada".into()),
            content: None,
        };
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            json!({ "name": "Ada", "content": null })
        );
    }
}
