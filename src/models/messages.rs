use crate::entities::messages::Message as MessageEntity;
use async_graphql::{InputObject, Object};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub content: String,
}

// Fields stay nullable on the wire to keep the published schema unchanged.
#[Object]
impl Message {
    async fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    async fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    async fn content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// Both fields are nullable on the wire. A create without them is rejected by
/// the store; an update leaves the missing column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, InputObject, Serialize, Deserialize)]
pub struct MessageInput {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl MessageInput {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
        }
    }
}

impl From<MessageEntity> for Message {
    fn from(value: MessageEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            content: value.content,
        }
    }
}
