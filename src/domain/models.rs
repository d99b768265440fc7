use serde::{Deserialize, Serialize};

/// Fields supplied by a caller when creating or replacing a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInput {
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<String>, input: MessageInput) -> Self {
        Self {
            id: id.into(),
            content: input.content,
            author: input.author,
        }
    }
}
