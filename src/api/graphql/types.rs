use async_graphql::{ErrorExtensions, InputObject, Object, Result, SimpleObject, ID};

use crate::{
    domain::{
        dice::Die,
        models::{Message, MessageInput},
    },
    services::errors::ServiceError,
};

use super::nullable_list;

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Message")]
pub struct MessageObject {
    pub id: ID,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<Message> for MessageObject {
    fn from(message: Message) -> Self {
        Self {
            id: ID(message.id),
            content: message.content,
            author: message.author,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "MessageInput")]
pub struct MessageInputObject {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<MessageInputObject> for MessageInput {
    fn from(input: MessageInputObject) -> Self {
        Self {
            content: input.content,
            author: input.author,
        }
    }
}

pub struct RandomDie(pub Die);

#[Object]
impl RandomDie {
    async fn num_sides(&self) -> i32 {
        self.0.sides()
    }

    async fn roll_once(&self) -> i32 {
        self.0.roll_once(&mut rand::thread_rng())
    }

    async fn roll(&self, num_rolls: i32) -> Result<Option<Vec<Option<i32>>>> {
        let rolls = self
            .0
            .roll(&mut rand::thread_rng(), num_rolls)
            .map_err(|err| ServiceError::from(err).extend())?;
        Ok(nullable_list(rolls))
    }
}
