//! Message lookups and writes behind the `getMessage`, `createMessage` and
//! `updateMessage` resolvers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    domain::models::{Message, MessageInput},
    infrastructure::state::AppState,
};

use super::errors::ServiceError;

/// Service over the process-wide message store held in [`AppState`].
pub struct MessageService {
    pub state: Arc<AppState>,
}

impl MessageService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn get_message(&self, id: &str) -> Result<Message, ServiceError> {
        self.state.messages.get(id).map_err(|err| {
            warn!(message_id = %id, "message lookup missed");
            err.into()
        })
    }

    /// Stores `input` under a freshly generated id. Never fails.
    pub fn create_message(&self, input: MessageInput) -> Message {
        let message = self.state.messages.create(input);
        debug!(message_id = %message.id, "message created");
        message
    }

    /// Replaces the stored content and author of `id` with `input`.
    ///
    /// Fields missing from `input` are cleared, not kept.
    pub fn update_message(&self, id: &str, input: MessageInput) -> Result<Message, ServiceError> {
        match self.state.messages.update(id, input) {
            Ok(message) => {
                debug!(message_id = %id, "message updated");
                Ok(message)
            }
            Err(err) => {
                warn!(message_id = %id, "update targeted unknown message");
                Err(err.into())
            }
        }
    }
}
