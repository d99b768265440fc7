use parking_lot::RwLock;
use rand::RngCore;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;

use crate::{
    domain::models::{Message, MessageInput},
    infrastructure::config::StoreConfig,
};

const ID_BYTES: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no message exists with id {0}")]
    NotFound(String),
}

/// Keyed message storage. Implementations serialize every operation against the
/// shared mapping so ids stay unique and reads never see half-written records.
pub trait MessageStore: Send + Sync {
    fn create(&self, input: MessageInput) -> Message;
    fn get(&self, id: &str) -> Result<Message, StoreError>;
    /// Replaces content and author wholesale; absent fields are cleared.
    fn update(&self, id: &str, input: MessageInput) -> Result<Message, StoreError>;
}

pub fn build_message_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn MessageStore>> {
    match config.provider.as_str() {
        "memory" => Ok(Arc::new(MemoryMessageStore::default())),
        other => anyhow::bail!("unsupported message store provider: {other}"),
    }
}

/// Random 20-character lowercase hex identifier.
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Default)]
pub struct MemoryMessageStore {
    messages: RwLock<HashMap<String, MessageInput>>,
}

impl MemoryMessageStore {
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl MessageStore for MemoryMessageStore {
    fn create(&self, input: MessageInput) -> Message {
        let mut messages = self.messages.write();
        let id = loop {
            let candidate = generate_id();
            if !messages.contains_key(&candidate) {
                break candidate;
            }
        };
        messages.insert(id.clone(), input.clone());
        Message::new(id, input)
    }

    fn get(&self, id: &str) -> Result<Message, StoreError> {
        self.messages
            .read()
            .get(id)
            .map(|record| Message::new(id, record.clone()))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, input: MessageInput) -> Result<Message, StoreError> {
        let mut messages = self.messages.write();
        let Some(record) = messages.get_mut(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        *record = input.clone();
        Ok(Message::new(id, input))
    }
}
