use std::sync::Arc;

use crate::infrastructure::store::MessageStore;

#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }
}
