use std::sync::Arc;

use domo_core::ContentStore;
use domo_inference::ChatAssistant;

pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub assistant: ChatAssistant,
}
