//! # Application State
//!
//! Core chat state for Zoid. Domain data only: no TUI types live here.
//! Presentation state (scroll offsets, draft text) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── messages: Vec<Message>        // the conversation, oldest first
//! ├── is_online: bool               // last health probe said "ok"
//! ├── is_loading: bool              // a generate request is outstanding
//! ├── backend_model: Option<String> // model name reported by /health
//! ├── status_message: String        // title bar text
//! ├── assistant_name: String        // how the assistant is labelled
//! ├── next_id: u64                  // message id counter
//! └── revision: u64                 // bumped on every message-list change
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::message::{Message, MessageId};

pub struct App {
    messages: Vec<Message>,
    pub is_online: bool,
    pub is_loading: bool,
    pub backend_model: Option<String>,
    pub status_message: String,
    pub assistant_name: String,
    next_id: u64,
    revision: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new("Zoid".to_string())
    }
}

impl App {
    pub fn new(assistant_name: String) -> Self {
        Self {
            messages: Vec::new(),
            is_online: false,
            is_loading: false,
            backend_model: None,
            status_message: String::from("Connecting..."),
            assistant_name,
            next_id: 1,
            revision: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.assistant_name.clone())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Changes every time a message is appended or the list is cleared.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Input is accepted only while the backend is reachable and idle.
    pub fn input_enabled(&self) -> bool {
        self.is_online && !self.is_loading
    }

    pub(crate) fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.revision += 1;
    }
}
