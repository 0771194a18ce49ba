//! # TUI Components
//!
//! All widgets drawn by the chat screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh every frame from the data they draw:
//! - `TitleBar`: app name, connectivity and status
//! - `MessageBubble`: a single chat message
//! - `ThinkingIndicator`: the animated "is thinking" bubble
//! - `LandingPage`: welcome screen for an empty conversation
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: multi-line draft editor, disabled while offline
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! ├── thinking.rs      (Pending-reply indicator)
//! ├── landing.rs       (Empty-state welcome)
//! └── input_box/       (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod thinking;

pub use input_box::{Availability, InputBox, InputEvent};
pub use landing::LandingPage;
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use thinking::ThinkingIndicator;
