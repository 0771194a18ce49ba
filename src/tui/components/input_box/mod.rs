//! # InputBox Component
//!
//! Where the user composes a prompt.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, newline via Shift+Enter)
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter): non-blank drafts only, and only when enabled
//! - Explain why input is unavailable when the controller disables it
//!
//! ## State Management
//!
//! The draft is internal state. `availability` is a prop synced from the
//! application state every frame. Cursor position and scroll state are
//! encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_options, wrapped_rows,
};

pub const OFFLINE_PLACEHOLDER: &str = "Server is offline. Please start the backend server.";

/// Whether the box currently accepts input, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Ready,
    /// A reply is outstanding.
    Busy,
    /// The last health probe did not confirm the backend.
    Offline,
}

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The draft was submitted (Enter). Carries the raw, untrimmed text.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Draft text (Internal State)
    pub buffer: String,
    /// Prop
    pub availability: Availability,
    /// Prop: used in the placeholder text
    pub assistant_name: String,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(assistant_name: String) -> Self {
        Self {
            buffer: String::new(),
            availability: Availability::Offline,
            assistant_name,
            cursor: CursorState::new(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.availability != Availability::Ready
    }

    pub fn placeholder(&self) -> String {
        match self.availability {
            Availability::Ready => format!("Message {}...", self.assistant_name),
            Availability::Busy => format!("Waiting for {} to answer...", self.assistant_name),
            Availability::Offline => OFFLINE_PLACEHOLDER.to_string(),
        }
    }

    /// Height needed for the current draft at `outer_width`, clamped to
    /// `[1, MAX_VISIBLE_LINES]` content rows plus borders.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let rows = wrapped_rows(&self.buffer, inner_width(outer_width));
        rows.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_text(&self, outer_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }
        let width = inner_width(outer_width);
        if width == 0 {
            return String::new();
        }
        let rows = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(rows.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(rows.len());
        rows[start..end].join("\n")
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor.pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.follow(&self.buffer, area.width);

        let accent = match self.availability {
            Availability::Ready => Style::default().fg(Color::Blue),
            Availability::Busy => Style::default().fg(Color::DarkGray),
            Availability::Offline => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let style = if self.is_disabled() {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Paragraph::new(self.visible_text(area.width)).style(style)
        };

        frame.render_widget(paragraph.block(block), area);

        if !self.is_disabled() {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // A disabled box neither edits nor submits; the draft is kept as is.
        if self.is_disabled() {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Newline => self.insert("\n"),
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorRight => {
                let next = if self.cursor.pos < self.buffer.len() {
                    next_char_boundary(&self.buffer, self.cursor.pos)
                } else {
                    self.cursor.pos
                };
                self.move_to(next)
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor.pos + i);
                self.move_to(line_end)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
