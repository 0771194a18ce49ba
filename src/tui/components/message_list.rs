//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Show the landing page when there is nothing to show
//! - Lay out message bubbles (user right, assistant left) with a spacer row
//! - Append the thinking indicator while a reply is outstanding
//! - Keep the newest entry in view unless the user scrolled away
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).
//! Heights are cached per message id: messages never change once created, so
//! a cached height stays valid until the width changes or the chat is cleared.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, MessageId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::landing::LandingPage;
use crate::tui::components::message::MessageBubble;
use crate::tui::components::thinking::ThinkingIndicator;
use crate::tui::event::TuiEvent;

/// Blank rows between consecutive bubbles.
const BUBBLE_GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Set during render: content exists below the viewport
    pub has_unseen_content: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            has_unseen_content: false,
            viewport_height: 0,
        }
    }

    /// Jump to the newest entry and keep following new content.
    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub is_loading: bool,
    pub assistant_name: &'a str,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        is_loading: bool,
        assistant_name: &'a str,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            assistant_name,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() {
            self.state.layout.sync(self.messages, 0);
            self.state.has_unseen_content = false;
            LandingPage::new(self.assistant_name).render(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.layout.sync(self.messages, content_width);

        let indicator_height = if self.is_loading {
            ThinkingIndicator::HEIGHT
        } else {
            0
        };
        let messages_height = self.state.layout.messages_height();
        self.state.layout.total_height = messages_height.saturating_add(indicator_height);
        self.state.viewport_height = area.height;

        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let mut scroll_view =
            ScrollView::new(Size::new(content_width, self.state.layout.total_height))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(offset, area.height);
        let mut y = self.state.layout.top_of(visible.start);
        for i in visible {
            let height = self.state.layout.heights[i];
            let bubble_height = height.saturating_sub(BUBBLE_GAP);
            let rect = Rect::new(0, y, content_width, bubble_height);
            scroll_view.render_widget(
                MessageBubble::new(&self.messages[i], self.assistant_name),
                rect,
            );
            y = y.saturating_add(height);
        }

        if self.is_loading {
            let rect = Rect::new(0, messages_height, content_width, indicator_height);
            scroll_view.render_widget(
                ThinkingIndicator::new(self.assistant_name, self.spinner_frame),
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content =
            !self.state.stick_to_bottom && offset < self.state.max_offset();
    }
}

/// `MessageListState` persists across frames, so it is the one that reacts to scroll keys.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// Cached layout measurements, one entry per message (bubble + gap).
pub struct LayoutCache {
    ids: Vec<MessageId>,
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
    /// Messages plus the thinking indicator, if shown
    pub total_height: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
            total_height: 0,
        }
    }

    /// Number of leading cached entries still valid for `messages` at `content_width`.
    pub fn reusable_count(&self, messages: &[Message], content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.ids
            .iter()
            .zip(messages)
            .take_while(|(id, msg)| **id == msg.id())
            .count()
    }

    /// Bring the cache in line with `messages`, measuring only what changed.
    pub fn sync(&mut self, messages: &[Message], content_width: u16) {
        let keep = self.reusable_count(messages, content_width);
        self.ids.truncate(keep);
        self.heights.truncate(keep);

        for msg in &messages[keep..] {
            self.ids.push(msg.id());
            self.heights
                .push(MessageBubble::calculate_height(msg, content_width).saturating_add(BUBBLE_GAP));
        }
        self.content_width = content_width;
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn messages_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Y coordinate where entry `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    /// Entries intersecting the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
