//! Cursor and internal scroll tracking for the InputBox.
//!
//! The draft text itself is owned by `InputBox`; every method here takes it
//! as `draft: &str` so the dependency stays explicit.

use super::text_wrap::{
    MAX_VISIBLE_LINES, TEXT_INSET_X, TEXT_INSET_Y, inner_width, wrap_options, wrapped_rows,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the draft (0..=draft.len()), always on a char boundary
    pub pos: usize,
    /// First wrapped row shown when the draft is taller than the box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped row (0-based) holding the cursor.
    pub fn row(&self, draft: &str, outer_width: u16) -> u16 {
        let width = inner_width(outer_width);
        if width == 0 || self.pos == 0 {
            return 0;
        }
        wrapped_rows(&draft[..self.pos], width) - 1
    }

    /// Keep the cursor row inside the visible window.
    pub fn follow(&mut self, draft: &str, outer_width: u16) {
        let total = wrapped_rows(draft, inner_width(outer_width));
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }
        let row = self.row(draft, outer_width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset.saturating_add(MAX_VISIBLE_LINES) {
            self.scroll_offset = row.saturating_add(1) - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal cell for the cursor inside `area`.
    pub fn screen_pos(&self, draft: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + TEXT_INSET_X.min(area.width), area.y + TEXT_INSET_Y);
        }

        let before = &draft[..self.pos];
        // Columns are counted on the raw text: textwrap trims trailing spaces.
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let logical = &before[line_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|s| s.chars().count())
            .sum();
        let chars = logical.chars().count();
        let col = u16::try_from(chars - consumed.min(chars)).unwrap_or(u16::MAX);

        let visible_row = self.row(draft, area.width).saturating_sub(self.scroll_offset);
        (
            area.x.saturating_add(TEXT_INSET_X).saturating_add(col.min(width)),
            area.y.saturating_add(TEXT_INSET_Y).saturating_add(visible_row),
        )
    }
}
