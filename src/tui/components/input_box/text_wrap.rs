//! Wrapping helpers and box dimensions for the InputBox.
//!
//! Stateless. The same `textwrap` options are used for measuring and for
//! cursor placement so the two never disagree.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Draft lines shown before the box starts scrolling internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Left border + left padding before the first text column
pub(super) const TEXT_INSET_X: u16 = 2;
/// Top border before the first text row
pub(super) const TEXT_INSET_Y: u16 = 1;

pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text columns available inside a box of `outer_width`. 0 when too narrow.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Number of rows `text` occupies at `width`, never less than one.
///
/// A trailing newline opens a fresh (empty) row even though textwrap
/// does not always report one.
pub(super) fn wrapped_rows(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let rows = textwrap::wrap(text, wrap_options(width));
    let mut count = u16::try_from(rows.len()).unwrap_or(u16::MAX).max(1);
    if text.ends_with('\n') && !rows.last().is_some_and(|r| r.is_empty()) {
        count = count.saturating_add(1);
    }
    count
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
