use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Message, Sender};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the row.
const MAX_WIDTH_PERCENT: u16 = 85;
/// Room for the sender title and the clock footer.
const MIN_BUBBLE_WIDTH: u16 = 14;

/// A single chat bubble.
///
/// `MessageBubble` is a **transient component**: it's created fresh each frame
/// with the message it draws and holds no state. User bubbles hug the right
/// edge of their row, assistant bubbles the left; error replies are red.
///
/// Text is wrapped with `textwrap` once, and the same lines are used for both
/// [`calculate_height`](Self::calculate_height) and rendering, so the parent
/// `MessageList` can lay out scroll positions without drawing anything.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    /// Title shown on assistant bubbles
    pub assistant_name: &'a str,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, assistant_name: &'a str) -> Self {
        Self {
            message,
            assistant_name,
        }
    }

    fn max_width(row_width: u16) -> u16 {
        let capped = (row_width as u32 * MAX_WIDTH_PERCENT as u32 / 100) as u16;
        capped.max(MIN_BUBBLE_WIDTH).min(row_width)
    }

    fn wrap(text: &str, width: u16) -> Vec<String> {
        let text = text.trim();
        if width == 0 || text.is_empty() {
            return vec![String::new()];
        }
        let options = textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        textwrap::wrap(text, options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Outer width of the bubble for a row `row_width` cells wide.
    pub fn bubble_width(message: &Message, row_width: u16) -> u16 {
        let max = Self::max_width(row_width);
        let lines = Self::wrap(message.text(), max.saturating_sub(HORIZONTAL_OVERHEAD));
        let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        let widest = u16::try_from(widest).unwrap_or(u16::MAX);
        widest
            .saturating_add(HORIZONTAL_OVERHEAD)
            .clamp(MIN_BUBBLE_WIDTH.min(max), max)
    }

    /// Rows needed to draw `message` in a row `row_width` cells wide.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let inner = Self::bubble_width(message, row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        // Saturates for replies taller than a u16 canvas
        let rows = Self::wrap(message.text(), inner).len();
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> &'a str {
        match self.message.sender() {
            Sender::User => "You",
            Sender::Ai => self.assistant_name,
        }
    }
}

/// Border and text styles for a message.
pub(crate) fn bubble_style(message: &Message) -> (Style, Style) {
    match (message.sender(), message.is_error()) {
        (Sender::User, _) => (
            Style::default().fg(Color::Blue),
            Style::default().fg(Color::White),
        ),
        (Sender::Ai, true) => (
            Style::default().fg(Color::Red),
            Style::default().fg(Color::LightRed),
        ),
        (Sender::Ai, false) => (
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            Style::default(),
        ),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(self.message, area.width);
        let x = match self.message.sender() {
            Sender::User => area.x + area.width.saturating_sub(width),
            Sender::Ai => area.x,
        };
        let bubble_area = Rect::new(x, area.y, width, area.height);

        let (border_style, text_style) = bubble_style(self.message);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(self.title()).style(border_style.add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(self.message.time_label()).right_aligned())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let lines: Vec<Line> = Self::wrap(self.message.text(), inner_area.width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines).style(text_style).render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::MessageId;

    fn user(text: &str) -> Message {
        Message::user(MessageId(1), text.to_string())
    }

    fn ai(text: &str) -> Message {
        Message::ai(MessageId(2), text.to_string())
    }

    fn render_row(message: &Message, width: u16) -> Buffer {
        let height = MessageBubble::calculate_height(message, width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MessageBubble::new(message, "Zoid").render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn short_message_is_one_line_plus_borders() {
        assert_eq!(MessageBubble::calculate_height(&user("Hello"), 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn whitespace_only_still_occupies_a_row() {
        assert_eq!(MessageBubble::calculate_height(&ai("   \n "), 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn zero_width_returns_minimum() {
        assert_eq!(MessageBubble::calculate_height(&user("Hello"), 0), 1);
    }

    #[test]
    fn huge_message_height_saturates() {
        let almost = user(&"x\n".repeat(65_534));
        assert_eq!(MessageBubble::calculate_height(&almost, 80), u16::MAX);

        let taller = user(&"x\n".repeat(70_000));
        assert_eq!(MessageBubble::calculate_height(&taller, 80), u16::MAX);
    }

    #[test]
    fn bubble_never_exceeds_85_percent() {
        let long = "a".repeat(300);
        assert_eq!(MessageBubble::bubble_width(&user(&long), 100), 85);
        assert!(MessageBubble::bubble_width(&user(&"word ".repeat(100)), 100) <= 85);
    }

    #[test]
    fn bubble_shrinks_to_fit_short_text() {
        assert_eq!(MessageBubble::bubble_width(&user("Hi"), 100), MIN_BUBBLE_WIDTH);
        let text = "a".repeat(30);
        assert_eq!(MessageBubble::bubble_width(&user(&text), 100), 30 + HORIZONTAL_OVERHEAD);
    }

    #[test]
    fn long_text_wraps_inside_bubble() {
        // 85% of 20 = 17 wide, 13 text columns: "Hello world again" wraps to 2 rows
        assert_eq!(
            MessageBubble::calculate_height(&ai("Hello world again"), 20),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn user_bubble_is_right_aligned() {
        let buf = render_row(&user("Hello"), 40);
        let top = row_text(&buf, 0);
        assert!(top.starts_with(' '), "left side should be empty: {top:?}");
        assert!(top.trim_end().ends_with('╮'));
        assert!(top.contains("You"));
    }

    #[test]
    fn assistant_bubble_is_left_aligned() {
        let buf = render_row(&ai("Hi there"), 40);
        let top = row_text(&buf, 0);
        assert!(top.starts_with('╭'));
        assert!(top.contains("Zoid"));
        assert!(row_text(&buf, 1).contains("Hi there"));
    }

    #[test]
    fn error_bubble_is_red() {
        let msg = Message::ai_error(MessageId(3));
        let (border, text) = bubble_style(&msg);
        assert_eq!(border.fg, Some(Color::Red));
        assert_eq!(text.fg, Some(Color::LightRed));

        let (border, _) = bubble_style(&ai("fine"));
        assert_ne!(border.fg, Some(Color::Red));
    }

    #[test]
    fn footer_shows_time() {
        let msg = user("Hello");
        let buf = render_row(&msg, 40);
        assert!(row_text(&buf, 2).contains(&msg.time_label()));
    }
}
