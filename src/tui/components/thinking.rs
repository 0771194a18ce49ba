//! Transient "thinking" bubble shown under the conversation while a reply is outstanding.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// Borders (2) + padding (2) + three dots and the gap before the label (5) + slack (1).
const BUBBLE_OVERHEAD: u16 = 10;

pub struct ThinkingIndicator<'a> {
    pub assistant_name: &'a str,
    /// Animation frame counter, advanced by the event loop
    pub frame: usize,
}

impl<'a> ThinkingIndicator<'a> {
    /// Bubble height (one text row plus borders) plus a spacer row above it.
    pub const HEIGHT: u16 = 4;

    pub fn new(assistant_name: &'a str, frame: usize) -> Self {
        Self {
            assistant_name,
            frame,
        }
    }

    /// Three bouncing dots: one of them is lit at a time.
    fn dots(&self) -> Vec<Span<'static>> {
        let lit = (self.frame / 3) % 3;
        (0..3)
            .map(|i| {
                let style = if i == lit {
                    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled("●", style)
            })
            .collect()
    }

    pub fn label(&self) -> String {
        format!("{} is thinking...", self.assistant_name)
    }

    /// Outer bubble width for `label`, capped at `available`.
    fn bubble_width(label: &str, available: u16) -> u16 {
        u16::try_from(label.width())
            .unwrap_or(u16::MAX)
            .saturating_add(BUBBLE_OVERHEAD)
            .min(available)
    }
}

impl<'a> Widget for ThinkingIndicator<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.label();
        let width = Self::bubble_width(&label, area.width);
        // Skip the spacer row
        let bubble = Rect::new(
            area.x,
            area.y.saturating_add(1),
            width,
            area.height.saturating_sub(1).min(3),
        );

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let mut spans = self.dots();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
