//! # Landing Page Component
//!
//! Welcome screen shown while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "What is the capital of France?",
    "Tell me a joke",
    "How does photosynthesis work?",
];

pub struct LandingPage<'a> {
    pub assistant_name: &'a str,
}

impl<'a> LandingPage<'a> {
    pub fn new(assistant_name: &'a str) -> Self {
        Self { assistant_name }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let muted = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(Span::styled(
                "( ··· )",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("Welcome to {} GPT", self.assistant_name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Start a conversation by typing a message below. \
                 I'm here to help with any questions you might have!",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(Span::styled("Try asking questions like:", muted)),
        ];
        lines.extend(
            EXAMPLE_PROMPTS
                .iter()
                .map(|p| Line::from(Span::styled(format!("• \"{p}\""), muted))),
        );
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            muted,
        )));
        lines
    }
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let text_width = area.width.min(64);
        let height = (lines.len() as u16 + 2).min(area.height);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [column] = Layout::horizontal([Constraint::Length(text_width)])
            .flex(Flex::Center)
            .areas(row);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, column);
    }
}
