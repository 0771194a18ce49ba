//! # TitleBar Component
//!
//! Top status bar: app name, backend connectivity, status text and the
//! "↓ New" marker when the newest messages are scrolled out of view.
//!
//! TitleBar is purely presentational. It receives everything as props and
//! keeps no state between frames.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SHORTCUTS_HINT: &str = "Ctrl+L clear · Esc quit";

/// Top status bar component.
pub struct TitleBar<'a> {
    pub assistant_name: &'a str,
    pub is_online: bool,
    /// Model reported by the last successful health probe
    pub model: Option<&'a str>,
    pub status_message: &'a str,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        assistant_name: &'a str,
        is_online: bool,
        model: Option<&'a str>,
        status_message: &'a str,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            assistant_name,
            is_online,
            model,
            status_message,
            has_unseen_content,
        }
    }

    fn connectivity(&self) -> Span<'static> {
        if self.is_online {
            Span::styled("●", Style::default().fg(Color::Green))
        } else {
            Span::styled("○", Style::default().fg(Color::Red))
        }
    }

    fn status_line(&self) -> Line<'a> {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled(
                format!("{} GPT", self.assistant_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            self.connectivity(),
        ];
        if let Some(model) = self.model {
            spans.push(Span::styled(
                format!(" ({model})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::raw(self.status_message));
        }
        if self.has_unseen_content {
            spans.push(separator);
            spans.push(Span::styled("↓ New", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint_width = SHORTCUTS_HINT.chars().count() as u16;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width)]).areas(area);

        frame.render_widget(self.status_line(), left);
        frame.render_widget(
            Line::from(SHORTCUTS_HINT)
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn online_shows_model_and_status() {
        let text = render(&mut TitleBar::new(
            "Zoid",
            true,
            Some("tiny-llama"),
            "Online",
            false,
        ));
        assert!(text.contains("Zoid GPT"));
        assert!(text.contains('●'));
        assert!(text.contains("tiny-llama"));
        assert!(text.contains("Online"));
        assert!(text.contains("Esc quit"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn offline_uses_hollow_marker() {
        let text = render(&mut TitleBar::new("Zoid", false, None, "Offline", false));
        assert!(text.contains('○'));
        assert!(!text.contains('●'));
        assert!(text.contains("Offline"));
    }

    #[test]
    fn unseen_content_marker() {
        let text = render(&mut TitleBar::new("Zoid", true, None, "Online", true));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn empty_status_has_no_separator() {
        let text = render(&mut TitleBar::new("Zoid", true, None, "", false));
        assert!(!text.contains('|'));
    }
}
