use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Submit,
    ClearChat,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Newline,
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom,
    Resize,
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub(crate) fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // With keyboard enhancement enabled the terminal also reports releases.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
        KeyCode::Char('l') if ctrl => Some(TuiEvent::ClearChat),
        // Ctrl+J is ASCII LF; most terminals send it for Ctrl+Enter
        KeyCode::Char('j') if ctrl => Some(TuiEvent::Newline),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter
            if key_event
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            Some(TuiEvent::Newline)
        }
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End if ctrl => Some(TuiEvent::ScrollToBottom),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Esc => Some(TuiEvent::Quit),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}
