//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply outstanding): draws every ~80ms so the thinking dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events, health reports
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{Backend, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Availability, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// `App::revision()` seen by the last sync
    last_revision: u64,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(app.assistant_name.clone()),
            last_revision: app.revision(),
        }
    }

    /// Push App state into component props.
    ///
    /// Any change to the message list scrolls to the newest message, even if
    /// the user had scrolled away.
    pub fn sync(&mut self, app: &App) {
        self.input_box.availability = if !app.is_online {
            Availability::Offline
        } else if app.is_loading {
            Availability::Busy
        } else {
            Availability::Ready
        };

        if app.revision() != self.last_revision {
            self.last_revision = app.revision();
            self.message_list.scroll_to_bottom();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter apart from Enter.
        // Terminals without support ignore it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP backend described by `config`.
pub fn build_backend(config: &ResolvedConfig) -> std::io::Result<Arc<dyn Backend>> {
    let backend = HttpBackend::new(config.base_url.clone(), config.request_timeout)
        .map_err(std::io::Error::other)?;
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config)?;
    info!("Using backend at {}", backend.base_url());

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut health = tasks::spawn_health_probe(backend.clone(), config.health_interval, tx.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        tui.sync(&app);

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = match poll_event_timeout(timeout) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything already queued before the next draw
        let mut should_quit = false;
        let pending = std::iter::from_fn(|| poll_event_immediate().ok().flatten());
        for event in first_event.into_iter().chain(pending) {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ClearChat => {
                    update(&mut app, Action::ClearChat);
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        let effect = update(&mut app, Action::Submit(text));
                        if let Effect::SpawnGenerate { request_id, prompt } = effect {
                            tasks::spawn_generate(
                                backend.clone(),
                                config.generate.clone(),
                                request_id,
                                prompt,
                                tx.clone(),
                            );
                        }
                        // Availability follows App from here on
                        tui.sync(&app);
                    }
                }
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break Ok(());
        }

        // Outcomes from background tasks (health reports, replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(&mut app, action);
        }
    };

    health.dispose();
    ratatui::restore();
    info!("Zoid shutting down");
    result
}
