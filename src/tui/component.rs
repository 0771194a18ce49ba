use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that can draw itself.
///
/// Props arrive as struct fields; persistent presentation state (scroll
/// offsets, draft text) is held through `&mut` references so `render` may
/// update caches while drawing, the same way Ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
