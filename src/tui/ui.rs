use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

const SEND_HINT: &str = "Press Enter to send, Shift+Enter for new line";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)]);
    let [title_area, main_area, input_area, hint_area] = layout.areas(frame.area());

    // Messages first: rendering updates the unseen-content flag the title bar shows
    MessageList::new(
        &mut tui.message_list,
        app.messages(),
        app.is_loading,
        &app.assistant_name,
        spinner_frame,
    )
    .render(frame, main_area);

    TitleBar::new(
        &app.assistant_name,
        app.is_online,
        app.backend_model.as_deref(),
        &app.status_message,
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);

    frame.render_widget(
        Line::from(SEND_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        hint_area,
    );
}
