//! UI module for rendering the TUI

mod components;
mod forms;
mod landing;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Landing => landing::draw(frame, main_area, app),
        View::Registration => forms::draw_registration(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Alerts block everything else until dismissed
    if let Some(message) = app.state.current_alert() {
        components::render_alert_dialog(frame, message);
    }
}
