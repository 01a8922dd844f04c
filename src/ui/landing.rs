//! Landing page: navigation buttons and the last committed registration

use crate::app::App;
use crate::state::{FormStore, LandingButton};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const BUTTON_WIDTH: u16 = 24;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BUTTON_WIDTH + 4), // Buttons
            Constraint::Min(30),                  // Committed record
        ])
        .split(area);

    draw_buttons(frame, chunks[0], app);
    draw_committed(frame, chunks[1], &app.state.store);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Forms ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(LandingButton::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let selected = app.state.selected_landing_button();
    for (button, row) in LandingButton::ALL.iter().zip(rows.iter().skip(1)) {
        render_button(
            frame,
            *row,
            button.label(),
            *button == selected,
            button.is_enabled(),
            None,
        );
    }
}

fn draw_committed(frame: &mut Frame, area: Rect, store: &FormStore) {
    let block = Block::default()
        .title(" Last submission ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(committed_at) = store.committed_at() else {
        let empty = Paragraph::new("Nothing submitted yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let data = store.data();
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), label_style),
            Span::raw(value),
        ])
    };
    let picture = data
        .picture
        .split_once(',')
        .map(|(meta, _)| meta.trim_start_matches("data:").to_string())
        .unwrap_or_default();

    let lines = vec![
        row("Name", data.name.clone()),
        row("Age", data.age.clone()),
        row("Email", data.email.clone()),
        row("Gender", data.gender.clone()),
        row("Terms", if data.terms { "accepted" } else { "-" }.to_string()),
        row("Picture", picture),
        row("Country", data.country_select.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!("Saved {}", committed_at.format("%Y-%m-%d %H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
