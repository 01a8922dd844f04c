//! Registration form rendering

use super::field_renderer::{draw_field, draw_help_text};
use crate::app::App;
use crate::state::{FieldId, FieldKind, FormData, RegistrationForm, GENDERS};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw the registration form
pub fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(" Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FIELD_HEIGHT * 5), // Fields
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help text
        ])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let (left, right) = FieldId::INPUTS.split_at(5);
    draw_column(frame, columns[0], form, left);
    draw_column(frame, columns[1], form, right);

    let submit_area = Rect {
        width: rows[1].width.min(14),
        ..rows[1]
    };
    render_button(
        frame,
        submit_area,
        "Submit",
        form.is_submit_active(),
        true,
        Some(Color::Green),
    );

    let mut hints = vec![("Tab", "next"), ("Shift+Tab", "prev")];
    hints.extend(active_hints(form.active_field_id()));
    hints.push((crate::platform::SUBMIT_SHORTCUT, "submit"));
    hints.push(("Esc", "back"));
    draw_help_text(frame, rows[2], &hints);
}

fn draw_column(frame: &mut Frame, area: Rect, form: &RegistrationForm, fields: &[FieldId]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (field, chunk) in fields.iter().zip(chunks.iter()) {
        let is_active = form.active_field_id() == Some(*field);
        let error = form.errors().message(*field);
        let value = field_display(form, *field);
        draw_field(
            frame,
            *chunk,
            &field_label(form.draft(), *field),
            &value,
            is_active,
            field.accepts_text() || *field == FieldId::Picture,
            error.as_deref(),
        );
    }
}

fn field_label(draft: &FormData, field: FieldId) -> String {
    match field {
        FieldId::Picture => match describe_picture(&draft.picture) {
            Some(summary) => format!("{} [{summary}]", field.label()),
            None => field.label().to_string(),
        },
        _ => field.label().to_string(),
    }
}

/// Rendered value of a field
fn field_display(form: &RegistrationForm, field: FieldId) -> String {
    let draft = form.draft();
    match field.kind() {
        FieldKind::Text => match field {
            FieldId::Name => draft.name.clone(),
            FieldId::Age => draft.age.clone(),
            _ => draft.email.clone(),
        },
        FieldKind::Secret => {
            let value = match field {
                FieldId::Password => &draft.password,
                _ => &draft.confirm_password,
            };
            "•".repeat(value.chars().count())
        }
        FieldKind::Radio => GENDERS
            .iter()
            .map(|g| {
                let mark = if draft.gender == *g { "(•)" } else { "( )" };
                format!("{mark} {}", capitalize(g))
            })
            .collect::<Vec<_>>()
            .join("  "),
        FieldKind::Checkbox => {
            let mark = if draft.terms { "[x]" } else { "[ ]" };
            format!("{mark} I accept")
        }
        FieldKind::File => form.picture_path.clone(),
        FieldKind::Select => {
            if draft.country_select.is_empty() {
                "< choose >".to_string()
            } else {
                format!("< {} >", draft.country_select)
            }
        }
    }
}

fn active_hints(field: Option<FieldId>) -> Vec<(&'static str, &'static str)> {
    match field.map(FieldId::kind) {
        Some(FieldKind::Radio) | Some(FieldKind::Select) => {
            vec![("←/→", "change"), ("Space", "next option")]
        }
        Some(FieldKind::Checkbox) => vec![("Space", "toggle")],
        Some(FieldKind::File) => vec![("Enter", "load picture")],
        None => vec![("Enter", "submit")],
        _ => vec![],
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Short description of a `data:` URL, e.g. `image/png, 12 KiB`
fn describe_picture(data_url: &str) -> Option<String> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.split(';').next().unwrap_or(meta);
    let bytes = payload.len() * 3 / 4;
    Some(format!("{mime}, {} KiB", bytes.div_ceil(1024)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Cycle, Form};

    #[test]
    fn test_secret_fields_are_masked() {
        let mut form = RegistrationForm::new(&FormData::default());
        form.set_active_field(3);
        "abc".chars().for_each(|c| form.input_char(c));
        form.next_field();
        "ab".chars().for_each(|c| form.input_char(c));
        assert_eq!(field_display(&form, FieldId::Password), "•••");
        assert_eq!(field_display(&form, FieldId::ConfirmPassword), "••");
    }

    #[test]
    fn test_radio_marks_selected_gender() {
        let form = RegistrationForm::new(&FormData::default());
        assert_eq!(
            field_display(&form, FieldId::Gender),
            "(•) Male  ( ) Female"
        );
    }

    #[test]
    fn test_select_placeholder() {
        let mut form = RegistrationForm::new(&FormData::default());
        assert_eq!(field_display(&form, FieldId::CountrySelect), "< choose >");
        form.set_active_field(8);
        form.cycle_active(Cycle::Prev);
        assert_eq!(field_display(&form, FieldId::CountrySelect), "< China >");
    }

    #[test]
    fn test_describe_picture() {
        let url = format!("data:image/png;base64,{}", "A".repeat(4096));
        assert_eq!(describe_picture(&url).unwrap(), "image/png, 3 KiB");
        assert!(describe_picture("").is_none());
        assert!(describe_picture("not a url").is_none());
    }

    #[test]
    fn test_picture_label_includes_summary() {
        let draft = FormData {
            picture: "data:image/jpeg;base64,AAAA".to_string(),
            ..FormData::default()
        };
        assert!(field_label(&draft, FieldId::Picture).ends_with("[image/jpeg, 1 KiB]"));
    }
}
