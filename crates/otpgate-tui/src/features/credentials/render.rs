//! Credential form view.

use otpgate_core::validation::Field;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::render::{card_inner, failure_line, fit_tail, render_card, spinner};
use crate::state::{AppState, CredentialFocus};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 16;
const SECRET_MASK: char = '•';

pub fn render_credentials(frame: &mut Frame, app: &AppState, area: Rect) {
    let card = render_card(frame, area, CARD_WIDTH, CARD_HEIGHT, "Sign in", Color::Cyan);
    let inner = card_inner(card);
    let lines = credential_lines(app, inner.width);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Lines for the credential card body.
pub fn credential_lines(app: &AppState, width: u16) -> Vec<Line<'static>> {
    let form = app.flow.form();
    let field_width = width.saturating_sub(4) as usize;

    let secret_display = if form.reveal_secret {
        form.secret.clone()
    } else {
        SECRET_MASK.to_string().repeat(form.secret.chars().count())
    };

    let mut lines = vec![Line::from(Span::styled(
        "Enter your email and password.",
        Style::default().fg(Color::White),
    ))];
    lines.push(Line::from(""));

    lines.extend(field_lines(
        Field::Identifier.label(),
        &fit_tail(&form.identifier, field_width),
        app.credential_focus == CredentialFocus::Identifier,
        form.error_for(Field::Identifier).map(ToString::to_string),
    ));
    lines.extend(field_lines(
        Field::Secret.label(),
        &fit_tail(&secret_display, field_width),
        app.credential_focus == CredentialFocus::Secret,
        form.error_for(Field::Secret).map(ToString::to_string),
    ));

    let toggle_hint = if form.reveal_secret {
        "Ctrl+R hide password"
    } else {
        "Ctrl+R show password"
    };
    lines.push(Line::from(Span::styled(
        toggle_hint,
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if let Some(failure) = app.flow.failure() {
        lines.push(failure_line(failure));
    }

    lines.push(submit_line(app));
    lines.push(Line::from(Span::styled(
        "Tab switch field · Enter sign in · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn field_lines(
    label: &str,
    value: &str,
    focused: bool,
    error: Option<String>,
) -> Vec<Line<'static>> {
    let (marker, value_style) = if focused {
        (
            "› ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    let label_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut value_spans = vec![
        Span::styled(marker, value_style),
        Span::styled(value.to_string(), value_style),
    ];
    if focused {
        value_spans.push(Span::styled(
            "▏",
            Style::default().fg(Color::Yellow),
        ));
    }

    let mut lines = vec![
        Line::from(Span::styled(label.to_string(), label_style)),
        Line::from(value_spans),
    ];
    match error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines
}

fn submit_line(app: &AppState) -> Line<'static> {
    if app.flow.is_submitting() {
        Line::from(Span::styled(
            format!("{} Signing in...", spinner(app.spinner_frame)),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "[ Sign in ]",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }
}
