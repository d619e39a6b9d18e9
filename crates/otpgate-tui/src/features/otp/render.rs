//! Code entry view.

use otpgate_core::otp::{OTP_LENGTH, OtpEntry};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::render::{card_inner, failure_line, render_card, spinner};
use crate::state::AppState;

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 13;

pub fn render_otp(frame: &mut Frame, app: &AppState, area: Rect) {
    let card = render_card(
        frame,
        area,
        CARD_WIDTH,
        CARD_HEIGHT,
        "Verify code",
        Color::Magenta,
    );
    let inner = card_inner(card);
    frame.render_widget(Paragraph::new(otp_lines(app)), inner);
}

/// Lines for the code card body.
pub fn otp_lines(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Enter the {OTP_LENGTH}-digit code"),
        Style::default().fg(Color::White),
    ))];

    // Without a pending login the prompt is simply left unlabeled.
    match app.flow.masked_identifier() {
        Some(masked) => lines.push(Line::from(vec![
            Span::styled("sent to ", Style::default().fg(Color::Gray)),
            Span::styled(
                masked.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(""));

    lines.push(slot_line(app.flow.otp()));
    match app.flow.otp_error() {
        Some(err) => lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }

    if let Some(failure) = app.flow.failure() {
        lines.push(failure_line(failure));
    }

    if app.flow.is_submitting() {
        lines.push(Line::from(Span::styled(
            format!("{} Verifying...", spinner(app.spinner_frame)),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[ Verify ]",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        "←/→ move · Backspace clear · Enter verify · Esc back",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn slot_line(entry: &OtpEntry) -> Line<'static> {
    let mut spans = Vec::with_capacity(OTP_LENGTH * 2);
    for (index, slot) in entry.slots().iter().enumerate() {
        let focused = index == entry.focused();
        let text = format!(" {} ", slot.unwrap_or('_'));
        let style = match (focused, entry.is_selected()) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            (false, _) if slot.is_some() => Style::default().fg(Color::White),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(text, style));
        if index + 1 < OTP_LENGTH {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}
