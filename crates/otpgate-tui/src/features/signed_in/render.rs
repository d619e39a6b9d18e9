//! Signed-in view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::render::{card_inner, render_card};
use crate::state::AppState;

const CARD_WIDTH: u16 = 48;
const CARD_HEIGHT: u16 = 8;

pub fn render_signed_in(frame: &mut Frame, app: &AppState, area: Rect) {
    let card = render_card(frame, area, CARD_WIDTH, CARD_HEIGHT, "Signed in", Color::Green);
    frame.render_widget(Paragraph::new(signed_in_lines(app)), card_inner(card));
}

pub fn signed_in_lines(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "✓ Code verified. You are signed in.",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(masked) = app.flow.masked_identifier() {
        lines.push(Line::from(Span::styled(
            format!("Account: {masked}"),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter quit · n sign in again",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
