//! Pure render functions.
//!
//! Rendering reads `AppState` and draws; it never mutates state.

use otpgate_core::client::AuthError;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::features::{credentials, otp, signed_in};
use crate::state::{AppState, Screen};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the whole frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(header_line(app)), header);

    match app.screen() {
        Screen::Credentials => credentials::render_credentials(frame, app, body),
        Screen::Otp => otp::render_otp(frame, app, body),
        Screen::SignedIn => signed_in::render_signed_in(frame, app, body),
    }

    frame.render_widget(Paragraph::new(footer_line(app)), footer);
}

fn header_line(app: &AppState) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            " otpgate ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.router.title()),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn footer_line(app: &AppState) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} · Ctrl+C quit", app.service_url),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Centers a `width` x `height` card inside `area`, clamped to fit.
pub fn card_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height);

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears and draws a bordered, titled card. Returns the card area.
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    width: u16,
    height: u16,
    title: &str,
    border_color: Color,
) -> Rect {
    let card = card_area(area, width, height);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, card);
    card
}

/// Card body area inside border and horizontal padding.
pub fn card_inner(card: Rect) -> Rect {
    Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    )
}

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Remote failure, worded differently for network problems and rejections.
pub fn failure_line(failure: &AuthError) -> Line<'static> {
    let (prefix, color) = match failure {
        AuthError::Network { .. } => ("Connection problem: ", Color::Yellow),
        AuthError::Rejected { .. } => ("Rejected: ", Color::Red),
    };
    Line::from(vec![
        Span::styled(
            prefix,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(failure.user_message(), Style::default().fg(color)),
    ])
}

/// Keeps the end of `text` so it fits in `width` columns, prefixing `…` when cut.
pub fn fit_tail(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_area_is_centered_and_clamped() {
        let area = Rect::new(0, 1, 100, 30);
        assert_eq!(card_area(area, 40, 10), Rect::new(30, 11, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        let card = card_area(small, 40, 10);
        assert_eq!(card.width, 18);
        assert_eq!(card.height, 5);
    }

    #[test]
    fn test_fit_tail() {
        assert_eq!(fit_tail("short", 10), "short");
        assert_eq!(fit_tail("jdoe@example.com", 8), "…ple.com");
        assert_eq!(fit_tail("abc", 0), "");
        // Wide characters count as two columns.
        assert_eq!(fit_tail("日本語", 4), "…語");
    }

    #[test]
    fn test_failure_line_distinguishes_kinds() {
        let network = failure_line(&AuthError::Network {
            message: "timed out".to_string(),
        });
        assert!(line_text(&network).starts_with("Connection problem: "));

        let rejected = failure_line(&AuthError::Rejected {
            status: 401,
            reason: "Invalid OTP".to_string(),
        });
        assert_eq!(line_text(&rejected), "Rejected: Invalid OTP");
    }

    fn draw(app: &AppState) -> String {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_each_screen() {
        use otpgate_core::flow::{FlowEvent, FlowOptions, Route};

        let mut app = AppState::new(FlowOptions::default(), Route::Credentials, "http://x.test");
        let screen = draw(&app);
        assert!(screen.contains("Sign in"));
        assert!(screen.contains("http://x.test"));

        crate::update::navigate(&mut app, Route::Otp);
        crate::update::apply_flow(
            &mut app,
            FlowEvent::OtpStepEntered {
                pending: Some("jdoe@example.com".to_string()),
            },
        );
        let screen = draw(&app);
        assert!(screen.contains("Verify code"));
        assert!(screen.contains("j*********@example.com"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        use otpgate_core::flow::{FlowOptions, Route};

        let app = AppState::new(FlowOptions::default(), Route::Otp, "http://x.test");
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER_FRAMES.len()));
    }
}
