use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use otpgate_core::flow::FlowEvent;
use otpgate_core::otp::OTP_LENGTH;

use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update::{apply_flow, go_back};

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let focused = app.flow.otp().focused();
    match key.code {
        KeyCode::Esc => go_back(app),
        KeyCode::Enter => apply_flow(app, FlowEvent::SubmitOtp),
        KeyCode::Left | KeyCode::BackTab => {
            apply_flow(app, FlowEvent::SlotFocused(focused.saturating_sub(1)))
        }
        KeyCode::Right | KeyCode::Tab => {
            apply_flow(app, FlowEvent::SlotFocused((focused + 1).min(OTP_LENGTH - 1)))
        }
        KeyCode::Home => apply_flow(app, FlowEvent::SlotFocused(0)),
        KeyCode::End => apply_flow(app, FlowEvent::SlotFocused(OTP_LENGTH - 1)),
        KeyCode::Delete => apply_flow(app, FlowEvent::SlotCleared(focused)),
        KeyCode::Backspace => {
            // Empty slot: step back and clear the previous digit.
            if app.flow.otp().slot(focused).is_none() && focused > 0 {
                let mut effects = apply_flow(app, FlowEvent::SlotFocused(focused - 1));
                effects.extend(apply_flow(app, FlowEvent::SlotCleared(focused - 1)));
                effects
            } else {
                apply_flow(app, FlowEvent::SlotCleared(focused))
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => apply_flow(
            app,
            FlowEvent::DigitEntered {
                index: focused,
                value: c.to_string(),
            },
        ),
        _ => vec![],
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    apply_flow(app, FlowEvent::CodePasted(text.to_string()))
}
