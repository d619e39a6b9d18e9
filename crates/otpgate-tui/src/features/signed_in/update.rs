use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update::restart;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('n') => restart(app),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use otpgate_core::client::ServerAck;
    use otpgate_core::flow::{FlowEvent, FlowOptions, Route, Step};

    use super::*;
    use crate::state::Screen;
    use crate::update::apply_flow;

    #[test]
    fn test_new_sign_in_starts_fresh_credential_step() {
        let mut app = AppState::new(
            FlowOptions {
                success_route: Route::Other("/home".to_string()),
                clear_pending_on_success: true,
            },
            Route::Other("/home".to_string()),
            "http://x.test",
        );

        let effects = handle_key(&mut app, KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(effects, vec![UiEffect::ClearPending]);
        assert_eq!(app.flow.step(), Step::CredentialEntry);
        assert_eq!(app.router.current(), &Route::Credentials);
    }

    #[test]
    fn test_new_sign_in_after_success_on_credentials_route() {
        let mut app = AppState::new(
            FlowOptions {
                success_route: Route::Credentials,
                clear_pending_on_success: false,
            },
            Route::Otp,
            "http://x.test",
        );
        apply_flow(&mut app, FlowEvent::OtpStepEntered { pending: None });
        apply_flow(&mut app, FlowEvent::CodePasted("123456".to_string()));
        let effects = apply_flow(&mut app, FlowEvent::SubmitOtp);
        let [UiEffect::SubmitOtp { task, .. }] = effects.as_slice() else {
            panic!("expected submit, got {effects:?}");
        };
        let task = *task;
        apply_flow(
            &mut app,
            FlowEvent::OtpResolved {
                task,
                result: Ok(ServerAck {
                    status: 200,
                    body: String::new(),
                }),
            },
        );
        assert_eq!(app.router.current(), &Route::Credentials);
        assert_eq!(app.flow.step(), Step::Authenticated);
        assert_eq!(app.screen(), Screen::SignedIn);

        let effects = handle_key(&mut app, KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(effects, vec![UiEffect::ClearPending]);
        assert_eq!(app.flow.step(), Step::CredentialEntry);
        assert_eq!(app.screen(), Screen::Credentials);
    }

    #[test]
    fn test_enter_quits() {
        let mut app = AppState::new(FlowOptions::default(), Route::Otp, "http://x.test");
        assert_eq!(
            handle_key(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            vec![UiEffect::Quit]
        );
    }
}
