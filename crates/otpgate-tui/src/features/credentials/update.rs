use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use otpgate_core::flow::FlowEvent;

use crate::effects::UiEffect;
use crate::state::{AppState, CredentialFocus};
use crate::update::apply_flow;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.credential_focus = app.credential_focus.toggle();
            vec![]
        }
        KeyCode::Enter => apply_flow(app, FlowEvent::SubmitCredentials),
        KeyCode::Char('r') if ctrl => apply_flow(app, FlowEvent::ToggleSecretVisibility),
        KeyCode::Char('u') if ctrl => edit_focused(app, |value| value.clear()),
        KeyCode::Backspace => edit_focused(app, |value| {
            value.pop();
        }),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            edit_focused(app, |value| value.push(c))
        }
        _ => vec![],
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() {
        return vec![];
    }
    edit_focused(app, |value| value.push_str(&cleaned))
}

fn edit_focused(app: &mut AppState, edit: impl FnOnce(&mut String)) -> Vec<UiEffect> {
    let form = app.flow.form();
    let (mut value, make_event): (String, fn(String) -> FlowEvent) = match app.credential_focus {
        CredentialFocus::Identifier => (form.identifier.clone(), FlowEvent::IdentifierChanged),
        CredentialFocus::Secret => (form.secret.clone(), FlowEvent::SecretChanged),
    };
    edit(&mut value);
    apply_flow(app, make_event(value))
}

#[cfg(test)]
mod tests {
    use otpgate_core::flow::{FlowOptions, Route};
    use otpgate_core::validation::Field;

    use super::*;

    fn app() -> AppState {
        AppState::new(FlowOptions::default(), Route::Credentials, "http://x.test")
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.flow.form().identifier, "a");
        assert_eq!(app.flow.form().secret, "b");
    }

    #[test]
    fn test_ctrl_r_toggles_secret_visibility() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert!(app.flow.form().reveal_secret);
        assert!(app.flow.form().identifier.is_empty());
    }

    #[test]
    fn test_enter_with_empty_form_shows_errors() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert!(app.flow.form().error_for(Field::Identifier).is_some());
        assert!(app.flow.form().error_for(Field::Secret).is_some());
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut app = app();
        handle_paste(&mut app, "jdoe@example.com\n");
        assert_eq!(app.flow.form().identifier, "jdoe@example.com");
    }

    #[test]
    fn test_esc_quits() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Esc), vec![UiEffect::Quit]);
    }
}
