//! Application state for the sign-in TUI.

use otpgate_core::flow::{FlowOptions, FlowState, Route, Step};

use crate::router::Router;

/// Credential form field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialFocus {
    #[default]
    Identifier,
    Secret,
}

impl CredentialFocus {
    pub fn toggle(self) -> Self {
        match self {
            CredentialFocus::Identifier => CredentialFocus::Secret,
            CredentialFocus::Secret => CredentialFocus::Identifier,
        }
    }
}

/// Screen currently shown, derived from route and flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Credentials,
    Otp,
    SignedIn,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub flow: FlowState,
    pub router: Router,
    pub credential_focus: CredentialFocus,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// Service base URL, shown in the footer.
    pub service_url: String,
}

impl AppState {
    pub fn new(options: FlowOptions, start: Route, service_url: impl Into<String>) -> Self {
        Self {
            flow: FlowState::new(options),
            router: Router::new(start),
            credential_focus: CredentialFocus::default(),
            should_quit: false,
            spinner_frame: 0,
            service_url: service_url.into(),
        }
    }

    pub fn screen(&self) -> Screen {
        if self.flow.step() == Step::Authenticated {
            return Screen::SignedIn;
        }
        match self.router.current() {
            Route::Credentials => Screen::Credentials,
            Route::Otp => Screen::Otp,
            Route::Other(_) => Screen::SignedIn,
        }
    }
}
