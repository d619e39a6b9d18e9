//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Flow effects that only touch state (navigation, focus) are resolved here;
//! the rest are forwarded to the runtime as `UiEffect`s.

use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use otpgate_core::flow::{self, FlowEffect, FlowEvent, Route};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{credentials, otp, signed_in};
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.flow.is_submitting() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Flow(flow_event) => apply_flow(app, flow_event),
    }
}

/// Runs a flow event through the flow reducer and resolves its effects.
pub(crate) fn apply_flow(app: &mut AppState, event: FlowEvent) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    let mut queue = VecDeque::from([event]);

    while let Some(event) = queue.pop_front() {
        for effect in flow::update(&mut app.flow, event) {
            match effect {
                FlowEffect::SubmitCredentials { task, credentials } => {
                    effects.push(UiEffect::SubmitCredentials { task, credentials });
                }
                FlowEffect::SubmitOtp { task, code } => {
                    effects.push(UiEffect::SubmitOtp { task, code });
                }
                FlowEffect::SavePending { identifier } => {
                    effects.push(UiEffect::SavePending { identifier });
                }
                FlowEffect::ClearPending => effects.push(UiEffect::ClearPending),
                FlowEffect::Navigate(route) => {
                    if app.router.push(route.clone()) {
                        match route_entry(&route) {
                            Some(RouteEntry::Flow(ev)) => queue.push_back(ev),
                            Some(RouteEntry::Effect(eff)) => effects.push(eff),
                            None => {}
                        }
                    }
                }
                FlowEffect::FocusSlot(index) => queue.push_back(FlowEvent::SlotFocused(index)),
            }
        }
    }

    effects
}

enum RouteEntry {
    Flow(FlowEvent),
    Effect(UiEffect),
}

/// What entering `route` requires.
fn route_entry(route: &Route) -> Option<RouteEntry> {
    match route {
        Route::Credentials => Some(RouteEntry::Flow(FlowEvent::EnterCredentialStep)),
        // Needs the store, which only the runtime touches.
        Route::Otp => Some(RouteEntry::Effect(UiEffect::EnterOtpStep)),
        Route::Other(_) => None,
    }
}

/// Runs the entry logic of the current route. Used once at startup.
pub fn enter_current_route(app: &mut AppState) -> Vec<UiEffect> {
    match route_entry(app.router.current()) {
        Some(RouteEntry::Flow(event)) => apply_flow(app, event),
        Some(RouteEntry::Effect(effect)) => vec![effect],
        None => vec![],
    }
}

/// Navigates to `route` on user request.
pub(crate) fn navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    if !app.router.push(route) {
        return vec![];
    }
    enter_current_route(app)
}

/// Starts over from a fresh credential step, leaving `Authenticated` if needed.
pub(crate) fn restart(app: &mut AppState) -> Vec<UiEffect> {
    let effects = apply_flow(app, FlowEvent::Restart);
    app.router.push(Route::Credentials);
    effects
}

/// Goes back one route, or to the credential step when there is no history.
pub(crate) fn go_back(app: &mut AppState) -> Vec<UiEffect> {
    if app.router.back().is_some() {
        enter_current_route(app)
    } else {
        navigate(app, Route::Credentials)
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => match app.screen() {
            Screen::Credentials => credentials::handle_paste(app, &text),
            Screen::Otp => otp::handle_paste(app, &text),
            Screen::SignedIn => vec![],
        },
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match app.screen() {
        Screen::Credentials => credentials::handle_key(app, key),
        Screen::Otp => otp::handle_key(app, key),
        Screen::SignedIn => signed_in::handle_key(app, key),
    }
}
