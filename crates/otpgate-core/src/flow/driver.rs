//! Headless flow driver.
//!
//! Runs the reducer and performs its effects in order against a real client
//! and store. Navigation is tracked as a plain current route; entering the OTP
//! route loads the pending identifier, entering the credential route starts a
//! fresh credential step.

use std::collections::VecDeque;

use super::events::{FlowEffect, FlowEvent};
use super::route::Route;
use super::state::{FlowOptions, FlowState};
use super::update::update;
use crate::client::AuthClient;
use crate::store::PendingLoginStore;

pub struct FlowDriver<C, S> {
    client: C,
    store: S,
    state: FlowState,
    route: Route,
}

impl<C: AuthClient, S: PendingLoginStore> FlowDriver<C, S> {
    /// Creates a driver positioned on the credential route.
    ///
    /// Call [`FlowDriver::open`] to run the route's entry logic.
    pub fn new(client: C, store: S, options: FlowOptions) -> Self {
        Self {
            client,
            store,
            state: FlowState::new(options),
            route: Route::Credentials,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Enters `route` unconditionally, running its entry logic.
    pub async fn open(&mut self, route: Route) {
        self.route = route.clone();
        if let Some(event) = self.entry_event(&route) {
            self.dispatch(event).await;
        }
    }

    /// Applies `event` and every event produced by performing its effects.
    pub async fn dispatch(&mut self, event: FlowEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in update(&mut self.state, event) {
                if let Some(next) = self.perform(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    async fn perform(&mut self, effect: FlowEffect) -> Option<FlowEvent> {
        match effect {
            FlowEffect::SubmitCredentials { task, credentials } => {
                let result = self.client.submit_credentials(&credentials).await;
                Some(FlowEvent::CredentialsResolved { task, result })
            }
            FlowEffect::SubmitOtp { task, code } => {
                let result = self.client.submit_otp(&code).await;
                Some(FlowEvent::OtpResolved { task, result })
            }
            FlowEffect::SavePending { identifier } => {
                if let Err(e) = self.store.save(&identifier) {
                    tracing::warn!("Failed to save pending login: {e:#}");
                }
                None
            }
            FlowEffect::ClearPending => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!("Failed to clear pending login: {e:#}");
                }
                None
            }
            FlowEffect::Navigate(route) => {
                if route == self.route {
                    tracing::debug!(%route, "already on route");
                    return None;
                }
                tracing::debug!(from = %self.route, to = %route, "navigate");
                self.route = route;
                let route = self.route.clone();
                self.entry_event(&route)
            }
            FlowEffect::FocusSlot(_) => None,
        }
    }

    fn entry_event(&self, route: &Route) -> Option<FlowEvent> {
        match route {
            Route::Credentials => Some(FlowEvent::EnterCredentialStep),
            Route::Otp => Some(FlowEvent::OtpStepEntered {
                pending: self.store.load(),
            }),
            Route::Other(_) => None,
        }
    }
}
