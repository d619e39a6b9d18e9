//! Effect handlers for the TUI runtime.
//!
//! Remote calls are pure async functions returning a `UiEvent`; the runtime
//! spawns them and sends the result to the inbox. Store access is quick local
//! I/O and runs inline so it stays ordered with the effects around it.

use std::sync::Arc;

use otpgate_core::client::{AuthClient, Credentials};
use otpgate_core::flow::{FlowEvent, TaskId};
use otpgate_core::store::PendingLoginStore;

use crate::events::UiEvent;

/// Sends credentials.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn submit_credentials<C: AuthClient>(
    client: Arc<C>,
    task: TaskId,
    credentials: Credentials,
) -> UiEvent {
    let result = client.submit_credentials(&credentials).await;
    UiEvent::Flow(FlowEvent::CredentialsResolved { task, result })
}

/// Sends the code.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn submit_otp<C: AuthClient>(client: Arc<C>, task: TaskId, code: String) -> UiEvent {
    let result = client.submit_otp(&code).await;
    UiEvent::Flow(FlowEvent::OtpResolved { task, result })
}

pub fn save_pending(store: &mut dyn PendingLoginStore, identifier: &str) {
    if let Err(e) = store.save(identifier) {
        tracing::warn!("Failed to save pending login: {e:#}");
    }
}

pub fn clear_pending(store: &mut dyn PendingLoginStore) {
    if let Err(e) = store.clear() {
        tracing::warn!("Failed to clear pending login: {e:#}");
    }
}

/// Reads the pending identifier for the code step.
pub fn enter_otp_step(store: &dyn PendingLoginStore) -> UiEvent {
    UiEvent::Flow(FlowEvent::OtpStepEntered {
        pending: store.load(),
    })
}
