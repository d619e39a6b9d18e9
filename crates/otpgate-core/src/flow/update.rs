//! Flow reducer.
//!
//! `update` mutates [`FlowState`] and returns the effects to perform. It never
//! does I/O itself.

use super::events::{FlowEffect, FlowEvent};
use super::route::Route;
use super::state::{CredentialForm, FlowState, Step};
use super::task::{TaskId, TaskKind, TaskMeta};
use crate::client::{AuthError, Credentials, ServerAck};
use crate::mask::mask_identifier;
use crate::otp::{DigitOutcome, OTP_LENGTH};
use crate::validation::{validate_credentials, validate_otp};

/// Applies one event and returns the resulting effects.
pub fn update(state: &mut FlowState, event: FlowEvent) -> Vec<FlowEffect> {
    match event {
        // Route entry never leaves the terminal state; only `Restart` does.
        FlowEvent::EnterCredentialStep | FlowEvent::OtpStepEntered { .. }
            if state.step == Step::Authenticated =>
        {
            tracing::debug!("already authenticated, ignoring step entry");
            vec![]
        }
        FlowEvent::EnterCredentialStep | FlowEvent::Restart => enter_credential_step(state),
        FlowEvent::OtpStepEntered { pending } => {
            enter_otp_step(state, pending.as_deref());
            vec![]
        }

        FlowEvent::IdentifierChanged(value) => {
            state.form.set_identifier(value);
            vec![]
        }
        FlowEvent::SecretChanged(value) => {
            state.form.set_secret(value);
            vec![]
        }
        FlowEvent::ToggleSecretVisibility => {
            state.form.reveal_secret = !state.form.reveal_secret;
            vec![]
        }
        FlowEvent::SubmitCredentials => submit_credentials(state),
        FlowEvent::CredentialsResolved { task, result } => {
            credentials_resolved(state, task, result)
        }

        FlowEvent::DigitEntered { index, value } => digit_entered(state, index, &value),
        FlowEvent::SlotFocused(index) => {
            if state.step == Step::AwaitingOtp {
                state.otp.focus_slot(index);
            }
            vec![]
        }
        FlowEvent::SlotCleared(index) => {
            if state.step == Step::AwaitingOtp {
                state.otp.clear_slot(index);
            }
            vec![]
        }
        FlowEvent::CodePasted(text) => code_pasted(state, &text),
        FlowEvent::SubmitOtp => submit_otp(state),
        FlowEvent::OtpResolved { task, result } => otp_resolved(state, task, result),
    }
}

fn enter_credential_step(state: &mut FlowState) -> Vec<FlowEffect> {
    tracing::debug!("entering credential step");
    state.step = Step::CredentialEntry;
    state.task.clear();
    state.form = CredentialForm::default();
    state.otp.reset();
    state.otp_error = None;
    state.masked_identifier = None;
    state.failure = None;
    vec![FlowEffect::ClearPending]
}

fn enter_otp_step(state: &mut FlowState, pending: Option<&str>) {
    state.step = Step::AwaitingOtp;
    state.task.clear();
    state.otp.reset();
    state.otp_error = None;
    state.failure = None;
    state.masked_identifier = pending.filter(|p| !p.is_empty()).map(mask_identifier);
    tracing::debug!(
        masked = state.masked_identifier.as_deref().unwrap_or("<none>"),
        "entered otp step"
    );
}

fn submit_credentials(state: &mut FlowState) -> Vec<FlowEffect> {
    if state.step != Step::CredentialEntry {
        return vec![];
    }
    if state.task.is_running() {
        tracing::debug!("ignoring credential submit while a request is in flight");
        return vec![];
    }

    if let Err(errors) = validate_credentials(&state.form.identifier, &state.form.secret) {
        state.form.errors = errors;
        return vec![];
    }

    state.form.errors.clear();
    state.failure = None;

    let identifier = state.form.identifier.clone();
    let task = state.task.start(
        &mut state.task_seq,
        TaskKind::CredentialSubmit,
        TaskMeta::Credentials {
            identifier: identifier.clone(),
        },
    );
    vec![FlowEffect::SubmitCredentials {
        task,
        credentials: Credentials::new(identifier, state.form.secret.clone()),
    }]
}

fn credentials_resolved(
    state: &mut FlowState,
    task: TaskId,
    result: Result<ServerAck, AuthError>,
) -> Vec<FlowEffect> {
    let Some(meta) = state.task.finish_if_active(task) else {
        tracing::debug!(?task, "dropping stale credential result");
        return vec![];
    };

    match result {
        Ok(ack) => {
            let TaskMeta::Credentials { identifier } = meta else {
                return vec![];
            };
            tracing::info!(
                status = ack.status,
                identifier = %mask_identifier(&identifier),
                "credentials accepted"
            );
            state.step = Step::AwaitingOtp;
            state.form.secret.clear();
            state.form.reveal_secret = false;
            vec![
                FlowEffect::SavePending { identifier },
                FlowEffect::Navigate(Route::Otp),
            ]
        }
        Err(err) => {
            tracing::warn!(error = %err, "credential submission failed");
            state.failure = Some(err);
            vec![]
        }
    }
}

fn digit_entered(state: &mut FlowState, index: usize, value: &str) -> Vec<FlowEffect> {
    if state.step != Step::AwaitingOtp {
        return vec![];
    }
    match state.otp.set_digit(index, value) {
        DigitOutcome::Rejected => vec![],
        DigitOutcome::Accepted { advance_to } => {
            state.otp_error = None;
            advance_to.map(FlowEffect::FocusSlot).into_iter().collect()
        }
    }
}

fn code_pasted(state: &mut FlowState, text: &str) -> Vec<FlowEffect> {
    if state.step != Step::AwaitingOtp {
        return vec![];
    }
    if state.otp.paste(text) {
        state.otp_error = None;
        vec![FlowEffect::FocusSlot(OTP_LENGTH - 1)]
    } else {
        tracing::debug!("ignoring paste that is not a full code");
        vec![]
    }
}

fn submit_otp(state: &mut FlowState) -> Vec<FlowEffect> {
    if state.step != Step::AwaitingOtp {
        return vec![];
    }
    if state.task.is_running() {
        tracing::debug!("ignoring otp submit while a request is in flight");
        return vec![];
    }

    let code = state.otp.assembled_code();
    if let Err(err) = validate_otp(&code) {
        state.otp_error = Some(err);
        return vec![];
    }

    state.otp_error = None;
    state.failure = None;
    let task = state
        .task
        .start(&mut state.task_seq, TaskKind::OtpSubmit, TaskMeta::None);
    vec![FlowEffect::SubmitOtp { task, code }]
}

fn otp_resolved(
    state: &mut FlowState,
    task: TaskId,
    result: Result<ServerAck, AuthError>,
) -> Vec<FlowEffect> {
    if state.task.finish_if_active(task).is_none() {
        tracing::debug!(?task, "dropping stale otp result");
        return vec![];
    }

    match result {
        Ok(ack) => {
            tracing::info!(status = ack.status, "otp accepted");
            state.otp.reset();
            state.step = Step::Authenticated;

            let mut effects = Vec::with_capacity(2);
            if state.options.clear_pending_on_success {
                effects.push(FlowEffect::ClearPending);
            }
            effects.push(FlowEffect::Navigate(state.options.success_route.clone()));
            effects
        }
        Err(err) => {
            tracing::warn!(error = %err, "otp submission failed");
            state.failure = Some(err);
            vec![]
        }
    }
}
