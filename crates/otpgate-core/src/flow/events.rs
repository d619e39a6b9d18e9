use super::route::Route;
use super::task::TaskId;
use crate::client::{AuthError, Credentials, ServerAck};

/// Inputs to the flow controller: user actions and remote results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// A fresh credential step begins. Ignored once authenticated.
    EnterCredentialStep,
    /// The code step was entered; `pending` is the stored identifier, if any.
    /// Ignored once authenticated.
    OtpStepEntered { pending: Option<String> },
    /// Leaves any step, `Authenticated` included, for a fresh credential step.
    Restart,

    IdentifierChanged(String),
    SecretChanged(String),
    ToggleSecretVisibility,
    SubmitCredentials,
    CredentialsResolved {
        task: TaskId,
        result: Result<ServerAck, AuthError>,
    },

    DigitEntered { index: usize, value: String },
    SlotFocused(usize),
    SlotCleared(usize),
    CodePasted(String),
    SubmitOtp,
    OtpResolved {
        task: TaskId,
        result: Result<ServerAck, AuthError>,
    },
}

/// Side effects requested by the flow controller.
///
/// Performed by whoever drives the flow (the TUI runtime or [`super::FlowDriver`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    /// Send credentials; answer with `FlowEvent::CredentialsResolved`.
    SubmitCredentials {
        task: TaskId,
        credentials: Credentials,
    },
    /// Send the code; answer with `FlowEvent::OtpResolved`.
    SubmitOtp { task: TaskId, code: String },
    SavePending { identifier: String },
    ClearPending,
    Navigate(Route),
    /// Move input focus to an OTP slot.
    FocusSlot(usize),
}
