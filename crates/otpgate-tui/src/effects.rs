//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).

use otpgate_core::client::Credentials;
use otpgate_core::flow::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn the credential request; result comes back as `FlowEvent::CredentialsResolved`.
    SubmitCredentials {
        task: TaskId,
        credentials: Credentials,
    },

    /// Spawn the code request; result comes back as `FlowEvent::OtpResolved`.
    SubmitOtp { task: TaskId, code: String },

    /// Persist the identifier awaiting its code.
    SavePending { identifier: String },

    /// Forget the pending identifier.
    ClearPending,

    /// Load the pending identifier and enter the code step with it.
    EnterOtpStep,
}
