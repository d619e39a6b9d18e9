use super::route::Route;
use super::task::{TaskKind, TaskSeq, TaskState};
use crate::client::AuthError;
use crate::config::FlowConfig;
use crate::otp::OtpEntry;
use crate::validation::{Field, ValidationError};

/// Where the user is in the sign-in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    CredentialEntry,
    AwaitingOtp,
    /// Terminal: the code was accepted.
    Authenticated,
}

/// Behavior knobs taken from `[flow]` config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOptions {
    pub success_route: Route,
    pub clear_pending_on_success: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self::from(&FlowConfig::default())
    }
}

impl From<&FlowConfig> for FlowOptions {
    fn from(config: &FlowConfig) -> Self {
        Self {
            success_route: Route::parse(&config.success_route),
            clear_pending_on_success: config.clear_pending_on_success,
        }
    }
}

/// Credential form fields and their validation errors.
#[derive(Debug, Clone, Default)]
pub struct CredentialForm {
    pub identifier: String,
    pub secret: String,
    /// Show the secret in clear text.
    pub reveal_secret: bool,
    pub errors: Vec<ValidationError>,
}

impl CredentialForm {
    pub fn error_for(&self, field: Field) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn clear_error(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != field);
    }

    pub(super) fn set_identifier(&mut self, value: String) {
        self.identifier = value;
        self.clear_error(Field::Identifier);
    }

    pub(super) fn set_secret(&mut self, value: String) {
        self.secret = value;
        self.clear_error(Field::Secret);
    }
}

/// Complete flow controller state. Mutated only by [`super::update`].
#[derive(Debug, Clone, Default)]
pub struct FlowState {
    pub(super) step: Step,
    pub(super) task: TaskState,
    pub(super) task_seq: TaskSeq,
    pub(super) form: CredentialForm,
    pub(super) otp: OtpEntry,
    pub(super) otp_error: Option<ValidationError>,
    pub(super) masked_identifier: Option<String>,
    pub(super) failure: Option<AuthError>,
    pub(super) options: FlowOptions,
}

impl FlowState {
    pub fn new(options: FlowOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// A remote call is in flight; submit controls are disabled.
    pub fn is_submitting(&self) -> bool {
        self.task.is_running()
    }

    pub fn submitting_kind(&self) -> Option<TaskKind> {
        self.task.kind()
    }

    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    pub fn otp(&self) -> &OtpEntry {
        &self.otp
    }

    pub fn otp_error(&self) -> Option<&ValidationError> {
        self.otp_error.as_ref()
    }

    /// Masked pending identifier shown on the code step, if one was stored.
    pub fn masked_identifier(&self) -> Option<&str> {
        self.masked_identifier.as_deref()
    }

    /// Last remote failure for the current step.
    pub fn failure(&self) -> Option<&AuthError> {
        self.failure.as_ref()
    }
}
