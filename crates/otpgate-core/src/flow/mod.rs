//! Sign-in flow controller.
//!
//! Elm-style: [`update`] takes the current [`FlowState`] and one
//! [`FlowEvent`] and returns [`FlowEffect`]s. Remote calls, store access and
//! navigation are performed by the caller, which feeds results back as events.
//!
//! ```text
//! CredentialEntry --credentials ok--> AwaitingOtp --code ok--> Authenticated
//!        ^  |                           ^  |
//!        +--+ invalid / failed          +--+ invalid / failed
//! ```
//!
//! `Authenticated` ignores step entry; only [`FlowEvent::Restart`] leaves it.
//!
//! At most one remote call is in flight. Results carry the [`TaskId`] that
//! started them and are dropped when that task is no longer active.

pub mod driver;
mod events;
mod route;
mod state;
mod task;
mod update;

pub use driver::FlowDriver;
pub use events::{FlowEffect, FlowEvent};
pub use route::Route;
pub use state::{CredentialForm, FlowOptions, FlowState, Step};
pub use task::{TaskId, TaskKind};
pub use update::update;
