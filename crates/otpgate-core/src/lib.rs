//! Core of the otpgate two-step sign-in: credentials first, then a 6-digit code.
//!
//! - [`validation`]: presence and code-shape checks
//! - [`mask`]: identifier masking for display
//! - [`otp`]: per-digit code entry
//! - [`store`]: pending-login persistence
//! - [`client`]: remote auth service
//! - [`flow`]: the state machine tying them together
//! - [`config`]: `config.toml` and paths

pub mod client;
pub mod config;
pub mod flow;
pub mod mask;
pub mod otp;
pub mod store;
pub mod validation;
