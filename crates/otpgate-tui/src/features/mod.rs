//! Screen features: each owns its key handling and rendering.

pub mod credentials;
pub mod otp;
pub mod signed_in;
