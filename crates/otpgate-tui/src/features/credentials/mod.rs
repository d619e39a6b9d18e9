//! Credential step: identifier and secret form.

mod render;
mod update;

pub use render::{credential_lines, render_credentials};
pub use update::{handle_key, handle_paste};
