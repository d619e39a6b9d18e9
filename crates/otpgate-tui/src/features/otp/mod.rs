//! Code step: six single-digit slots.

mod render;
mod update;

pub use render::{otp_lines, render_otp};
pub use update::{handle_key, handle_paste};
