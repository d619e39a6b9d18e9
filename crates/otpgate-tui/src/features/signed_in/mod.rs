//! Terminal screen shown once the code is accepted.

mod render;
mod update;

pub use render::{render_signed_in, signed_in_lines};
pub use update::handle_key;
