//! Full-screen sign-in TUI for otpgate.

pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod router;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use otpgate_core::config::{Config, paths};
use otpgate_core::flow::{Route, Step};
pub use runtime::TuiRuntime;

/// Runs the interactive sign-in flow starting at `start`.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the runtime fails.
pub async fn run_interactive_login(config: &Config, start: Route) -> Result<()> {
    // The TUI draws to the terminal
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive sign-in requires a terminal.\n\
             Use `otpgate signin --identifier <EMAIL>` for non-interactive sign-in."
        );
    }

    let mut err = stderr();
    writeln!(err, "otpgate")?;
    writeln!(err, "Service: {}", config.service.base_url)?;
    if let Ok(path) = paths::config_path()
        && path.exists()
    {
        writeln!(err, "Config file: {}", path.display())?;
    }
    err.flush()?;

    let mut runtime = TuiRuntime::new(config, start)?;
    runtime.run()?;
    let signed_in = runtime.state.flow.step() == Step::Authenticated;

    // Restore the terminal before printing the outcome
    drop(runtime);
    if signed_in {
        writeln!(stderr(), "Signed in.")?;
    } else {
        writeln!(stderr(), "Sign-in not completed.")?;
    }

    Ok(())
}
