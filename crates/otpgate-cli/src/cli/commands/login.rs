//! Interactive sign-in command.

use anyhow::Result;
use otpgate_core::config::Config;
use otpgate_core::flow::Route;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, start: Route) -> Result<()> {
    use anyhow::Context;

    otpgate_tui::run_interactive_login(config, start)
        .await
        .context("interactive sign-in failed")
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _start: Route) -> Result<()> {
    anyhow::bail!(
        "Interactive sign-in is not available in this build.\n\
         Use `otpgate signin --identifier <EMAIL>` instead."
    )
}
