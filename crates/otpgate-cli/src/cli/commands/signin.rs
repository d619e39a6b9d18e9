//! Headless sign-in command.
//!
//! Runs the same flow as the TUI through `FlowDriver`. The password and the
//! code are read as lines from stdin, so the command can be scripted.

use std::io::Write;

use anyhow::{Context, Result};
use otpgate_core::client::HttpAuthClient;
use otpgate_core::config::Config;
use otpgate_core::flow::{FlowDriver, FlowEvent, FlowOptions, Route, Step};
use otpgate_core::store::FilePendingStore;

pub async fn run(config: &Config, identifier: &str) -> Result<()> {
    let client = HttpAuthClient::from_config(&config.service)?;
    let store = FilePendingStore::open_default(&config.storage)?;
    let mut driver = FlowDriver::new(client, store, FlowOptions::from(&config.flow));

    driver.open(Route::Credentials).await;

    prompt("Password: ")?;
    let secret = read_line().await.context("read password")?;

    driver
        .dispatch(FlowEvent::IdentifierChanged(identifier.to_string()))
        .await;
    driver.dispatch(FlowEvent::SecretChanged(secret)).await;
    driver.dispatch(FlowEvent::SubmitCredentials).await;

    let state = driver.state();
    if !state.form().errors.is_empty() {
        let messages: Vec<String> = state.form().errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("{}", messages.join("\n"));
    }
    if let Some(failure) = state.failure() {
        anyhow::bail!("Sign-in failed: {}", failure.user_message());
    }
    if state.step() != Step::AwaitingOtp {
        anyhow::bail!("Sign-in did not reach the code step");
    }

    match state.masked_identifier() {
        Some(masked) => eprintln!("Code sent to {masked}"),
        None => eprintln!("Code sent"),
    }

    prompt("Code: ")?;
    let code = read_line().await.context("read code")?;

    driver.dispatch(FlowEvent::CodePasted(code)).await;
    driver.dispatch(FlowEvent::SubmitOtp).await;

    let state = driver.state();
    if let Some(err) = state.otp_error() {
        anyhow::bail!("{err}");
    }
    if let Some(failure) = state.failure() {
        anyhow::bail!("Verification failed: {}", failure.user_message());
    }
    if state.step() != Step::Authenticated {
        anyhow::bail!("Verification did not complete");
    }

    println!("Signed in.");
    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    let mut err = std::io::stderr();
    write!(err, "{label}")?;
    err.flush()?;
    Ok(())
}

/// Reads one line from stdin without blocking a runtime worker.
///
/// The trailing line break is dropped; nothing else is trimmed.
async fn read_line() -> Result<String> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        Ok::<_, std::io::Error>((read, line))
    })
    .await
    .context("stdin reader task failed")?;

    let (read, mut line) = line?;
    if read == 0 {
        anyhow::bail!("unexpected end of input");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
