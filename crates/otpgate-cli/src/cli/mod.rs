//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use otpgate_core::config::{self, BASE_URL_ENV};
use otpgate_core::flow::Route;

use crate::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "otpgate")]
#[command(version = "0.1")]
#[command(about = "Two-step email/password and one-time code sign-in")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Sign-in service base URL (overrides config)
    #[arg(long, global = true, env = BASE_URL_ENV, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in interactively (default)
    Login {
        /// Step to open first
        #[arg(long, value_enum, default_value_t = StartStep::Credentials)]
        step: StartStep,
    },

    /// Sign in without the TUI, reading the password and code from stdin
    Signin {
        /// Email address to sign in with
        #[arg(long)]
        identifier: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect or clear the pending sign-in
    Pending {
        #[command(subcommand)]
        command: PendingCommands,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StartStep {
    Credentials,
    Otp,
}

impl From<StartStep> for Route {
    fn from(step: StartStep) -> Self {
        match step {
            StartStep::Credentials => Route::Credentials,
            StartStep::Otp => Route::Otp,
        }
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum PendingCommands {
    /// Show the masked pending email
    Show,
    /// Forget the pending email
    Clear,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Login { .. }));
    let target = if interactive {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(target)?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    // default to interactive sign-in
    let command = command.unwrap_or(Commands::Login {
        step: StartStep::Credentials,
    });

    match command {
        Commands::Login { step } => {
            let config = load_config(base_url.as_deref())?;
            commands::login::run(&config, step.into()).await
        }
        Commands::Signin { identifier } => {
            let config = load_config(base_url.as_deref())?;
            commands::signin::run(&config, &identifier).await
        }
        Commands::Pending { command } => {
            let config = load_config(base_url.as_deref())?;
            match command {
                PendingCommands::Show => commands::pending::show(&config),
                PendingCommands::Clear => commands::pending::clear(&config),
            }
        }
        // No config load: these must work even when the file is broken.
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Loads config and applies the base URL override.
///
/// clap already folds `OTPGATE_BASE_URL` into the flag, so the flag wins
/// over the environment, which wins over the file.
fn load_config(base_url: Option<&str>) -> Result<config::Config> {
    let config = config::Config::load()
        .context("load config")?
        .with_base_url_override(base_url);
    config
        .service
        .parsed_base_url()
        .context("resolve service URL")?;
    Ok(config)
}
