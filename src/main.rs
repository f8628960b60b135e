//! # monad - template renderer and installer
//!
//! ## Commands
//!
//! 1. **render** - substitute a type into a template and save it as a package
//! 2. **install** - download a template from the template repository
//!
//! ## Error Handling
//!
//! Setup errors (configuration, working directory) use `anyhow::Result` with
//! context. The commands themselves run as result chains: a failing step is
//! reported once, every deferred cleanup still runs, and the process exits 1.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use monad::cli::{Cli, Commands};
use monad::config::{Config, load_config};
use monad::install::{InstallPlan, install};
use monad::template::{RenderRequest, render};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_exit(&e),
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config().context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Render {
            type_name,
            input,
            type_alias,
            import,
            output_dir,
        } => {
            ensure!(!type_name.is_empty(), "TYPE is not provided");
            ensure!(
                !input.as_os_str().is_empty(),
                "INPUT template filename is not provided"
            );

            let plan = RenderRequest {
                type_name,
                type_alias,
                import,
                input,
                output_dir,
            }
            .plan(&config);

            let outcome = render(&plan)
                .on_error_handler(|err| eprintln!("Unable to generate from template: {err}"))
                .resolve();

            Ok(exit_code(outcome.is_ok()))
        }

        Commands::Install {
            monad,
            version,
            root_url,
        } => {
            ensure!(!monad.is_empty(), "MONAD was not provided");

            let config = Config {
                root_url: root_url.unwrap_or(config.root_url),
                ..config
            };
            config.validate().context("Invalid --root-url")?;

            let version = version.unwrap_or_else(|| config.version.clone());
            let output_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            let plan = InstallPlan::new(&config, &monad, &version, &output_dir);

            let outcome = install(&plan)
                .on_error_handler(|err| eprintln!("Unable to install template: {err}"))
                .resolve();

            Ok(exit_code(outcome.is_ok()))
        }
    }
}

/// Print clap's message and usage; usage errors exit 1, `--help` exits 0.
fn usage_exit(err: &clap::Error) -> ExitCode {
    if let Err(io) = err.print() {
        eprintln!("error: {io}");
    }
    exit_code(!err.use_stderr())
}

const fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initialize tracing subscriber with environment filter.
///
/// `RUST_LOG` wins; otherwise `--verbose` picks the level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
