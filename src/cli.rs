//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// monad - template renderer and installer
#[derive(Parser, Debug)]
#[command(name = "monad")]
#[command(version)]
#[command(about = "Render and install result-chain templates")]
#[command(
    long_about = "monad substitutes a concrete type into a result template and installs templates from a remote repository. Every step runs as a result chain whose cleanups are released even when a step fails."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Substitute a type into a template file
    Render {
        /// TYPE to substitute in the template
        #[arg(short = 'T', long = "type")]
        type_name: String,

        /// INPUT template filename
        #[arg(long)]
        input: PathBuf,

        /// Lowercase name used for the package (defaults to TYPE lowercased)
        #[arg(short = 't', long = "type-alias")]
        type_alias: Option<String>,

        /// IMPORT string for importing a type
        #[arg(short = 'I', long = "import")]
        import: Option<String>,

        /// Directory the package directory is created in
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Download a template into the current directory
    Install {
        /// MONAD template to install
        #[arg(short = 'M', long = "monad")]
        monad: String,

        /// VERSION of template
        #[arg(short = 'v', long = "version")]
        version: Option<String>,

        /// Repository root URL templates are fetched from
        #[arg(long)]
        root_url: Option<String>,
    },
}
