//! # arkaudit CLI
//!
//! Audits an archival file inventory against the reference-files rulesets.
//!
//! ## Usage
//!
//! ```bash
//! arkaudit report path/to/files.db
//! arkaudit report path/to/files.db --examples 3
//! arkaudit rulesets
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `arkaudit report <FILE>` | Classify every format in the inventory and print the audit report |
//! | `arkaudit rulesets` | List the reference rulesets with versions and entry counts |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use arkaudit::{audit, config, rulesets};

/// arkaudit — audit an archival file inventory against the reference-files
/// conversion rulesets.
#[derive(Parser)]
#[command(
    name = "arkaudit",
    about = "Audit an archival file inventory against the reference-files conversion rulesets",
    version,
    long_about = "arkaudit compares the formats recorded in a files.db inventory with the \
    reference-files rulesets (convert, extract, Symphony, re-identify, custom signatures, \
    manual, ignore) and reports which formats are unhandled, slated for manual conversion, \
    extraction, or Symphony conversion. It can stage random example files for unhandled \
    formats for human triage."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional; built-in defaults fetch the rulesets from the published
    /// reference-files repository.
    #[arg(long, global = true, default_value = "./arkaudit.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Classify every format in the inventory and print the audit report.
    ///
    /// Opens the database read-only, classifies each row of the
    /// _SignatureCount view against the merged rulesets, and prints the
    /// itemized report. With --examples, stages random sample files for
    /// each unhandled format.
    Report {
        /// Path to the files.db generated by the identification tooling.
        file: PathBuf,

        /// Extract up to N examples of each unhandled format (0 disables).
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
        examples: u32,

        /// Output directory for example files.
        ///
        /// Defaults to an `examples` directory next to the database.
        #[arg(long)]
        examples_dir: Option<PathBuf>,
    },

    /// List the reference rulesets with their versions and entry counts.
    ///
    /// Loads every document from the configured source and prints one line
    /// per ruleset. Useful for verifying the source before an audit.
    Rulesets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Report {
            file,
            examples,
            examples_dir,
        } => {
            audit::run_report(&cfg, &file, examples, examples_dir).await?;
        }
        Commands::Rulesets => {
            rulesets::run_rulesets(&cfg).await?;
        }
    }

    Ok(())
}
