//! # vshape CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

/// vshape — validate nested documents against declarative schemas.
///
/// Reports every violation in one pass, each addressed by a dotted path.
#[derive(Parser, Debug)]
#[command(name = "vshape", version, about)]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate documents against a catalog schema.
    Check(vshape_cli::check::CheckArgs),
    /// List the bundled schemas.
    Schemas,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Check(args) => {
            let all_valid = vshape_cli::check::run_check(&args, &mut stdout).await?;
            Ok(if all_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Schemas => {
            for entry in vshape_cli::catalog::CATALOG {
                writeln!(stdout, "{:<12} {}", entry.name, entry.description)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
