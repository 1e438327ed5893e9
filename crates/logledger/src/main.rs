use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::debug;

use logledger_export::write_csv;
use logledger_git::{CommitOutcome, ExportCommitter};

mod logging;

use logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "logledger",
    about = "Export nginx access logs to CSV and archive them in git",
    version,
    author
)]
struct Cli {
    /// Path to the nginx access log
    #[arg(short, long)]
    log: PathBuf,

    /// Output CSV file path
    #[arg(short, long)]
    out: PathBuf,

    /// Path to the git repository holding the export (default: current directory)
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Commit the CSV to git after writing it
    #[arg(short, long)]
    commit: bool,

    /// Commit message (a timestamped one is generated if omitted)
    #[arg(short, long)]
    message: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing("info", cli.log_format.into());

    if !cli.log.is_file() {
        bail!("Log file not found: {}", cli.log.display());
    }

    let summary = write_csv(&cli.log, &cli.out)
        .with_context(|| format!("Failed to export {}", cli.log.display()))?;

    if summary.lines_skipped > 0 {
        debug!(skipped = summary.lines_skipped, "Some lines did not match the log grammar");
    }

    println!(
        "  {} {}",
        "->".bright_green(),
        format!(
            "CSV saved: {} ({} rows)",
            cli.out.display(),
            summary.rows_written
        )
        .bold()
    );

    if cli.commit {
        let committer = ExportCommitter::new(&cli.repo);
        let outcome = committer
            .commit_file(&cli.out, cli.message.as_deref())
            .with_context(|| format!("Failed to commit {}", cli.out.display()))?;

        match outcome {
            CommitOutcome::Committed { id, message } => {
                let id = id.to_string();
                println!(
                    "  {} {}",
                    "->".bright_green(),
                    format!("Committed {}: {}", &id[..7], message).bold()
                );
            }
            CommitOutcome::NothingToCommit => {
                println!("  {} No changes to commit", "->".dimmed());
            }
        }
    }

    Ok(())
}
