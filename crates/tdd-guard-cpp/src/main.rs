//! TDD Guard reporter for C++ projects
//!
//! Sits at the end of a build-and-test pipe, echoes everything it reads, and
//! records the normalized result for the TDD Guard hook:
//!
//! ```bash
//! (cmake --build build && ./build/tests --gtest_output=json:/dev/stdout) 2>&1 \
//!   | tdd-guard-cpp --project-root "$PWD" --passthrough
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod passthrough;

use anyhow::{bail, Context, Result};
use clap::Parser;
use normalizer::config::{ProjectRoot, ReporterConfig};
use normalizer::persist::save_results;
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Absolute path of the project the results belong to
    #[arg(long)]
    project_root: PathBuf,

    /// Echo stdin to stdout while capturing it for analysis
    #[arg(long, default_value_t = false)]
    passthrough: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let root = ProjectRoot::validate(&args.project_root)?;
    if !args.passthrough {
        bail!("only --passthrough mode is currently supported");
    }
    let config = ReporterConfig::for_project(&root);

    let lines = passthrough::tee_lines(std::io::stdin().lock(), std::io::stdout().lock())
        .context("Failed to read test output from stdin")?;

    let output = normalizer::analyze(&lines);
    let path = save_results(&config, &output).context("Failed to save test results")?;

    info!(
        project = %config.project_root.display(),
        path = %path.display(),
        layout = ?config.layout,
        tests = output.test_count(),
        failed = output.has_failures(),
        "Recorded test results"
    );
    Ok(())
}
