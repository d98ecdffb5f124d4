//! Atomic results-file writes

use crate::config::ReporterConfig;
use crate::error::{GuardError, GuardResult};
use crate::transform::GuardOutput;
use std::path::PathBuf;
use tracing::debug;

/// Write the document to the results file and return its path.
///
/// Strategy:
/// 1. Create the data directory (and parents)
/// 2. Write to `test.json.tmp`
/// 3. Rename over `test.json` (atomic on the same filesystem)
pub fn save_results(config: &ReporterConfig, output: &GuardOutput) -> GuardResult<PathBuf> {
    let content = output.to_json()?;

    std::fs::create_dir_all(&config.data_dir)
        .map_err(|e| GuardError::io("create directory", &config.data_dir, e))?;

    let final_path = config.results_path();
    let temp_path = final_path.with_extension("json.tmp");

    std::fs::write(&temp_path, content)
        .map_err(|e| GuardError::io("write", &temp_path, e))?;
    std::fs::rename(&temp_path, &final_path)
        .map_err(|e| GuardError::io("rename", &temp_path, e))?;

    debug!(path = %final_path.display(), "Saved test results");
    Ok(final_path)
}
