//! Execution logic for running native test executables.

use crate::error::CollectError;
use std::path::Path;
use std::process::ExitStatus;

/// Result of running a test executable.
#[derive(Debug)]
pub struct RunResult {
    /// Exit status of the executable.
    pub exit_status: ExitStatus,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Duration of the run.
    pub duration: std::time::Duration,
}

/// Runs the executable at `path` with no arguments and waits for it to finish.
///
/// The child runs in the directory that contains it. Its output is captured in full;
/// a non-success exit status is an error.
pub fn run_executable(path: &Path) -> Result<RunResult, CollectError> {
    let spawn_error = |source| CollectError::Spawn {
        path: path.to_path_buf(),
        source,
    };

    // A bare relative name would otherwise be looked up in PATH.
    let abs_path = std::path::absolute(path).map_err(spawn_error)?;

    let mut cmd = std::process::Command::new(&abs_path);
    if let Some(dir) = abs_path.parent() {
        cmd.current_dir(dir);
    }

    tracing::debug!(target: "exec", "running {}", path.display());

    let start_time = std::time::Instant::now();
    let output = cmd.output().map_err(spawn_error)?;
    let duration = start_time.elapsed();

    let result = RunResult {
        exit_status: output.status,
        stdout: String::from_utf8_lossy(output.stdout.as_slice()).to_string(),
        stderr: String::from_utf8_lossy(output.stderr.as_slice()).to_string(),
        duration,
    };

    tracing::debug!(
        target: "exec",
        "{} finished with {} in {:?}",
        path.display(),
        result.exit_status,
        result.duration
    );

    if !result.exit_status.success() {
        return Err(CollectError::ExitStatus {
            path: path.to_path_buf(),
            status: result.exit_status,
            stderr: result.stderr,
        });
    }

    Ok(result)
}
