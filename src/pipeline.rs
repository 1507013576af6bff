//! File processing pipeline.
//!
//! Walks the media tree and processes one file at a time, strictly
//! sequentially: identify, classify, plan, remux, replace. Any single file's
//! failure is logged and the run continues; the run's exit status reflects
//! only whether the walk itself completed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{ProbeError, ProbeResult};
use crate::plan;
use crate::plan::options_builder::{format_command, MkvmergeOptionsBuilder};
use crate::probe;

/// Suffix appended to the source file name for the remux output.
///
/// The temp file lives next to the original so the final rename stays on the
/// same volume.
const TEMP_SUFFIX: &str = ".temp";

/// Terminal outcome for a single discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Not an mkv file, or nothing matched the removal criteria.
    Skipped,
    /// Dry-run mode logged the remux command without invoking it.
    DryRunReported,
    /// Remux succeeded and the original file was replaced.
    Applied,
    /// Identify or remux failed; the original file is untouched.
    Failed,
}

/// End-of-run counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Applied => self.applied += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed => self.failed += 1,
            FileOutcome::DryRunReported => self.dry_run += 1,
        }
    }
}

/// Walk the media tree and process every file in it.
pub fn run(config: &Config) -> RunSummary {
    tracing::info!("videoslimmer processing started");
    if config.dry_run {
        tracing::info!("[dry run] no files will be modified");
    }

    let mut summary = RunSummary::default();

    for entry in WalkDir::new(&config.media_root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        // This tool's own remux artifacts; the stale-cleanup path deals
        // with them when their source file is processed.
        if path.as_os_str().to_string_lossy().ends_with(TEMP_SUFFIX) {
            tracing::debug!("ignoring temporary artifact {}", path.display());
            continue;
        }

        if !is_mkv(path) {
            tracing::warn!(
                "file \"{}\" does not have an mkv extension, skipping file",
                path.display()
            );
            summary.record(FileOutcome::Skipped);
            continue;
        }

        summary.record(process_file(config, path));
    }

    tracing::info!(
        "videoslimmer finished: {} applied, {} skipped, {} failed, {} dry-run reported",
        summary.applied,
        summary.skipped,
        summary.failed,
        summary.dry_run
    );

    summary
}

/// Process a single mkv file through the identify → plan → remux → replace
/// sequence. Never returns an error; every failure is a logged outcome.
pub fn process_file(config: &Config, path: &Path) -> FileOutcome {
    tracing::info!("processing file {}", path.display());

    let manifest = match probe::identify_file(&config.mkvmerge, path) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!("mkvmerge failed to identify file {}: {}", path.display(), e);
            return FileOutcome::Failed;
        }
    };

    let remux_plan = plan::build_plan(&manifest, config);
    if remux_plan.is_noop() {
        tracing::info!("no audio or subtitle tracks to change, skipping file");
        return FileOutcome::Skipped;
    }

    let temp_path = temp_path_for(path);

    // Self-healing: a temp file left by a previously interrupted or failed
    // run would make mkvmerge refuse to overwrite. Dry runs must not delete
    // anything, so cleanup only happens on a real run.
    if !config.dry_run {
        if let Err(e) = discard_temp(&temp_path) {
            tracing::warn!(
                "could not delete stale temporary file {}: {}",
                temp_path.display(),
                e
            );
            return FileOutcome::Failed;
        }
    }

    let tokens = MkvmergeOptionsBuilder::new(&remux_plan, path, &temp_path).build();
    let command_line = format_command(&config.mkvmerge, &tokens);

    if config.dry_run {
        tracing::info!("[dry run] mkvmerge command is {}", command_line);
        return FileOutcome::DryRunReported;
    }

    tracing::debug!("mkvmerge command to edit file is \"{}\"", command_line);

    if let Err(e) = remux(&config.mkvmerge, &tokens) {
        tracing::warn!("mkvmerge failed to remux file {}: {}", path.display(), e);
        if let Err(e) = discard_temp(&temp_path) {
            tracing::warn!(
                "could not delete temporary file {}: {}",
                temp_path.display(),
                e
            );
        }
        return FileOutcome::Failed;
    }

    match replace_original(path, &temp_path) {
        Ok(()) => {
            tracing::info!("replaced {} with slimmed version", path.display());
            FileOutcome::Applied
        }
        Err(e) => {
            tracing::warn!("could not replace {}: {}", path.display(), e);
            let _ = discard_temp(&temp_path);
            FileOutcome::Failed
        }
    }
}

/// Invoke the remux command, waiting for completion.
///
/// mkvmerge reports its errors on stdout, so a non-zero exit carries stdout
/// as the diagnostic message.
fn remux(mkvmerge: &Path, tokens: &[String]) -> ProbeResult<()> {
    let output = Command::new(mkvmerge)
        .args(tokens)
        .output()
        .map_err(|e| ProbeError::tool_spawn("mkvmerge", e))?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(ProbeError::command_failed(
            "mkvmerge",
            output.status.code().unwrap_or(-1),
            stdout.to_string(),
        ));
    }

    Ok(())
}

/// Replace the original file with the remuxed temp file.
///
/// Uses rename-with-overwrite rather than delete-then-rename: the temp file
/// is on the same volume, so the rename is atomic on POSIX filesystems and
/// there is no window where the path holds no valid file.
fn replace_original(original: &Path, temp: &Path) -> std::io::Result<()> {
    fs::rename(temp, original)
}

/// Delete a temp file if present; absence is not an error.
fn discard_temp(temp: &Path) -> std::io::Result<()> {
    match fs::remove_file(temp) {
        Ok(()) => {
            tracing::debug!("deleted temporary file {}", temp.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Temp output path for a source file: the full file name plus `.temp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Check for the expected container extension.
fn is_mkv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mkv"))
}
