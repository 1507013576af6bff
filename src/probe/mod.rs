//! File identification using `mkvmerge -J`.
//!
//! Queries the external tool for a machine-readable track manifest and
//! deserializes it into the typed structures in [`types`].

pub mod types;

use std::path::Path;
use std::process::Command;

use crate::error::{ProbeError, ProbeResult};

pub use types::{MergeIdentify, MergeTrack, TrackProperties, TrackType};

/// Identify a media file and return its track manifest.
///
/// Runs `mkvmerge -J <path>` and parses the JSON output. Any failure here
/// (spawn, non-zero exit, malformed JSON, track entry missing an id) is
/// recoverable for the run; the caller skips the file.
pub fn identify_file(mkvmerge: &Path, path: &Path) -> ProbeResult<MergeIdentify> {
    if !path.exists() {
        return Err(ProbeError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("identifying file: {}", path.display());

    let output = Command::new(mkvmerge)
        .arg("-J")
        .arg(path)
        .output()
        .map_err(|e| ProbeError::tool_spawn("mkvmerge", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::command_failed(
            "mkvmerge",
            output.status.code().unwrap_or(-1),
            stderr.to_string(),
        ));
    }

    let manifest: MergeIdentify = serde_json::from_slice(&output.stdout)?;
    Ok(manifest)
}
