//! mkvmerge detection and version gating.
//!
//! Resolves the mkvmerge binary from an explicit path or PATH lookup and
//! enforces the minimum supported version before any file is processed.

use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;

use crate::error::ConfigError;

/// Oldest mkvmerge release with the track-selection options this tool uses.
pub const MIN_MKVMERGE_VERSION: Version = Version {
    major: 6,
    minor: 5,
    patch: 0,
};

/// Parsed mkvmerge version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Resolve the mkvmerge binary.
///
/// An explicitly configured path must exist; without one, falls back to a
/// PATH lookup.
pub fn resolve_mkvmerge(configured: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match configured {
        Some(path) => {
            if path.exists() {
                Ok(path.to_path_buf())
            } else {
                Err(ConfigError::MkvmergeNotFound(path.to_path_buf()))
            }
        }
        None => which::which("mkvmerge").map_err(|_| ConfigError::MkvmergeNotOnPath),
    }
}

/// Query mkvmerge for its version via `mkvmerge -V`.
pub fn mkvmerge_version(mkvmerge: &Path) -> Result<Version, ConfigError> {
    let output = Command::new(mkvmerge)
        .arg("-V")
        .output()
        .map_err(|e| ConfigError::VersionCheckFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(ConfigError::VersionCheckFailed(format!(
            "mkvmerge -V exited with code {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_version(&stdout).ok_or_else(|| {
        ConfigError::VersionCheckFailed(format!(
            "could not find a version number in: {}",
            stdout.lines().next().unwrap_or_default()
        ))
    })
}

/// Verify mkvmerge meets [`MIN_MKVMERGE_VERSION`], returning the detected
/// version.
pub fn ensure_min_version(mkvmerge: &Path) -> Result<Version, ConfigError> {
    let version = mkvmerge_version(mkvmerge)?;
    if version < MIN_MKVMERGE_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: version.to_string(),
            required: MIN_MKVMERGE_VERSION.to_string(),
        });
    }
    Ok(version)
}

/// Extract the version number from `mkvmerge -V` output, e.g.
/// `mkvmerge v65.0.0 ('Too Much') 64-bit`.
pub fn parse_version(output: &str) -> Option<Version> {
    let re = Regex::new(r"v(\d+)\.(\d+)(?:\.(\d+))?").ok()?;
    let caps = re.captures(output)?;

    Some(Version {
        major: caps.get(1)?.as_str().parse().ok()?,
        minor: caps.get(2)?.as_str().parse().ok()?,
        patch: caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0),
    })
}
