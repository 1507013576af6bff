//! Error types for configuration and per-file processing.
//!
//! Errors split into two families: `ConfigError` is fatal and aborts the run
//! before any file is touched; `ProbeError` is per-file and recoverable, the
//! pipeline logs it and moves on to the next file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration error, checked before any file processing starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The media root path does not exist or is not a directory.
    #[error("media location does not exist: {0}")]
    MediaRootNotFound(PathBuf),

    /// The configured mkvmerge path does not exist.
    #[error("mkvmerge location does not exist: {0}")]
    MkvmergeNotFound(PathBuf),

    /// mkvmerge was not found on PATH and no explicit path was given.
    #[error("mkvmerge not found on PATH; use --mkvmerge to point at the binary")]
    MkvmergeNotOnPath,

    /// The preferred language code is not a 3-letter code.
    #[error("language code '{0}' incorrect length, should be 3 characters")]
    InvalidLanguage(String),

    /// mkvmerge is older than the minimum supported version.
    #[error("mkvmerge version {found} is less than {required}, please upgrade")]
    UnsupportedVersion { found: String, required: String },

    /// Running `mkvmerge -V` failed or produced unparseable output.
    #[error("failed to determine mkvmerge version: {0}")]
    VersionCheckFailed(String),
}

/// Per-file error from identifying or remuxing a single media file.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// File disappeared between discovery and identify.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Spawning the external tool failed.
    #[error("failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The external tool exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The identify output was not a valid manifest.
    #[error("failed to parse mkvmerge identify output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a tool spawn error.
    pub fn tool_spawn(tool: impl Into<String>, source: io::Error) -> Self {
        Self::ToolSpawn {
            tool: tool.into(),
            source,
        }
    }
}

/// Result type for per-file probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
