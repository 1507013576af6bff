//! Run configuration.
//!
//! All shared settings are collected into an immutable [`Config`] built from
//! the CLI and passed explicitly into the pipeline and decision functions.
//! Validation happens up front; any failure here aborts the run before a
//! single file is touched.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::tools;

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved path to the mkvmerge binary.
    pub mkvmerge: PathBuf,

    /// Root of the media tree to walk.
    pub media_root: PathBuf,

    /// 3-letter language code of the tracks to keep.
    pub preferred_lang: String,

    /// Report commands without invoking mkvmerge or touching files.
    pub dry_run: bool,

    /// Never plan subtitle edits, regardless of language.
    pub keep_all_subtitles: bool,
}

impl Config {
    /// Build and validate a configuration from parsed CLI arguments.
    ///
    /// Checks, in order: the media root exists, the language code is a
    /// 3-letter code, mkvmerge resolves, and mkvmerge is at least
    /// version 6.5.0.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if !cli.media.is_dir() {
            return Err(ConfigError::MediaRootNotFound(cli.media.clone()));
        }

        if cli.lang.len() != 3 || !cli.lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidLanguage(cli.lang.clone()));
        }

        let mkvmerge = tools::resolve_mkvmerge(cli.mkvmerge.as_deref())?;
        let version = tools::ensure_min_version(&mkvmerge)?;
        tracing::info!("using mkvmerge {} at {}", version, mkvmerge.display());

        Ok(Self {
            mkvmerge,
            media_root: cli.media.clone(),
            preferred_lang: cli.lang.clone(),
            dry_run: cli.dry_run,
            keep_all_subtitles: cli.keep_all_subtitles,
        })
    }

    /// Configuration with placeholder paths for unit tests.
    #[cfg(test)]
    pub fn for_tests(preferred_lang: &str) -> Self {
        Self {
            mkvmerge: PathBuf::from("mkvmerge"),
            media_root: PathBuf::from("."),
            preferred_lang: preferred_lang.to_string(),
            dry_run: false,
            keep_all_subtitles: false,
        }
    }
}
