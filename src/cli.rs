//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// Strip non-preferred audio and subtitle tracks from MKV files.
///
/// Walks the media tree, identifies each file with mkvmerge, and rewrites
/// files that carry audio or subtitle tracks in languages other than the
/// preferred one. Tracks are only removed when a preferred-language track of
/// the same type exists.
#[derive(Parser, Debug)]
#[command(name = "videoslimmer", version)]
pub struct Cli {
    /// Path to the mkvmerge binary (defaults to PATH lookup)
    #[arg(long, value_name = "PATH")]
    pub mkvmerge: Option<PathBuf>,

    /// Path to your media root
    #[arg(long, value_name = "PATH")]
    pub media: PathBuf,

    /// 3-letter language code to keep, e.g. --lang eng
    #[arg(long, value_name = "CODE")]
    pub lang: String,

    /// Report what would be done without modifying any files
    #[arg(long)]
    pub dry_run: bool,

    /// Keep all subtitles regardless of language
    #[arg(long)]
    pub keep_all_subtitles: bool,

    /// Directory for log files (defaults to ./logs)
    #[arg(long, value_name = "PATH")]
    pub logpath: Option<PathBuf>,

    /// Logging level: debug, info, warning, error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub loglevel: String,
}
