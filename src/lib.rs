//! VideoSlimmer: strip non-preferred audio and subtitle tracks from MKV
//! files using mkvmerge.
//!
//! The decision engine lives in [`plan`]: given a typed track manifest from
//! [`probe`], it decides which tracks to keep, which to discard, and which
//! becomes the default. [`pipeline`] drives the directory walk, the external
//! mkvmerge invocations, and the atomic replace of each edited file.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod probe;
pub mod tools;

pub use config::Config;
pub use pipeline::{FileOutcome, RunSummary};
pub use plan::{RemuxPlan, TrackSelection, TypeSplit};
pub use probe::{MergeIdentify, MergeTrack, TrackType};
