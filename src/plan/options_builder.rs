//! mkvmerge command options builder.
//!
//! Builds command-line tokens for mkvmerge from a [`RemuxPlan`]: the
//! temporary output path, the track-selection and default-track options for
//! each contributing type, and the input file last.

use std::path::Path;

use super::{join_ids, RemuxPlan, TrackSelection};

/// Builder for the mkvmerge remux command.
///
/// Generates a list of string tokens ready to pass as arguments.
pub struct MkvmergeOptionsBuilder<'a> {
    plan: &'a RemuxPlan,
    input_path: &'a Path,
    output_path: &'a Path,
}

impl<'a> MkvmergeOptionsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(plan: &'a RemuxPlan, input_path: &'a Path, output_path: &'a Path) -> Self {
        Self {
            plan,
            input_path,
            output_path,
        }
    }

    /// Build the complete mkvmerge argument tokens.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        tokens.push("-o".to_string());
        tokens.push(self.output_path.to_string_lossy().to_string());

        if let Some(ref audio) = self.plan.audio {
            self.add_selection_options(&mut tokens, "--audio-tracks", audio);
        }

        if let Some(ref subtitles) = self.plan.subtitles {
            self.add_selection_options(&mut tokens, "--subtitle-tracks", subtitles);
        }

        tokens.push(self.input_path.to_string_lossy().to_string());

        tokens
    }

    /// Add the keep-only-these-ids option and default-track flag for one
    /// track type.
    fn add_selection_options(
        &self,
        tokens: &mut Vec<String>,
        tracks_option: &str,
        selection: &TrackSelection,
    ) {
        tokens.push(tracks_option.to_string());
        tokens.push(join_ids(&selection.keep));
        tokens.push("--default-track".to_string());
        tokens.push(selection.default_track().to_string());
    }
}

/// Format tokens as a single shell-style line for log output.
pub fn format_command(mkvmerge: &Path, tokens: &[String]) -> String {
    let mut parts = vec![mkvmerge.to_string_lossy().to_string()];
    parts.extend(tokens.iter().cloned());
    parts.join(" ")
}
