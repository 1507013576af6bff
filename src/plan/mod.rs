//! Track-selection decision engine.
//!
//! Given a parsed manifest and the preferred language, decide which audio
//! and subtitle tracks to keep, which to discard, and which becomes the new
//! default. Removal is all-or-nothing per type: tracks are only dropped when
//! at least one track of the same type matches the preferred language, so a
//! file is never left without any track of a type it had.

pub mod options_builder;

use crate::config::Config;
use crate::probe::{MergeIdentify, TrackType};

pub use options_builder::MkvmergeOptionsBuilder;

/// Classifier output for one track type: track ids partitioned by language
/// match, both lists in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSplit {
    /// Ids of tracks whose language equals the preferred language.
    pub matching: Vec<u64>,
    /// Ids of tracks with a different language or no language tag at all.
    pub non_matching: Vec<u64>,
}

/// Retention decision for one track type.
///
/// Only produced when there is both something to keep and something to
/// remove. `keep` and `remove` are disjoint; the first id in `keep` becomes
/// the default track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSelection {
    /// Track ids to retain, in manifest order.
    pub keep: Vec<u64>,
    /// Track ids to discard, in manifest order.
    pub remove: Vec<u64>,
}

impl TrackSelection {
    /// The track marked default in the remuxed file.
    pub fn default_track(&self) -> u64 {
        self.keep[0]
    }
}

/// Combined plan for one file. Audio and subtitles are decided
/// independently and contribute additively to the remux command.
#[derive(Debug, Clone, Default)]
pub struct RemuxPlan {
    pub audio: Option<TrackSelection>,
    pub subtitles: Option<TrackSelection>,
}

impl RemuxPlan {
    /// True when neither type contributes an edit; the file needs no remux.
    pub fn is_noop(&self) -> bool {
        self.audio.is_none() && self.subtitles.is_none()
    }
}

/// Partition the tracks of one type by match against the preferred language.
///
/// A track with no language tag classifies as non-matching. Output order
/// follows manifest order.
pub fn classify_tracks(
    manifest: &MergeIdentify,
    track_type: TrackType,
    preferred_lang: &str,
) -> TypeSplit {
    let mut split = TypeSplit::default();

    for track in manifest.tracks_of(track_type) {
        match track.language() {
            Some(lang) if lang == preferred_lang => split.matching.push(track.id),
            _ => split.non_matching.push(track.id),
        }
    }

    if split.matching.is_empty() && split.non_matching.is_empty() {
        tracing::info!("no {} tracks present", track_type);
    } else if split.non_matching.is_empty() {
        tracing::info!("no {} tracks to remove", track_type);
    } else {
        tracing::info!(
            "{} track id(s) that dont match preferred are {}",
            track_type,
            join_ids(&split.non_matching)
        );
        if split.matching.is_empty() {
            tracing::info!(
                "no {} tracks with preferred language, skipping removal",
                track_type
            );
        } else {
            tracing::info!(
                "preferred {} track present, marking for removal of other {} tracks",
                track_type,
                track_type
            );
        }
    }

    split
}

/// Classify subtitle tracks, honoring the keep-all-subtitles mode.
///
/// When the mode is set, returns two empty lists unconditionally so no
/// subtitle edit can ever be planned.
pub fn classify_subtitles(
    manifest: &MergeIdentify,
    preferred_lang: &str,
    keep_all_subtitles: bool,
) -> TypeSplit {
    if keep_all_subtitles {
        tracing::info!("--keep-all-subtitles flag is set, any existing subtitles will be kept");
        return TypeSplit::default();
    }
    classify_tracks(manifest, TrackType::Subtitles, preferred_lang)
}

/// Decide whether one track type contributes to the edit.
///
/// Returns `None` when there is nothing to remove, or when removal would be
/// unsafe because no track of the type matches the preferred language.
pub fn plan_type(split: &TypeSplit) -> Option<TrackSelection> {
    if split.non_matching.is_empty() || split.matching.is_empty() {
        return None;
    }
    Some(TrackSelection {
        keep: split.matching.clone(),
        remove: split.non_matching.clone(),
    })
}

/// Build the combined retention plan for one file.
pub fn build_plan(manifest: &MergeIdentify, config: &Config) -> RemuxPlan {
    let audio = classify_tracks(manifest, TrackType::Audio, &config.preferred_lang);
    let subtitles = classify_subtitles(
        manifest,
        &config.preferred_lang,
        config.keep_all_subtitles,
    );

    RemuxPlan {
        audio: plan_type(&audio),
        subtitles: plan_type(&subtitles),
    }
}

/// Join track ids for log output and mkvmerge track-selection options.
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_from(json: &str) -> MergeIdentify {
        serde_json::from_str(json).unwrap()
    }

    fn audio_manifest(langs: &[Option<&str>]) -> MergeIdentify {
        let tracks: Vec<String> = langs
            .iter()
            .enumerate()
            .map(|(id, lang)| match lang {
                Some(l) => format!(
                    r#"{{"id": {}, "type": "audio", "properties": {{"language": "{}"}}}}"#,
                    id, l
                ),
                None => format!(r#"{{"id": {}, "type": "audio", "properties": {{}}}}"#, id),
            })
            .collect();
        manifest_from(&format!(r#"{{"tracks": [{}]}}"#, tracks.join(",")))
    }

    #[test]
    fn classifies_by_language() {
        let manifest = audio_manifest(&[Some("eng"), Some("fre")]);
        let split = classify_tracks(&manifest, TrackType::Audio, "eng");
        assert_eq!(split.matching, vec![0]);
        assert_eq!(split.non_matching, vec![1]);
    }

    #[test]
    fn untagged_track_is_non_matching() {
        let manifest = audio_manifest(&[None, Some("eng")]);
        let split = classify_tracks(&manifest, TrackType::Audio, "eng");
        assert_eq!(split.matching, vec![1]);
        assert_eq!(split.non_matching, vec![0]);
    }

    #[test]
    fn classification_preserves_manifest_order() {
        let manifest = audio_manifest(&[Some("fre"), Some("eng"), Some("ger"), Some("eng")]);
        let split = classify_tracks(&manifest, TrackType::Audio, "eng");
        assert_eq!(split.matching, vec![1, 3]);
        assert_eq!(split.non_matching, vec![0, 2]);
    }

    #[test]
    fn other_track_types_are_ignored() {
        let manifest = manifest_from(
            r#"{"tracks": [
                {"id": 0, "type": "video", "properties": {"language": "fre"}},
                {"id": 1, "type": "audio", "properties": {"language": "eng"}}
            ]}"#,
        );
        let split = classify_tracks(&manifest, TrackType::Audio, "eng");
        assert_eq!(split.matching, vec![1]);
        assert!(split.non_matching.is_empty());
    }

    #[test]
    fn keep_all_subtitles_bypasses_classification() {
        let manifest = manifest_from(
            r#"{"tracks": [
                {"id": 2, "type": "subtitles", "properties": {"language": "ger"}},
                {"id": 3, "type": "subtitles", "properties": {"language": "eng"}}
            ]}"#,
        );
        let split = classify_subtitles(&manifest, "eng", true);
        assert!(split.matching.is_empty());
        assert!(split.non_matching.is_empty());
    }

    #[test]
    fn nothing_to_remove_yields_no_selection() {
        // All tracks already match the preferred language.
        let split = TypeSplit {
            matching: vec![0, 1],
            non_matching: vec![],
        };
        assert_eq!(plan_type(&split), None);
    }

    #[test]
    fn no_preferred_track_yields_no_selection() {
        // Removing would strip every track of this type.
        let split = TypeSplit {
            matching: vec![],
            non_matching: vec![2],
        };
        assert_eq!(plan_type(&split), None);
    }

    #[test]
    fn selection_keeps_matching_and_defaults_first() {
        let split = TypeSplit {
            matching: vec![0, 3],
            non_matching: vec![1, 2],
        };
        let selection = plan_type(&split).unwrap();
        assert_eq!(selection.keep, vec![0, 3]);
        assert_eq!(selection.remove, vec![1, 2]);
        assert_eq!(selection.default_track(), 0);
    }

    #[test]
    fn plan_combines_types_independently() {
        let manifest = manifest_from(
            r#"{"tracks": [
                {"id": 0, "type": "audio", "properties": {"language": "eng"}},
                {"id": 1, "type": "audio", "properties": {"language": "fre"}},
                {"id": 2, "type": "subtitles", "properties": {"language": "ger"}}
            ]}"#,
        );
        let config = Config::for_tests("eng");
        let plan = build_plan(&manifest, &config);

        let audio = plan.audio.unwrap();
        assert_eq!(audio.keep, vec![0]);
        assert_eq!(audio.remove, vec![1]);
        assert_eq!(audio.default_track(), 0);

        // Only a non-matching subtitle exists, so no subtitle edit.
        assert!(plan.subtitles.is_none());
    }

    #[test]
    fn all_preferred_file_is_noop() {
        let manifest = audio_manifest(&[Some("eng"), Some("eng")]);
        let config = Config::for_tests("eng");
        assert!(build_plan(&manifest, &config).is_noop());
    }

    #[test]
    fn join_ids_formats_comma_separated() {
        assert_eq!(join_ids(&[0, 2, 5]), "0,2,5");
        assert_eq!(join_ids(&[]), "");
    }
}
