//! Typed manifest structures for `mkvmerge -J` output.
//!
//! The identify response is deserialized into these structures at the probe
//! boundary. A track entry without a parseable `id` or `type` is a parse
//! error for the whole file rather than a silently-unremovable track.

use serde::{Deserialize, Deserializer};

/// Type of media track, matching the `type` field of mkvmerge identify
/// output. Track types this tool never edits map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    Video,
    Audio,
    Subtitles,
    Other,
}

impl<'de> Deserialize<'de> for TrackType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "video" => TrackType::Video,
            "audio" => TrackType::Audio,
            "subtitles" => TrackType::Subtitles,
            _ => TrackType::Other,
        })
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackType::Video => write!(f, "video"),
            TrackType::Audio => write!(f, "audio"),
            TrackType::Subtitles => write!(f, "subtitles"),
            TrackType::Other => write!(f, "other"),
        }
    }
}

/// Per-track properties from the identify response.
///
/// mkvmerge reports `und` for untagged tracks in some container types and
/// omits the field entirely in others; both count as "no language tag".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackProperties {
    /// 3-letter language code, if the track carries one.
    #[serde(default)]
    pub language: Option<String>,

    /// Human-readable track name, if set.
    #[serde(default)]
    pub track_name: Option<String>,
}

/// One track entry from the identify response.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeTrack {
    /// Track ID, unique within the file. Used in mkvmerge track-selection
    /// options.
    pub id: u64,

    /// Track type.
    #[serde(rename = "type")]
    pub track_type: TrackType,

    /// Track properties.
    #[serde(default)]
    pub properties: TrackProperties,
}

impl MergeTrack {
    /// Get the language tag, if present.
    pub fn language(&self) -> Option<&str> {
        self.properties.language.as_deref()
    }
}

/// Complete identify response for one media file.
///
/// Immutable once parsed; the classifier and planner only read from it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeIdentify {
    /// Tracks in file order.
    #[serde(default)]
    pub tracks: Vec<MergeTrack>,
}

impl MergeIdentify {
    /// Iterate over tracks of a given type, in file order.
    pub fn tracks_of(&self, track_type: TrackType) -> impl Iterator<Item = &MergeTrack> {
        self.tracks
            .iter()
            .filter(move |t| t.track_type == track_type)
    }
}
