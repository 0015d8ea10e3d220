use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder for any field no extractor could determine.
pub const UNKNOWN: &str = "Unknown";

/// Season label used when no season marker is found anywhere.
pub const DEFAULT_SEASON: &str = "Season 1";

static SEASON_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Season\s*([0-9]+)").ok());

/// Structured release metadata extracted from one torrent.
///
/// All fields hold canonical display labels (`"Season 2"`, `"Episode 5"`,
/// `"English"`) so that two records extracted from equivalent titles compare
/// equal and produce the same [`group_key`](Self::group_key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedMetadata {
    /// Anime title with release tags, season and episode markers removed.
    pub anime_name: String,

    /// Canonical season label, `"Season N"`.
    pub season: String,

    /// Canonical episode label, `"Episode N"`, or empty when unknown.
    pub episode: String,

    /// Quality token as it appeared in the title (e.g. `"1080p"`, `"4k"`).
    pub quality: String,

    /// Audio language label (`"English"`, `"Japanese"`, ...).
    pub audio_language: String,

    /// Subtitle language label (`"English"`, `"Multi"`, `"None"`, ...).
    pub subtitle_language: String,

    /// Release group or trusted uploader name.
    pub release_group: String,

    /// Leading part of the detail page description.
    pub description: String,
}

impl Default for ExtractedMetadata {
    fn default() -> Self {
        Self {
            anime_name: UNKNOWN.to_string(),
            season: DEFAULT_SEASON.to_string(),
            episode: String::new(),
            quality: UNKNOWN.to_string(),
            audio_language: UNKNOWN.to_string(),
            subtitle_language: UNKNOWN.to_string(),
            release_group: UNKNOWN.to_string(),
            description: String::new(),
        }
    }
}

impl ExtractedMetadata {
    /// Creates a default record carrying only an anime name.
    #[must_use]
    pub fn with_anime_name(anime_name: impl Into<String>) -> Self {
        Self {
            anime_name: anime_name.into(),
            ..Self::default()
        }
    }

    /// Exact-match grouping key over the six release-defining fields.
    #[must_use]
    pub fn group_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.release_group,
            self.anime_name,
            self.season,
            self.audio_language,
            self.subtitle_language,
            self.quality
        )
    }

    /// Short season label such as `"S2"`; `"S1"` when the label has no number.
    #[must_use]
    pub fn season_short(&self) -> String {
        SEASON_NUMBER
            .as_ref()
            .and_then(|re| re.captures(&self.season))
            .and_then(|caps| caps.get(1))
            .map_or_else(|| "S1".to_string(), |m| format!("S{}", m.as_str()))
    }

    /// Human-readable group name, e.g.
    /// `"SubsPlease - Frieren - Season 1 - DUB Japanese - SUB English - QUALITY 1080p"`.
    #[must_use]
    pub fn group_name(&self) -> String {
        let mut parts = vec![
            self.release_group.clone(),
            self.anime_name.clone(),
            self.season.clone(),
        ];
        if is_known(&self.audio_language) {
            parts.push(format!("DUB {}", self.audio_language));
        }
        if is_known(&self.subtitle_language) {
            parts.push(format!("SUB {}", self.subtitle_language));
        }
        if is_known(&self.quality) {
            parts.push(format!("QUALITY {}", self.quality));
        }
        parts.join(" - ")
    }

    /// Numeric episode, if the episode label carries one.
    #[must_use]
    pub fn episode_number(&self) -> Option<u64> {
        if self.episode.is_empty() {
            return None;
        }
        self.episode.replace("Episode ", "").trim().parse().ok()
    }
}

fn is_known(label: &str) -> bool {
    !label.is_empty() && label != UNKNOWN
}

impl fmt::Display for ExtractedMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.group_name())
    }
}
