use std::fmt;
use std::sync::Arc;

use super::torrent::TorrentRecord;

/// A release: torrents that share one grouping key.
///
/// Groups are rebuilt on every grouping call and are read-only once built.
/// Members are copies of the input torrents with metadata filled in, held
/// behind [`Arc`] so cloning a group does not copy them again; the caller's
/// records are never modified.
#[derive(Debug, Clone)]
pub struct TorrentGroup {
    key: String,
    display_name: String,
    description: String,
    torrents: Vec<Arc<TorrentRecord>>,
    episode_range_label: String,
    dominant_quality: String,
    is_dubbed: bool,
}

impl TorrentGroup {
    pub(crate) fn new(
        key: String,
        display_name: String,
        description: String,
        torrents: Vec<Arc<TorrentRecord>>,
        episode_range_label: String,
        dominant_quality: String,
        is_dubbed: bool,
    ) -> Self {
        Self {
            key,
            display_name,
            description,
            torrents,
            episode_range_label,
            dominant_quality,
            is_dubbed,
        }
    }

    /// The grouping key every member shares.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Summary line naming release group, quality, audio and subtitles.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Members in the order they were encountered.
    #[must_use]
    pub fn torrents(&self) -> &[Arc<TorrentRecord>] {
        &self.torrents
    }

    /// `"Episode N"`, `"Episodes A-B"` or `"Various"`.
    #[must_use]
    pub fn episode_range_label(&self) -> &str {
        &self.episode_range_label
    }

    #[must_use]
    pub fn dominant_quality(&self) -> &str {
        &self.dominant_quality
    }

    #[must_use]
    pub fn is_dubbed(&self) -> bool {
        self.is_dubbed
    }

    /// Sum of member seeder counts.
    #[must_use]
    pub fn total_seeders(&self) -> u64 {
        self.torrents.iter().map(|t| u64::from(t.seeder_count)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.torrents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.torrents.is_empty()
    }

    /// Listing sizes are display strings, so the group size is a member count.
    #[must_use]
    pub fn total_size_label(&self) -> String {
        format!("{} torrents", self.torrents.len())
    }

    /// Short season label of the first member, `"S1"` if it has no metadata.
    #[must_use]
    pub fn season_short(&self) -> String {
        self.torrents
            .first()
            .and_then(|t| t.metadata.as_ref())
            .map_or_else(|| "S1".to_string(), |m| m.season_short())
    }
}

impl fmt::Display for TorrentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} torrents)", self.display_name, self.torrents.len())
    }
}
