//! # Grouping Engine
//!
//! Partitions torrents into releases by exact match on
//! [`ExtractedMetadata::group_key`]. No fuzzy matching: two torrents land in
//! the same group only if all six key fields are identical.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::types::{ExtractedMetadata, TorrentGroup, TorrentRecord};

/// Lowercase substrings that mark a torrent name as dubbed.
pub const DUB_KEYWORDS: [&str; 5] = ["dub", "dubbed", "dual audio", "dual", "english dub"];

/// Returns `true` if the name contains any dub keyword (case-insensitive substring).
#[must_use]
pub fn contains_dub_keywords(name: &str) -> bool {
    let lowered = name.to_lowercase();
    DUB_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Returns a copy of `torrents` where every record without metadata gets a
/// default record carrying `anime_name`. The input is left untouched.
#[must_use]
pub fn assign_fallback_metadata(
    torrents: &[TorrentRecord],
    anime_name: &str,
) -> Vec<TorrentRecord> {
    torrents
        .iter()
        .map(|t| with_metadata_or_default(t, anime_name))
        .collect()
}

fn with_metadata_or_default(torrent: &TorrentRecord, anime_name: &str) -> TorrentRecord {
    let mut torrent = torrent.clone();
    if torrent.metadata.is_none() {
        torrent.metadata = Some(ExtractedMetadata::with_anime_name(anime_name));
    }
    torrent
}

/// Formats a set of episode numbers as `"Episode N"`, `"Episodes A-B"` or
/// `"Various"` when empty.
#[must_use]
pub fn episode_range_label(episodes: impl IntoIterator<Item = u64>) -> String {
    let mut episodes: Vec<u64> = episodes.into_iter().collect();
    episodes.sort_unstable();
    match (episodes.first(), episodes.last()) {
        (Some(first), Some(_)) if episodes.len() == 1 => format!("Episode {first}"),
        (Some(min), Some(max)) => format!("Episodes {min}-{max}"),
        _ => "Various".to_string(),
    }
}

struct Bucket {
    key: String,
    representative: ExtractedMetadata,
    members: Vec<Arc<TorrentRecord>>,
}

impl Bucket {
    fn into_group(self) -> TorrentGroup {
        let rep = self.representative;

        let episode_range = episode_range_label(
            self.members
                .iter()
                .filter_map(|t| t.metadata.as_ref())
                .filter_map(ExtractedMetadata::episode_number),
        );

        let is_dubbed = rep.audio_language.eq_ignore_ascii_case("english")
            || self.members.iter().any(|t| contains_dub_keywords(&t.name));

        let description = format!(
            "Release group: {}, Quality: {}, Audio: {}, Subs: {}",
            rep.release_group, rep.quality, rep.audio_language, rep.subtitle_language
        );

        TorrentGroup::new(
            self.key,
            rep.group_name(),
            description,
            self.members,
            episode_range,
            rep.quality,
            is_dubbed,
        )
    }
}

/// Groups torrents by exact metadata match and ranks the groups.
///
/// Torrents without metadata are given a default record named
/// `anime_name_fallback` first. Groups appear in descending total-seeder
/// order; ties keep the order in which their first member was encountered,
/// and members keep input order. An empty input yields an empty list.
#[must_use]
pub fn group_deterministic(
    torrents: &[TorrentRecord],
    anime_name_fallback: &str,
) -> Vec<TorrentGroup> {
    if torrents.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for torrent in torrents {
        let metadata = torrent
            .metadata
            .clone()
            .unwrap_or_else(|| ExtractedMetadata::with_anime_name(anime_name_fallback));
        let key = metadata.group_key();

        let mut record = torrent.clone();
        record.metadata = Some(metadata.clone());
        let record = Arc::new(record);

        match index.get(&key) {
            Some(&slot) => buckets[slot].members.push(record),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    representative: metadata,
                    members: vec![record],
                });
            }
        }
    }

    let mut groups: Vec<TorrentGroup> = buckets.into_iter().map(Bucket::into_group).collect();
    // Stable: equal totals keep discovery order.
    groups.sort_by(|a, b| b.total_seeders().cmp(&a.total_seeders()));

    debug!(torrents = torrents.len(), groups = groups.len(), "grouped torrents");
    groups
}
