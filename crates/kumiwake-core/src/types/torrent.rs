use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::metadata::ExtractedMetadata;

/// Submitter shown for torrents uploaded without an account.
pub const ANONYMOUS: &str = "Anonymous";

const DOWNLOAD_BASE_URL: &str = "https://nyaa.si/download";

/// One torrent discovered by the listing scraper.
///
/// `metadata` starts out absent and is attached exactly once by the
/// extraction stage; "not yet extracted" is `None`, never a sentinel string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Opaque listing identifier.
    pub id: String,

    /// Raw torrent title.
    pub name: String,

    #[serde(default)]
    pub magnet_uri: String,

    #[serde(default)]
    pub torrent_file_uri: String,

    /// Size as displayed by the listing (not parsed to bytes).
    #[serde(default)]
    pub size_label: String,

    #[serde(default)]
    pub date_label: String,

    #[serde(default, deserialize_with = "deserialize_count")]
    pub seeder_count: u32,

    #[serde(default, deserialize_with = "deserialize_count")]
    pub leecher_count: u32,

    #[serde(default, deserialize_with = "deserialize_count")]
    pub download_count: u32,

    /// Raw category label (e.g. `"Anime - English-translated"`).
    #[serde(default)]
    pub category: String,

    #[serde(default = "default_submitter")]
    pub submitter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExtractedMetadata>,
}

impl TorrentRecord {
    /// Creates a record with only an id and title; everything else empty or zero.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            magnet_uri: String::new(),
            torrent_file_uri: String::new(),
            size_label: String::new(),
            date_label: String::new(),
            seeder_count: 0,
            leecher_count: 0,
            download_count: 0,
            category: String::new(),
            submitter: ANONYMOUS.to_string(),
            metadata: None,
        }
    }

    /// Sets the seeder count.
    #[must_use]
    pub fn with_seeders(mut self, seeders: u32) -> Self {
        self.seeder_count = seeders;
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Attaches extracted metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ExtractedMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns `true` once the extraction stage has run for this torrent.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// Direct `.torrent` download URL for this listing.
    #[must_use]
    pub fn download_url(&self) -> String {
        format!("{DOWNLOAD_BASE_URL}/{}.torrent", self.id)
    }
}

impl fmt::Display for TorrentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] S:{} L:{}",
            self.name, self.size_label, self.seeder_count, self.leecher_count
        )
    }
}

/// Parses a listing counter, returning 0 for anything that is not a plain
/// non-negative integer. Values past `u32::MAX` saturate.
#[must_use]
pub fn parse_count(text: &str) -> u32 {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    // Only overflow can fail once every byte is a digit.
    text.parse().unwrap_or(u32::MAX)
}

fn default_submitter() -> String {
    ANONYMOUS.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match RawCount::deserialize(deserializer)? {
        RawCount::Unsigned(n) => u32::try_from(n).unwrap_or(u32::MAX),
        RawCount::Signed(n) => u32::try_from(n).unwrap_or(0),
        RawCount::Float(f) => parse_count(&f.to_string()),
        RawCount::Text(text) => parse_count(&text),
    };
    Ok(count)
}
