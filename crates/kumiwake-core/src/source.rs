//! # Detail Sources
//!
//! The grouping core never talks to the network. Whatever fetches detail
//! pages implements [`DetailFetcher`]; a failed fetch sends the torrent down
//! the title-only fallback path instead of surfacing an error.

use std::collections::HashMap;
use std::io::Read;

use thiserror::Error;
use tracing::warn;

use crate::error::Result;
use crate::types::DetailRecord;

/// Signal that no usable detail record exists for a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("detail fetch failed for {torrent_id}: {reason}")]
pub struct FetchFailed {
    pub torrent_id: String,
    pub reason: String,
}

impl FetchFailed {
    pub fn new(torrent_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            torrent_id: torrent_id.into(),
            reason: reason.into(),
        }
    }
}

/// Supplies the detail-page text fields for a torrent id.
pub trait DetailFetcher {
    /// Fetches the detail record for `torrent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailed`] when the page is unavailable or malformed.
    fn fetch_detail(&self, torrent_id: &str) -> std::result::Result<DetailRecord, FetchFailed>;
}

impl<F: DetailFetcher + ?Sized> DetailFetcher for &F {
    fn fetch_detail(&self, torrent_id: &str) -> std::result::Result<DetailRecord, FetchFailed> {
        (**self).fetch_detail(torrent_id)
    }
}

/// In-memory detail records keyed by torrent id.
#[derive(Debug, Clone, Default)]
pub struct StaticDetailSource {
    records: HashMap<String, DetailRecord>,
}

impl StaticDetailSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the record for `torrent_id`.
    pub fn insert(&mut self, torrent_id: impl Into<String>, record: DetailRecord) {
        self.records.insert(torrent_id.into(), record);
    }

    #[must_use]
    pub fn with_record(mut self, torrent_id: impl Into<String>, record: DetailRecord) -> Self {
        self.insert(torrent_id, record);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decodes a JSON object mapping torrent ids to detail records.
    ///
    /// Entries that do not decode into a [`DetailRecord`] are dropped, so
    /// those torrents take the fallback path like any failed fetch.
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::Serialization` if the document is not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Reader variant of [`from_json_str`](Self::from_json_str).
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::Serialization` on I/O failure or if the
    /// document is not a JSON object.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut source = Self::new();
        for (id, value) in entries {
            match serde_json::from_value::<DetailRecord>(value) {
                Ok(record) => source.insert(id, record),
                Err(err) => {
                    warn!(torrent_id = %id, error = %err, "discarding malformed detail record");
                }
            }
        }
        source
    }
}

impl DetailFetcher for StaticDetailSource {
    fn fetch_detail(&self, torrent_id: &str) -> std::result::Result<DetailRecord, FetchFailed> {
        self.records
            .get(torrent_id)
            .cloned()
            .ok_or_else(|| FetchFailed::new(torrent_id, "no detail record"))
    }
}
