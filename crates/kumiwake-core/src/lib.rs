//! # Kumiwake Core
//!
//! Metadata extraction and deterministic grouping for anime torrent
//! listings. Free-text titles are reduced to eight normalized fields, and
//! torrents sharing the same six identity fields are collected into one
//! release group.
//!
//! ## Quick Start
//!
//! ```rust
//! use kumiwake_core::{FieldExtractor, StaticDetailSource, TorrentRecord, group_torrents};
//!
//! let extractor = FieldExtractor::new().unwrap();
//! assert_eq!(extractor.season("[Group] Anime 2nd Season - 01", ""), "Season 2");
//! assert_eq!(extractor.release_group("[SubsPlease] Anime - 01 (1080p)"), "SubsPlease");
//!
//! let torrents = vec![
//!     TorrentRecord::new("1", "[SubsPlease] Anime - 01 (1080p)").with_seeders(40),
//!     TorrentRecord::new("2", "[SubsPlease] Anime - 02 (1080p)").with_seeders(60),
//! ];
//! let groups = group_torrents(torrents, &StaticDetailSource::new(), "Anime").unwrap();
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].total_seeders(), 100);
//! assert_eq!(groups[0].episode_range_label(), "Episodes 1-2");
//! ```
pub mod builder;
pub mod error;
pub mod extract;
pub mod filter;
pub mod grouping;
pub mod pipeline;
pub mod source;
pub mod types;

// Re-export primary API
pub use builder::{DEFAULT_DESCRIPTION_LIMIT, MetadataBuilder};
pub use error::{KumiwakeError, Result};
pub use extract::{AudioEvidence, FieldExtractor, LanguageDetector, SeasonForm, SeasonResolver};
pub use filter::{LanguageFilter, LanguageTable, filter_by_language};
pub use grouping::{
    assign_fallback_metadata, contains_dub_keywords, episode_range_label, group_deterministic,
};
pub use pipeline::{Pipeline, PipelineConfig, group_torrents};
pub use source::{DetailFetcher, FetchFailed, StaticDetailSource};
pub use types::{DetailRecord, ExtractedMetadata, TorrentGroup, TorrentRecord};
