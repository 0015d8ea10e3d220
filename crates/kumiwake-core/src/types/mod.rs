pub mod detail;
pub mod group;
pub mod metadata;
pub mod torrent;

pub use detail::DetailRecord;
pub use group::TorrentGroup;
pub use metadata::{DEFAULT_SEASON, ExtractedMetadata, UNKNOWN};
pub use torrent::{ANONYMOUS, TorrentRecord, parse_count};
