//! # Metadata Record Builder
//!
//! Combines the field extractors with detail-page context (submitter,
//! category, description) into one [`ExtractedMetadata`] per torrent.

use tracing::debug;

use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::types::{DetailRecord, ExtractedMetadata, UNKNOWN};

/// Default number of description characters kept on a metadata record.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;

/// Builds metadata records from detail pages or bare torrent names.
pub struct MetadataBuilder {
    extractor: FieldExtractor,
    description_limit: usize,
    honor_submitter: bool,
}

impl MetadataBuilder {
    /// Creates a builder with a freshly compiled [`FieldExtractor`].
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new()?,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            honor_submitter: true,
        })
    }

    /// Sets how many characters of the description are kept.
    #[must_use]
    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    /// Controls whether a named submitter replaces the title's release group.
    #[must_use]
    pub fn with_submitter_override(mut self, enabled: bool) -> Self {
        self.honor_submitter = enabled;
        self
    }

    #[must_use]
    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Extracts every field from a fetched detail page.
    ///
    /// A named (non-anonymous) submitter is used as the release group, since
    /// the uploader account is a steadier identity than the title tag.
    #[must_use]
    pub fn build(&self, detail: &DetailRecord) -> ExtractedMetadata {
        let x = &self.extractor;
        let title = detail.title.as_str();
        let description = detail.description.as_str();
        let category = detail.category.as_str();

        let release_group = if self.honor_submitter && detail.has_named_submitter() {
            detail.submitter.clone()
        } else {
            x.release_group(title)
        };

        let metadata = ExtractedMetadata {
            anime_name: x.anime_name(title),
            season: x.season(title, description),
            episode: x.episode(title),
            quality: x.quality(title, description),
            audio_language: x.audio_language(title, description, category),
            subtitle_language: x.subtitle_language(title, description, category),
            release_group,
            description: truncate_chars(description, self.description_limit),
        };
        debug!(title, key = %metadata.group_key(), "extracted metadata from detail page");
        metadata
    }

    /// Title-only extraction for torrents whose detail page is unavailable.
    ///
    /// Both language fields are `"Unknown"`. `anime_name_hint` is used only
    /// when stripping the torrent name leaves nothing; a name extracted from
    /// the torrent itself always wins over the hint.
    #[must_use]
    pub fn build_fallback(&self, torrent_name: &str, anime_name_hint: &str) -> ExtractedMetadata {
        let x = &self.extractor;

        let anime_name = x
            .anime_name_opt(torrent_name)
            .or_else(|| (!anime_name_hint.trim().is_empty()).then(|| anime_name_hint.to_string()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        ExtractedMetadata {
            anime_name,
            season: x.season(torrent_name, ""),
            episode: x.episode(torrent_name),
            quality: x.quality(torrent_name, ""),
            audio_language: UNKNOWN.to_string(),
            subtitle_language: UNKNOWN.to_string(),
            release_group: x.release_group(torrent_name),
            description: String::new(),
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MetadataBuilder {
        MetadataBuilder::new().unwrap()
    }

    #[test]
    fn build_complete_detail_page() {
        let detail = DetailRecord::new("[SubsPlease] Test Anime - 01 (1080p) [English Sub]")
            .with_submitter("SubsPlease")
            .with_category("Anime - English-translated")
            .with_description("Weekly release");
        let m = builder().build(&detail);

        assert_eq!(m.release_group, "SubsPlease");
        assert_eq!(m.anime_name, "Test Anime");
        assert_eq!(m.season, "Season 1");
        assert_eq!(m.episode, "Episode 1");
        assert_eq!(m.quality, "1080p");
        assert_eq!(m.audio_language, "Japanese");
        assert_eq!(m.subtitle_language, "English");
        assert_eq!(m.description, "Weekly release");
    }

    #[test]
    fn named_submitter_overrides_title_group() {
        let detail = DetailRecord::new("[GroupName] Anime - 01").with_submitter("TrustedUploader");
        assert_eq!(builder().build(&detail).release_group, "TrustedUploader");
    }

    #[test]
    fn anonymous_submitter_keeps_title_group() {
        let detail = DetailRecord::new("[GroupName] Anime - 01").with_submitter("Anonymous");
        assert_eq!(builder().build(&detail).release_group, "GroupName");

        let detail = DetailRecord::new("[GroupName] Anime - 01").with_submitter("");
        assert_eq!(builder().build(&detail).release_group, "GroupName");
    }

    #[test]
    fn submitter_override_can_be_disabled() {
        let b = builder().with_submitter_override(false);
        let detail = DetailRecord::new("[GroupName] Anime - 01").with_submitter("TrustedUploader");
        assert_eq!(b.build(&detail).release_group, "GroupName");
    }

    #[test]
    fn description_is_truncated_by_characters() {
        let detail = DetailRecord::new("Anime").with_description("x".repeat(500));
        assert_eq!(builder().build(&detail).description.chars().count(), 200);

        let detail = DetailRecord::new("Anime").with_description("é".repeat(300));
        let m = builder().with_description_limit(10).build(&detail);
        assert_eq!(m.description, "é".repeat(10));

        let detail = DetailRecord::new("Anime");
        assert_eq!(builder().build(&detail).description, "");
    }

    #[test]
    fn empty_detail_record_yields_defaults() {
        let m = builder().build(&DetailRecord::default());
        assert_eq!(m.anime_name, "Unknown");
        assert_eq!(m.season, "Season 1");
        assert_eq!(m.episode, "");
        assert_eq!(m.quality, "Unknown");
        assert_eq!(m.release_group, "Unknown");
        assert_eq!(m.audio_language, "Japanese");
        assert_eq!(m.subtitle_language, "Unknown");
    }

    #[test]
    fn fallback_uses_title_only() {
        let m = builder()
            .build_fallback("[Erai-raws] Frieren S02 - 03 [1080p][Dual Audio]", "frieren");
        assert_eq!(m.anime_name, "Frieren");
        assert_eq!(m.release_group, "Erai-raws");
        assert_eq!(m.season, "Season 2");
        assert_eq!(m.episode, "Episode 3");
        assert_eq!(m.quality, "1080p");
        assert_eq!(m.audio_language, "Unknown");
        assert_eq!(m.subtitle_language, "Unknown");
        assert_eq!(m.description, "");
    }

    #[test]
    fn fallback_hint_only_fills_empty_names() {
        let b = builder();
        assert_eq!(b.build_fallback("[Group] - 01", "Frieren").anime_name, "Frieren");
        assert_eq!(b.build_fallback("[Group]", "").anime_name, "Unknown");
        assert_eq!(
            b.build_fallback("Sousou no Frieren - 01", "Frieren").anime_name,
            "Sousou no Frieren"
        );
    }
}
