//! # Pipeline
//!
//! Runs the whole classification flow over already-scraped torrents:
//! optional selection, detail fetch with title-only fallback, metadata
//! extraction, then deterministic grouping.

use tracing::{debug, info, warn};

use crate::builder::{DEFAULT_DESCRIPTION_LIMIT, MetadataBuilder};
use crate::error::{KumiwakeError, Result};
use crate::filter::{LanguageFilter, filter_by_language};
use crate::grouping::{contains_dub_keywords, group_deterministic};
use crate::source::DetailFetcher;
use crate::types::{TorrentGroup, TorrentRecord, UNKNOWN};

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Anime name used for torrents whose own name yields nothing.
    pub anime_name_fallback: String,
    /// Characters of the detail description kept on each record.
    pub description_limit: usize,
    /// Whether a named uploader replaces the title's release group.
    pub honor_submitter: bool,
    pub audio_filter: LanguageFilter,
    pub subtitle_filter: LanguageFilter,
    /// Drop torrents whose names carry no dub keyword.
    pub dub_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            anime_name_fallback: UNKNOWN.to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            honor_submitter: true,
            audio_filter: LanguageFilter::Any,
            subtitle_filter: LanguageFilter::Any,
            dub_only: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anime_name(mut self, name: impl Into<String>) -> Self {
        self.anime_name_fallback = name.into();
        self
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    pub fn with_submitter_override(mut self, enabled: bool) -> Self {
        self.honor_submitter = enabled;
        self
    }

    pub fn with_audio_filter(mut self, filter: LanguageFilter) -> Self {
        self.audio_filter = filter;
        self
    }

    pub fn with_subtitle_filter(mut self, filter: LanguageFilter) -> Self {
        self.subtitle_filter = filter;
        self
    }

    pub fn with_dub_only(mut self, enabled: bool) -> Self {
        self.dub_only = enabled;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.description_limit == 0 {
            return Err(KumiwakeError::InvalidConfig(
                "description limit must be at least 1".into(),
            ));
        }
        if self.anime_name_fallback.trim().is_empty() {
            return Err(KumiwakeError::InvalidConfig(
                "anime name fallback must not be blank".into(),
            ));
        }
        Ok(())
    }
}

/// Extraction and grouping over a batch of torrents.
pub struct Pipeline {
    config: PipelineConfig,
    builder: MetadataBuilder,
}

impl Pipeline {
    /// Create a pipeline, compiling the extractor patterns once.
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::InvalidConfig` for a zero description limit or
    /// blank fallback name, and `KumiwakeError::RegexError` if a pattern
    /// fails to compile.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let builder = MetadataBuilder::new()?
            .with_description_limit(config.description_limit)
            .with_submitter_override(config.honor_submitter);
        Ok(Self { config, builder })
    }

    /// Create a pipeline with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn builder(&self) -> &MetadataBuilder {
        &self.builder
    }

    /// Applies the dub-only and language preferences to raw listings.
    pub fn select(&self, torrents: Vec<TorrentRecord>) -> Vec<TorrentRecord> {
        let before = torrents.len();
        let torrents: Vec<TorrentRecord> = if self.config.dub_only {
            torrents
                .into_iter()
                .filter(|t| contains_dub_keywords(&t.name))
                .collect()
        } else {
            torrents
        };
        let torrents = filter_by_language(
            torrents,
            &self.config.audio_filter,
            &self.config.subtitle_filter,
        );
        debug!(before, after = torrents.len(), "selected torrents");
        torrents
    }

    /// Returns the torrents with metadata attached.
    ///
    /// Torrents that already carry metadata are passed through. For the rest
    /// the detail page is fetched; on success its submitter is copied onto
    /// the torrent, on failure the title-only fallback is used.
    pub fn annotate<F: DetailFetcher + ?Sized>(
        &self,
        torrents: &[TorrentRecord],
        fetcher: &F,
    ) -> Vec<TorrentRecord> {
        let mut fallbacks = 0usize;
        let annotated = torrents
            .iter()
            .map(|torrent| {
                let mut torrent = torrent.clone();
                if torrent.has_metadata() {
                    return torrent;
                }
                match fetcher.fetch_detail(&torrent.id) {
                    Ok(detail) => {
                        torrent.metadata = Some(self.builder.build(&detail));
                        torrent.submitter = detail.submitter;
                    }
                    Err(err) => {
                        warn!(error = %err, "falling back to title-only extraction");
                        fallbacks += 1;
                        torrent.metadata = Some(
                            self.builder
                                .build_fallback(&torrent.name, &self.config.anime_name_fallback),
                        );
                    }
                }
                torrent
            })
            .collect::<Vec<_>>();

        info!(torrents = annotated.len(), fallbacks, "extracted metadata");
        annotated
    }

    /// Select, annotate and group in one call.
    pub fn run<F: DetailFetcher + ?Sized>(
        &self,
        torrents: Vec<TorrentRecord>,
        fetcher: &F,
    ) -> Vec<TorrentGroup> {
        let torrents = self.select(torrents);
        if torrents.is_empty() {
            return Vec::new();
        }
        let annotated = self.annotate(&torrents, fetcher);
        let groups = group_deterministic(&annotated, &self.config.anime_name_fallback);
        info!(groups = groups.len(), "created groups (deterministic)");
        groups
    }
}

/// Convenience function to group torrents with default settings.
///
/// # Errors
///
/// Returns an error only if the pipeline cannot be constructed.
pub fn group_torrents<F: DetailFetcher + ?Sized>(
    torrents: Vec<TorrentRecord>,
    fetcher: &F,
    anime_name: &str,
) -> Result<Vec<TorrentGroup>> {
    let pipeline = Pipeline::new(PipelineConfig::new().with_anime_name(anime_name))?;
    Ok(pipeline.run(torrents, fetcher))
}
