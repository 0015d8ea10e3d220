use regex::Regex;

use super::language::{AudioEvidence, LanguageDetector};
use super::season::SeasonResolver;
use crate::error::Result;
use crate::types::{DEFAULT_SEASON, UNKNOWN};

/// Regex field extractors for free-text torrent titles.
///
/// Every extractor is a pure function of its inputs and falls back to a
/// documented default instead of failing. Patterns are compiled once in
/// [`FieldExtractor::new`] and the extractor is `Send + Sync`, so a single
/// instance can serve many threads.
pub struct FieldExtractor {
    re_group_start: Regex,
    re_group_end: Regex,
    re_episode: Regex,
    re_quality: Regex,
    re_name_episode: Regex,
    re_name_dash_number: Regex,
    re_name_trailing_block: Regex,
    re_name_open_bracket: Regex,
    seasons: SeasonResolver,
    languages: LanguageDetector,
}

impl FieldExtractor {
    /// Constructs a new `FieldExtractor` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_group_start: Regex::new(r"^\[([^\]]+)\]|^\(([^)]+)\)")?,
            re_group_end: Regex::new(r"(?i)-([A-Za-z0-9]+)(?:\.[a-z]{2,4})?$")?,
            re_episode: Regex::new(
                r"(?i)(?:E|Ep\.?\s?|Episode\s?)([0-9]+)|[\s\-]\s?([0-9]{2,3})(?:\s|$|\[|\()",
            )?,
            re_quality: Regex::new(
                r"(?i)(4K|2160p|1080p|720p|480p|360p|FHD|HD|1920x1080|1280x720|SD)",
            )?,
            re_name_episode: Regex::new(r"(?i)\s*(?:E|Ep\.?\s?|Episode\s?)[0-9]+.*")?,
            re_name_dash_number: Regex::new(r"\s*-\s*[0-9]+.*")?,
            re_name_trailing_block: Regex::new(r"\s*[\[\(][^\]\)]*[\]\)]\s*$")?,
            re_name_open_bracket: Regex::new(r"\s*[\[\(].*$")?,
            seasons: SeasonResolver::new()?,
            languages: LanguageDetector::new()?,
        })
    }

    /// The season resolver backing [`season`](Self::season).
    #[must_use]
    pub fn seasons(&self) -> &SeasonResolver {
        &self.seasons
    }

    /// Release group from a leading `[Group]`/`(Group)` tag, else a trailing
    /// scene-style `-GROUP` suffix, else `"Unknown"`.
    #[must_use]
    pub fn release_group(&self, title: &str) -> String {
        if let Some(caps) = self.re_group_start.captures(title) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
                return m.as_str().to_string();
            }
        }

        self.re_group_end
            .captures(title)
            .and_then(|c| c.get(1))
            .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string())
    }

    /// Season number from the title, falling back to the description.
    #[must_use]
    pub fn season_number(&self, title: &str, description: &str) -> Option<u32> {
        self.seasons
            .resolve(title)
            .or_else(|| self.seasons.resolve(description))
    }

    /// `"Season N"`, defaulting to `"Season 1"`.
    #[must_use]
    pub fn season(&self, title: &str, description: &str) -> String {
        self.season_number(title, description)
            .map_or_else(|| DEFAULT_SEASON.to_string(), |n| format!("Season {n}"))
    }

    /// `"Episode N"` with leading zeros dropped, or an empty string.
    ///
    /// The bare-number form (`" - 01"`) also fires on other two or three
    /// digit numbers in the title.
    #[must_use]
    pub fn episode(&self, title: &str) -> String {
        self.episode_number(title)
            .map(|n| format!("Episode {n}"))
            .unwrap_or_default()
    }

    /// Numeric episode, or `None` when there is no marker or the number
    /// does not fit in `u64`.
    #[must_use]
    pub fn episode_number(&self, title: &str) -> Option<u64> {
        let caps = self.re_episode.captures(title)?;
        caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()
    }

    /// First quality token in the title, then the description, with its
    /// original casing; `"Unknown"` if neither has one.
    #[must_use]
    pub fn quality(&self, title: &str, description: &str) -> String {
        [title, description]
            .into_iter()
            .find_map(|text| self.re_quality.find(text))
            .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string())
    }

    #[must_use]
    pub fn audio_language(&self, title: &str, description: &str, category: &str) -> String {
        self.languages.audio(title, description, category)
    }

    #[must_use]
    pub fn audio_evidence(&self, title: &str, description: &str, category: &str) -> AudioEvidence {
        self.languages.audio_evidence(title, description, category)
    }

    #[must_use]
    pub fn subtitle_language(&self, title: &str, description: &str, category: &str) -> String {
        self.languages.subtitle(title, description, category)
    }

    /// Anime title with group tag, season/episode markers and trailing
    /// metadata removed; `"Unknown"` if nothing is left.
    #[must_use]
    pub fn anime_name(&self, title: &str) -> String {
        self.anime_name_opt(title).unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Like [`anime_name`](Self::anime_name) but `None` when stripping leaves nothing.
    ///
    /// The strip chain is repeated until the name stops changing, so the
    /// result is a fixed point: feeding it back in returns it unchanged.
    #[must_use]
    pub fn anime_name_opt(&self, title: &str) -> Option<String> {
        let mut name = self.strip_name_once(title);
        loop {
            let next = self.strip_name_once(&name);
            // Every pass only deletes text, so this terminates.
            if next == name {
                break;
            }
            name = next;
        }

        if name.is_empty() { None } else { Some(name) }
    }

    fn strip_name_once(&self, title: &str) -> String {
        let name = self.re_group_start.replace(title, "");
        let mut name = self.seasons.strip(name.trim());

        // Each step truncates; order matters for "Ep 3 - 01 [720p]" style tails.
        for pattern in [
            &self.re_name_episode,
            &self.re_name_dash_number,
            &self.re_name_trailing_block,
            &self.re_name_open_bracket,
        ] {
            name = pattern.replace_all(&name, "").into_owned();
        }

        name.trim().to_string()
    }
}
