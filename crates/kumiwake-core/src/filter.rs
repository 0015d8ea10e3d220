//! Language preference filtering over raw torrent names.

use std::fmt;

use crate::types::TorrentRecord;

type LanguageEntry = (&'static str, &'static [&'static str]);

/// Audio languages and the lowercase name fragments that indicate them.
pub const AUDIO_LANGUAGES: &[LanguageEntry] = &[
    ("any", &[]),
    ("english", &["english dub", "eng dub", "dubbed", "dual audio", "dual", "dub"]),
    ("japanese", &["japanese", "jpn", "raw"]),
    ("spanish", &["spanish dub", "latino", "castellano", "esp dub"]),
    ("portuguese", &["portuguese", "pt-br", "brazilian"]),
    ("french", &["french dub", "vf", "french"]),
    ("german", &["german dub", "german"]),
    ("italian", &["italian dub", "italian"]),
    ("chinese", &["chinese dub", "mandarin", "cantonese"]),
];

/// Subtitle languages and the lowercase name fragments that indicate them.
pub const SUBTITLE_LANGUAGES: &[LanguageEntry] = &[
    ("any", &[]),
    ("english", &["eng sub", "english sub", "engsub", "[eng]", "english"]),
    ("spanish", &["spanish sub", "esp sub", "spanish"]),
    ("portuguese", &["portuguese sub", "pt-br sub", "portuguese"]),
    ("french", &["french sub", "vostfr", "french"]),
    ("german", &["german sub", "german"]),
    ("italian", &["italian sub", "italian"]),
    ("chinese", &["chinese sub", "chi sub", "chinese"]),
    ("arabic", &["arabic sub", "arabic"]),
    ("multi", &["multi-sub", "multisub", "multi sub", "multi-subs"]),
];

/// Which keyword table a filter consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTable {
    Audio,
    Subtitle,
}

impl LanguageTable {
    #[must_use]
    pub fn entries(self) -> &'static [LanguageEntry] {
        match self {
            Self::Audio => AUDIO_LANGUAGES,
            Self::Subtitle => SUBTITLE_LANGUAGES,
        }
    }

    /// Language names in table order, `"any"` first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|(name, _)| *name)
    }

    fn keywords(self, language: &str) -> &'static [&'static str] {
        match self.entries().iter().find(|(name, _)| *name == language) {
            Some((_, keywords)) => *keywords,
            None => &[],
        }
    }
}

/// A language preference; [`LanguageFilter::Any`] accepts everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    Any,
    /// Lowercase language name from one of the tables.
    Language(String),
}

impl LanguageFilter {
    /// Resolves a user choice: a table index (`0` is `any`) or a language
    /// name, case-insensitive. Anything unrecognised means `Any`.
    #[must_use]
    pub fn from_choice(choice: &str, table: LanguageTable) -> Self {
        let choice = choice.trim();
        let name = match choice.parse::<i64>() {
            Ok(index) => usize::try_from(index)
                .ok()
                .and_then(|i| table.names().nth(i)),
            Err(_) => {
                let lowered = choice.to_lowercase();
                table.names().find(|name| *name == lowered)
            }
        };
        match name {
            None | Some("any") => Self::Any,
            Some(name) => Self::Language(name.to_string()),
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns `true` if `name` mentions this language. A language with no
    /// known keywords matches everything.
    #[must_use]
    pub fn matches(&self, name: &str, table: LanguageTable) -> bool {
        let Self::Language(language) = self else {
            return true;
        };
        let keywords = table.keywords(language);
        if keywords.is_empty() {
            return true;
        }
        let lowered = name.to_lowercase();
        keywords.iter().any(|kw| lowered.contains(kw))
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Language(name) => f.write_str(name),
        }
    }
}

/// Keeps torrents whose names match both the audio and subtitle preference.
#[must_use]
pub fn filter_by_language(
    torrents: Vec<TorrentRecord>,
    audio: &LanguageFilter,
    subtitles: &LanguageFilter,
) -> Vec<TorrentRecord> {
    if audio.is_any() && subtitles.is_any() {
        return torrents;
    }
    torrents
        .into_iter()
        .filter(|t| {
            audio.matches(&t.name, LanguageTable::Audio)
                && subtitles.matches(&t.name, LanguageTable::Subtitle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(torrents: &[TorrentRecord]) -> Vec<&str> {
        torrents.iter().map(|t| t.name.as_str()).collect()
    }

    fn sample() -> Vec<TorrentRecord> {
        vec![
            TorrentRecord::new("1", "[SubsPlease] Frieren - 01 (1080p)"),
            TorrentRecord::new("2", "Frieren S01 [Dual Audio] [English Sub]"),
            TorrentRecord::new("3", "Frieren - 01 VOSTFR"),
        ]
    }

    #[test]
    fn choice_by_name_or_index() {
        assert_eq!(
            LanguageFilter::from_choice("English", LanguageTable::Audio),
            LanguageFilter::Language("english".into())
        );
        assert_eq!(
            LanguageFilter::from_choice("2", LanguageTable::Audio),
            LanguageFilter::Language("japanese".into())
        );
        assert_eq!(
            LanguageFilter::from_choice("9", LanguageTable::Subtitle),
            LanguageFilter::Language("multi".into())
        );
        // Arabic only exists as a subtitle language.
        for choice in ["0", "99", "-1", "klingon", "arabic"] {
            assert_eq!(
                LanguageFilter::from_choice(choice, LanguageTable::Audio),
                LanguageFilter::Any,
                "failed for input: {choice}"
            );
        }
    }

    #[test]
    fn any_filters_keep_everything() {
        let kept = filter_by_language(sample(), &LanguageFilter::Any, &LanguageFilter::Any);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn audio_filter() {
        let english = LanguageFilter::Language("english".into());
        let kept = filter_by_language(sample(), &english, &LanguageFilter::Any);
        assert_eq!(names(&kept), ["Frieren S01 [Dual Audio] [English Sub]"]);
    }

    #[test]
    fn subtitle_filter() {
        let french = LanguageFilter::Language("french".into());
        let kept = filter_by_language(sample(), &LanguageFilter::Any, &french);
        assert_eq!(names(&kept), ["Frieren - 01 VOSTFR"]);
    }

    #[test]
    fn both_filters_must_match() {
        let english = LanguageFilter::Language("english".into());
        let french = LanguageFilter::Language("french".into());
        assert!(filter_by_language(sample(), &english, &french).is_empty());
    }

    #[test]
    fn unknown_language_matches_everything() {
        let klingon = LanguageFilter::Language("klingon".into());
        assert!(klingon.matches("anything", LanguageTable::Audio));
    }

    #[test]
    fn display_names() {
        assert_eq!(LanguageFilter::Any.to_string(), "any");
        assert_eq!(LanguageFilter::Language("german".into()).to_string(), "german");
    }
}
