use regex::Regex;

use crate::error::Result;

pub const ENGLISH: &str = "English";
pub const JAPANESE: &str = "Japanese";
pub const MULTI: &str = "Multi";
pub const NO_SUBTITLES: &str = "None";

/// The rule that settled an audio language decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvidence {
    /// Dub or dual-audio marker in title or description.
    EnglishMarker,
    /// Japanese or raw marker in title or description.
    JapaneseMarker,
    /// No marker, but the listing category is a raw one.
    RawCategory,
    /// Nothing at all; anime audio is assumed Japanese.
    Assumed,
}

/// Audio and subtitle language detection from title, description and category.
pub struct LanguageDetector {
    re_audio_english: Regex,
    re_audio_japanese: Regex,
    re_sub_english: Regex,
    re_sub_multi: Regex,
}

impl LanguageDetector {
    /// # Errors
    ///
    /// Returns `KumiwakeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_audio_english: Regex::new(
                r"(?i)(English\s*Dub|Eng\s*Dub|Dubbed|Dual\s*Audio|\bDUAL\b|\bDub\b)",
            )?,
            re_audio_japanese: Regex::new(r"(?i)(Japanese|JPN|Raw|\bJap\b)")?,
            re_sub_english: Regex::new(
                r"(?i)(English\s*Sub|Eng\s*Sub|Subbed|\bSub\b|\[Eng\]|English)",
            )?,
            re_sub_multi: Regex::new(r"(?i)(Multi-?Sub|MultiSub)")?,
        })
    }

    /// Audio language; anime without any indicator is assumed Japanese.
    #[must_use]
    pub fn audio(&self, title: &str, description: &str, category: &str) -> String {
        match self.audio_evidence(title, description, category) {
            AudioEvidence::EnglishMarker => ENGLISH,
            AudioEvidence::JapaneseMarker | AudioEvidence::RawCategory | AudioEvidence::Assumed => {
                JAPANESE
            }
        }
        .to_string()
    }

    /// Which rule decided the audio language.
    #[must_use]
    pub fn audio_evidence(&self, title: &str, description: &str, category: &str) -> AudioEvidence {
        let combined = format!("{title} {description}");

        if self.re_audio_english.is_match(&combined) {
            AudioEvidence::EnglishMarker
        } else if self.re_audio_japanese.is_match(&combined) {
            AudioEvidence::JapaneseMarker
        } else if category.contains("Raw") {
            AudioEvidence::RawCategory
        } else {
            AudioEvidence::Assumed
        }
    }

    /// Subtitle language; `"Unknown"` when neither text nor category says.
    #[must_use]
    pub fn subtitle(&self, title: &str, description: &str, category: &str) -> String {
        let combined = format!("{title} {description}");

        let language = if self.re_sub_multi.is_match(&combined) {
            MULTI
        } else if self.re_sub_english.is_match(&combined) || category.contains("English-translated")
        {
            ENGLISH
        } else if category.contains("Raw") {
            NO_SUBTITLES
        } else {
            crate::types::UNKNOWN
        };
        language.to_string()
    }
}
