//! # Season Resolution
//!
//! Release titles spell seasons in half a dozen ways. Each spelling is a
//! [`SeasonForm`]; the resolver evaluates them in a fixed priority order and
//! the first form that yields a number wins. Explicit `S01` / `Season 1`
//! markers always beat the loose `Part N` / `Cour N` forms, which commonly
//! appear next to them (`"S01 Part 2"` is season 1).

use regex::Regex;

use crate::error::Result;

/// A way of writing a season number, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonForm {
    /// `S01`, `S2`, `Season 3`, `Season10`
    Standard,
    /// `2nd Season`
    OrdinalNumeral,
    /// `Second Season`
    OrdinalWord,
    /// `Season II`
    Roman,
    /// `Part 2`
    Part,
    /// `Cour 2`
    Cour,
}

impl SeasonForm {
    /// Every form, highest priority first.
    pub const PRIORITY: [Self; 6] = [
        Self::Standard,
        Self::OrdinalNumeral,
        Self::OrdinalWord,
        Self::Roman,
        Self::Part,
        Self::Cour,
    ];

    /// Pattern body; capture group 1 holds the season token.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Standard => r"(?:S|Season\s?)([0-9]+)",
            Self::OrdinalNumeral => r"([0-9]+)(?:st|nd|rd|th)\s+Season",
            Self::OrdinalWord => {
                r"(First|Second|Third|Fourth|Fifth|Sixth|Seventh|Eighth|Ninth|Tenth)\s+Season"
            }
            Self::Roman => r"Season\s+([IVX]+)\b",
            Self::Part => r"Part\s+([0-9]+)",
            Self::Cour => r"Cour\s+([0-9]+)",
        }
    }

    /// Turns the captured token into a season number.
    #[must_use]
    pub fn interpret(self, token: &str) -> Option<u32> {
        match self {
            Self::OrdinalWord => Some(ordinal_word_value(token)),
            Self::Roman => Some(roman_numeral_value(token)),
            Self::Standard | Self::OrdinalNumeral | Self::Part | Self::Cour => token.parse().ok(),
        }
    }
}

struct SeasonRule {
    form: SeasonForm,
    matcher: Regex,
    stripper: Regex,
}

/// Ordered season matchers shared by season extraction and title cleanup.
pub struct SeasonResolver {
    rules: Vec<SeasonRule>,
}

impl SeasonResolver {
    /// Compiles the matcher and title-stripping pattern for every form.
    ///
    /// # Errors
    ///
    /// Returns `KumiwakeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let rules = SeasonForm::PRIORITY
            .iter()
            .map(|&form| {
                Ok(SeasonRule {
                    form,
                    matcher: Regex::new(&format!("(?i){}", form.pattern()))?,
                    stripper: Regex::new(&format!(r"(?i)\s*(?:{}).*", form.pattern()))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Season number found in `text`, or `None` if no form matches.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<u32> {
        self.resolve_with_form(text).map(|(_, season)| season)
    }

    /// Like [`resolve`](Self::resolve), also reporting which form matched.
    ///
    /// A form whose number does not fit in `u32` is skipped.
    #[must_use]
    pub fn resolve_with_form(&self, text: &str) -> Option<(SeasonForm, u32)> {
        self.rules.iter().find_map(|rule| {
            let caps = rule.matcher.captures(text)?;
            let season = rule.form.interpret(caps.get(1)?.as_str())?;
            Some((rule.form, season))
        })
    }

    /// Removes every season marker, and the rest of its line, from `text`.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| {
            rule.stripper.replace_all(&acc, "").into_owned()
        })
    }
}

/// Maps `"first"` through `"tenth"` to 1-10; anything else is 1.
#[must_use]
pub fn ordinal_word_value(word: &str) -> u32 {
    match word.to_lowercase().as_str() {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        "fifth" => 5,
        "sixth" => 6,
        "seventh" => 7,
        "eighth" => 8,
        "ninth" => 9,
        "tenth" => 10,
        _ => 1,
    }
}

/// Evaluates an I/V/X Roman numeral with subtractive notation.
///
/// Returns 1 for empty input or anything that evaluates to zero or less.
#[must_use]
pub fn roman_numeral_value(numeral: &str) -> u32 {
    let mut total: i64 = 0;
    let mut previous = 0;
    for ch in numeral.chars().rev() {
        let value = match ch.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            _ => 0,
        };
        if value < previous {
            total -= value;
        } else {
            total += value;
        }
        previous = value;
    }
    u32::try_from(total).ok().filter(|&n| n > 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SeasonResolver {
        SeasonResolver::new().unwrap()
    }

    #[test]
    fn every_form_resolves() {
        let r = resolver();
        for (text, expected) in [
            ("S01", 1),
            ("S2", 2),
            ("Season 3", 3),
            ("Season 10", 10),
            ("2nd Season", 2),
            ("3rd Season", 3),
            ("4th Season", 4),
            ("1st Season", 1),
            ("Second Season", 2),
            ("Third Season", 3),
            ("First Season", 1),
            ("Season II", 2),
            ("Season III", 3),
            ("Season IV", 4),
            ("Part 1", 1),
            ("Part 2", 2),
            ("Cour 1", 1),
            ("Cour 2", 2),
        ] {
            assert_eq!(r.resolve(text), Some(expected), "failed for input: {text}");
        }
    }

    #[test]
    fn no_marker_resolves_to_none() {
        let r = resolver();
        assert_eq!(r.resolve("Just an anime title"), None);
        assert_eq!(r.resolve("No season here"), None);
        assert_eq!(r.resolve(""), None);
    }

    #[test]
    fn standard_form_beats_part() {
        let r = resolver();
        assert_eq!(
            r.resolve_with_form("Anime S01 Part 2"),
            Some((SeasonForm::Standard, 1))
        );
        assert_eq!(
            r.resolve_with_form("Attack on Titan Final Season Part 2"),
            Some((SeasonForm::Part, 2))
        );
    }

    #[test]
    fn forms_are_case_insensitive() {
        let r = resolver();
        assert_eq!(r.resolve("Anime SECOND SEASON"), Some(2));
        assert_eq!(r.resolve("Anime season ii"), Some(2));
        assert_eq!(r.resolve("Anime PART 2"), Some(2));
        assert_eq!(r.resolve("Anime cour 2"), Some(2));
        assert_eq!(r.resolve("Anime 2ND SEASON"), Some(2));
    }

    #[test]
    fn overflowing_number_falls_through() {
        let r = resolver();
        assert_eq!(
            r.resolve_with_form("S99999999999 Part 3"),
            Some((SeasonForm::Part, 3))
        );
    }

    #[test]
    fn only_ascii_digits_count() {
        let r = resolver();
        assert_eq!(
            r.resolve_with_form("Season \u{662} Part 3"),
            Some((SeasonForm::Part, 3))
        );
        assert_eq!(r.resolve("S\u{661}\u{662}"), None);
    }

    #[test]
    fn ordinal_words() {
        for (word, expected) in [
            ("first", 1),
            ("second", 2),
            ("third", 3),
            ("fourth", 4),
            ("fifth", 5),
            ("sixth", 6),
            ("seventh", 7),
            ("eighth", 8),
            ("ninth", 9),
            ("tenth", 10),
            ("First", 1),
            ("SECOND", 2),
        ] {
            assert_eq!(ordinal_word_value(word), expected, "failed for input: {word}");
        }
        assert_eq!(ordinal_word_value("eleventh"), 1);
        assert_eq!(ordinal_word_value("unknown"), 1);
    }

    #[test]
    fn roman_numerals() {
        for (numeral, expected) in [
            ("I", 1),
            ("II", 2),
            ("III", 3),
            ("IV", 4),
            ("V", 5),
            ("VI", 6),
            ("VII", 7),
            ("VIII", 8),
            ("IX", 9),
            ("X", 10),
            ("XIV", 14),
            ("i", 1),
            ("iv", 4),
        ] {
            assert_eq!(roman_numeral_value(numeral), expected, "failed for input: {numeral}");
        }
        assert_eq!(roman_numeral_value(""), 1);
        assert_eq!(roman_numeral_value("Q"), 1);
    }

    #[test]
    fn strip_removes_marker_and_tail() {
        let r = resolver();
        assert_eq!(r.strip("Anime 2nd Season - 01"), "Anime");
        assert_eq!(r.strip("Anime Season II - 01"), "Anime");
        assert_eq!(r.strip("Attack on Titan Part 3"), "Attack on Titan");
        assert_eq!(r.strip("Spy x Family S02E01"), "Spy x Family");
        assert_eq!(r.strip("Frieren"), "Frieren");
    }
}
