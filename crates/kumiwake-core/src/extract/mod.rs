pub mod fields;
pub mod language;
pub mod season;

pub use fields::FieldExtractor;
pub use language::{AudioEvidence, LanguageDetector};
pub use season::{SeasonForm, SeasonResolver, ordinal_word_value, roman_numeral_value};
