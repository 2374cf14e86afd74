//! Response language selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the stylist can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Kn,
    Hi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Kn, Language::Hi];

    /// Parse a language code, falling back to English for anything unknown.
    /// Codes are matched exactly: `HI` is not `hi`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "kn" => Language::Kn,
            "hi" => Language::Hi,
            _ => Language::En,
        }
    }

    /// Same as [`Language::from_code`] for an optional request field.
    pub fn from_optional(code: Option<&str>) -> Self {
        code.map(Self::from_code).unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Kn => "kn",
            Language::Hi => "hi",
        }
    }

    /// The instruction that opens every prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            Language::En => "Respond in English",
            Language::Kn => "Respond in Kannada (ಕನ್ನಡ)",
            Language::Hi => "Respond in Hindi (हिंदी)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("kn"), Language::Kn);
        assert_eq!(Language::from_code("hi"), Language::Hi);
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!(Language::from_code("HI"), Language::En);
        assert_eq!(Language::from_code("Kn"), Language::En);
        assert_eq!(Language::from_code(" kn"), Language::En);
    }

    #[test]
    fn test_unknown_code_falls_back_to_english() {
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
        assert_eq!(Language::from_optional(None), Language::En);
    }

    #[test]
    fn test_kannada_directive() {
        assert!(Language::Kn.directive().contains("Kannada"));
        assert!(Language::Kn.directive().contains("ಕನ್ನಡ"));
    }
}
