use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages the game ships sentences and strings for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(name = "en", alias = "english")]
    #[strum(serialize = "en")]
    English,
    #[value(name = "es", alias = "spanish")]
    #[strum(serialize = "es")]
    Spanish,
}

impl Language {
    pub const DEFAULT: Language = Language::English;
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Display name in the language itself, for the language picker.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
        }
    }

    /// Parses `en`, `EN`, `en-US`, `es_MX` and friends by their primary subtag.
    pub fn from_code(code: &str) -> Option<Language> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" | "english" => Some(Language::English),
            "es" | "spanish" => Some(Language::Spanish),
            _ => None,
        }
    }

    /// Like [`Language::from_code`] but never fails: unknown codes map to the default.
    pub fn resolve(code: &str) -> Language {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::debug!(code, fallback = %Self::DEFAULT, "unknown language code");
            Self::DEFAULT
        })
    }

    /// Cycles through [`Language::ALL`]; drives the language toggle on the home screen.
    pub fn next(&self) -> Language {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
