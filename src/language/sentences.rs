use std::collections::HashMap;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use super::core::Language;
use crate::error::{GameError, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// One round's prompt: a sentence with exactly one misspelled token.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    #[serde(rename = "misspelled")]
    pub misspelled_token: String,
    #[serde(rename = "corrected")]
    pub corrected_token: String,
}

#[derive(Deserialize, Debug)]
struct SentenceFile {
    language: String,
    sentences: Vec<Sentence>,
}

/// Strips trailing punctuation so `theif.` compares equal to `theif`.
pub fn normalize_token(token: &str) -> &str {
    token.trim_end_matches(|c: char| {
        c.is_ascii_punctuation() || matches!(c, '…' | '¡' | '¿' | '»' | '”' | '’')
    })
}

impl Sentence {
    pub fn new(text: &str, misspelled: &str, corrected: &str) -> Self {
        Self {
            text: text.to_string(),
            misspelled_token: misspelled.to_string(),
            corrected_token: corrected.to_string(),
        }
    }

    /// Whitespace-delimited tokens, punctuation left attached.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.text.split_whitespace().nth(index)
    }

    /// Index of the first token whose normalized form is the misspelled word.
    pub fn misspelled_index(&self) -> Option<usize> {
        self.text
            .split_whitespace()
            .position(|t| normalize_token(t) == self.misspelled_token)
    }

    pub fn is_misspelled(&self, token: &str) -> bool {
        normalize_token(token) == self.misspelled_token
    }

    /// Exactly one token must match the misspelled word.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let matches = self
            .text
            .split_whitespace()
            .filter(|t| self.is_misspelled(t))
            .count();

        match matches {
            1 => Ok(()),
            0 => Err(format!("`{}` does not appear in the text", self.misspelled_token)),
            n => Err(format!("`{}` appears {n} times", self.misspelled_token)),
        }
    }
}

/// Ordered, read-only sentence sets keyed by language.
#[derive(Debug, Clone)]
pub struct SentenceBank {
    sets: HashMap<Language, Vec<Sentence>>,
}

impl SentenceBank {
    /// Loads and validates every embedded sentence file.
    pub fn load() -> Result<Self> {
        let mut sets = HashMap::new();
        for lang in Language::ALL {
            sets.insert(lang, read_sentences_from_file(lang)?);
        }
        Ok(Self { sets })
    }

    /// Builds a bank from in-memory sets; every set is validated the same way as embedded data.
    pub fn from_sets(sets: HashMap<Language, Vec<Sentence>>) -> Result<Self> {
        for (lang, sentences) in &sets {
            validate_set(*lang, sentences)?;
        }
        if !sets.contains_key(&Language::DEFAULT) {
            return Err(GameError::EmptySentenceSet(Language::DEFAULT.to_string()));
        }
        Ok(Self { sets })
    }

    /// The fixed list for `code`; unknown codes resolve to the default language.
    pub fn get_sentences(&self, code: &str) -> &[Sentence] {
        self.for_language(Language::resolve(code))
    }

    pub fn for_language(&self, language: Language) -> &[Sentence] {
        self.sets
            .get(&language)
            .or_else(|| self.sets.get(&Language::DEFAULT))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn read_sentences_from_file(language: Language) -> Result<Vec<Sentence>> {
    let file_name = format!("{}.json", language.code());
    let file_as_str = LANG_DIR
        .get_file(&file_name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| GameError::MissingSentenceFile(file_name.clone()))?;

    let file: SentenceFile = from_str(file_as_str)?;
    if Language::from_code(&file.language) != Some(language) {
        return Err(GameError::CorruptSentenceSet {
            language: language.to_string(),
            index: 0,
            reason: format!("{file_name} declares language `{}`", file.language),
        });
    }

    validate_set(language, &file.sentences)?;
    tracing::debug!(%language, count = file.sentences.len(), "loaded sentence set");
    Ok(file.sentences)
}

fn validate_set(language: Language, sentences: &[Sentence]) -> Result<()> {
    if sentences.is_empty() {
        return Err(GameError::EmptySentenceSet(language.to_string()));
    }
    for (index, sentence) in sentences.iter().enumerate() {
        sentence
            .validate()
            .map_err(|reason| GameError::CorruptSentenceSet {
                language: language.to_string(),
                index,
                reason,
            })?;
    }
    Ok(())
}
