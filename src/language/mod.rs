pub mod core;
pub mod sentences;

// Re-export the main types for convenience
pub use self::core::Language;
pub use self::sentences::{normalize_token, Sentence, SentenceBank};
