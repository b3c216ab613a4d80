// Library surface for the binary and headless/integration tests.
// Rendering lives in the binary (main.rs, ui.rs); nothing here draws.
pub mod app_dirs;
pub mod audio;
pub mod clipboard;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod hint;
pub mod i18n;
pub mod language;
pub mod runtime;
pub mod session;
pub mod share;
pub mod stats;
pub mod summary;
pub mod timeline;
pub mod util;

pub use engine::{ClickOutcome, EngineEvent, GameObserver, IgnoreReason, RoundEngine, RoundState};
pub use error::GameError;
pub use language::{Language, Sentence, SentenceBank};
pub use summary::{DailyRecord, GameSummary};
