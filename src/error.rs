use thiserror::Error;

/// Errors surfaced by the game core and its collaborators.
///
/// Policy outcomes (ignored clicks, a second hint in the same round) are not
/// represented here; see `engine::IgnoreReason` and `hint::HintError`.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no sentences available for language `{0}`")]
    EmptySentenceSet(String),

    #[error("sentence {index} in `{language}` is invalid: {reason}")]
    CorruptSentenceSet {
        language: String,
        index: usize,
        reason: String,
    },

    #[error("sentence data file `{0}` is missing or not UTF-8")]
    MissingSentenceFile(String),

    #[error("game summary has already been finalized")]
    AlreadyFinalized,

    #[error("game is not complete yet")]
    NotComplete,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
