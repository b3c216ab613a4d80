use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use crate::language::Sentence;
use crate::session::GameSession;

/// Upper bound on the eligible-word subset revealed by a hint.
pub const HINT_SUBSET_SIZE: usize = 3;

/// Per-round hint gating. Reset on every round advance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintState {
    pub active: bool,
    pub eligible: BTreeSet<usize>,
}

impl HintState {
    /// A word is clickable when no hint is active or when it is in the revealed subset.
    pub fn is_clickable(&self, index: usize) -> bool {
        !self.active || self.eligible.contains(&index)
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.eligible.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintError {
    /// Already used this round; recoverable, shown as a notice.
    #[error("hint already used this round")]
    AlreadyActive,

    #[error("hints are unavailable right now")]
    Unavailable,

    #[error("sentence has no misspelled token: {0}")]
    MisspelledTokenMissing(String),
}

/// Computes eligible-word subsets with an injectable random source.
pub struct HintController {
    rng: Box<dyn RngCore>,
}

impl std::fmt::Debug for HintController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HintController").finish_non_exhaustive()
    }
}

impl HintController {
    pub fn new(rng: Box<dyn RngCore>) -> Self {
        Self { rng }
    }

    /// Reproducible sampling for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_entropy()))
    }

    /// Activates the hint for the current round.
    ///
    /// Touches only `session.hint` and `session.hints_used`; a second request in
    /// the same round returns [`HintError::AlreadyActive`] without mutating anything.
    pub fn request_hint(
        &mut self,
        session: &mut GameSession,
        sentence: &Sentence,
    ) -> Result<BTreeSet<usize>, HintError> {
        if session.hint.active {
            return Err(HintError::AlreadyActive);
        }

        let misspelled = sentence
            .misspelled_index()
            .ok_or_else(|| HintError::MisspelledTokenMissing(sentence.text.clone()))?;
        let token_count = sentence.token_count();
        let target = HINT_SUBSET_SIZE.min(token_count);

        let decoys: Vec<usize> = (0..token_count).filter(|&i| i != misspelled).collect();
        let mut eligible = BTreeSet::from([misspelled]);
        eligible.extend(
            decoys
                .choose_multiple(&mut self.rng, target.saturating_sub(1))
                .copied(),
        );

        tracing::debug!(
            round = session.current_round_index,
            ?eligible,
            "hint activated"
        );

        session.hint.active = true;
        session.hint.eligible = eligible.clone();
        session.hints_used += 1;
        Ok(eligible)
    }
}
