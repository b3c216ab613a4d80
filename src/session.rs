use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::hint::HintState;
use crate::language::Language;

/// Outcome of one settled round. Never mutated after it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_index: usize,
    pub hit: bool,
    pub used_hint: bool,
}

/// Mutable state of a single playthrough, owned by the round engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub language: Language,
    pub current_round_index: usize,
    pub round_count: usize,
    pub hits: usize,
    pub misses: usize,
    pub hints_used: usize,
    pub start_timestamp: DateTime<Local>,
    pub elapsed_seconds: u64,
    pub is_paused: bool,
    pub round_results: Vec<RoundResult>,
    pub hint: HintState,
    pub resolution_locked: bool,
}

impl GameSession {
    pub fn new(language: Language, round_count: usize) -> Self {
        Self {
            language,
            current_round_index: 0,
            round_count,
            hits: 0,
            misses: 0,
            hints_used: 0,
            start_timestamp: Local::now(),
            elapsed_seconds: 0,
            is_paused: false,
            round_results: Vec::new(),
            hint: HintState::default(),
            resolution_locked: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.round_results.len() == self.round_count
    }

    /// Records a settled round and keeps the counters in step with the result list.
    pub(crate) fn record(&mut self, hit: bool) -> RoundResult {
        let result = RoundResult {
            round_index: self.current_round_index,
            hit,
            used_hint: self.hint.active,
        };
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.round_results.push(result);
        result
    }

    /// Returns a description of the first broken invariant, if any.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.hits + self.misses != self.round_results.len() {
            return Err(format!(
                "hits ({}) + misses ({}) != recorded rounds ({})",
                self.hits,
                self.misses,
                self.round_results.len()
            ));
        }
        if self.current_round_index > self.round_count {
            return Err(format!(
                "round index {} beyond round count {}",
                self.current_round_index, self.round_count
            ));
        }
        if !self.resolution_locked && self.round_results.len() != self.current_round_index {
            return Err(format!(
                "{} results recorded at round {}",
                self.round_results.len(),
                self.current_round_index
            ));
        }
        if self.hints_used > self.round_results.len() + usize::from(self.hint.active) {
            return Err(format!("{} hints used in too few rounds", self.hints_used));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_round_zero() {
        let session = GameSession::new(Language::English, 6);
        assert_eq!(session.current_round_index, 0);
        assert_eq!(session.elapsed_seconds, 0);
        assert!(session.round_results.is_empty());
        assert!(!session.hint.active);
        assert!(!session.resolution_locked);
        assert!(session.check_invariants().is_ok());
    }

    #[test]
    fn test_record_keeps_counters_in_step() {
        let mut session = GameSession::new(Language::English, 2);
        session.hint.active = true;
        let result = session.record(true);
        assert_eq!(
            result,
            RoundResult {
                round_index: 0,
                hit: true,
                used_hint: true
            }
        );
        assert_eq!(session.hits, 1);
        assert_eq!(session.misses, 0);
        assert_eq!(session.round_results.len(), 1);
    }

    #[test]
    fn test_check_invariants_flags_unsettled_index() {
        let mut session = GameSession::new(Language::English, 6);
        session.current_round_index = 2;
        assert!(session.check_invariants().is_err());
    }
}
