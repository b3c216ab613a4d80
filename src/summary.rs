use serde::{Deserialize, Serialize};

use crate::clock::PauseClock;
use crate::error::{GameError, Result};
use crate::session::{GameSession, RoundResult};

/// Frozen results of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub hits: usize,
    pub misses: usize,
    pub hints_used: usize,
    pub elapsed_seconds: u64,
    pub round_results: Vec<RoundResult>,
}

/// The slice of a summary kept per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub hits: usize,
    pub misses: usize,
    pub elapsed_seconds: u64,
}

impl GameSummary {
    pub fn round_count(&self) -> usize {
        self.round_results.len()
    }

    /// 100 per hit, -50 per miss, -1 per second.
    pub fn score(&self) -> i64 {
        self.hits as i64 * 100 - self.misses as i64 * 50 - self.elapsed_seconds as i64
    }

    pub fn is_perfect(&self) -> bool {
        self.misses == 0 && self.hints_used == 0
    }

    pub fn daily_record(&self) -> DailyRecord {
        DailyRecord {
            hits: self.hits,
            misses: self.misses,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}

/// Freezes a completed session into a [`GameSummary`], exactly once.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    summary: Option<GameSummary>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finalize(&mut self, session: &GameSession, clock: &PauseClock) -> Result<GameSummary> {
        if self.summary.is_some() {
            return Err(GameError::AlreadyFinalized);
        }
        if !session.is_complete() {
            return Err(GameError::NotComplete);
        }

        let summary = GameSummary {
            hits: session.hits,
            misses: session.misses,
            hints_used: session.hints_used,
            elapsed_seconds: clock.elapsed_seconds(),
            round_results: session.round_results.clone(),
        };
        tracing::info!(
            hits = summary.hits,
            misses = summary.misses,
            hints = summary.hints_used,
            secs = summary.elapsed_seconds,
            "game finalized"
        );
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }
}
