use std::time::Duration;

/// Visual sub-states of a round's feedback sequence, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum FeedbackPhase {
    /// Input locked, shot animation starts.
    Reveal,
    /// The misspelled word is marked.
    MarkerShown,
    /// The corrected spelling replaces the misspelled word.
    CorrectionShown,
    MarkerHidden,
    /// Result is recorded and the round advances.
    Commit,
}

impl FeedbackPhase {
    pub const SEQUENCE: [FeedbackPhase; 5] = [
        FeedbackPhase::Reveal,
        FeedbackPhase::MarkerShown,
        FeedbackPhase::CorrectionShown,
        FeedbackPhase::MarkerHidden,
        FeedbackPhase::Commit,
    ];

    /// Offset from the click that started the sequence.
    pub fn offset(&self) -> Duration {
        Duration::from_millis(match self {
            FeedbackPhase::Reveal => 0,
            FeedbackPhase::MarkerShown => 300,
            FeedbackPhase::CorrectionShown => 1300,
            FeedbackPhase::MarkerHidden => 1800,
            FeedbackPhase::Commit => 2300,
        })
    }

    pub fn marker_visible(&self) -> bool {
        matches!(
            self,
            FeedbackPhase::MarkerShown | FeedbackPhase::CorrectionShown
        )
    }

    pub fn shows_correction(&self) -> bool {
        matches!(
            self,
            FeedbackPhase::CorrectionShown | FeedbackPhase::MarkerHidden | FeedbackPhase::Commit
        )
    }
}

/// One round's scheduled sub-transitions behind a single handle.
///
/// Steps fire strictly in offset order as logical time is advanced. Suspending
/// freezes the whole list; the remaining offsets are preserved across resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackTimeline {
    steps: Vec<(Duration, FeedbackPhase)>,
    next: usize,
    elapsed: Duration,
    suspended: bool,
    cancelled: bool,
}

impl Default for FeedbackTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackTimeline {
    pub fn new() -> Self {
        Self::with_steps(
            FeedbackPhase::SEQUENCE
                .iter()
                .map(|p| (p.offset(), *p))
                .collect(),
        )
    }

    /// Builds a timeline from arbitrary steps; they are ordered by offset.
    pub fn with_steps(mut steps: Vec<(Duration, FeedbackPhase)>) -> Self {
        steps.sort_by_key(|(offset, _)| *offset);
        Self {
            steps,
            next: 0,
            elapsed: Duration::ZERO,
            suspended: false,
            cancelled: false,
        }
    }

    /// Moves logical time forward and returns every step that became due, in order.
    pub fn advance(&mut self, dt: Duration) -> Vec<FeedbackPhase> {
        if self.suspended || self.cancelled {
            return Vec::new();
        }

        self.elapsed += dt;
        let mut fired = Vec::new();
        while let Some(&(offset, phase)) = self.steps.get(self.next) {
            if offset > self.elapsed {
                break;
            }
            fired.push(phase);
            self.next += 1;
        }
        fired
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Drops every outstanding step.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.next >= self.steps.len()
    }

    /// Time left until the last step fires.
    pub fn remaining(&self) -> Duration {
        if self.cancelled {
            return Duration::ZERO;
        }
        self.steps
            .last()
            .map(|(offset, _)| offset.saturating_sub(self.elapsed))
            .unwrap_or_default()
    }
}
