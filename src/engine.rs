//! Round lifecycle: click resolution, hint gating, the timed feedback
//! sequence, pause handling and hand-off to the result aggregator.
//!
//! The engine is driven cooperatively. Input arrives through
//! [`RoundEngine::submit_word_click`], [`RoundEngine::request_hint`] and the
//! pause controls; time arrives through [`RoundEngine::advance`], which is the
//! only place scheduled feedback steps and clock ticks fire.

use std::collections::BTreeSet;
use std::mem;
use std::time::Duration;

use crate::audio::{AudioCue, AudioCues};
use crate::clock::PauseClock;
use crate::error::{GameError, Result};
use crate::hint::{HintController, HintError};
use crate::language::{Language, Sentence};
use crate::session::{GameSession, RoundResult};
use crate::summary::{GameSummary, ResultAggregator};
use crate::timeline::{FeedbackPhase, FeedbackTimeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for a word to be shot.
    Idle,
    /// Feedback sequence in flight; input is locked.
    Resolving {
        phase: FeedbackPhase,
        hit: bool,
        selected: usize,
    },
    Complete,
    /// Player quit mid-session; terminal, no summary is produced.
    Abandoned,
}

/// Why a click was dropped. These are policy outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum IgnoreReason {
    Locked,
    Paused,
    NotClickable,
    OutOfRange,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Accepted { hit: bool },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RoundStarted { round_index: usize },
    Tick { elapsed_seconds: u64 },
    Phase(FeedbackPhase),
    RoundSettled(RoundResult),
    GameComplete(GameSummary),
}

/// Callbacks for collaborators that react to settled rounds and the final summary.
pub trait GameObserver {
    fn on_round_settled(&mut self, _result: &RoundResult) {}
    fn on_game_complete(&mut self, _summary: &GameSummary) {}
    fn on_phase(&mut self, _phase: FeedbackPhase) {}
}

impl EngineEvent {
    pub fn dispatch(&self, observer: &mut dyn GameObserver) {
        match self {
            EngineEvent::RoundSettled(result) => observer.on_round_settled(result),
            EngineEvent::GameComplete(summary) => observer.on_game_complete(summary),
            EngineEvent::Phase(phase) => observer.on_phase(*phase),
            EngineEvent::RoundStarted { .. } | EngineEvent::Tick { .. } => {}
        }
    }
}

#[derive(Debug)]
pub struct RoundEngine {
    sentences: Vec<Sentence>,
    session: GameSession,
    hints: HintController,
    clock: PauseClock,
    timeline: Option<FeedbackTimeline>,
    state: RoundState,
    aggregator: ResultAggregator,
    audio: AudioCues,
    pending: Vec<EngineEvent>,
}

impl RoundEngine {
    /// Starts a session over `sentences`, which must be non-empty and valid.
    pub fn new(language: Language, sentences: Vec<Sentence>, hints: HintController) -> Result<Self> {
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

        tracing::info!(%language, rounds = sentences.len(), "new game session");
        let round_count = sentences.len();
        Ok(Self {
            sentences,
            session: GameSession::new(language, round_count),
            hints,
            clock: PauseClock::new(),
            timeline: None,
            state: RoundState::Idle,
            aggregator: ResultAggregator::new(),
            audio: AudioCues::default(),
            pending: vec![EngineEvent::RoundStarted { round_index: 0 }],
        })
    }

    pub fn with_audio(mut self, audio: AudioCues) -> Self {
        self.audio = audio;
        if self.session.current_round_index == 0 && self.state == RoundState::Idle {
            self.audio.trigger(AudioCue::Ready);
        }
        self
    }

    /// Shoots the word at `index` in the current sentence.
    pub fn submit_word_click(&mut self, index: usize) -> ClickOutcome {
        let outcome = self.try_click(index);
        if let ClickOutcome::Ignored(reason) = outcome {
            tracing::debug!(index, %reason, "click ignored");
        }
        outcome
    }

    fn try_click(&mut self, index: usize) -> ClickOutcome {
        if self.is_over() {
            return ClickOutcome::Ignored(IgnoreReason::GameOver);
        }
        if self.session.resolution_locked {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }
        if self.session.is_paused {
            return ClickOutcome::Ignored(IgnoreReason::Paused);
        }

        let sentence = &self.sentences[self.session.current_round_index];
        let Some(token) = sentence.token(index) else {
            return ClickOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        if !self.session.hint.is_clickable(index) {
            return ClickOutcome::Ignored(IgnoreReason::NotClickable);
        }

        let hit = sentence.is_misspelled(token);
        tracing::debug!(
            round = self.session.current_round_index,
            token,
            hit,
            "word shot"
        );

        self.audio.trigger(AudioCue::Shot);
        self.session.resolution_locked = true;
        self.state = RoundState::Resolving {
            phase: FeedbackPhase::Reveal,
            hit,
            selected: index,
        };

        let mut timeline = FeedbackTimeline::new();
        let due = timeline.advance(Duration::ZERO);
        self.timeline = Some(timeline);
        for phase in due {
            self.apply_phase(phase);
        }

        ClickOutcome::Accepted { hit }
    }

    /// Activates this round's hint. Returns the clickable subset.
    pub fn request_hint(&mut self) -> std::result::Result<BTreeSet<usize>, HintError> {
        if self.session.hint.active {
            return Err(HintError::AlreadyActive);
        }
        if self.state != RoundState::Idle || self.session.is_paused {
            return Err(HintError::Unavailable);
        }
        let sentence = &self.sentences[self.session.current_round_index];
        self.hints.request_hint(&mut self.session, sentence)
    }

    pub fn pause(&mut self) {
        if self.is_over() || self.session.is_paused {
            return;
        }
        self.session.is_paused = true;
        self.clock.pause();
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.suspend();
        }
        tracing::debug!(elapsed = self.clock.elapsed_seconds(), "paused");
    }

    pub fn resume(&mut self) {
        if !self.session.is_paused {
            return;
        }
        self.session.is_paused = false;
        self.clock.resume();
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.resume();
        }
        tracing::debug!(elapsed = self.clock.elapsed_seconds(), "resumed");
    }

    /// Flips pause and returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.session.is_paused {
            self.resume();
        } else {
            self.pause();
        }
        self.session.is_paused
    }

    /// Moves logical time forward by `dt`; fires due clock ticks and feedback steps.
    pub fn advance(&mut self, dt: Duration) -> Vec<EngineEvent> {
        if !self.is_over() && !self.session.is_paused {
            if self.clock.advance(dt) > 0 {
                self.session.elapsed_seconds = self.clock.elapsed_seconds();
                self.pending.push(EngineEvent::Tick {
                    elapsed_seconds: self.session.elapsed_seconds,
                });
            }

            let due = self
                .timeline
                .as_mut()
                .map(|t| t.advance(dt))
                .unwrap_or_default();
            for phase in due {
                self.apply_phase(phase);
            }
        }

        mem::take(&mut self.pending)
    }

    /// Events queued by input calls since the last [`RoundEngine::advance`].
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.pending)
    }

    /// Ends the session early: drops any in-flight feedback sequence and moves
    /// to [`RoundState::Abandoned`]. The pending round is not recorded.
    pub fn abandon(&mut self) {
        if self.is_over() {
            return;
        }
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.cancel();
        }
        self.timeline = None;
        self.session.resolution_locked = false;
        self.session.is_paused = false;
        self.clock.pause();
        self.state = RoundState::Abandoned;
        tracing::info!(round = self.session.current_round_index, "session abandoned");
    }

    fn is_over(&self) -> bool {
        matches!(self.state, RoundState::Complete | RoundState::Abandoned)
    }

    fn apply_phase(&mut self, phase: FeedbackPhase) {
        if let RoundState::Resolving { hit, selected, .. } = self.state {
            self.state = RoundState::Resolving {
                phase,
                hit,
                selected,
            };
            self.pending.push(EngineEvent::Phase(phase));
            if phase == FeedbackPhase::Commit {
                self.commit(hit);
            }
        }
    }

    fn commit(&mut self, hit: bool) {
        let result = self.session.record(hit);
        self.session.hint.reset();
        self.session.resolution_locked = false;
        self.timeline = None;
        tracing::info!(
            round = result.round_index,
            hit = result.hit,
            used_hint = result.used_hint,
            "round settled"
        );
        self.pending.push(EngineEvent::RoundSettled(result));

        if self.session.current_round_index + 1 < self.session.round_count {
            self.session.current_round_index += 1;
            self.state = RoundState::Idle;
            self.audio.trigger(AudioCue::Ready);
            self.pending.push(EngineEvent::RoundStarted {
                round_index: self.session.current_round_index,
            });
        } else {
            self.session.current_round_index = self.session.round_count;
            self.state = RoundState::Complete;
            self.clock.pause();
            match self.aggregator.finalize(&self.session, &self.clock) {
                Ok(summary) => self.pending.push(EngineEvent::GameComplete(summary)),
                Err(e) => tracing::error!(error = %e, "could not finalize game"),
            }
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn language(&self) -> Language {
        self.session.language
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn round_count(&self) -> usize {
        self.sentences.len()
    }

    /// `None` once the game is complete.
    pub fn current_sentence(&self) -> Option<&Sentence> {
        self.sentences.get(self.session.current_round_index)
    }

    /// Word indices that would currently be accepted; empty while locked or paused.
    pub fn clickable_indices(&self) -> Vec<usize> {
        if self.state != RoundState::Idle || self.session.is_paused {
            return Vec::new();
        }
        let count = self.current_sentence().map_or(0, Sentence::token_count);
        (0..count)
            .filter(|&i| self.session.hint.is_clickable(i))
            .collect()
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused
    }

    pub fn is_resolving(&self) -> bool {
        self.session.resolution_locked
    }

    pub fn is_complete(&self) -> bool {
        self.state == RoundState::Complete
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed_seconds()
    }

    /// Time left in the current feedback sequence, if one is in flight.
    pub fn feedback_remaining(&self) -> Option<Duration> {
        self.timeline
            .as_ref()
            .filter(|t| !t.is_finished())
            .map(FeedbackTimeline::remaining)
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.aggregator.summary()
    }

    pub fn audio(&self) -> &AudioCues {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioCues {
        &mut self.audio
    }
}
