use std::io::{self, Write};

/// Sound effects the game asks its audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AudioCue {
    /// A word was shot.
    Shot,
    /// A new round is loaded.
    Ready,
}

/// Plays cues; implementations must never block the game loop.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Rings the terminal bell for shots; the only sound a plain terminal can make.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        if cue == AudioCue::Shot {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}

/// Audio sink gated by the externally owned "audio enabled" flag.
pub struct AudioCues {
    sink: Box<dyn AudioSink>,
    enabled: bool,
}

impl std::fmt::Debug for AudioCues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCues")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new(Box::new(NullAudio), false)
    }
}

impl AudioCues {
    pub fn new(sink: Box<dyn AudioSink>, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    pub fn trigger(&mut self, cue: AudioCue) {
        if self.enabled {
            tracing::trace!(%cue, "audio cue");
            self.sink.play(cue);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
