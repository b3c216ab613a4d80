use crate::error::{GameError, Result};

/// Clipboard-write primitive used by the share button.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text.to_owned()))
            .map_err(|e| GameError::Clipboard(e.to_string()))
    }
}

/// Transient notice shown after a share attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareNotice {
    Copied,
    CopyFailed,
}

/// Writes `text` and maps the outcome to a user notice; failures are logged, not fatal.
pub fn copy_share_text(clipboard: &mut dyn ClipboardWriter, text: &str) -> ShareNotice {
    match clipboard.write_text(text) {
        Ok(()) => ShareNotice::Copied,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            ShareNotice::CopyFailed
        }
    }
}
