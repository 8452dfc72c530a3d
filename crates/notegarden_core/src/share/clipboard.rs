//! Clipboard seam and in-memory implementation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Permission to write was refused.
    Denied,
    /// No clipboard is reachable from this environment.
    Unavailable,
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied => write!(f, "clipboard access denied"),
            Self::Unavailable => write!(f, "clipboard unavailable"),
        }
    }
}

impl Error for ClipboardError {}

/// Write-only text clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard held in memory; can be switched to fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failure: Option<ClipboardError>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose writes always fail with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
