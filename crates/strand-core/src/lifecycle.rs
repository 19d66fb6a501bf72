//! Render lifecycle state machine and request timing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::RenderError;

/// Explicit render lifecycle phases.
///
/// The streaming sink drives this machine instead of composing callbacks:
/// every write is a guarded transition, so an out-of-order write is an
/// error rather than silently corrupted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Nothing written yet.
    NotStarted,
    /// The shell has been flushed to the client.
    ShellReady,
    /// At least one section has been written after the shell.
    Streaming,
    /// All content resolved and the closing bytes were written.
    AllReady,
    /// The deadline fired before all content resolved; no further writes.
    Aborted,
    /// Rendering failed; no further writes.
    Failed,
}

impl RenderPhase {
    /// Whether no further transitions are possible from this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AllReady | Self::Aborted | Self::Failed)
    }

    /// Whether the machine may move from this phase to `next`.
    pub fn can_advance(&self, next: Self) -> bool {
        use RenderPhase::*;
        match (self, next) {
            // Abort and failure are reachable from any live phase.
            (from, Aborted) | (from, Failed) => !from.is_terminal(),
            (NotStarted, ShellReady) => true,
            (ShellReady, Streaming) | (Streaming, Streaming) => true,
            (ShellReady, AllReady) | (Streaming, AllReady) => true,
            _ => false,
        }
    }

    /// Advance to `next`, or return the rejected transition.
    pub fn advance(&mut self, next: Self) -> Result<(), RenderError> {
        if !self.can_advance(next) {
            return Err(RenderError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

/// Timing context for observability.
///
/// Records monotonic marks over the life of one request; the metrics
/// snapshot is derived from these after the response completes.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Mark section start.
    pub fn mark_section_start(&mut self, section: &str) {
        self.mark(&format!("section_{}_start", section));
    }

    /// Mark section sent.
    pub fn mark_section_sent(&mut self, section: &str) {
        self.mark(&format!("section_{}_sent", section));
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from request start to shell flush.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.marks
            .get("shell_sent")
            .map(|t| t.duration_since(self.start))
    }

    /// Time from request start to the first section flush.
    pub fn time_to_first_section(&self) -> Option<Duration> {
        self.marks
            .iter()
            .filter(|(k, _)| k.starts_with("section_") && k.ends_with("_sent"))
            .map(|(_, t)| t.duration_since(self.start))
            .min()
    }

    /// Time from request start to the completion write.
    pub fn time_to_complete(&self) -> Option<Duration> {
        self.marks
            .get("completed")
            .map(|t| t.duration_since(self.start))
    }

    /// Timing for a specific section.
    pub fn section_timing(&self, section: &str) -> Option<SectionTiming> {
        let start = self.marks.get(&format!("section_{}_start", section))?;
        let sent = self.marks.get(&format!("section_{}_sent", section))?;

        Some(SectionTiming {
            name: section.to_string(),
            start: start.duration_since(self.start),
            sent: sent.duration_since(self.start),
            duration: sent.duration_since(*start),
        })
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing information for a single section.
#[derive(Debug, Clone)]
pub struct SectionTiming {
    /// Section name.
    pub name: String,
    /// Time from request start to section start.
    pub start: Duration,
    /// Time from request start to section sent.
    pub sent: Duration,
    /// Duration of section rendering.
    pub duration: Duration,
}
