//! Render error taxonomy.

use crate::lifecycle::RenderPhase;

/// Errors that can occur while rendering a response.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A section write was attempted before the shell was flushed.
    #[error("shell not sent before sections")]
    ShellNotSent,

    /// A lifecycle transition was rejected by the state machine.
    #[error("invalid render phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Phase the machine was in.
        from: RenderPhase,
        /// Phase the caller tried to move to.
        to: RenderPhase,
    },

    /// The synchronous shell render failed before the first byte.
    #[error("shell render failed: {0}")]
    ShellFailed(String),

    /// A deferred section failed after streaming began.
    #[error("section '{0}' failed: {1}")]
    SectionFailed(String, String),

    /// The underlying byte stream rejected a write.
    #[error("stream error: {0}")]
    Stream(String),

    /// The fixed render deadline fired before all content resolved.
    #[error("render aborted at deadline")]
    Aborted,
}
