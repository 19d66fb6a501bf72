//! Core abstractions for the Strand shell-first SSR stack.
//!
//! This crate provides the fundamental types and traits:
//! - `RenderApp` trait - Buffered render interface
//! - `RequestContext` - Per-request identity and timing
//! - `RenderPhase` - Explicit render lifecycle state machine
//! - `ServerConfig` - Constructed (non-ambient) server configuration

mod app;
mod config;
mod context;
mod error;
mod lifecycle;

pub use app::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use lifecycle::*;
