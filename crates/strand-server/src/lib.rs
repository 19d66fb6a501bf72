//! HTTP surface for the Strand SSR stack.
//!
//! The server accepts connections on a single listening socket and routes
//! every request through one dispatch path: static asset mount, then the
//! catch-all GET render handler. Rendering is path-independent; every path
//! produces the same fixed component tree.

mod body;
mod render;
mod router;
mod server;
mod static_files;

pub use body::*;
pub use render::*;
pub use router::*;
pub use server::*;
pub use static_files::*;
