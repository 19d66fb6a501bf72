//! Section renderers for the storefront page.

mod features;
mod hero;
mod reviews;

pub use features::*;
pub use hero::*;
pub use reviews::*;
