//! App manifest and the buffered render seam.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Manifest for a deployable demo app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppManifest {
    /// Unique name for this app.
    pub name: String,
    /// Semantic version.
    pub version: String,
}

impl AppManifest {
    /// Create a new app manifest.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A fixed component tree rendered to one complete markup string.
///
/// The tree is re-derived from scratch on every call; implementations hold
/// no per-request mutable state, so one instance is shared across requests.
pub trait RenderApp: Send + Sync + 'static {
    /// App name used in logs.
    fn name(&self) -> &str;

    /// Render the whole tree to HTML markup.
    fn render(&self) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_roundtrip() {
        let manifest = AppManifest::new("hello-ssr", "0.1.0");
        let json = serde_json::to_string(&manifest).unwrap();
        let back: AppManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "hello-ssr");
        assert_eq!(back.version, "0.1.0");
    }
}
