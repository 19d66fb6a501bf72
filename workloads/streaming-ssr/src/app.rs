//! The streamed component tree for the storefront demo.

use std::time::Duration;

use async_trait::async_trait;
use strand_core::RenderError;
use strand_streaming::{Section, StreamApp};

use crate::data::ContentSource;
use crate::sections::{render_features, render_hero, render_reviews, render_reviews_unavailable};

/// The storefront page: a synchronous masthead shell, then hero, features,
/// and reviews streamed in order as their content resolves.
pub struct StorefrontApp {
    source: ContentSource,
}

impl StorefrontApp {
    pub fn new() -> Self {
        Self {
            source: ContentSource,
        }
    }
}

impl Default for StorefrontApp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamApp for StorefrontApp {
    fn name(&self) -> &str {
        "streaming-ssr"
    }

    fn shell(&self) -> Result<String, RenderError> {
        Ok(r#"<header class="masthead">
    <h1>Strand Storefront</h1>
    <p>Shell-first streaming demo</p>
</header>"#
            .to_string())
    }

    fn sections(&self) -> Vec<Section> {
        vec![
            Section::new("hero"),
            Section::new("features"),
            Section::builder("reviews")
                .with_timeout(Duration::from_secs(2))
                .with_fallback(render_reviews_unavailable())
                .build(),
        ]
    }

    async fn resolve_section(&self, section: &Section) -> Result<String, RenderError> {
        match section.name.as_str() {
            "hero" => Ok(render_hero(&self.source.load_hero().await)),
            "features" => Ok(render_features(&self.source.load_features().await)),
            "reviews" => Ok(render_reviews(&self.source.load_reviews().await)),
            other => Err(RenderError::SectionFailed(
                other.to_string(),
                "unknown section".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_ordered() {
        let app = StorefrontApp::new();
        let names: Vec<String> = app.sections().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["hero", "features", "reviews"]);
    }

    #[test]
    fn test_only_reviews_carries_a_fallback() {
        let app = StorefrontApp::new();
        for section in app.sections() {
            if section.name == "reviews" {
                assert!(section.fallback.is_some());
                assert!(section.timeout.is_some());
            } else {
                assert!(section.fallback.is_none());
            }
        }
    }

    #[tokio::test]
    async fn test_every_section_resolves() {
        let app = StorefrontApp::new();
        for section in app.sections() {
            let html = app.resolve_section(&section).await.unwrap();
            assert!(html.contains(&format!("data-section=\"{}\"", section.name)));
        }
    }

    #[tokio::test]
    async fn test_unknown_section_is_an_error() {
        let app = StorefrontApp::new();
        let err = app
            .resolve_section(&Section::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::SectionFailed(..)));
    }
}
