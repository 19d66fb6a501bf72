//! Sections and the streaming render interface.

use std::time::Duration;

use async_trait::async_trait;
use strand_core::RenderError;

/// A section is a named, independently-streamable part of the page.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section name (used for timing and identification).
    pub name: String,
    /// Fallback HTML streamed if the section fails or times out.
    pub fallback: Option<String>,
    /// Resolution budget for this section, within the global deadline.
    pub timeout: Option<Duration>,
}

impl Section {
    /// Create a new section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
            timeout: None,
        }
    }

    /// Create a section using the builder.
    pub fn builder(name: impl Into<String>) -> SectionBuilder {
        SectionBuilder::new(name)
    }
}

/// Builder for ergonomic section definition.
pub struct SectionBuilder {
    name: String,
    fallback: Option<String>,
    timeout: Option<Duration>,
}

impl SectionBuilder {
    /// Create a new section builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
            timeout: None,
        }
    }

    /// Set fallback HTML.
    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    /// Set the resolution budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the section.
    pub fn build(self) -> Section {
        Section {
            name: self.name,
            fallback: self.fallback,
            timeout: self.timeout,
        }
    }
}

/// A component tree streamed shell-first.
///
/// The shell is the synchronously-renderable part of the tree; sections
/// resolve asynchronously and are streamed in declaration order.
#[async_trait]
pub trait StreamApp: Send + Sync + 'static {
    /// App name used in logs.
    fn name(&self) -> &str;

    /// Render the synchronous shell markup (layout and placeholders).
    fn shell(&self) -> Result<String, RenderError>;

    /// Sections to stream, in order.
    fn sections(&self) -> Vec<Section>;

    /// Resolve one section's markup.
    async fn resolve_section(&self, section: &Section) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let section = Section::builder("reviews")
            .with_fallback("<p>Reviews unavailable</p>")
            .with_timeout(Duration::from_secs(2))
            .build();

        assert_eq!(section.name, "reviews");
        assert_eq!(section.fallback.as_deref(), Some("<p>Reviews unavailable</p>"));
        assert_eq!(section.timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_plain_section_has_no_fallback() {
        let section = Section::new("hero");
        assert!(section.fallback.is_none());
        assert!(section.timeout.is_none());
    }
}
