//! HTML shell templates and outlet substitution.
//!
//! A shell template is a static HTML document containing one literal
//! outlet token marking where rendered markup is injected. Substitution is
//! verbatim: no escaping, no second pass, first occurrence only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The literal placeholder token marking the injection point.
pub const SSR_OUTLET: &str = "<!--ssr-outlet-->";

/// Errors raised while loading a shell template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The shell file was missing or unreadable.
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// An owned shell template.
///
/// Constructed explicitly and passed into the request path by ownership;
/// there is no process-lifetime file handle behind it.
#[derive(Debug, Clone)]
pub struct ShellTemplate {
    html: String,
}

impl ShellTemplate {
    /// Create a template from an HTML string.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Load a template from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let html = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { html })
    }

    /// The raw template HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the template contains the outlet token.
    pub fn has_outlet(&self) -> bool {
        self.html.contains(SSR_OUTLET)
    }

    /// Replace the first occurrence of the outlet token with `markup`,
    /// verbatim. If the token is absent the template is returned
    /// unchanged and the markup is dropped.
    pub fn substitute(&self, markup: &str) -> String {
        self.html.replacen(SSR_OUTLET, markup, 1)
    }

    /// Split the template around the first outlet token for streaming.
    /// Returns `None` if the token is absent.
    pub fn split(&self) -> Option<TemplateParts> {
        let at = self.html.find(SSR_OUTLET)?;
        Some(TemplateParts {
            head: self.html[..at].to_string(),
            tail: self.html[at + SSR_OUTLET.len()..].to_string(),
        })
    }
}

/// The two halves of a shell template around the outlet.
#[derive(Debug, Clone)]
pub struct TemplateParts {
    /// Everything before the outlet token.
    pub head: String,
    /// Everything after the outlet token.
    pub tail: String,
}

/// Where a handler obtains its shell template.
///
/// `Static` holds a template loaded once at startup; `Reload` re-reads the
/// file on every request, the way a development server re-reads the shell
/// so edits show up without a restart.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Template loaded once, shared across requests.
    Static(ShellTemplate),
    /// Template re-read from disk per request.
    Reload(PathBuf),
}

impl TemplateSource {
    /// Resolve the template for one request.
    pub fn resolve(&self) -> Result<ShellTemplate, TemplateError> {
        match self {
            Self::Static(template) => Ok(template.clone()),
            Self::Reload(path) => ShellTemplate::load(path),
        }
    }
}
