//! Static asset mount.
//!
//! Serves pre-built client bundle files under a fixed URL prefix, as-is:
//! exact bytes, extension-derived content type, no caching headers.

use std::path::{Component, Path, PathBuf};

use hyper::{Response, StatusCode};
use strand_core::StaticMount;

use crate::body::{full_body, ResponseBody};
use crate::render::error_response;

/// Handler for a static asset mount.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    prefix: String,
    root: PathBuf,
}

impl StaticFiles {
    /// Create a handler from a configured mount.
    pub fn new(mount: &StaticMount) -> Self {
        Self {
            prefix: mount.prefix.clone(),
            root: mount.dir.clone(),
        }
    }

    /// Whether a request path falls under this mount.
    pub fn matches(&self, path: &str) -> bool {
        path == self.prefix || path.starts_with(&format!("{}/", self.prefix))
    }

    /// Serve the file a request path maps to.
    pub async fn serve(&self, path: &str) -> Response<ResponseBody> {
        let relative = path
            .strip_prefix(&self.prefix)
            .unwrap_or(path)
            .trim_start_matches('/');
        if relative.is_empty() || !is_safe_relative(relative) {
            return error_response(StatusCode::NOT_FOUND, "Not Found");
        }

        let file = self.root.join(relative);
        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                let mut response = Response::new(full_body(bytes));
                response.headers_mut().insert(
                    hyper::header::CONTENT_TYPE,
                    hyper::header::HeaderValue::from_static(content_type(&file)),
                );
                response
            }
            Err(_) => error_response(StatusCode::NOT_FOUND, "Not Found"),
        }
    }
}

/// Reject traversal and absolute segments before touching the filesystem.
fn is_safe_relative(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount() -> StaticFiles {
        StaticFiles::new(&StaticMount::new(
            "/static",
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"),
        ))
    }

    #[test]
    fn test_prefix_matching() {
        let statics = mount();
        assert!(statics.matches("/static"));
        assert!(statics.matches("/static/js/bundle.js"));
        assert!(!statics.matches("/staticfile"));
        assert!(!statics.matches("/"));
    }

    #[test]
    fn test_traversal_segments_are_unsafe() {
        assert!(is_safe_relative("js/bundle.js"));
        assert!(!is_safe_relative("../Cargo.toml"));
        assert!(!is_safe_relative("js/../../Cargo.toml"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type(Path::new("a/bundle.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("style.css")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("blob.bin")), "application/octet-stream");
        assert_eq!(content_type(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let response = mount().serve("/static/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_is_404() {
        let response = mount().serve("/static/../Cargo.toml").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
