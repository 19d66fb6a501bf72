//! Router-level behavior: the catch-all GET route, the static mount, and
//! buffered rendering end to end.

use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use strand_core::{RenderApp, RenderError, ServerConfig};
use strand_server::SsrRouter;
use strand_template::ShellTemplate;

const SHELL: &str = "<html><body><div id=\"root\"><!--ssr-outlet--></div></body></html>";

struct FixedApp;

impl RenderApp for FixedApp {
    fn name(&self) -> &str {
        "fixed"
    }

    fn render(&self) -> Result<String, RenderError> {
        Ok("<h1>Fixed Tree</h1><p>hello</p>".to_string())
    }
}

struct BrokenApp;

impl RenderApp for BrokenApp {
    fn name(&self) -> &str {
        "broken"
    }

    fn render(&self) -> Result<String, RenderError> {
        Err(RenderError::ShellFailed("boom".to_string()))
    }
}

fn fixtures_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")
}

fn buffered_router(app: Arc<dyn RenderApp>, shell: &str) -> SsrRouter {
    let config = ServerConfig::new("test").with_static_mount("/static", fixtures_dir());
    SsrRouter::buffered(config, app, ShellTemplate::new(shell))
}

fn get(path: &str) -> Request<()> {
    Request::builder().uri(path).body(()).unwrap()
}

async fn body_bytes(response: hyper::Response<strand_server::ResponseBody>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn test_every_path_renders_the_same_tree() {
    let router = buffered_router(Arc::new(FixedApp), SHELL);

    let mut bodies = Vec::new();
    for path in ["/", "/about", "/deeply/nested/path", "/products?id=42"] {
        let response = router.route(get(path)).await;
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);
        assert_eq!(
            response.headers()[hyper::header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        bodies.push(body_bytes(response).await);
    }

    let expected = ShellTemplate::new(SHELL).substitute("<h1>Fixed Tree</h1><p>hello</p>");
    for body in bodies {
        assert_eq!(body, expected.as_bytes());
    }
}

#[tokio::test]
async fn test_non_get_is_refused() {
    let router = buffered_router(Arc::new(FixedApp), SHELL);
    let request = Request::builder()
        .method(hyper::Method::POST)
        .uri("/")
        .body(())
        .unwrap();

    let response = router.route(request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_outlet_passes_template_through() {
    let shell = "<html><body><div id=\"root\"></div></body></html>";
    let router = buffered_router(Arc::new(FixedApp), shell);

    let response = router.route(get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, shell.as_bytes());
}

#[tokio::test]
async fn test_render_failure_is_500() {
    let router = buffered_router(Arc::new(BrokenApp), SHELL);

    let response = router.route(get("/")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("Internal Server Error"));
}

#[tokio::test]
async fn test_static_assets_are_served_byte_exact() {
    let router = buffered_router(Arc::new(FixedApp), SHELL);

    let response = router.route(get("/static/js/bundle.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[hyper::header::CONTENT_TYPE],
        "text/javascript; charset=utf-8"
    );

    let expected = std::fs::read(format!("{}/js/bundle.js", fixtures_dir())).unwrap();
    assert_eq!(body_bytes(response).await, expected);
}

#[tokio::test]
async fn test_static_css_content_type() {
    let router = buffered_router(Arc::new(FixedApp), SHELL);

    let response = router.route(get("/static/css/style.css")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[hyper::header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );
}

#[tokio::test]
async fn test_static_miss_is_404() {
    let router = buffered_router(Arc::new(FixedApp), SHELL);

    let response = router.route(get("/static/js/missing.js")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
