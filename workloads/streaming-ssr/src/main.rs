//! Streaming SSR demo server.
//!
//! Every GET request streams the page shell-first on port 5173: the shell
//! flushes immediately, sections follow as their simulated content
//! resolves, and the template tail closes the document. The shell template
//! is re-read per request, so edits show up without a restart.

mod app;
mod data;
mod sections;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use strand_core::{AppManifest, ServerConfig};
use strand_server::{HttpServer, SsrRouter};
use strand_template::TemplateSource;

use app::StorefrontApp;

fn workload_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let manifest = AppManifest::new("streaming-ssr", env!("CARGO_PKG_VERSION"));
    let config = ServerConfig::new("streaming-ssr")
        .with_port(5173)
        .with_static_mount("/static", workload_path("public"));

    let template = TemplateSource::Reload(workload_path("templates/shell.html"));
    let router = SsrRouter::streaming(config, Arc::new(StorefrontApp::new()), template);
    HttpServer::new(router).run(&manifest).await
}
