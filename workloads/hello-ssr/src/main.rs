//! Buffered SSR demo server.
//!
//! Every GET request renders the fixed tree to one complete HTML document
//! on port 3000. Client assets are served under `/static`.

mod app;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use strand_core::{AppManifest, ServerConfig};
use strand_server::{HttpServer, SsrRouter};
use strand_template::ShellTemplate;

use app::HelloApp;

fn workload_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let manifest = AppManifest::new("hello-ssr", env!("CARGO_PKG_VERSION"));
    let config = ServerConfig::new("hello-ssr")
        .with_port(3000)
        .with_static_mount("/static", workload_path("public"));

    let template = ShellTemplate::load(workload_path("templates/shell.html"))
        .context("loading shell template")?;

    let router = SsrRouter::buffered(config, Arc::new(HelloApp), template);
    HttpServer::new(router).run(&manifest).await
}
