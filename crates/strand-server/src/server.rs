//! HTTP server: accept loop and per-connection tasks.
//!
//! Binds the configured port once and serves each connection over HTTP/1
//! on its own task. There is no graceful-shutdown path; the process ends
//! when it is killed.

use std::convert::Infallible;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use strand_core::AppManifest;
use tokio::net::TcpListener;

use crate::router::SsrRouter;

/// HTTP server wrapping a router.
pub struct HttpServer {
    router: Arc<SsrRouter>,
}

impl HttpServer {
    /// Create a server from a fully-constructed router.
    pub fn new(router: SsrRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn run(&self, manifest: &AppManifest) -> anyhow::Result<()> {
        let addr = self.router.config().addr();
        let listener = TcpListener::bind(addr).await?;
        println!(
            "{} v{} listening on http://{}",
            manifest.name, manifest.version, addr
        );

        loop {
            let (stream, _peer) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = Arc::clone(&self.router);

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let router = Arc::clone(&router);
                    async move { Ok::<_, Infallible>(router.route(req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    eprintln!("connection error: {}", err);
                }
            });
        }
    }
}
