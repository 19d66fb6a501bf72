//! Request dispatch.
//!
//! One dispatch path for every request: method gate, static asset mount,
//! then the catch-all render handler. There is no routing logic beyond
//! this; the rendered tree is path-independent.

use std::sync::Arc;

use hyper::{Request, Response, StatusCode};
use strand_core::{Method, RenderApp, RequestContext, ServerConfig};
use strand_observability::StructuredLogger;
use strand_streaming::StreamApp;
use strand_template::{ShellTemplate, TemplateSource};

use crate::body::ResponseBody;
use crate::render::{error_response, render_buffered, render_streaming};
use crate::static_files::StaticFiles;

/// How the catch-all route renders.
enum AppHandler {
    /// One complete document per request.
    Buffered {
        app: Arc<dyn RenderApp>,
        template: ShellTemplate,
    },
    /// Shell-first progressive streaming.
    Streaming {
        app: Arc<dyn StreamApp>,
        template: TemplateSource,
    },
}

/// Router owning the server's whole dispatch state.
///
/// Constructed once at startup from owned parts (config, app, template)
/// and shared across connections; nothing here is ambient or lazily
/// initialized.
pub struct SsrRouter {
    config: ServerConfig,
    statics: Option<StaticFiles>,
    handler: AppHandler,
}

impl SsrRouter {
    /// Build a router for a buffered app.
    pub fn buffered(config: ServerConfig, app: Arc<dyn RenderApp>, template: ShellTemplate) -> Self {
        let statics = config.static_mount.as_ref().map(StaticFiles::new);
        Self {
            config,
            statics,
            handler: AppHandler::Buffered { app, template },
        }
    }

    /// Build a router for a streaming app.
    pub fn streaming(
        config: ServerConfig,
        app: Arc<dyn StreamApp>,
        template: TemplateSource,
    ) -> Self {
        let statics = config.static_mount.as_ref().map(StaticFiles::new);
        Self {
            config,
            statics,
            handler: AppHandler::Streaming { app, template },
        }
    }

    /// Server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Dispatch one request to a response.
    pub async fn route<B>(&self, req: Request<B>) -> Response<ResponseBody> {
        let path = req.uri().path().to_string();

        // Only GET is served; everything else is refused up front.
        let method = match Method::from_http(req.method()) {
            Some(Method::Get) => Method::Get,
            _ => return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        };

        if let Some(statics) = &self.statics {
            if statics.matches(&path) {
                return statics.serve(&path).await;
            }
        }

        let mut ctx = RequestContext::new(method, path.clone());
        for (name, value) in req.headers() {
            if let Ok(value) = value.to_str() {
                ctx.headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let logger = StructuredLogger::new(ctx.request_id.clone())
            .with_app(&self.config.app_name)
            .with_route(&path);
        logger.info(&format!("{} {}", ctx.method.as_str(), ctx.path));

        match &self.handler {
            AppHandler::Buffered { app, template } => {
                render_buffered(app.as_ref(), template, ctx, &logger)
            }
            AppHandler::Streaming { app, template } => {
                render_streaming(Arc::clone(app), template, ctx, &logger)
            }
        }
    }
}
