//! Buffered and streaming render handlers.

use std::sync::Arc;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use strand_core::{RenderApp, RenderError, RequestContext};
use strand_observability::{RequestMetrics, StructuredLogger};
use strand_streaming::{FlushPolicy, StreamApp, StreamingSink, RENDER_DEADLINE};
use strand_template::{ShellTemplate, TemplateSource};

use crate::body::{body_channel, full_body, BodySink, ResponseBody};

/// Build a `text/html` response.
pub fn html_response(status: StatusCode, html: impl Into<String>) -> Response<ResponseBody> {
    let mut response = Response::new(full_body(html.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// Framework-default error page: unstyled, nothing app-specific.
pub fn error_response(status: StatusCode, message: &str) -> Response<ResponseBody> {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body><pre>{}</pre></body>\n</html>\n",
        status, message
    );
    html_response(status, html)
}

/// Render the whole tree, splice it into the shell, answer with one
/// complete document.
pub fn render_buffered(
    app: &dyn RenderApp,
    template: &ShellTemplate,
    mut ctx: RequestContext,
    logger: &StructuredLogger,
) -> Response<ResponseBody> {
    match app.render() {
        Ok(markup) => {
            let document = template.substitute(&markup);
            ctx.timing.mark("completed");

            RequestMetrics::from_timing(&ctx.request_id, &ctx.timing, &[], &[])
                .with_app(app.name())
                .with_route(&ctx.path)
                .with_status(200)
                .log_to(logger);

            html_response(StatusCode::OK, document)
        }
        Err(e) => {
            logger.error_with("shell render failed", &[("error", &e)]);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Stream the tree shell-first.
///
/// The response head and shell go out as soon as the shell is ready;
/// sections follow as their content resolves, the template tail closes the
/// document. The whole drive races the fixed [`RENDER_DEADLINE`]; at the
/// deadline the body is closed with no further writes.
pub fn render_streaming(
    app: Arc<dyn StreamApp>,
    source: &TemplateSource,
    ctx: RequestContext,
    logger: &StructuredLogger,
) -> Response<ResponseBody> {
    let template = match source.resolve() {
        Ok(template) => template,
        Err(e) => {
            logger.error_with("shell template unavailable", &[("error", &e)]);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    let parts = match template.split() {
        Some(parts) => parts,
        None => {
            // Outlet missing: the document passes through unchanged and the
            // rendered markup is dropped.
            logger.warn("shell template has no outlet token");
            return html_response(StatusCode::OK, template.html().to_string());
        }
    };

    // The shell is the synchronous phase; its failure happens before the
    // first byte and still yields a proper error page.
    let shell = match app.shell() {
        Ok(shell) => shell,
        Err(e) => {
            logger.error_with("shell render failed", &[("error", &e)]);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    let (body_sink, body) = body_channel(16);
    let mut sink =
        StreamingSink::new(body_sink, ctx.timing.clone()).with_flush_policy(FlushPolicy::AfterEachSection);

    let opening = format!("{}{}", parts.head, shell);
    let tail = parts.tail;
    let route = ctx.path.clone();
    let app_name = app.name().to_string();
    let logger = logger.clone();

    tokio::spawn(async move {
        let outcome =
            tokio::time::timeout(RENDER_DEADLINE, drive(app, &opening, &tail, &mut sink, &logger))
                .await;
        match outcome {
            Ok(Ok(fallbacks)) => {
                RequestMetrics::from_timing(
                    logger.request_id(),
                    sink.timing(),
                    sink.sections_sent(),
                    &fallbacks,
                )
                .with_app(app_name)
                .with_route(route)
                .with_status(200)
                .log_to(&logger);
            }
            Ok(Err(e)) => {
                // Deferred failure without a fallback fails the response:
                // the body closes without the tail instead of pretending
                // the document completed.
                logger.error_with("streaming render failed", &[("error", &e)]);
                sink.fail();
            }
            Err(_) => {
                sink.abort();
                logger.warn("render deadline reached, response aborted");
            }
        }
    });

    let mut response = Response::new(body);
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// Drive one streaming render: shell, sections in order, closing tail.
/// Returns the names of sections that streamed their fallback.
async fn drive(
    app: Arc<dyn StreamApp>,
    opening: &str,
    tail: &str,
    sink: &mut StreamingSink<BodySink, futures::channel::mpsc::SendError>,
    logger: &StructuredLogger,
) -> Result<Vec<String>, RenderError> {
    sink.send_shell(opening).await?;

    let mut fallbacks = Vec::new();
    for section in app.sections() {
        let resolved = match section.timeout {
            Some(budget) => tokio::time::timeout(budget, app.resolve_section(&section))
                .await
                .unwrap_or_else(|_| {
                    Err(RenderError::SectionFailed(
                        section.name.clone(),
                        "section timed out".to_string(),
                    ))
                }),
            None => app.resolve_section(&section).await,
        };

        let html = match resolved {
            Ok(html) => html,
            Err(e) => match &section.fallback {
                Some(fallback) => {
                    logger.warn_with(
                        "section fell back",
                        &[("section", &section.name), ("error", &e)],
                    );
                    fallbacks.push(section.name.clone());
                    fallback.clone()
                }
                None => return Err(e),
            },
        };
        sink.send_section(&section.name, &html).await?;
    }

    sink.complete(tail).await?;
    Ok(fallbacks)
}
