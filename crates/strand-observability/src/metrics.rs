//! Per-request render timing metrics.

use std::collections::HashMap;

use serde::Serialize;
use strand_core::{RequestId, TimingContext};

use crate::logging::{LogLevel, StructuredLogger};

/// Metrics snapshot for a single rendered response.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMetrics {
    /// Request ID for correlation.
    pub request_id: String,
    /// App name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// Request path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Time to shell flush (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_shell_us: Option<u64>,
    /// Time to first section flush (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_section_us: Option<u64>,
    /// Time to the completion write (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_complete_us: Option<u64>,
    /// Per-section timings.
    pub sections: HashMap<String, SectionMetrics>,
    /// Total duration observed so far (microseconds).
    pub total_duration_us: u64,
}

/// Metrics for a single streamed section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionMetrics {
    /// Section name.
    pub name: String,
    /// Time from request start to section start (microseconds).
    pub start_us: u64,
    /// Time from request start to section sent (microseconds).
    pub sent_us: u64,
    /// Section write duration (microseconds).
    pub duration_us: u64,
    /// Whether the section streamed its fallback.
    pub used_fallback: bool,
}

impl RequestMetrics {
    /// Build a snapshot from a request's timing context.
    ///
    /// `sections` is the ordered list of section names actually written;
    /// `fallbacks` names the subset that streamed their fallback markup.
    pub fn from_timing(
        request_id: &RequestId,
        timing: &TimingContext,
        sections: &[String],
        fallbacks: &[String],
    ) -> Self {
        let section_metrics = sections
            .iter()
            .filter_map(|name| {
                let t = timing.section_timing(name)?;
                Some((
                    name.clone(),
                    SectionMetrics {
                        name: name.clone(),
                        start_us: t.start.as_micros() as u64,
                        sent_us: t.sent.as_micros() as u64,
                        duration_us: t.duration.as_micros() as u64,
                        used_fallback: fallbacks.contains(name),
                    },
                ))
            })
            .collect();

        Self {
            request_id: request_id.to_string(),
            app: None,
            route: None,
            status_code: None,
            time_to_shell_us: timing.time_to_shell().map(|d| d.as_micros() as u64),
            time_to_first_section_us: timing
                .time_to_first_section()
                .map(|d| d.as_micros() as u64),
            time_to_complete_us: timing.time_to_complete().map(|d| d.as_micros() as u64),
            sections: section_metrics,
            total_duration_us: timing.elapsed().as_micros() as u64,
        }
    }

    /// Set the app name.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Set the request path.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Emit the snapshot through a structured logger.
    pub fn log_to(&self, logger: &StructuredLogger) {
        let fields = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        logger.log_with_fields(LogLevel::Info, "render metrics", fields);
    }
}
