//! The fixed component tree for the buffered demo.

use chrono::Local;
use strand_core::{RenderApp, RenderError};

/// The demo page: a heading, intro copy, a feature list, and a counter
/// widget the client bundle hydrates.
pub struct HelloApp;

impl RenderApp for HelloApp {
    fn name(&self) -> &str {
        "hello-ssr"
    }

    fn render(&self) -> Result<String, RenderError> {
        let rendered_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Ok(format!(
            "{}{}{}",
            render_intro(&rendered_at),
            render_features(),
            render_counter()
        ))
    }
}

fn render_intro(rendered_at: &str) -> String {
    format!(
        r#"<section class="intro">
    <h1>Server-Side Rendering Demo</h1>
    <p>This page was rendered on the server and hydrated in the browser.</p>
    <p>Rendered at: {}</p>
</section>"#,
        html_escape(rendered_at)
    )
}

fn render_features() -> String {
    let items: String = [
        "Server-side rendering of a fixed component tree",
        "Client-side hydration of the rendered markup",
        "Static asset mount for the client bundle",
        "A streaming shell-first variant on port 5173",
    ]
    .iter()
    .map(|item| format!("        <li>{}</li>\n", html_escape(item)))
    .collect();

    format!(
        r#"<section class="features">
    <h3>What this demo shows</h3>
    <ul>
{}    </ul>
</section>"#,
        items
    )
}

/// Counter markup must match what `public/js/bundle.js` hydrates.
fn render_counter() -> String {
    r#"<section class="counter" data-widget="counter">
    <p>Current count: <span data-count>0</span></p>
    <button data-increment>Increment</button>
</section>"#
        .to_string()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_every_section() {
        let html = HelloApp.render().unwrap();
        assert!(html.contains("<h1>Server-Side Rendering Demo</h1>"));
        assert!(html.contains("Rendered at:"));
        assert!(html.contains("data-widget=\"counter\""));
        assert!(html.contains("<span data-count>0</span>"));
    }

    #[test]
    fn test_dynamic_text_is_escaped() {
        let html = render_intro("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
