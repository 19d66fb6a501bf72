//! Hero banner section.

use crate::data::HeroContent;

/// Render the hero banner section.
pub fn render_hero(content: &HeroContent) -> String {
    format!(
        r#"<section class="hero" data-section="hero">
    <h2>{}</h2>
    <p>{}</p>
    <a href="{}" class="hero-cta" data-cta>{}</a>
</section>"#,
        html_escape(&content.headline),
        html_escape(&content.subheadline),
        html_escape(&content.cta_url),
        html_escape(&content.cta_text)
    )
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
    fn test_hero_escapes_content() {
        let content = HeroContent {
            headline: "<b>bold</b>".to_string(),
            ..HeroContent::default()
        };
        let html = render_hero(&content);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("data-section=\"hero\""));
    }
}
