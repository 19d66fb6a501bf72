//! Features section.

use crate::data::FeaturesContent;

/// Render the features section.
pub fn render_features(content: &FeaturesContent) -> String {
    let cards: String = content
        .features
        .iter()
        .map(|f| {
            format!(
                r#"<div class="feature-card">
        <h4>{}</h4>
        <p>{}</p>
    </div>"#,
                html_escape(&f.title),
                html_escape(&f.description)
            )
        })
        .collect();

    format!(
        r#"<section class="features" id="features" data-section="features">
    <h3>{}</h3>
    {}
</section>"#,
        html_escape(&content.section_title),
        cards
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
    fn test_features_renders_every_card() {
        let content = FeaturesContent::default();
        let html = render_features(&content);
        for feature in &content.features {
            assert!(html.contains(&feature.title));
        }
    }
}
