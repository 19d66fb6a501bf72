//! Reviews section: the slow, fallback-protected dependency.

use crate::data::ReviewsContent;

/// Render the reviews section.
pub fn render_reviews(content: &ReviewsContent) -> String {
    let entries: String = content
        .reviews
        .iter()
        .map(|r| {
            format!(
                r#"<blockquote class="review">
        <p>{}</p>
        <footer>{} — {}/5</footer>
    </blockquote>"#,
                html_escape(&r.body),
                html_escape(&r.author),
                r.rating
            )
        })
        .collect();

    format!(
        r#"<section class="reviews" data-section="reviews">
    <h3>What readers say</h3>
    {}
</section>"#,
        entries
    )
}

/// Fallback markup streamed when reviews miss their budget.
pub fn render_reviews_unavailable() -> String {
    r#"<section class="reviews reviews-unavailable" data-section="reviews">
    <h3>What readers say</h3>
    <p>Reviews are taking too long to load.</p>
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
    use crate::data::Review;

    #[test]
    fn test_reviews_include_author_and_rating() {
        let content = ReviewsContent {
            reviews: vec![Review::new("Ada", 5, "great")],
        };
        let html = render_reviews(&content);
        assert!(html.contains("Ada"));
        assert!(html.contains("5/5"));
    }

    #[test]
    fn test_fallback_keeps_section_marker() {
        assert!(render_reviews_unavailable().contains("data-section=\"reviews\""));
    }
}
