//! Content models and the simulated content source.
//!
//! Section content arrives with realistic latency so the streamed render
//! is visible in a browser; a real deployment would fetch from a CMS or
//! commerce API here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hero banner content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_url: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            headline: "Ship Pages That Stream".to_string(),
            subheadline: "The shell renders now; the rest follows as it resolves".to_string(),
            cta_text: "See the features".to_string(),
            cta_url: "#features".to_string(),
        }
    }
}

/// A feature block for the features section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

impl Feature {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Features section content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesContent {
    pub section_title: String,
    pub features: Vec<Feature>,
}

impl Default for FeaturesContent {
    fn default() -> Self {
        Self {
            section_title: "Why stream the page".to_string(),
            features: vec![
                Feature::new(
                    "Shell first",
                    "The layout and heading flush before any slow content resolves.",
                ),
                Feature::new(
                    "Sections in order",
                    "Each named section streams the moment its content is ready.",
                ),
                Feature::new(
                    "Bounded waiting",
                    "A fixed deadline abandons renders that never finish.",
                ),
            ],
        }
    }
}

/// A single customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub body: String,
}

impl Review {
    pub fn new(author: &str, rating: u8, body: &str) -> Self {
        Self {
            author: author.to_string(),
            rating,
            body: body.to_string(),
        }
    }
}

/// Reviews section content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsContent {
    pub reviews: Vec<Review>,
}

impl Default for ReviewsContent {
    fn default() -> Self {
        Self {
            reviews: vec![
                Review::new("Ada", 5, "The page was readable before the spinner even mattered."),
                Review::new("Lin", 4, "Streaming made the slow parts feel intentional."),
                Review::new("Sam", 5, "Fast shell, honest loading. Exactly right."),
            ],
        }
    }
}

/// Simulated content source with per-section latency.
#[derive(Debug, Clone, Default)]
pub struct ContentSource;

impl ContentSource {
    /// Hero copy: fast.
    pub async fn load_hero(&self) -> HeroContent {
        tokio::time::sleep(Duration::from_millis(30)).await;
        HeroContent::default()
    }

    /// Feature blocks: moderate.
    pub async fn load_features(&self) -> FeaturesContent {
        tokio::time::sleep(Duration::from_millis(80)).await;
        FeaturesContent::default()
    }

    /// Reviews: the slow dependency, budgeted and fallback-protected.
    pub async fn load_reviews(&self) -> ReviewsContent {
        tokio::time::sleep(Duration::from_millis(150)).await;
        ReviewsContent::default()
    }
}
