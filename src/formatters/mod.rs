pub mod text;
pub mod markdown;
pub mod json;

pub use text::TextFormatter;
pub use markdown::MarkdownFormatter;
pub use json::{JsonFormatter, RecommendationReport};

/// Shown when a recommendation has no entries
pub const NO_RECOMMENDATION: &str = "No specific fertilizer recommendation.";
