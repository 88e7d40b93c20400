//! Fertilizer Advisor
//!
//! Recommends per-nutrient fertilizer quantities for a crop from observed soil
//! nutrient levels.
//!
//! - `engine`: the recommendation itself (deficit per nutrient, floored at zero)
//! - `data`: crop requirement tables and soil samples, loaded with Polars
//! - `input`: `NAME=VALUE` reading parser
//! - `formatters` / `chart`: text, markdown, JSON and bar-chart presenters
//! - `config`: environment-driven settings

pub mod chart;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod formatters;
pub mod input;
pub mod nutrients;

// Re-export commonly used types
pub use chart::BarChart;
pub use config::AdvisorConfig;
pub use data::{load_soil_samples, CropProfile, CropTable, SoilSample};
pub use engine::{recommend, recommend_batch, try_recommend, SampleRecommendation};
pub use error::AdvisorError;
pub use formatters::{JsonFormatter, MarkdownFormatter, RecommendationReport, TextFormatter};
pub use input::parse_readings;
pub use nutrients::{NutrientLevels, ObservedLevels, Recommendation};
