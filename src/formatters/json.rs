use crate::engine::SampleRecommendation;
use crate::nutrients::Recommendation;
use serde::Serialize;

/// Serializable recommendation with its request context
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport<'a> {
    pub crop: &'a str,
    pub unit: &'a str,
    pub recommendation: &'a Recommendation,
}

#[derive(Debug, Clone, Serialize)]
struct BatchReport<'a> {
    crop: &'a str,
    unit: &'a str,
    samples: &'a [SampleRecommendation],
}

/// JSON formatter for recommendations
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a report as pretty-printed JSON
    pub fn format(report: &RecommendationReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Format a report as compact JSON (no whitespace)
    pub fn format_compact(report: &RecommendationReport) -> Result<String, serde_json::Error> {
        serde_json::to_string(report)
    }

    /// Format batch results as pretty-printed JSON
    pub fn format_batch(
        crop: &str,
        unit: &str,
        results: &[SampleRecommendation],
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&BatchReport {
            crop,
            unit,
            samples: results,
        })
    }
}
