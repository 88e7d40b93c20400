use crate::engine::SampleRecommendation;
use crate::formatters::NO_RECOMMENDATION;
use crate::nutrients::Recommendation;

/// Markdown formatter for recommendations
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format a single recommendation as a markdown table
    pub fn format(crop: &str, recommendation: &Recommendation, unit: &str) -> String {
        let mut md = String::with_capacity(256);

        md.push_str(&format!("# Fertilizer Recommendation: {}\n\n", crop));

        if recommendation.is_empty() {
            md.push_str(&format!("{}\n", NO_RECOMMENDATION));
            return md;
        }

        md.push_str(&format!("| Nutrient | Quantity ({}) |\n", escape_cell(unit)));
        md.push_str("|----------|----------|\n");
        for (nutrient, quantity) in recommendation.iter() {
            md.push_str(&format!("| {} | {:.2} |\n", escape_cell(nutrient), quantity));
        }

        md.push('\n');
        md
    }

    /// Format batch results: one row per sample, one column per nutrient
    pub fn format_batch(crop: &str, results: &[SampleRecommendation], unit: &str) -> String {
        let mut md = String::with_capacity(128 * (results.len() + 2));

        md.push_str(&format!("# Fertilizer Recommendations: {}\n\n", crop));
        md.push_str(&format!("*Quantities in {}*\n\n", unit));

        // Every sample of one crop shares the profile's nutrients
        let nutrients: Vec<&str> = results
            .iter()
            .find(|result| !result.recommendation.is_empty())
            .map(|result| result.recommendation.nutrients().collect())
            .unwrap_or_default();

        if nutrients.is_empty() {
            md.push_str(&format!("{}\n", NO_RECOMMENDATION));
            return md;
        }

        md.push_str("| Sample |");
        for nutrient in &nutrients {
            md.push_str(&format!(" {} |", escape_cell(nutrient)));
        }
        md.push('\n');

        md.push_str("|--------|");
        for _ in &nutrients {
            md.push_str("----------|");
        }
        md.push('\n');

        for result in results {
            md.push_str(&format!("| {} |", escape_cell(&result.sample_id)));
            for nutrient in &nutrients {
                match result.recommendation.get(nutrient) {
                    Some(quantity) => md.push_str(&format!(" {:.2} |", quantity)),
                    None => md.push_str(" - |"),
                }
            }
            md.push('\n');
        }

        md.push('\n');
        md
    }
}

/// Escape pipes so a value stays inside its table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_markdown() {
        let rec: Recommendation = [("Nitrogen", 70.0), ("Potassium", 40.0)].into_iter().collect();

        let md = MarkdownFormatter::format("Wheat", &rec, "kg per acre");

        assert!(md.starts_with("# Fertilizer Recommendation: Wheat\n"));
        assert!(md.contains("| Nutrient | Quantity (kg per acre) |"));
        assert!(md.contains("| Nitrogen | 70.00 |"));
        assert!(md.contains("| Potassium | 40.00 |"));
    }

    #[test]
    fn test_format_markdown_empty() {
        let md = MarkdownFormatter::format("NoSuchCrop", &Recommendation::new(), "kg per acre");
        assert!(md.contains(NO_RECOMMENDATION));
        assert!(!md.contains('|'));
    }

    #[test]
    fn test_format_batch() {
        let results = vec![
            SampleRecommendation {
                sample_id: "north".to_string(),
                recommendation: [("Nitrogen", 70.0), ("Phosphorus", 0.0)].into_iter().collect(),
            },
            SampleRecommendation {
                sample_id: "south".to_string(),
                recommendation: [("Nitrogen", 10.5), ("Phosphorus", 22.0)].into_iter().collect(),
            },
        ];

        let md = MarkdownFormatter::format_batch("Wheat", &results, "kg per acre");

        assert!(md.contains("| Sample | Nitrogen | Phosphorus |"));
        assert!(md.contains("| north | 70.00 | 0.00 |"));
        assert!(md.contains("| south | 10.50 | 22.00 |"));
    }

    #[test]
    fn test_pipes_escaped_in_cells() {
        let rec: Recommendation = [("N|P blend", 12.0)].into_iter().collect();
        let md = MarkdownFormatter::format("Wheat", &rec, "kg|acre");

        assert!(md.contains("| Nutrient | Quantity (kg\\|acre) |"));
        assert!(md.contains("| N\\|P blend | 12.00 |"));

        let results = vec![SampleRecommendation {
            sample_id: "plot|7".to_string(),
            recommendation: rec,
        }];
        let md = MarkdownFormatter::format_batch("Wheat", &results, "kg per acre");

        assert!(md.contains("| Sample | N\\|P blend |"));
        assert!(md.contains("| plot\\|7 | 12.00 |"));
    }

    #[test]
    fn test_format_batch_unknown_crop() {
        let results = vec![SampleRecommendation {
            sample_id: "north".to_string(),
            recommendation: Recommendation::new(),
        }];

        let md = MarkdownFormatter::format_batch("NoSuchCrop", &results, "kg per acre");
        assert!(md.contains(NO_RECOMMENDATION));
    }
}
