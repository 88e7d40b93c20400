use crate::formatters::NO_RECOMMENDATION;
use crate::nutrients::Recommendation;

/// Plain-text formatter for terminal output
pub struct TextFormatter;

impl TextFormatter {
    /// One `"<nutrient>: <quantity> <unit>"` line per nutrient, two decimals
    pub fn format(recommendation: &Recommendation, unit: &str) -> String {
        if recommendation.is_empty() {
            return format!("{}\n", NO_RECOMMENDATION);
        }

        let mut text = String::with_capacity(32 * (recommendation.len() + 1));
        text.push_str("Recommended Fertilizer:\n");
        for (nutrient, quantity) in recommendation.iter() {
            text.push_str(&format!("{}: {:.2} {}\n", nutrient, quantity, unit));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lines() {
        let rec: Recommendation = [("Nitrogen", 70.0), ("Phosphorus", 0.0), ("Potassium", 40.126)]
            .into_iter()
            .collect();

        let text = TextFormatter::format(&rec, "kg per acre");

        assert_eq!(
            text,
            "Recommended Fertilizer:\n\
             Nitrogen: 70.00 kg per acre\n\
             Phosphorus: 0.00 kg per acre\n\
             Potassium: 40.13 kg per acre\n"
        );
    }

    #[test]
    fn test_format_empty() {
        let text = TextFormatter::format(&Recommendation::new(), "kg per acre");
        assert_eq!(text, "No specific fertilizer recommendation.\n");
    }
}
