//! Requirement Bar Chart
//!
//! Renders a crop's *required* nutrient levels (not the recommendation) as a
//! bar chart, either as terminal text or as a standalone SVG document.

use crate::data::CropProfile;

/// Bar colors, cycled per nutrient
const BAR_COLORS: [&str; 3] = ["#d62728", "#2ca02c", "#1f77b4"];

/// Widest text bar, in characters
pub const MAX_CHART_WIDTH: usize = 200;

const SVG_WIDTH: f64 = 640.0;
const SVG_HEIGHT: f64 = 400.0;
const SVG_MARGIN: f64 = 60.0;

/// Message for a crop with no profile
pub fn no_requirements_message(crop: &str) -> String {
    format!("No nutrient requirements found for {}.", crop)
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn from_profile(profile: &CropProfile) -> Self {
        Self {
            title: format!("{} Nutrient Requirements", profile.name),
            x_label: "Nutrient".to_string(),
            y_label: "Required Level".to_string(),
            bars: profile
                .requirements
                .iter()
                .map(|(nutrient, level)| (nutrient.to_string(), level))
                .collect(),
        }
    }

    fn max_value(&self) -> f64 {
        self.bars.iter().map(|(_, value)| *value).fold(0.0, f64::max)
    }

    /// Horizontal text bars, the largest value spanning `width` characters
    ///
    /// `width` is capped at [`MAX_CHART_WIDTH`].
    pub fn render_text(&self, width: usize) -> String {
        let width = width.min(MAX_CHART_WIDTH);
        let mut out = String::with_capacity(64 * (self.bars.len() + 3));
        out.push_str(&format!("{}\n", self.title));
        out.push_str(&format!("{} vs {}\n\n", self.x_label, self.y_label));

        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.max_value();

        for (label, value) in &self.bars {
            let len = if max > 0.0 {
                ((value / max) * width as f64).round() as usize
            } else {
                0
            };
            out.push_str(&format!(
                "{:<label_width$} | {} {:.2}\n",
                label,
                "█".repeat(len),
                value,
                label_width = label_width
            ));
        }

        out
    }

    /// Standalone SVG with vertical bars
    pub fn render_svg(&self) -> String {
        let plot_width = SVG_WIDTH - 2.0 * SVG_MARGIN;
        let plot_height = SVG_HEIGHT - 2.0 * SVG_MARGIN;
        let baseline = SVG_HEIGHT - SVG_MARGIN;
        let max = self.max_value();
        let slot = if self.bars.is_empty() {
            plot_width
        } else {
            plot_width / self.bars.len() as f64
        };
        let bar_width = slot * 0.6;

        let mut svg = String::with_capacity(1024);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = SVG_WIDTH,
            h = SVG_HEIGHT
        ));
        svg.push_str("<style>text { font-family: system-ui, sans-serif; font-size: 12px; }</style>\n");
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"16\">{}</text>\n",
            SVG_WIDTH / 2.0,
            SVG_MARGIN / 2.0,
            escape_xml(&self.title)
        ));

        // Axes
        svg.push_str(&format!(
            "<line x1=\"{m}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" stroke=\"#333\"/>\n",
            m = SVG_MARGIN,
            b = baseline,
            r = SVG_WIDTH - SVG_MARGIN
        ));
        svg.push_str(&format!(
            "<line x1=\"{m}\" y1=\"{m}\" x2=\"{m}\" y2=\"{b}\" stroke=\"#333\"/>\n",
            m = SVG_MARGIN,
            b = baseline
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
            SVG_WIDTH / 2.0,
            SVG_HEIGHT - SVG_MARGIN / 4.0,
            escape_xml(&self.x_label)
        ));
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" transform=\"rotate(-90 {x} {y})\">{}</text>\n",
            escape_xml(&self.y_label),
            x = SVG_MARGIN / 3.0,
            y = SVG_HEIGHT / 2.0
        ));

        for (i, (label, value)) in self.bars.iter().enumerate() {
            let height = if max > 0.0 { value / max * plot_height } else { 0.0 };
            let x = SVG_MARGIN + slot * i as f64 + (slot - bar_width) / 2.0;
            let center = x + bar_width / 2.0;

            svg.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
                x,
                baseline - height,
                bar_width,
                height,
                BAR_COLORS[i % BAR_COLORS.len()]
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{:.2}</text>\n",
                center,
                baseline - height - 4.0,
                value
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                center,
                baseline + 16.0,
                escape_xml(label)
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat() -> CropProfile {
        CropProfile::new(
            "Wheat",
            [("Nitrogen", 120.0), ("Phosphorus", 60.0), ("Potassium", 40.0)]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn test_chart_uses_required_levels() {
        let chart = BarChart::from_profile(&wheat());

        assert_eq!(chart.title, "Wheat Nutrient Requirements");
        assert_eq!(chart.bars[0], ("Nitrogen".to_string(), 120.0));
        assert_eq!(chart.bars.len(), 3);
    }

    #[test]
    fn test_render_text_scales_bars() {
        let text = BarChart::from_profile(&wheat()).render_text(12);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Wheat Nutrient Requirements");
        assert_eq!(lines[3], format!("Nitrogen   | {} 120.00", "█".repeat(12)));
        assert_eq!(lines[4], format!("Phosphorus | {} 60.00", "█".repeat(6)));
        assert_eq!(lines[5], format!("Potassium  | {} 40.00", "█".repeat(4)));
    }

    #[test]
    fn test_render_text_all_zero() {
        let profile = CropProfile::new("Clover", [("Nitrogen", 0.0)].into_iter().collect());
        let text = BarChart::from_profile(&profile).render_text(10);
        assert!(text.contains("Nitrogen |  0.00"));
    }

    #[test]
    fn test_render_text_width_capped() {
        let text = BarChart::from_profile(&wheat()).render_text(usize::MAX);
        let nitrogen = text.lines().nth(3).unwrap();
        assert_eq!(nitrogen.matches('█').count(), MAX_CHART_WIDTH);
    }

    #[test]
    fn test_render_svg() {
        let svg = BarChart::from_profile(&wheat()).render_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(BAR_COLORS[0]));
        assert!(svg.contains(BAR_COLORS[2]));
        assert!(svg.contains(">Wheat Nutrient Requirements<"));
    }

    #[test]
    fn test_escape_crop_name() {
        let profile = CropProfile::new("Beans & Peas", [("Nitrogen", 10.0)].into_iter().collect());
        let svg = BarChart::from_profile(&profile).render_svg();
        assert!(svg.contains("Beans &amp; Peas"));
    }

    #[test]
    fn test_no_requirements_message() {
        assert_eq!(
            no_requirements_message("NoSuchCrop"),
            "No nutrient requirements found for NoSuchCrop."
        );
    }
}
