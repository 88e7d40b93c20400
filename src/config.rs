//! Advisor configuration
//!
//! Defaults suit local development; deployments override them through
//! environment variables:
//! - `CROP_TABLE`: crop requirement table (CSV or Parquet)
//! - `UNIT_LABEL`: unit printed after each recommended quantity
//! - `CHART_WIDTH`: widest bar of the text chart, in characters (at most 200)

use crate::chart::MAX_CHART_WIDTH;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_CROP_TABLE: &str = "data/crop_requirements.csv";
pub const DEFAULT_UNIT_LABEL: &str = "kg per acre";
pub const DEFAULT_CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub crop_table: PathBuf,
    pub unit_label: String,
    pub chart_width: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            crop_table: PathBuf::from(DEFAULT_CROP_TABLE),
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl AdvisorConfig {
    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let crop_table = lookup("CROP_TABLE")
            .map(PathBuf::from)
            .unwrap_or(defaults.crop_table);

        let unit_label = lookup("UNIT_LABEL")
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(defaults.unit_label);

        let chart_width = match lookup("CHART_WIDTH") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(width) if width > MAX_CHART_WIDTH => {
                    warn!(value = width, max = MAX_CHART_WIDTH, "clamping CHART_WIDTH");
                    MAX_CHART_WIDTH
                }
                Ok(width) if width > 0 => width,
                _ => {
                    warn!(value = %raw, "ignoring invalid CHART_WIDTH");
                    defaults.chart_width
                }
            },
            None => defaults.chart_width,
        };

        Self {
            crop_table,
            unit_label,
            chart_width,
        }
    }
}
