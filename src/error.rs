//! Error types
//!
//! Typed failures that callers may want to match on. File and I/O failures are
//! reported through `anyhow` with context at the loading boundary instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Only produced by the strict lookup; `recommend` returns an empty result instead.
    #[error("crop '{0}' not found in crop table")]
    UnknownCrop(String),

    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("invalid level for {nutrient} ({context}): {value}")]
    InvalidLevel {
        nutrient: String,
        context: String,
        value: String,
    },

    #[error("malformed nutrient reading '{0}', expected NAME=VALUE")]
    MalformedReading(String),
}

impl AdvisorError {
    pub(crate) fn invalid_level(
        nutrient: impl Into<String>,
        context: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        AdvisorError::InvalidLevel {
            nutrient: nutrient.into(),
            context: context.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AdvisorError::UnknownCrop("Quinoa".to_string());
        assert_eq!(err.to_string(), "crop 'Quinoa' not found in crop table");

        let err = AdvisorError::invalid_level("Nitrogen", "crop Wheat", -3.0);
        assert_eq!(err.to_string(), "invalid level for Nitrogen (crop Wheat): -3");

        let err = AdvisorError::NonNumericColumn("Season".to_string());
        assert_eq!(err.to_string(), "column 'Season' is not numeric");
    }
}
