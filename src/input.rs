//! Nutrient reading parser
//!
//! Turns `NAME=VALUE` readings (as typed on the command line) into observed
//! levels. Validation lives here so the engine only ever sees finite,
//! non-negative readings.

use crate::error::AdvisorError;
use crate::nutrients::{is_valid_level, ObservedLevels};

/// Parse a single `NAME=VALUE` reading
pub fn parse_reading(reading: &str) -> Result<(String, f64), AdvisorError> {
    let (name, value) = reading
        .split_once('=')
        .ok_or_else(|| AdvisorError::MalformedReading(reading.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AdvisorError::MalformedReading(reading.to_string()));
    }

    let value = value.trim();
    let level: f64 = value
        .parse()
        .map_err(|_| AdvisorError::invalid_level(name, "reading", value))?;

    if !is_valid_level(level) {
        return Err(AdvisorError::invalid_level(name, "reading", value));
    }

    Ok((name.to_string(), level))
}

/// Parse readings into observed levels
///
/// A nutrient given twice keeps the last value.
pub fn parse_readings<I, S>(readings: I) -> Result<ObservedLevels, AdvisorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut observed = ObservedLevels::new();
    for reading in readings {
        let (name, level) = parse_reading(reading.as_ref())?;
        observed.insert(name, level);
    }
    Ok(observed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reading() {
        assert_eq!(parse_reading("Nitrogen=50").unwrap(), ("Nitrogen".to_string(), 50.0));
        assert_eq!(parse_reading(" Phosphorus = 12.5 ").unwrap(), ("Phosphorus".to_string(), 12.5));
    }

    #[test]
    fn test_malformed_readings() {
        assert!(matches!(parse_reading("Nitrogen"), Err(AdvisorError::MalformedReading(_))));
        assert!(matches!(parse_reading("=40"), Err(AdvisorError::MalformedReading(_))));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(parse_reading("Nitrogen=abc"), Err(AdvisorError::InvalidLevel { .. })));
        assert!(matches!(parse_reading("Nitrogen=-1"), Err(AdvisorError::InvalidLevel { .. })));
        assert!(matches!(parse_reading("Nitrogen=NaN"), Err(AdvisorError::InvalidLevel { .. })));
        assert!(matches!(parse_reading("Nitrogen=inf"), Err(AdvisorError::InvalidLevel { .. })));
    }

    #[test]
    fn test_parse_readings_last_wins() {
        let observed = parse_readings(["Nitrogen=50", "Potassium=10", "Nitrogen=55"]).unwrap();
        assert_eq!(observed.len(), 2);
        assert_eq!(observed.get("Nitrogen"), Some(55.0));
    }

    #[test]
    fn test_parse_no_readings() {
        let observed = parse_readings(Vec::<String>::new()).unwrap();
        assert!(observed.is_empty());
    }
}
