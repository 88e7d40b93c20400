//! Ordered Nutrient Levels
//!
//! A small insertion-ordered map from nutrient name to quantity. Crop profiles,
//! observed readings and recommendations all share this shape; keeping the
//! declared order lets presenters list nutrients the way the crop table does.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Nutrient name → quantity, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientLevels {
    entries: Vec<(String, f64)>,
}

/// Readings supplied for one recommendation request
pub type ObservedLevels = NutrientLevels;

/// Recommended fertilizer quantity per nutrient
pub type Recommendation = NutrientLevels;

/// A level is usable when it is a finite, non-negative quantity
pub fn is_valid_level(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl NutrientLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a level, replacing an existing entry in place
    ///
    /// Returns the previous value if the nutrient was already present.
    pub fn insert(&mut self, nutrient: impl Into<String>, quantity: f64) -> Option<f64> {
        let nutrient = nutrient.into();
        match self.entries.iter_mut().find(|(name, _)| *name == nutrient) {
            Some((_, existing)) => Some(std::mem::replace(existing, quantity)),
            None => {
                self.entries.push((nutrient, quantity));
                None
            }
        }
    }

    pub fn get(&self, nutrient: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == nutrient)
            .map(|(_, quantity)| *quantity)
    }

    pub fn contains(&self, nutrient: &str) -> bool {
        self.get(nutrient).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, quantity)| (name.as_str(), *quantity))
    }

    pub fn nutrients(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for NutrientLevels {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut levels = NutrientLevels::new();
        for (nutrient, quantity) in iter {
            levels.insert(nutrient, quantity);
        }
        levels
    }
}

impl Serialize for NutrientLevels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, quantity) in &self.entries {
            map.serialize_entry(name, quantity)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let levels: NutrientLevels = [("Potassium", 40.0), ("Nitrogen", 120.0), ("Phosphorus", 60.0)]
            .into_iter()
            .collect();

        let names: Vec<&str> = levels.nutrients().collect();
        assert_eq!(names, vec!["Potassium", "Nitrogen", "Phosphorus"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut levels = NutrientLevels::new();
        levels.insert("Nitrogen", 10.0);
        levels.insert("Phosphorus", 20.0);

        assert_eq!(levels.insert("Nitrogen", 15.0), Some(10.0));
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get("Nitrogen"), Some(15.0));
        assert_eq!(levels.nutrients().next(), Some("Nitrogen"));
    }

    #[test]
    fn test_missing_nutrient() {
        let levels = NutrientLevels::new();
        assert!(levels.is_empty());
        assert_eq!(levels.get("Nitrogen"), None);
        assert!(!levels.contains("Nitrogen"));
    }

    #[test]
    fn test_level_validity() {
        assert!(is_valid_level(0.0));
        assert!(is_valid_level(120.5));
        assert!(!is_valid_level(-0.1));
        assert!(!is_valid_level(f64::NAN));
        assert!(!is_valid_level(f64::INFINITY));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let levels: NutrientLevels = [("Nitrogen", 70.0), ("Phosphorus", 0.0)].into_iter().collect();
        let json = serde_json::to_string(&levels).unwrap();
        assert_eq!(json, r#"{"Nitrogen":70.0,"Phosphorus":0.0}"#);
    }
}
