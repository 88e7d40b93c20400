//! Data Loading and Management
//!
//! Loads the crop requirement table and soil sample tables using Polars.
//! Both CSV (with header, `NA` as null) and Parquet sources are accepted;
//! the format is picked from the file extension.
//!
//! Crop table layout: one row per crop, a crop-name column (`Crop` by default)
//! and one numeric column per nutrient. Column order defines nutrient order.

use crate::error::AdvisorError;
use crate::nutrients::{is_valid_level, NutrientLevels, ObservedLevels};
use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the crop column in the requirement table
pub const DEFAULT_CROP_COLUMN: &str = "Crop";

/// Required nutrient levels for a single crop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProfile {
    pub name: String,

    /// Nutrient → required quantity, in table column order
    pub requirements: NutrientLevels,
}

impl CropProfile {
    pub fn new(name: impl Into<String>, requirements: NutrientLevels) -> Self {
        Self {
            name: name.into(),
            requirements,
        }
    }

    /// Every requirement must be a finite, non-negative quantity
    pub fn validate(&self) -> Result<(), AdvisorError> {
        match self.requirements.iter().find(|(_, level)| !is_valid_level(*level)) {
            Some((nutrient, level)) => Err(AdvisorError::invalid_level(
                nutrient,
                format!("crop {}", self.name),
                level,
            )),
            None => Ok(()),
        }
    }
}

/// Lookup table of crop profiles keyed by crop name
///
/// Immutable once built. Listing order follows the source table.
#[derive(Debug, Clone, Default)]
pub struct CropTable {
    profiles: Vec<CropProfile>,
    index: FxHashMap<String, usize>,
}

impl CropTable {
    /// Load the crop table from a CSV or Parquet file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_crop_column(path, DEFAULT_CROP_COLUMN)
    }

    pub fn load_with_crop_column(path: impl AsRef<Path>, crop_column: &str) -> Result<Self> {
        let path = path.as_ref();
        let df = read_table(path)?;
        let table = Self::from_dataframe(&df, crop_column)
            .with_context(|| format!("Invalid crop table: {}", path.display()))?;

        info!(
            path = %path.display(),
            crops = table.len(),
            "loaded crop requirement table"
        );
        Ok(table)
    }

    /// Build a table from a DataFrame
    ///
    /// Every column except `crop_column` is treated as a nutrient and must be
    /// numeric. Null, negative or non-finite requirements are rejected.
    pub fn from_dataframe(df: &DataFrame, crop_column: &str) -> Result<Self> {
        let crop_col = df
            .column(crop_column)
            .map_err(|_| AdvisorError::MissingColumn(crop_column.to_string()))?
            .cast(&DataType::String)?;
        let crop_names = crop_col
            .str()
            .with_context(|| format!("Column '{}' is not string type", crop_column))?;

        let nutrient_columns = df
            .get_columns()
            .iter()
            .filter(|col| col.name().as_str() != crop_column)
            .map(|col| {
                // A plain cast would turn text cells into nulls
                if !is_numeric(col.dtype()) {
                    return Err(AdvisorError::NonNumericColumn(col.name().to_string()).into());
                }
                let values = col.cast(&DataType::Float64)?;
                Ok((col.name().to_string(), values.f64()?.clone()))
            })
            .collect::<Result<Vec<(String, Float64Chunked)>>>()?;

        let mut profiles = Vec::with_capacity(df.height());

        for idx in 0..df.height() {
            let Some(name) = crop_names.get(idx) else {
                warn!(row = idx + 1, "skipping crop row without a crop name");
                continue;
            };

            let mut requirements = NutrientLevels::with_capacity(nutrient_columns.len());
            for (nutrient, values) in &nutrient_columns {
                let Some(level) = values.get(idx) else {
                    return Err(
                        AdvisorError::invalid_level(nutrient, format!("crop {}", name), "missing").into(),
                    );
                };
                requirements.insert(nutrient.as_str(), level);
            }

            profiles.push(CropProfile::new(name, requirements));
        }

        Ok(Self::from_profiles(profiles)?)
    }

    /// Build a table from profiles already in memory
    ///
    /// Profiles are validated like loaded rows. A repeated crop name keeps its
    /// first profile.
    pub fn from_profiles(profiles: impl IntoIterator<Item = CropProfile>) -> Result<Self, AdvisorError> {
        let mut table = CropTable::default();

        for profile in profiles {
            profile.validate()?;
            if table.index.contains_key(&profile.name) {
                warn!(crop = %profile.name, "duplicate crop row ignored, keeping first occurrence");
                continue;
            }
            table.index.insert(profile.name.clone(), table.profiles.len());
            table.profiles.push(profile);
        }

        Ok(table)
    }

    pub fn get(&self, crop: &str) -> Option<&CropProfile> {
        self.index.get(crop).map(|&idx| &self.profiles[idx])
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.index.contains_key(crop)
    }

    /// Crop names in source order
    pub fn crop_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.iter().map(|profile| profile.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropProfile> + '_ {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// One row of a soil sample table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilSample {
    pub id: String,
    pub levels: ObservedLevels,
}

/// Load soil samples from a CSV or Parquet file
///
/// Sample ids come from `id_column` when given, otherwise `row-<n>` (1-based).
pub fn load_soil_samples(path: impl AsRef<Path>, id_column: Option<&str>) -> Result<Vec<SoilSample>> {
    let path = path.as_ref();
    let df = read_table(path)?;
    let samples = soil_samples_from_dataframe(&df, id_column)
        .with_context(|| format!("Invalid soil sample table: {}", path.display()))?;

    info!(path = %path.display(), samples = samples.len(), "loaded soil samples");
    Ok(samples)
}

/// Convert a DataFrame into soil samples
///
/// Numeric columns become readings; null cells are left out of a sample's
/// levels. Non-numeric columns other than the id column are ignored.
pub fn soil_samples_from_dataframe(df: &DataFrame, id_column: Option<&str>) -> Result<Vec<SoilSample>> {
    let ids = match id_column {
        Some(name) => {
            let col = df
                .column(name)
                .map_err(|_| AdvisorError::MissingColumn(name.to_string()))?
                .cast(&DataType::String)?;
            Some(col)
        }
        None => None,
    };
    let ids = ids.as_ref().map(|col| col.str()).transpose()?;

    let mut reading_columns = Vec::new();
    for col in df.get_columns() {
        if Some(col.name().as_str()) == id_column {
            continue;
        }
        if !is_numeric(col.dtype()) {
            debug!(column = %col.name(), dtype = %col.dtype(), "ignoring non-numeric sample column");
            continue;
        }
        let values = col.cast(&DataType::Float64)?;
        reading_columns.push((col.name().to_string(), values.f64()?.clone()));
    }

    let mut samples = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let id = ids
            .and_then(|ids| ids.get(idx))
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", idx + 1));

        let mut levels = ObservedLevels::with_capacity(reading_columns.len());
        for (nutrient, values) in &reading_columns {
            if let Some(level) = values.get(idx) {
                if !is_valid_level(level) {
                    return Err(AdvisorError::invalid_level(nutrient, format!("sample {}", id), level).into());
                }
                levels.insert(nutrient.as_str(), level);
            }
        }

        samples.push(SoilSample { id, levels });
    }

    Ok(samples)
}

/// Read a CSV or Parquet file into a DataFrame
fn read_table(path: &Path) -> Result<DataFrame> {
    let is_parquet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {}", path.display()))?
            .collect()
            .with_context(|| format!("Failed to load parquet: {}", path.display()))
    } else {
        let parse_options = CsvParseOptions::default()
            .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())));

        CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {}", path.display()))
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
