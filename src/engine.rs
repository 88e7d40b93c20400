//! Recommendation Engine
//!
//! Compares a crop's required nutrient levels with observed soil levels and
//! recommends the deficit for each nutrient, floored at zero.
//!
//! The engine is pure: it borrows the crop table and readings, never mutates
//! them, performs no I/O and holds no state. The table can be shared across
//! threads for batch evaluation.

use crate::data::{CropProfile, CropTable, SoilSample};
use crate::error::AdvisorError;
use crate::nutrients::{ObservedLevels, Recommendation};
use rayon::prelude::*;
use serde::Serialize;

/// Recommend fertilizer quantities for `crop`
///
/// For every nutrient in the crop profile (in profile order):
/// - observed → `max(0, required - observed)`
/// - not observed → full required quantity
///
/// Observed nutrients the profile doesn't list are ignored. An unknown crop
/// yields an empty recommendation rather than an error, so an empty result
/// can mean either "unknown crop" or "no requirements". Use [`try_recommend`]
/// to tell them apart.
pub fn recommend(crop: &str, observed: &ObservedLevels, profiles: &CropTable) -> Recommendation {
    profiles
        .get(crop)
        .map(|profile| recommend_for_profile(profile, observed))
        .unwrap_or_default()
}

/// Like [`recommend`], but an unknown crop is reported as an error
pub fn try_recommend(
    crop: &str,
    observed: &ObservedLevels,
    profiles: &CropTable,
) -> Result<Recommendation, AdvisorError> {
    profiles
        .get(crop)
        .map(|profile| recommend_for_profile(profile, observed))
        .ok_or_else(|| AdvisorError::UnknownCrop(crop.to_string()))
}

/// Deficit per nutrient of a single profile
pub fn recommend_for_profile(profile: &CropProfile, observed: &ObservedLevels) -> Recommendation {
    profile
        .requirements
        .iter()
        .map(|(nutrient, required)| {
            let quantity = match observed.get(nutrient) {
                Some(level) => (required - level).max(0.0),
                None => required,
            };
            (nutrient, quantity)
        })
        .collect()
}

/// Recommendation for one soil sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecommendation {
    pub sample_id: String,
    pub recommendation: Recommendation,
}

/// Recommend for many samples of the same crop (parallel)
///
/// Output order matches `samples`. Unknown crops produce one empty
/// recommendation per sample, as with [`recommend`].
pub fn recommend_batch(
    crop: &str,
    samples: &[SoilSample],
    profiles: &CropTable,
) -> Vec<SampleRecommendation> {
    samples
        .par_iter()
        .map(|sample| SampleRecommendation {
            sample_id: sample.id.clone(),
            recommendation: recommend(crop, &sample.levels, profiles),
        })
        .collect()
}
