// ==============================================================================
// engines/polygenic.rs - Polygenic Risk Score Calculation
// ==============================================================================
// Description: Weighted multi-variant risk models with percentile ranking
// Author: Matt Barham
// Created: 2026-09-20
// Modified: 2026-10-08
// Version: 1.1.0
// ==============================================================================
// Algorithm (per model):
//   raw      = Σ weight × min(risk allele copies, 2)   over variants present
//   coverage = present / total                          (skip model if < 50%)
//   mean     = Σ weight                                 (all model variants)
//   z        = (raw - mean) / (mean × 0.5)
//   pct      = round(100 × Φ(z))     Φ via Abramowitz & Stegun 7.1.26
//   RR       = e^(0.3 z)             heuristic only, not a calibrated figure
// ==============================================================================

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::genotype::allele_dosage;
use crate::index::AnnotationIndex;
use crate::reference::prs_models::{PrsModel, PRS_MODELS};

/// Models below this fraction of variants present are skipped
pub const MIN_COVERAGE: f64 = 0.5;

const RELATIVE_RISK_SCALE: f64 = 0.3;

// Abramowitz & Stegun erf approximation constants
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrsRiskCategory {
    VeryHigh,
    High,
    Moderate,
    Average,
    Low,
    VeryLow,
}

impl PrsRiskCategory {
    pub fn from_percentile(percentile: u8) -> Self {
        match percentile {
            95.. => PrsRiskCategory::VeryHigh,
            80..=94 => PrsRiskCategory::High,
            60..=79 => PrsRiskCategory::Moderate,
            40..=59 => PrsRiskCategory::Average,
            20..=39 => PrsRiskCategory::Low,
            _ => PrsRiskCategory::VeryLow,
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, PrsRiskCategory::VeryHigh | PrsRiskCategory::High)
    }
}

/// Contribution of one model variant present in the genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrsContribution {
    pub rsid: String,
    pub genotype: String,
    pub risk_allele: String,
    pub dosage: u8,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygenicRiskScore {
    pub trait_name: String,
    pub description: String,
    pub raw_score: f64,
    pub expected_mean: f64,
    pub z_score: f64,
    /// 0-100
    pub percentile: u8,
    pub risk_category: PrsRiskCategory,
    /// e^(0.3 z); heuristic, not a calibrated clinical figure
    pub relative_risk: f64,
    pub variants_found: usize,
    pub variants_total: usize,
    pub coverage: f64,
    pub contributions: Vec<PrsContribution>,
    pub missing_variants: Vec<String>,
    pub interpretation: String,
}

/// Score every built-in model
pub fn calculate_polygenic_scores(index: &AnnotationIndex<'_>) -> Vec<PolygenicRiskScore> {
    calculate_with_models(index, PRS_MODELS)
}

/// Score the given models, ordered by distance of the percentile from 50
pub fn calculate_with_models(
    index: &AnnotationIndex<'_>,
    models: &[PrsModel],
) -> Vec<PolygenicRiskScore> {
    let mut scores: Vec<PolygenicRiskScore> = models
        .iter()
        .filter_map(|model| score_model(index, model))
        .collect();

    scores.sort_by_key(|s| std::cmp::Reverse(percentile_distance(s.percentile)));
    scores
}

fn percentile_distance(percentile: u8) -> u8 {
    percentile.abs_diff(50)
}

fn score_model(index: &AnnotationIndex<'_>, model: &PrsModel) -> Option<PolygenicRiskScore> {
    let total = model.variants.len();
    if total == 0 {
        return None;
    }

    let mut raw_score = 0.0;
    let mut contributions = Vec::new();
    let mut missing_variants = Vec::new();

    for model_variant in model.variants {
        match index.get(model_variant.rsid) {
            Some(found) => {
                let dosage = allele_dosage(&found.genotype, model_variant.risk_allele).min(2);
                raw_score += model_variant.weight * f64::from(dosage);
                contributions.push(PrsContribution {
                    rsid: model_variant.rsid.to_string(),
                    genotype: found.genotype.clone(),
                    risk_allele: model_variant.risk_allele.to_string(),
                    dosage,
                    weight: model_variant.weight,
                });
            }
            None => missing_variants.push(model_variant.rsid.to_string()),
        }
    }

    let found = contributions.len();
    let coverage = found as f64 / total as f64;
    if coverage < MIN_COVERAGE {
        debug!(
            "Skipping PRS for {}: coverage {}/{} below threshold",
            model.trait_name, found, total
        );
        return None;
    }

    let expected_mean = model.weight_sum();
    let z_score = if expected_mean == 0.0 {
        0.0
    } else {
        (raw_score - expected_mean) / (expected_mean * 0.5)
    };
    let percentile = z_to_percentile(z_score);
    let risk_category = PrsRiskCategory::from_percentile(percentile);
    let relative_risk = (z_score * RELATIVE_RISK_SCALE).exp();

    Some(PolygenicRiskScore {
        trait_name: model.trait_name.to_string(),
        description: model.description.to_string(),
        raw_score,
        expected_mean,
        z_score,
        percentile,
        risk_category,
        relative_risk,
        variants_found: found,
        variants_total: total,
        coverage,
        contributions,
        missing_variants,
        interpretation: interpret(model.trait_name, percentile, risk_category),
    })
}

/// Convert a z-score to a 0-100 percentile of the standard normal
///
/// # Examples
/// ```
/// use genetics_interpreter::engines::polygenic::z_to_percentile;
///
/// assert_eq!(z_to_percentile(0.0), 50);
/// assert_eq!(z_to_percentile(1.0), 84);
/// assert_eq!(z_to_percentile(-1.0), 16);
/// ```
pub fn z_to_percentile(z: f64) -> u8 {
    if z.is_nan() {
        return 50;
    }

    let sign = if z < 0.0 {
        -1.0
    } else if z > 0.0 {
        1.0
    } else {
        0.0
    };
    let x = z.abs() / SQRT_2;
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    let percentile = (100.0 * 0.5 * (1.0 + sign * y)).round();
    percentile.clamp(0.0, 100.0) as u8
}

fn interpret(trait_name: &str, percentile: u8, category: PrsRiskCategory) -> String {
    let band = match category {
        PrsRiskCategory::VeryHigh => "much higher than average",
        PrsRiskCategory::High => "higher than average",
        PrsRiskCategory::Moderate => "slightly higher than average",
        PrsRiskCategory::Average => "about average",
        PrsRiskCategory::Low => "lower than average",
        PrsRiskCategory::VeryLow => "much lower than average",
    };
    format!(
        "Your polygenic score for {} is at the {}th percentile, {}. \
         Polygenic scores estimate relative genetic tendency and do not account for lifestyle or family history.",
        trait_name, percentile, band
    )
}
