// ==============================================================================
// engines/traits.rs - GWAS Trait Association Scoring
// ==============================================================================
// Description: Weighted, logistic-normalised risk scores per GWAS trait
// Author: Matt Barham
// Created: 2026-09-18
// Modified: 2026-10-06
// Version: 1.1.0
// ==============================================================================
// Algorithm (per trait):
//   effect_i = copies × ln(OR')      when copy count and OR/beta are present
//              OR' = OR if OR > 0, else 1/|OR|
//            = ±0.5                  when only has_risk_allele is present
//            = 0                     otherwise
//   weight_i = -log10(p_i)
//   raw      = Σ(effect_i × weight_i) / Σ(weight_i)
//   score    = 1 / (1 + e^-raw)      (0.5 = population average)
// ==============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OrderedGroups;
use crate::models::{AnnotatedVariant, GwasAssociation};
use crate::reference::trait_categories::{self, TraitCategory};

const INCREASED_THRESHOLD: f64 = 0.65;
const DECREASED_THRESHOLD: f64 = 0.35;
const GENOME_WIDE_STRONG_P: f64 = 1e-10;
const FLAG_EFFECT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitInterpretation {
    Increased,
    Typical,
    Decreased,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitConfidence {
    High,
    Moderate,
    Low,
}

/// Single association entry contributing to a trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitVariant {
    pub rsid: String,
    pub genotype: String,
    pub risk_allele: Option<String>,
    pub risk_allele_count: Option<u8>,
    pub p_value: f64,
    pub or_beta: Option<f64>,
    pub effect: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitAssociation {
    pub trait_name: String,
    pub category: TraitCategory,
    /// Logistic-normalised score in (0, 1)
    pub risk_score: f64,
    pub interpretation: TraitInterpretation,
    pub confidence: TraitConfidence,
    pub variant_count: usize,
    pub variants: Vec<TraitVariant>,
    pub description: String,
}

/// Score every GWAS trait found in the input
///
/// Ordered by entry count (descending), then by distance of the score from
/// 0.5 (most extreme first).
pub fn analyze_traits(variants: &[AnnotatedVariant]) -> Vec<TraitAssociation> {
    let mut by_trait: OrderedGroups<(&AnnotatedVariant, &GwasAssociation)> = OrderedGroups::new();
    for variant in variants {
        for entry in &variant.gwas {
            by_trait.push(&entry.trait_name, (variant, entry));
        }
    }

    let mut associations: Vec<TraitAssociation> = by_trait
        .into_groups()
        .into_iter()
        .map(|(trait_name, entries)| score_trait(trait_name, &entries))
        .collect();

    associations.sort_by(|a, b| {
        b.variant_count
            .cmp(&a.variant_count)
            .then_with(|| distance(b).total_cmp(&distance(a)))
    });

    debug!("Scored {} GWAS traits", associations.len());
    associations
}

fn distance(association: &TraitAssociation) -> f64 {
    (association.risk_score - 0.5).abs()
}

fn score_trait(trait_name: String, entries: &[(&AnnotatedVariant, &GwasAssociation)]) -> TraitAssociation {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut strong = 0usize;
    let mut any_flag = false;
    let mut contributing = Vec::with_capacity(entries.len());

    for (variant, entry) in entries {
        let effect = entry_effect(entry);
        let weight = entry_weight(entry.p_value);
        weighted_sum += effect * weight;
        weight_total += weight;

        if entry.p_value < GENOME_WIDE_STRONG_P {
            strong += 1;
        }
        if entry.has_risk_allele.is_some() {
            any_flag = true;
        }

        contributing.push(TraitVariant {
            rsid: variant.rsid.clone(),
            genotype: variant.genotype.clone(),
            risk_allele: entry.risk_allele.clone(),
            risk_allele_count: entry.risk_allele_count,
            p_value: entry.p_value,
            or_beta: entry.or_beta,
            effect,
        });
    }

    let raw = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    };
    let risk_score = sigmoid(raw);

    let interpretation = if !any_flag {
        TraitInterpretation::Unknown
    } else if risk_score >= INCREASED_THRESHOLD {
        TraitInterpretation::Increased
    } else if risk_score <= DECREASED_THRESHOLD {
        TraitInterpretation::Decreased
    } else {
        TraitInterpretation::Typical
    };

    let confidence = if strong >= 3 {
        TraitConfidence::High
    } else if strong >= 1 || entries.len() >= 3 {
        TraitConfidence::Moderate
    } else {
        TraitConfidence::Low
    };

    let category = trait_categories::categorize(&trait_name);
    let description = describe(&trait_name, interpretation, entries.len());

    TraitAssociation {
        trait_name,
        category,
        risk_score,
        interpretation,
        confidence,
        variant_count: entries.len(),
        variants: contributing,
        description,
    }
}

/// Signed effect of one association entry
pub fn entry_effect(entry: &GwasAssociation) -> f64 {
    if let (Some(copies), Some(or_beta)) = (entry.risk_allele_count, entry.or_beta) {
        let normalized = if or_beta > 0.0 {
            or_beta
        } else if or_beta < 0.0 {
            1.0 / or_beta.abs()
        } else {
            1.0
        };
        let effect = f64::from(copies) * normalized.ln();
        return if effect.is_finite() { effect } else { 0.0 };
    }

    match entry.has_risk_allele {
        Some(true) => FLAG_EFFECT,
        Some(false) => -FLAG_EFFECT,
        None => 0.0,
    }
}

/// Evidence weight, -log10(p); p is clamped into (0, 1]
pub fn entry_weight(p_value: f64) -> f64 {
    if p_value.is_nan() {
        return 0.0;
    }
    -p_value.clamp(f64::MIN_POSITIVE, 1.0).log10()
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn describe(trait_name: &str, interpretation: TraitInterpretation, count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    match interpretation {
        TraitInterpretation::Increased => format!(
            "Your genotype at {} associated variant{} suggests a higher than average genetic predisposition for {}.",
            count, plural, trait_name
        ),
        TraitInterpretation::Decreased => format!(
            "Your genotype at {} associated variant{} suggests a lower than average genetic predisposition for {}.",
            count, plural, trait_name
        ),
        TraitInterpretation::Typical => format!(
            "Your genotype at {} associated variant{} is consistent with an average genetic predisposition for {}.",
            count, plural, trait_name
        ),
        TraitInterpretation::Unknown => format!(
            "{} variant{} associated with {} found, but risk allele status could not be determined.",
            count, plural, trait_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{gwas, variant};

    fn carrying(mut entry: GwasAssociation, copies: u8, or_beta: f64) -> GwasAssociation {
        entry.risk_allele_count = Some(copies);
        entry.or_beta = Some(or_beta);
        entry.has_risk_allele = Some(copies > 0);
        entry
    }

    #[test]
    fn test_tcf7l2_homozygous_risk_is_increased() {
        let mut tcf7l2 = variant("rs7903146", "TT");
        let mut entry = carrying(gwas("Type 2 Diabetes", 1e-50), 2, 1.4);
        entry.risk_allele = Some("T".to_string());
        tcf7l2.gwas.push(entry);

        let traits = analyze_traits(&[tcf7l2]);

        assert_eq!(traits.len(), 1);
        let t2d = &traits[0];
        assert_eq!(t2d.interpretation, TraitInterpretation::Increased);
        assert_eq!(t2d.category, TraitCategory::Metabolic);
        assert_eq!(t2d.confidence, TraitConfidence::Moderate);
        let expected = sigmoid(2.0 * 1.4f64.ln());
        assert!((t2d.risk_score - expected).abs() < 1e-12);
        assert!(t2d.risk_score > 0.65 && t2d.risk_score < 0.67);
    }

    #[test]
    fn test_entry_effect() {
        assert!((entry_effect(&carrying(gwas("T", 0.01), 2, 1.5)) - 2.0 * 1.5f64.ln()).abs() < 1e-12);
        // Negative effect sizes are inverted so more copies means more effect
        assert!((entry_effect(&carrying(gwas("T", 0.01), 1, -0.5)) - 2.0f64.ln()).abs() < 1e-12);
        assert_eq!(entry_effect(&carrying(gwas("T", 0.01), 0, 1.5)), 0.0);
        assert_eq!(entry_effect(&carrying(gwas("T", 0.01), 2, 0.0)), 0.0);

        let mut flag_only = gwas("T", 0.01);
        flag_only.has_risk_allele = Some(true);
        assert_eq!(entry_effect(&flag_only), 0.5);
        flag_only.has_risk_allele = Some(false);
        assert_eq!(entry_effect(&flag_only), -0.5);

        assert_eq!(entry_effect(&gwas("T", 0.01)), 0.0);
    }

    #[test]
    fn test_entry_weight() {
        assert!((entry_weight(1e-8) - 8.0).abs() < 1e-9);
        assert_eq!(entry_weight(1.0), 0.0);
        assert!(entry_weight(0.0).is_finite());
        assert_eq!(entry_weight(f64::NAN), 0.0);
    }

    #[test]
    fn test_no_flag_is_unknown() {
        let mut v = variant("rs1", "AG");
        v.gwas.push(gwas("Height", 1e-20));
        v.gwas[0].risk_allele_count = Some(2);
        v.gwas[0].or_beta = Some(3.0);

        let traits = analyze_traits(&[v]);
        assert_eq!(traits[0].interpretation, TraitInterpretation::Unknown);
        assert!(traits[0].risk_score > 0.65);
    }

    #[test]
    fn test_interpretation_thresholds() {
        let mut protective = variant("rs1", "AA");
        let mut entry = gwas("Psoriasis", 1e-6);
        entry.has_risk_allele = Some(false);
        entry.risk_allele_count = Some(2);
        entry.or_beta = Some(0.5);
        protective.gwas.push(entry);

        let traits = analyze_traits(&[protective]);
        // 2 × ln(0.5) ≈ -1.386 → sigmoid ≈ 0.2
        assert_eq!(traits[0].interpretation, TraitInterpretation::Decreased);

        let mut neutral = variant("rs2", "AG");
        let mut entry = gwas("Psoriasis", 1e-6);
        entry.has_risk_allele = Some(true);
        neutral.gwas.push(entry);
        let traits = analyze_traits(&[neutral]);
        // sigmoid(0.5) ≈ 0.62
        assert_eq!(traits[0].interpretation, TraitInterpretation::Typical);
    }

    #[test]
    fn test_confidence_levels() {
        let build = |p_values: &[f64]| {
            let mut v = variant("rs1", "AG");
            for p in p_values {
                v.gwas.push(gwas("Trait", *p));
            }
            analyze_traits(&[v])[0].confidence
        };

        assert_eq!(build(&[1e-11, 1e-12, 1e-30]), TraitConfidence::High);
        assert_eq!(build(&[1e-11]), TraitConfidence::Moderate);
        assert_eq!(build(&[1e-6, 1e-6, 1e-6]), TraitConfidence::Moderate);
        assert_eq!(build(&[1e-10, 1e-6]), TraitConfidence::Low);
    }

    #[test]
    fn test_ordering_by_count_then_extremity() {
        let mut a = variant("rs1", "AG");
        let mut b = variant("rs2", "AG");

        // Single entry, mild
        let mut mild = gwas("Mild trait", 1e-8);
        mild.has_risk_allele = Some(true);
        a.gwas.push(mild);

        // Single entry, extreme
        a.gwas.push(carrying(gwas("Extreme trait", 1e-8), 2, 3.0));

        // Two entries
        b.gwas.push(gwas("Common trait", 1e-8));
        a.gwas.push(gwas("Common trait", 1e-9));

        let traits = analyze_traits(&[a, b]);
        let order: Vec<&str> = traits.iter().map(|t| t.trait_name.as_str()).collect();
        assert_eq!(order, vec!["Common trait", "Extreme trait", "Mild trait"]);
        assert_eq!(traits[0].variant_count, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(analyze_traits(&[]).is_empty());
    }
}
