// ==============================================================================
// engines/risk.rs - Disease Risk Assessment
// ==============================================================================
// Description: Classifies per-condition disease risk from ClinVar annotations
// Author: Matt Barham
// Created: 2026-09-16
// Modified: 2026-10-05
// Version: 1.1.0
// ==============================================================================
// Risk level decision tree (evaluated in order):
//   1. high     - any pathogenic AND any review stars >= 2 AND max impact >= 4
//   2. moderate - any pathogenic OR (any likely pathogenic AND max impact >= 2)
//   3. low      - any likely pathogenic OR max impact >= 1
//   4. unknown  - otherwise
// ==============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OrderedGroups;
use crate::genotype::Zygosity;
use crate::models::{AnnotatedVariant, ClinicalSignificance};

const UNKNOWN_GENE: &str = "Unknown";
const MAX_EXPLANATION_GENES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
    Unknown,
}

impl RiskLevel {
    /// Sort rank, most severe first
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Moderate => 1,
            RiskLevel::Low => 2,
            RiskLevel::Unknown => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Low => "low",
            RiskLevel::Unknown => "unknown",
        }
    }
}

/// Mode of inheritance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inheritance {
    AutosomalDominant,
    AutosomalRecessive,
    XLinked,
    /// Never inferred from genotypes; kept for annotated sources
    Mitochondrial,
    Complex,
}

/// Variant contributing to a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskVariant {
    pub rsid: String,
    pub chromosome: String,
    pub position: u64,
    pub genotype: String,
    pub gene: Option<String>,
    pub significance: ClinicalSignificance,
    pub review_stars: u8,
    pub impact_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub condition: String,
    pub gene: String,
    pub risk_level: RiskLevel,
    /// Highest review stars / 4 (0.0 - 1.0)
    pub confidence: f64,
    pub inheritance: Inheritance,
    pub highest_impact: f64,
    pub variants: Vec<RiskVariant>,
    pub explanation: String,
}

/// Assess disease risk per condition
///
/// A variant annotated with N conditions contributes to N assessments.
/// Results are ordered high → unknown, discovery order within a level.
pub fn assess_risks(variants: &[AnnotatedVariant]) -> Vec<RiskAssessment> {
    let mut by_condition: OrderedGroups<&AnnotatedVariant> = OrderedGroups::new();

    for variant in variants {
        let Some(clinvar) = &variant.clinvar else {
            continue;
        };

        let mut seen: Vec<&str> = Vec::new();
        for condition in &clinvar.conditions {
            if seen.contains(&condition.as_str()) {
                continue;
            }
            seen.push(condition);
            by_condition.push(condition, variant);
        }
    }

    let mut assessments: Vec<RiskAssessment> = by_condition
        .into_groups()
        .into_iter()
        .map(|(condition, group)| assess_condition(condition, &group))
        .collect();

    // Stable: discovery order is kept within a level
    assessments.sort_by_key(|a| a.risk_level.rank());

    debug!("Assessed {} conditions", assessments.len());
    assessments
}

fn assess_condition(condition: String, group: &[&AnnotatedVariant]) -> RiskAssessment {
    let highest_impact = group
        .iter()
        .map(|v| v.impact_score)
        .fold(f64::NEG_INFINITY, f64::max);
    let highest_stars = group.iter().map(|v| stars(v)).max().unwrap_or(0);

    let gene = group
        .first()
        .and_then(|v| v.clinical_gene())
        .unwrap_or(UNKNOWN_GENE)
        .to_string();

    let risk_level = classify_risk(group, highest_impact);
    let inheritance = infer_inheritance(group);
    let confidence = f64::from(highest_stars) / 4.0;
    let explanation = explain(risk_level, &condition, &genes_of(group), group.len());

    let variants = group
        .iter()
        .filter_map(|v| {
            let clinvar = v.clinvar.as_ref()?;
            Some(RiskVariant {
                rsid: v.rsid.clone(),
                chromosome: v.chromosome.clone(),
                position: v.position,
                genotype: v.genotype.clone(),
                gene: clinvar.gene.clone(),
                significance: clinvar.clinical_significance,
                review_stars: stars(v),
                impact_score: v.impact_score,
            })
        })
        .collect();

    RiskAssessment {
        condition,
        gene,
        risk_level,
        confidence,
        inheritance,
        highest_impact,
        variants,
        explanation,
    }
}

fn stars(variant: &AnnotatedVariant) -> u8 {
    variant
        .clinvar
        .as_ref()
        .and_then(|c| c.review_stars)
        .unwrap_or(0)
}

fn significance(variant: &AnnotatedVariant) -> Option<ClinicalSignificance> {
    variant.clinvar.as_ref().map(|c| c.clinical_significance)
}

fn classify_risk(group: &[&AnnotatedVariant], highest_impact: f64) -> RiskLevel {
    let any_pathogenic = group
        .iter()
        .any(|v| significance(v) == Some(ClinicalSignificance::Pathogenic));
    let any_likely = group
        .iter()
        .any(|v| significance(v) == Some(ClinicalSignificance::LikelyPathogenic));
    let any_reviewed = group.iter().any(|v| stars(v) >= 2);

    if any_pathogenic && any_reviewed && highest_impact >= 4.0 {
        RiskLevel::High
    } else if any_pathogenic || (any_likely && highest_impact >= 2.0) {
        RiskLevel::Moderate
    } else if any_likely || highest_impact >= 1.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Unknown
    }
}

fn infer_inheritance(group: &[&AnnotatedVariant]) -> Inheritance {
    if group.iter().any(|v| v.is_x_linked()) {
        return Inheritance::XLinked;
    }

    let pathogenic = group
        .iter()
        .filter(|v| significance(v) == Some(ClinicalSignificance::Pathogenic));
    let (mut any_het, mut any_hom) = (false, false);
    for variant in pathogenic {
        match variant.zygosity() {
            Zygosity::Heterozygous => any_het = true,
            Zygosity::Homozygous => any_hom = true,
            Zygosity::Indeterminate => {}
        }
    }

    if any_het && !any_hom {
        Inheritance::AutosomalDominant
    } else if any_hom {
        Inheritance::AutosomalRecessive
    } else {
        Inheritance::Complex
    }
}

/// Distinct gene symbols in discovery order
fn genes_of(group: &[&AnnotatedVariant]) -> Vec<String> {
    let mut genes: Vec<String> = Vec::new();
    for gene in group.iter().filter_map(|v| v.clinical_gene()) {
        if !genes.iter().any(|g| g == gene) {
            genes.push(gene.to_string());
        }
    }
    if genes.is_empty() {
        genes.push(UNKNOWN_GENE.to_string());
    }
    genes
}

fn explain(level: RiskLevel, condition: &str, genes: &[String], variant_count: usize) -> String {
    let mut gene_list = genes
        .iter()
        .take(MAX_EXPLANATION_GENES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if genes.len() > MAX_EXPLANATION_GENES {
        gene_list.push_str(" and others");
    }

    let count = if variant_count == 1 {
        "1 variant".to_string()
    } else {
        format!("{} variants", variant_count)
    };

    match level {
        RiskLevel::High => format!(
            "Found {} in {} classified as pathogenic with strong review support for {}. \
             Consider discussing screening and prevention options with a healthcare provider or genetic counselor.",
            count, gene_list, condition
        ),
        RiskLevel::Moderate => format!(
            "Found {} in {} with a pathogenic or likely pathogenic classification for {}. \
             The effect on risk may depend on family history and other factors.",
            count, gene_list, condition
        ),
        RiskLevel::Low => format!(
            "Found {} in {} with limited evidence for {}. \
             This finding is unlikely to substantially change risk on its own.",
            count, gene_list, condition
        ),
        RiskLevel::Unknown => format!(
            "Found {} in {} with uncertain clinical significance for {}.",
            count, gene_list, condition
        ),
    }
}
