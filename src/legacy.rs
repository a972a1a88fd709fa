// ==============================================================================
// legacy.rs - Legacy Result Adapter
// ==============================================================================
// Description: Flattens the canonical result into the older report shape
// Author: Matt Barham
// Created: 2026-09-25
// Modified: 2026-10-09
// Version: 1.0.1
// ==============================================================================
// Structural conversion only. Mitochondrial and complex inheritance both map
// to `other` in the legacy enum. Trait confidence becomes a number:
// high 1.0, moderate 0.5, low 0.25.
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engines::{
    DrugSeverity, FindingPriority, Inheritance, Phenotype, RiskLevel, TraitConfidence,
    TraitInterpretation,
};
use crate::models::{ClinicalSignificance, DatabaseVersions};
use crate::output::AnalysisResult;
use crate::reference::TraitCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyInheritance {
    Dominant,
    Recessive,
    XLinked,
    Other,
}

impl From<Inheritance> for LegacyInheritance {
    fn from(inheritance: Inheritance) -> Self {
        match inheritance {
            Inheritance::AutosomalDominant => LegacyInheritance::Dominant,
            Inheritance::AutosomalRecessive => LegacyInheritance::Recessive,
            Inheritance::XLinked => LegacyInheritance::XLinked,
            Inheritance::Mitochondrial | Inheritance::Complex => LegacyInheritance::Other,
        }
    }
}

/// One row per (condition, variant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyClinicalFinding {
    pub rsid: String,
    pub gene: Option<String>,
    pub condition: String,
    pub significance: ClinicalSignificance,
    pub chromosome: Option<String>,
    pub position: Option<u64>,
    pub risk_level: RiskLevel,
    pub inheritance: LegacyInheritance,
}

/// One row per (gene, drug)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDrugResponse {
    pub rsid: String,
    pub gene: String,
    pub drug: String,
    pub response: Phenotype,
    pub diplotype: Option<String>,
    pub severity: DrugSeverity,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCarrierStatus {
    pub rsid: String,
    pub gene: String,
    pub condition: String,
    pub inheritance: LegacyInheritance,
}

/// One row per (trait, variant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTraitAssociation {
    pub rsid: String,
    pub trait_name: String,
    pub category: TraitCategory,
    pub effect: TraitInterpretation,
    pub confidence: f64,
}

fn confidence_value(confidence: TraitConfidence) -> f64 {
    match confidence {
        TraitConfidence::High => 1.0,
        TraitConfidence::Moderate => 0.5,
        TraitConfidence::Low => 0.25,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySummary {
    pub total_variants: u64,
    pub analyzed_variants: usize,
    pub clinical_count: usize,
    pub drug_count: usize,
    pub trait_count: usize,
    pub actionable_findings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnalysisResult {
    pub genome_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub database_versions: DatabaseVersions,
    pub clinical_findings: Vec<LegacyClinicalFinding>,
    pub drug_responses: Vec<LegacyDrugResponse>,
    pub carrier_status: Vec<LegacyCarrierStatus>,
    pub trait_associations: Vec<LegacyTraitAssociation>,
    pub summary: LegacySummary,
}

/// Convert a canonical result into the legacy report shape
pub fn to_legacy(result: &AnalysisResult) -> LegacyAnalysisResult {
    let clinical_findings: Vec<LegacyClinicalFinding> = result
        .risk_assessments
        .iter()
        .flat_map(|risk| {
            risk.variants.iter().map(move |v| LegacyClinicalFinding {
                rsid: v.rsid.clone(),
                gene: v.gene.clone(),
                condition: risk.condition.clone(),
                significance: v.significance,
                chromosome: Some(v.chromosome.clone()),
                position: Some(v.position),
                risk_level: risk.risk_level,
                inheritance: risk.inheritance.into(),
            })
        })
        .collect();

    let drug_responses: Vec<LegacyDrugResponse> = result
        .metabolizer_phenotypes
        .iter()
        .flat_map(|phenotype| {
            phenotype.drugs.iter().map(move |d| LegacyDrugResponse {
                rsid: d.rsid.clone(),
                gene: phenotype.gene.clone(),
                drug: d.drug.clone(),
                response: phenotype.phenotype,
                diplotype: phenotype.diplotype.clone(),
                severity: d.severity,
                recommendation: d.recommendation.clone(),
            })
        })
        .collect();

    let carrier_status: Vec<LegacyCarrierStatus> = result
        .carrier_statuses
        .iter()
        .map(|c| LegacyCarrierStatus {
            rsid: c.rsid.clone(),
            gene: c.gene.clone(),
            condition: c.condition.clone(),
            inheritance: c.inheritance.into(),
        })
        .collect();

    let trait_associations: Vec<LegacyTraitAssociation> = result
        .trait_associations
        .iter()
        .flat_map(|t| {
            t.variants.iter().map(move |v| LegacyTraitAssociation {
                rsid: v.rsid.clone(),
                trait_name: t.trait_name.clone(),
                category: t.category,
                effect: t.interpretation,
                confidence: confidence_value(t.confidence),
            })
        })
        .collect();

    let summary = LegacySummary {
        total_variants: result.summary.total_snps,
        analyzed_variants: result.summary.annotated_variants,
        clinical_count: clinical_findings.len(),
        drug_count: drug_responses.len(),
        trait_count: trait_associations.len(),
        actionable_findings: result
            .key_findings
            .iter()
            .filter(|f| f.priority != FindingPriority::Informational)
            .count(),
    };

    LegacyAnalysisResult {
        genome_id: result.genome_id.clone(),
        analyzed_at: result.analyzed_at,
        database_versions: result.database_versions.clone(),
        clinical_findings,
        drug_responses,
        carrier_status,
        trait_associations,
        summary,
    }
}
