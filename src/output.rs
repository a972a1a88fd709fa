// ==============================================================================
// output.rs - Analysis Result and Serialisation
// ==============================================================================
// Description: Canonical analysis result, summary counts, and JSON output
// Author: Matt Barham
// Created: 2026-09-23
// Modified: 2026-10-09
// Version: 1.1.0
// ==============================================================================

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engines::{
    CarrierStatus, DrugSeverity, FindingPriority, KeyFinding, MetabolizerPhenotype,
    PolygenicRiskScore, RiskAssessment, RiskLevel, TraitAssociation, TraitInterpretation,
};
use crate::models::{DatabaseVersions, MatchResult};

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Compact JSON (best for APIs and storage)
    Json,
    /// Indented JSON (best for inspection)
    JsonPretty,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        "json"
    }

    pub fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

/// Per-category counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_snps: u64,
    pub matched_snps: u64,
    pub annotated_variants: usize,
    pub risk_assessments: usize,
    pub high_risk_count: usize,
    pub moderate_risk_count: usize,
    pub metabolizer_phenotypes: usize,
    pub critical_drug_count: usize,
    pub carrier_count: usize,
    pub trait_associations: usize,
    pub increased_trait_count: usize,
    pub polygenic_scores: usize,
    pub elevated_prs_count: usize,
    pub key_findings: usize,
    pub urgent_findings: usize,
}

/// Complete interpretation result for one genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub genome_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub database_versions: DatabaseVersions,
    pub risk_assessments: Vec<RiskAssessment>,
    pub metabolizer_phenotypes: Vec<MetabolizerPhenotype>,
    pub carrier_statuses: Vec<CarrierStatus>,
    pub trait_associations: Vec<TraitAssociation>,
    pub polygenic_risk_scores: Vec<PolygenicRiskScore>,
    pub key_findings: Vec<KeyFinding>,
    pub summary: AnalysisSummary,
}

impl AnalysisSummary {
    pub fn from_parts(
        input: &MatchResult,
        risks: &[RiskAssessment],
        phenotypes: &[MetabolizerPhenotype],
        carriers: &[CarrierStatus],
        traits: &[TraitAssociation],
        polygenic: &[PolygenicRiskScore],
        findings: &[KeyFinding],
    ) -> Self {
        let risk_count = |level: RiskLevel| risks.iter().filter(|r| r.risk_level == level).count();

        Self {
            total_snps: input.total_snps,
            matched_snps: input.matched_snps,
            annotated_variants: input.variants.len(),
            risk_assessments: risks.len(),
            high_risk_count: risk_count(RiskLevel::High),
            moderate_risk_count: risk_count(RiskLevel::Moderate),
            metabolizer_phenotypes: phenotypes.len(),
            critical_drug_count: phenotypes
                .iter()
                .flat_map(|p| p.drugs.iter())
                .filter(|d| d.severity == DrugSeverity::Critical)
                .count(),
            carrier_count: carriers.len(),
            trait_associations: traits.len(),
            increased_trait_count: traits
                .iter()
                .filter(|t| t.interpretation == TraitInterpretation::Increased)
                .count(),
            polygenic_scores: polygenic.len(),
            elevated_prs_count: polygenic
                .iter()
                .filter(|s| s.risk_category.is_elevated())
                .count(),
            key_findings: findings.len(),
            urgent_findings: findings
                .iter()
                .filter(|f| f.priority == FindingPriority::Urgent)
                .count(),
        }
    }
}

/// Serialise a result (canonical or legacy) as JSON
pub fn write_json<W, T>(writer: W, value: &T, format: OutputFormat) -> Result<(), serde_json::Error>
where
    W: Write,
    T: Serialize,
{
    match format {
        OutputFormat::Json => serde_json::to_writer(writer, value),
        OutputFormat::JsonPretty => serde_json::to_writer_pretty(writer, value),
    }
}
