// ==============================================================================
// engines/findings.rs - Key Findings Digest
// ==============================================================================
// Description: Merges engine outputs into a capped, prioritised digest
// Author: Matt Barham
// Created: 2026-09-22
// Modified: 2026-10-05
// Version: 1.0.1
// ==============================================================================
// Assembly order (truncated to MAX_KEY_FINDINGS, never re-sorted):
//   1. every high risk assessment                    urgent
//   2. up to 2 critical drugs per pharmacogene       urgent
//   3. up to 3 carrier statuses                      important
//   4. up to 2 very high / high polygenic scores     important
//   5. up to 3 increased traits, confidence != low   informational
// ==============================================================================

use serde::{Deserialize, Serialize};

use super::carrier::CarrierStatus;
use super::pharmacogenomics::{DrugSeverity, MetabolizerPhenotype};
use super::polygenic::PolygenicRiskScore;
use super::risk::{RiskAssessment, RiskLevel};
use super::traits::{TraitAssociation, TraitConfidence, TraitInterpretation};

pub const MAX_KEY_FINDINGS: usize = 10;

const CRITICAL_DRUGS_PER_GENE: usize = 2;
const MAX_CARRIER_FINDINGS: usize = 3;
const MAX_PRS_FINDINGS: usize = 2;
const MAX_TRAIT_FINDINGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    DiseaseRisk,
    DrugResponse,
    CarrierStatus,
    PolygenicRisk,
    TraitAssociation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingPriority {
    Urgent,
    Important,
    Informational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFinding {
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub priority: FindingPriority,
    pub title: String,
    pub description: String,
    pub gene: Option<String>,
    pub trait_name: Option<String>,
}

/// Build the key findings digest
pub fn collect_key_findings(
    risks: &[RiskAssessment],
    phenotypes: &[MetabolizerPhenotype],
    carriers: &[CarrierStatus],
    polygenic: &[PolygenicRiskScore],
    traits: &[TraitAssociation],
) -> Vec<KeyFinding> {
    let mut findings = Vec::new();

    for risk in risks.iter().filter(|r| r.risk_level == RiskLevel::High) {
        findings.push(KeyFinding {
            finding_type: FindingType::DiseaseRisk,
            priority: FindingPriority::Urgent,
            title: format!("Elevated risk: {}", risk.condition),
            description: risk.explanation.clone(),
            gene: Some(risk.gene.clone()),
            trait_name: None,
        });
    }

    for phenotype in phenotypes {
        let critical = phenotype
            .drugs
            .iter()
            .filter(|d| d.severity == DrugSeverity::Critical)
            .take(CRITICAL_DRUGS_PER_GENE);
        for drug in critical {
            findings.push(KeyFinding {
                finding_type: FindingType::DrugResponse,
                priority: FindingPriority::Urgent,
                title: format!("{}: {} ({})", drug.drug, phenotype.phenotype.label(), phenotype.gene),
                description: drug.recommendation.clone(),
                gene: Some(phenotype.gene.clone()),
                trait_name: None,
            });
        }
    }

    for carrier in carriers.iter().take(MAX_CARRIER_FINDINGS) {
        findings.push(KeyFinding {
            finding_type: FindingType::CarrierStatus,
            priority: FindingPriority::Important,
            title: format!("Carrier: {}", carrier.condition),
            description: format!(
                "You carry one copy of a disease-associated variant in {} ({}). {}",
                carrier.gene, carrier.rsid, carrier.partner_risk
            ),
            gene: Some(carrier.gene.clone()),
            trait_name: None,
        });
    }

    for score in polygenic
        .iter()
        .filter(|s| s.risk_category.is_elevated())
        .take(MAX_PRS_FINDINGS)
    {
        findings.push(KeyFinding {
            finding_type: FindingType::PolygenicRisk,
            priority: FindingPriority::Important,
            title: format!("Polygenic risk: {}", score.trait_name),
            description: score.interpretation.clone(),
            gene: None,
            trait_name: Some(score.trait_name.clone()),
        });
    }

    for association in traits
        .iter()
        .filter(|t| {
            t.interpretation == TraitInterpretation::Increased && t.confidence != TraitConfidence::Low
        })
        .take(MAX_TRAIT_FINDINGS)
    {
        findings.push(KeyFinding {
            finding_type: FindingType::TraitAssociation,
            priority: FindingPriority::Informational,
            title: format!("Trait association: {}", association.trait_name),
            description: association.description.clone(),
            gene: None,
            trait_name: Some(association.trait_name.clone()),
        });
    }

    findings.truncate(MAX_KEY_FINDINGS);
    findings
}
