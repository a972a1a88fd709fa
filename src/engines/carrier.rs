// ==============================================================================
// engines/carrier.rs - Recessive Carrier Detection
// ==============================================================================
// Description: Flags heterozygous pathogenic variants as carrier findings
// Author: Matt Barham
// Created: 2026-09-17
// Modified: 2026-09-29
// Version: 1.0.1
// ==============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::risk::Inheritance;
use crate::genotype::Zygosity;
use crate::models::{AnnotatedVariant, ClinicalSignificance};

const X_LINKED_PARTNER_RISK: &str = "If this variant is passed on, each son has a 50% chance of being \
     affected and each daughter has a 50% chance of being a carrier.";

const AUTOSOMAL_PARTNER_RISK: &str = "If your partner is also a carrier, each child has a 25% chance of \
     being affected, a 50% chance of being a carrier, and a 25% chance of being unaffected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierType {
    Heterozygous,
    XLinkedFemale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierStatus {
    pub gene: String,
    pub condition: String,
    pub rsid: String,
    pub genotype: String,
    pub significance: ClinicalSignificance,
    pub inheritance: Inheritance,
    pub carrier_type: CarrierType,
    pub partner_risk: String,
}

/// Detect carrier status for recessive and X-linked conditions
///
/// Only heterozygous pathogenic / likely pathogenic calls qualify; homozygous
/// and indeterminate genotypes never produce a carrier record. One record is
/// kept per (gene, condition), first occurrence wins.
pub fn detect_carriers(variants: &[AnnotatedVariant]) -> Vec<CarrierStatus> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut carriers = Vec::new();

    for variant in variants {
        let Some(clinvar) = &variant.clinvar else {
            continue;
        };
        if !clinvar.clinical_significance.is_disease_causing() {
            continue;
        }
        if variant.zygosity() != Zygosity::Heterozygous {
            continue;
        }

        let gene = clinvar.gene.as_deref().unwrap_or("Unknown");
        let (inheritance, carrier_type, partner_risk) = if variant.is_x_linked() {
            (Inheritance::XLinked, CarrierType::XLinkedFemale, X_LINKED_PARTNER_RISK)
        } else {
            (Inheritance::AutosomalRecessive, CarrierType::Heterozygous, AUTOSOMAL_PARTNER_RISK)
        };

        for condition in &clinvar.conditions {
            if !seen.insert((gene.to_string(), condition.clone())) {
                continue;
            }
            carriers.push(CarrierStatus {
                gene: gene.to_string(),
                condition: condition.clone(),
                rsid: variant.rsid.clone(),
                genotype: variant.genotype.clone(),
                significance: clinvar.clinical_significance,
                inheritance,
                carrier_type,
                partner_risk: partner_risk.to_string(),
            });
        }
    }

    debug!("Detected {} carrier records", carriers.len());
    carriers
}
