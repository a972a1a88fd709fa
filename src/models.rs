// ==============================================================================
// models.rs - Annotated Variant Data Models
// ==============================================================================
// Description: Input data structures produced by the external variant matcher
// Author: Matt Barham
// Created: 2026-09-14
// Modified: 2026-10-09
// Version: 1.1.0
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::genotype::{self, Zygosity};

/// ClinVar-style clinical significance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalSignificance {
    Pathogenic,
    LikelyPathogenic,
    UncertainSignificance,
    LikelyBenign,
    Benign,
    Conflicting,
    NotProvided,
}

impl ClinicalSignificance {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalSignificance::Pathogenic => "pathogenic",
            ClinicalSignificance::LikelyPathogenic => "likely_pathogenic",
            ClinicalSignificance::UncertainSignificance => "uncertain_significance",
            ClinicalSignificance::LikelyBenign => "likely_benign",
            ClinicalSignificance::Benign => "benign",
            ClinicalSignificance::Conflicting => "conflicting",
            ClinicalSignificance::NotProvided => "not_provided",
        }
    }

    /// Pathogenic or likely pathogenic
    pub fn is_disease_causing(&self) -> bool {
        matches!(
            self,
            ClinicalSignificance::Pathogenic | ClinicalSignificance::LikelyPathogenic
        )
    }
}

/// Coarse category assigned by the matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantCategory {
    Pathogenic,
    Drug,
    Carrier,
    Protective,
    #[default]
    Neutral,
}

/// Clinical annotation (ClinVar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalAnnotation {
    /// Gene symbol (e.g., "BRCA1")
    #[serde(default)]
    pub gene: Option<String>,

    pub clinical_significance: ClinicalSignificance,

    /// Review status stars (0-4)
    #[serde(default)]
    pub review_stars: Option<u8>,

    /// Associated condition names
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// Single drug evidence entry (PharmGKB clinical annotation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugEvidence {
    pub drug_name: String,

    /// PharmGKB level of evidence ("1A", "1B", "2A", "2B", "3", "4")
    pub evidence_level: String,

    #[serde(default)]
    pub significant: bool,

    /// Free-text clinical annotation
    #[serde(default)]
    pub annotation: Option<String>,

    /// CPIC level ("A"-"D")
    #[serde(default)]
    pub cpic_level: Option<String>,

    #[serde(default)]
    pub fda_label: Option<bool>,
}

/// Pharmacogenomic annotation (PharmGKB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacoAnnotation {
    pub gene: String,

    #[serde(default)]
    pub drugs: Vec<DrugEvidence>,

    #[serde(default)]
    pub has_cpic_guideline: bool,

    #[serde(default)]
    pub has_dpwg_guideline: bool,

    #[serde(default)]
    pub has_fda_label: bool,
}

/// GWAS catalog association entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GwasAssociation {
    pub trait_name: String,

    pub p_value: f64,

    /// Odds ratio or beta coefficient
    #[serde(default)]
    pub or_beta: Option<f64>,

    #[serde(default)]
    pub risk_allele: Option<String>,

    /// Copies of the risk allele carried (0, 1 or 2)
    #[serde(default)]
    pub risk_allele_count: Option<u8>,

    #[serde(default)]
    pub has_risk_allele: Option<bool>,
}

/// Genome variant annotated by the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedVariant {
    /// SNP identifier (e.g., "rs7903146")
    pub rsid: String,

    /// Chromosome ("1"-"22", "X", "Y", "MT")
    pub chromosome: String,

    /// Base pair position
    pub position: u64,

    /// Genotype string (e.g., "AG", "A/G", "--")
    pub genotype: String,

    #[serde(default)]
    pub allele1: String,

    #[serde(default)]
    pub allele2: String,

    #[serde(default)]
    pub clinvar: Option<ClinicalAnnotation>,

    #[serde(default)]
    pub pharmgkb: Option<PharmacoAnnotation>,

    #[serde(default)]
    pub gwas: Vec<GwasAssociation>,

    #[serde(default)]
    pub impact_score: f64,

    #[serde(default)]
    pub category: VariantCategory,
}

impl AnnotatedVariant {
    /// Zygosity of this call
    ///
    /// The explicit allele fields win when both are populated; otherwise the
    /// genotype string is split.
    pub fn zygosity(&self) -> Zygosity {
        if !self.allele1.is_empty() && !self.allele2.is_empty() {
            genotype::zygosity_of(&self.allele1, &self.allele2)
        } else {
            genotype::classify(&self.genotype)
        }
    }

    pub fn is_x_linked(&self) -> bool {
        genotype::is_x_chromosome(&self.chromosome)
    }

    /// Gene symbol from the clinical annotation
    pub fn clinical_gene(&self) -> Option<&str> {
        self.clinvar.as_ref().and_then(|c| c.gene.as_deref())
    }
}

/// Reference database versions used by the matcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseVersions {
    #[serde(default)]
    pub clinvar: Option<String>,

    #[serde(default)]
    pub pharmgkb: Option<String>,

    #[serde(default)]
    pub gwas: Option<String>,
}

/// Output of the external variant-matching step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub genome_id: String,

    #[serde(default)]
    pub total_snps: u64,

    #[serde(default)]
    pub matched_snps: u64,

    #[serde(default)]
    pub variants: Vec<AnnotatedVariant>,

    #[serde(default)]
    pub database_versions: DatabaseVersions,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the engine tests

    use super::*;

    pub fn variant(rsid: &str, genotype: &str) -> AnnotatedVariant {
        AnnotatedVariant {
            rsid: rsid.to_string(),
            chromosome: "1".to_string(),
            position: 1000,
            genotype: genotype.to_string(),
            allele1: String::new(),
            allele2: String::new(),
            clinvar: None,
            pharmgkb: None,
            gwas: Vec::new(),
            impact_score: 0.0,
            category: VariantCategory::Neutral,
        }
    }

    pub fn clinical(
        rsid: &str,
        genotype: &str,
        gene: &str,
        significance: ClinicalSignificance,
        stars: u8,
        conditions: &[&str],
    ) -> AnnotatedVariant {
        let mut v = variant(rsid, genotype);
        v.clinvar = Some(ClinicalAnnotation {
            gene: Some(gene.to_string()),
            clinical_significance: significance,
            review_stars: Some(stars),
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
        });
        v
    }

    pub fn drug(name: &str, level: &str) -> DrugEvidence {
        DrugEvidence {
            drug_name: name.to_string(),
            evidence_level: level.to_string(),
            significant: true,
            annotation: None,
            cpic_level: None,
            fda_label: None,
        }
    }

    pub fn pharmaco(rsid: &str, genotype: &str, gene: &str, drugs: Vec<DrugEvidence>) -> AnnotatedVariant {
        let mut v = variant(rsid, genotype);
        v.category = VariantCategory::Drug;
        v.pharmgkb = Some(PharmacoAnnotation {
            gene: gene.to_string(),
            drugs,
            has_cpic_guideline: false,
            has_dpwg_guideline: false,
            has_fda_label: false,
        });
        v
    }

    pub fn gwas(trait_name: &str, p_value: f64) -> GwasAssociation {
        GwasAssociation {
            trait_name: trait_name.to_string(),
            p_value,
            or_beta: None,
            risk_allele: None,
            risk_allele_count: None,
            has_risk_allele: None,
        }
    }

    pub fn match_result(variants: Vec<AnnotatedVariant>) -> MatchResult {
        MatchResult {
            genome_id: "genome-1".to_string(),
            total_snps: 600_000,
            matched_snps: variants.len() as u64,
            variants,
            database_versions: DatabaseVersions {
                clinvar: Some("2026-09".to_string()),
                pharmgkb: Some("2026-08".to_string()),
                gwas: Some("e112".to_string()),
            },
        }
    }
}
