// ==============================================================================
// engines/pharmacogenomics.rs - Metabolizer Phenotypes and Drug Guidance
// ==============================================================================
// Description: Diplotype calling, activity scoring, phenotype assignment and
//              drug recommendations per pharmacogene
// Author: Matt Barham
// Created: 2026-09-17
// Modified: 2026-10-07
// Version: 1.2.0
// ==============================================================================
// Activity score → phenotype:
//   score == 0      → poor
//   score <  1      → intermediate
//   score <= 2      → normal
//   score <= 2.5    → rapid
//   score >  2.5    → ultrarapid
//   no diplotype    → unknown
// ==============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OrderedGroups;
use crate::genotype::allele_dosage;
use crate::index::AnnotationIndex;
use crate::models::{AnnotatedVariant, DrugEvidence};
use crate::reference::pharmacogenes::{self, REFERENCE_ALLELE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phenotype {
    Poor,
    Intermediate,
    Normal,
    Rapid,
    Ultrarapid,
    Unknown,
}

impl Phenotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::Poor => "poor",
            Phenotype::Intermediate => "intermediate",
            Phenotype::Normal => "normal",
            Phenotype::Rapid => "rapid",
            Phenotype::Ultrarapid => "ultrarapid",
            Phenotype::Unknown => "unknown",
        }
    }

    /// Human-readable label ("Poor Metabolizer")
    pub fn label(&self) -> &'static str {
        match self {
            Phenotype::Poor => "Poor Metabolizer",
            Phenotype::Intermediate => "Intermediate Metabolizer",
            Phenotype::Normal => "Normal Metabolizer",
            Phenotype::Rapid => "Rapid Metabolizer",
            Phenotype::Ultrarapid => "Ultrarapid Metabolizer",
            Phenotype::Unknown => "Unknown Metabolizer Status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugSeverity {
    Critical,
    Moderate,
    Informational,
}

impl DrugSeverity {
    pub fn rank(&self) -> u8 {
        match self {
            DrugSeverity::Critical => 0,
            DrugSeverity::Moderate => 1,
            DrugSeverity::Informational => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpicAvailability {
    Available,
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecommendation {
    pub drug: String,
    pub category: String,
    pub evidence_level: String,
    pub severity: DrugSeverity,
    pub recommendation: String,
    pub cpic_level: Option<String>,
    pub fda_label: bool,
    /// Variant the evidence was taken from
    pub rsid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolizerPhenotype {
    pub gene: String,
    pub diplotype: Option<String>,
    pub activity_score: Option<f64>,
    pub phenotype: Phenotype,
    pub drugs: Vec<DrugRecommendation>,
    pub cpic_guideline: CpicAvailability,
    pub variants: Vec<String>,
}

/// Build metabolizer phenotypes for every pharmacogene in the input
pub fn analyze_pharmacogenomics(
    variants: &[AnnotatedVariant],
    index: &AnnotationIndex<'_>,
) -> Vec<MetabolizerPhenotype> {
    let mut by_gene: OrderedGroups<&AnnotatedVariant> = OrderedGroups::new();
    for variant in variants {
        if let Some(pharmgkb) = &variant.pharmgkb {
            by_gene.push(&pharmgkb.gene, variant);
        }
    }

    by_gene
        .into_groups()
        .into_iter()
        .map(|(gene, group)| analyze_gene(gene, &group, index))
        .collect()
}

fn analyze_gene(
    gene: String,
    group: &[&AnnotatedVariant],
    index: &AnnotationIndex<'_>,
) -> MetabolizerPhenotype {
    let diplotype = call_diplotype(&gene, index);
    let activity_score = diplotype.as_deref().map(|d| activity_score(&gene, d));
    let phenotype = phenotype_from_score(activity_score);

    debug!(
        "{}: diplotype={:?} activity={:?} phenotype={}",
        gene,
        diplotype,
        activity_score,
        phenotype.as_str()
    );

    let cpic_guideline = if group
        .iter()
        .any(|v| v.pharmgkb.as_ref().is_some_and(|p| p.has_cpic_guideline))
    {
        CpicAvailability::Available
    } else {
        CpicAvailability::NotAvailable
    };

    MetabolizerPhenotype {
        drugs: recommend_drugs(group, phenotype),
        variants: group.iter().map(|v| v.rsid.clone()).collect(),
        gene,
        diplotype,
        activity_score,
        phenotype,
        cpic_guideline,
    }
}

/// Call a diplotype from star allele marker genotypes
///
/// Each star allele's copy count is the highest marker dosage (0-2). Detected
/// alleles are padded with `*1` to two entries and sorted. Returns `None` for
/// genes without a star allele table.
pub fn call_diplotype(gene: &str, index: &AnnotationIndex<'_>) -> Option<String> {
    let star_alleles = pharmacogenes::star_alleles(gene)?;

    let mut detected: Vec<&str> = Vec::with_capacity(2);
    for star in star_alleles {
        let copies = star
            .markers
            .iter()
            .map(|marker| {
                index
                    .genotype(marker.rsid)
                    .map(|genotype| allele_dosage(genotype, marker.allele))
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0);

        for _ in 0..copies {
            detected.push(star.name);
        }
    }

    // A diploid call holds two haplotypes; extra detections are dropped in
    // table order.
    detected.truncate(2);
    while detected.len() < 2 {
        detected.push(REFERENCE_ALLELE);
    }
    detected.sort_unstable();

    Some(detected.join("/"))
}

/// Sum of per-allele activity values for a `/`-joined diplotype
pub fn activity_score(gene: &str, diplotype: &str) -> f64 {
    diplotype
        .split('/')
        .map(|allele| pharmacogenes::activity_value(gene, allele))
        .sum()
}

pub fn phenotype_from_score(score: Option<f64>) -> Phenotype {
    match score {
        None => Phenotype::Unknown,
        Some(s) if s == 0.0 => Phenotype::Poor,
        Some(s) if s < 1.0 => Phenotype::Intermediate,
        Some(s) if s <= 2.0 => Phenotype::Normal,
        Some(s) if s <= 2.5 => Phenotype::Rapid,
        Some(_) => Phenotype::Ultrarapid,
    }
}

/// Rank of a PharmGKB evidence level, strongest first
pub fn evidence_rank(level: &str) -> u8 {
    match level.trim().to_ascii_uppercase().as_str() {
        "1A" => 0,
        "1B" => 1,
        "2A" => 2,
        "2B" => 3,
        "3" => 4,
        "4" => 5,
        _ => 6,
    }
}

pub fn drug_severity(evidence_level: &str, phenotype: Phenotype) -> DrugSeverity {
    let level = evidence_level.trim().to_ascii_uppercase();
    let high_evidence = level == "1A" || level == "1B";

    if high_evidence && matches!(phenotype, Phenotype::Poor | Phenotype::Ultrarapid) {
        DrugSeverity::Critical
    } else if level.starts_with('2') || matches!(phenotype, Phenotype::Intermediate | Phenotype::Rapid) {
        DrugSeverity::Moderate
    } else {
        DrugSeverity::Informational
    }
}

fn recommend_drugs(group: &[&AnnotatedVariant], phenotype: Phenotype) -> Vec<DrugRecommendation> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut drugs = Vec::new();

    for variant in group {
        let Some(pharmgkb) = &variant.pharmgkb else {
            continue;
        };
        for evidence in &pharmgkb.drugs {
            // Names compare trimmed and case-insensitive; first spelling wins
            if !seen.insert(evidence.drug_name.trim().to_lowercase()) {
                continue;
            }
            drugs.push(recommend(evidence, phenotype, &variant.rsid));
        }
    }

    // Stable: input order breaks remaining ties
    drugs.sort_by_key(|d| (d.severity.rank(), evidence_rank(&d.evidence_level)));
    drugs
}

fn recommend(evidence: &DrugEvidence, phenotype: Phenotype, rsid: &str) -> DrugRecommendation {
    let template = recommendation_text(phenotype, &evidence.drug_name);
    let recommendation = match evidence.annotation.as_deref().map(str::trim) {
        Some(annotation) if !annotation.is_empty() => format!("{} {}", annotation, template),
        _ => template,
    };

    DrugRecommendation {
        drug: evidence.drug_name.clone(),
        category: pharmacogenes::therapeutic_category(&evidence.drug_name).to_string(),
        evidence_level: evidence.evidence_level.clone(),
        severity: drug_severity(&evidence.evidence_level, phenotype),
        recommendation,
        cpic_level: evidence.cpic_level.clone(),
        fda_label: evidence.fda_label.unwrap_or(false),
        rsid: rsid.to_string(),
    }
}

fn recommendation_text(phenotype: Phenotype, drug: &str) -> String {
    match phenotype {
        Phenotype::Poor => format!(
            "As a poor metabolizer, standard doses of {} may cause increased exposure and side effects, \
             or reduced effect for prodrugs. An alternative drug or a reduced dose may be needed.",
            drug
        ),
        Phenotype::Intermediate => format!(
            "As an intermediate metabolizer, your response to {} may be altered. \
             Dose adjustment and closer monitoring may be considered.",
            drug
        ),
        Phenotype::Normal => format!(
            "As a normal metabolizer, standard dosing of {} is expected to be appropriate.",
            drug
        ),
        Phenotype::Rapid => format!(
            "As a rapid metabolizer, {} may be cleared faster than usual. \
             Monitor for reduced effectiveness.",
            drug
        ),
        Phenotype::Ultrarapid => format!(
            "As an ultrarapid metabolizer, {} may be ineffective at standard doses, \
             or prodrugs may reach toxic levels. An alternative drug should be considered.",
            drug
        ),
        Phenotype::Unknown => format!(
            "Metabolizer status could not be determined from the available markers. \
             Follow standard prescribing guidance for {}.",
            drug
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{drug, pharmaco, variant};

    #[test]
    fn test_cyp2d6_star4_homozygous_is_poor() {
        let variants = vec![pharmaco("rs3892097", "TT", "CYP2D6", vec![drug("codeine", "1A")])];
        let index = AnnotationIndex::build(&variants);

        let phenotypes = analyze_pharmacogenomics(&variants, &index);

        assert_eq!(phenotypes.len(), 1);
        let cyp2d6 = &phenotypes[0];
        assert_eq!(cyp2d6.diplotype.as_deref(), Some("*4/*4"));
        assert_eq!(cyp2d6.activity_score, Some(0.0));
        assert_eq!(cyp2d6.phenotype, Phenotype::Poor);
        assert_eq!(cyp2d6.drugs[0].severity, DrugSeverity::Critical);
        assert_eq!(cyp2d6.drugs[0].category, "Opioid Analgesic");
    }

    #[test]
    fn test_diplotype_padding_and_sorting() {
        let variants = vec![variant("rs12248560", "CT")];
        let index = AnnotationIndex::build(&variants);
        assert_eq!(call_diplotype("CYP2C19", &index).as_deref(), Some("*1/*17"));

        let index = AnnotationIndex::build(&[]);
        assert_eq!(call_diplotype("CYP2C19", &index).as_deref(), Some("*1/*1"));

        let variants = vec![variant("rs4244285", "AG"), variant("rs12248560", "CT")];
        let index = AnnotationIndex::build(&variants);
        assert_eq!(call_diplotype("CYP2C19", &index).as_deref(), Some("*17/*2"));
    }

    #[test]
    fn test_diplotype_is_always_two_sorted_alleles() {
        let variants = vec![
            variant("rs4244285", "AA"),
            variant("rs4986893", "AA"),
            variant("rs12248560", "TT"),
        ];
        let index = AnnotationIndex::build(&variants);

        let diplotype = call_diplotype("CYP2C19", &index).unwrap();
        let alleles: Vec<&str> = diplotype.split('/').collect();
        assert_eq!(alleles.len(), 2);
        let mut sorted = alleles.clone();
        sorted.sort();
        assert_eq!(alleles, sorted);
        assert_eq!(diplotype, "*2/*2");
    }

    #[test]
    fn test_multi_marker_allele_uses_max_copies() {
        let variants = vec![variant("rs1800460", "CT"), variant("rs1142345", "CC")];
        let index = AnnotationIndex::build(&variants);
        assert_eq!(call_diplotype("TPMT", &index).as_deref(), Some("*3A/*3A"));
    }

    #[test]
    fn test_malformed_marker_genotype_counts_zero() {
        let variants = vec![variant("rs3892097", "T")];
        let index = AnnotationIndex::build(&variants);
        assert_eq!(call_diplotype("CYP2D6", &index).as_deref(), Some("*1/*1"));
    }

    #[test]
    fn test_gene_without_table_is_unknown() {
        let variants = vec![pharmaco("rs9923231", "CT", "VKORC1", vec![drug("warfarin", "1A")])];
        let index = AnnotationIndex::build(&variants);

        let phenotypes = analyze_pharmacogenomics(&variants, &index);
        assert_eq!(phenotypes[0].diplotype, None);
        assert_eq!(phenotypes[0].activity_score, None);
        assert_eq!(phenotypes[0].phenotype, Phenotype::Unknown);
        assert_eq!(phenotypes[0].drugs[0].severity, DrugSeverity::Informational);
    }

    #[test]
    fn test_phenotype_thresholds() {
        assert_eq!(phenotype_from_score(Some(0.0)), Phenotype::Poor);
        assert_eq!(phenotype_from_score(Some(0.5)), Phenotype::Intermediate);
        assert_eq!(phenotype_from_score(Some(1.0)), Phenotype::Normal);
        assert_eq!(phenotype_from_score(Some(2.0)), Phenotype::Normal);
        assert_eq!(phenotype_from_score(Some(2.5)), Phenotype::Rapid);
        assert_eq!(phenotype_from_score(Some(3.0)), Phenotype::Ultrarapid);
        assert_eq!(phenotype_from_score(None), Phenotype::Unknown);
    }

    #[test]
    fn test_activity_score_defaults() {
        assert_eq!(activity_score("CYP2C19", "*1/*17"), 2.5);
        assert_eq!(activity_score("CYP2C19", "*17/*17"), 3.0);
        assert_eq!(activity_score("CYP2C9", "*2/*3"), 0.5);
        assert_eq!(activity_score("CYP2C9", "*1/*99"), 2.0);
    }

    #[test]
    fn test_drug_severity() {
        assert_eq!(drug_severity("1A", Phenotype::Ultrarapid), DrugSeverity::Critical);
        assert_eq!(drug_severity("1b", Phenotype::Poor), DrugSeverity::Critical);
        assert_eq!(drug_severity("1A", Phenotype::Normal), DrugSeverity::Informational);
        assert_eq!(drug_severity("1A", Phenotype::Intermediate), DrugSeverity::Moderate);
        assert_eq!(drug_severity("2B", Phenotype::Poor), DrugSeverity::Moderate);
        assert_eq!(drug_severity("3", Phenotype::Rapid), DrugSeverity::Moderate);
        assert_eq!(drug_severity("4", Phenotype::Unknown), DrugSeverity::Informational);
    }

    #[test]
    fn test_drugs_deduplicated_and_sorted() {
        let mut annotated = drug("Clopidogrel", "1A");
        annotated.annotation = Some("Reduced activation of clopidogrel.".to_string());

        let variants = vec![
            pharmaco(
                "rs4244285",
                "AA",
                "CYP2C19",
                vec![drug("citalopram", "3"), drug("omeprazole", "2A"), annotated],
            ),
            pharmaco("rs4986893", "GG", "CYP2C19", vec![drug("clopidogrel", "3"), drug("voriconazole", "1A")]),
        ];
        let index = AnnotationIndex::build(&variants);

        let phenotypes = analyze_pharmacogenomics(&variants, &index);
        assert_eq!(phenotypes.len(), 1);
        let cyp2c19 = &phenotypes[0];
        assert_eq!(cyp2c19.diplotype.as_deref(), Some("*2/*2"));
        assert_eq!(cyp2c19.phenotype, Phenotype::Poor);
        assert_eq!(cyp2c19.variants, vec!["rs4244285", "rs4986893"]);

        let order: Vec<(&str, DrugSeverity)> = cyp2c19
            .drugs
            .iter()
            .map(|d| (d.drug.as_str(), d.severity))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Clopidogrel", DrugSeverity::Critical),
                ("voriconazole", DrugSeverity::Critical),
                ("omeprazole", DrugSeverity::Moderate),
                ("citalopram", DrugSeverity::Informational),
            ]
        );
        assert!(cyp2c19.drugs[0]
            .recommendation
            .starts_with("Reduced activation of clopidogrel. As a poor metabolizer"));
    }

    #[test]
    fn test_cpic_availability() {
        let mut flagged = pharmaco("rs1", "AA", "CYP2C9", vec![]);
        if let Some(p) = flagged.pharmgkb.as_mut() {
            p.has_cpic_guideline = true;
        }
        let variants = vec![pharmaco("rs2", "AA", "CYP2C9", vec![]), flagged];
        let index = AnnotationIndex::build(&variants);

        let phenotypes = analyze_pharmacogenomics(&variants, &index);
        assert_eq!(phenotypes[0].cpic_guideline, CpicAvailability::Available);

        let variants = vec![pharmaco("rs2", "AA", "CYP2C9", vec![])];
        let index = AnnotationIndex::build(&variants);
        let phenotypes = analyze_pharmacogenomics(&variants, &index);
        assert_eq!(phenotypes[0].cpic_guideline, CpicAvailability::NotAvailable);
    }

    #[test]
    fn test_recommendation_text_differs_per_phenotype() {
        let phenotypes = [
            Phenotype::Poor,
            Phenotype::Intermediate,
            Phenotype::Normal,
            Phenotype::Rapid,
            Phenotype::Ultrarapid,
            Phenotype::Unknown,
        ];
        let texts: HashSet<String> = phenotypes
            .iter()
            .map(|p| recommendation_text(*p, "warfarin"))
            .collect();
        assert_eq!(texts.len(), phenotypes.len());
    }
}
