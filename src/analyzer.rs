// ==============================================================================
// analyzer.rs - Interpretation Pipeline
// ==============================================================================
// Description: Runs every engine over a match result and assembles the report
// Author: Matt Barham
// Created: 2026-09-23
// Modified: 2026-10-12
// Version: 1.2.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engines::{carrier, findings, pharmacogenomics, polygenic, risk, traits};
use crate::index::AnnotationIndex;
use crate::models::MatchResult;
use crate::output::{AnalysisResult, AnalysisSummary};

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    pub include_traits: bool,
    pub include_prs: bool,

    /// Reserved, not applied
    pub min_gwas_p_value: Option<f64>,

    /// Reserved, not applied
    pub min_prs_variants: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_traits: true,
            include_prs: true,
            min_gwas_p_value: None,
            min_prs_variants: None,
        }
    }
}

pub struct GeneticsAnalyzer {
    options: AnalysisOptions,
}

impl GeneticsAnalyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        if options.min_gwas_p_value.is_some() || options.min_prs_variants.is_some() {
            debug!("minGwasPValue / minPrsVariants are reserved and will be ignored");
        }
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Main interpretation pipeline
    pub fn analyze(&self, input: &MatchResult) -> AnalysisResult {
        self.analyze_at(input, Utc::now())
    }

    /// Same as [`analyze`](Self::analyze) with a caller-supplied timestamp
    pub fn analyze_at(&self, input: &MatchResult, analyzed_at: DateTime<Utc>) -> AnalysisResult {
        info!(
            "Analyzing genome {} ({} annotated variants)",
            input.genome_id,
            input.variants.len()
        );

        // 1. Index genotypes by rsID
        let index = AnnotationIndex::build(&input.variants);

        // 2. Monogenic risk
        let risk_assessments = risk::assess_risks(&input.variants);
        debug!("Risk assessments: {}", risk_assessments.len());

        // 3. Pharmacogenomics
        let metabolizer_phenotypes =
            pharmacogenomics::analyze_pharmacogenomics(&input.variants, &index);
        debug!("Metabolizer phenotypes: {}", metabolizer_phenotypes.len());

        // 4. Carrier status
        let carrier_statuses = carrier::detect_carriers(&input.variants);
        debug!("Carrier statuses: {}", carrier_statuses.len());

        // 5. GWAS traits
        let trait_associations = if self.options.include_traits {
            traits::analyze_traits(&input.variants)
        } else {
            debug!("Trait analysis disabled");
            Vec::new()
        };

        // 6. Polygenic scores
        let polygenic_risk_scores = if self.options.include_prs {
            polygenic::calculate_polygenic_scores(&index)
        } else {
            debug!("Polygenic scoring disabled");
            Vec::new()
        };

        // 7. Key findings digest
        let key_findings = findings::collect_key_findings(
            &risk_assessments,
            &metabolizer_phenotypes,
            &carrier_statuses,
            &polygenic_risk_scores,
            &trait_associations,
        );

        let summary = AnalysisSummary::from_parts(
            input,
            &risk_assessments,
            &metabolizer_phenotypes,
            &carrier_statuses,
            &trait_associations,
            &polygenic_risk_scores,
            &key_findings,
        );

        info!(
            "Analysis complete for {}: {} risks ({} high), {} pharmacogenes, {} carriers, {} key findings",
            input.genome_id,
            summary.risk_assessments,
            summary.high_risk_count,
            summary.metabolizer_phenotypes,
            summary.carrier_count,
            summary.key_findings
        );

        AnalysisResult {
            genome_id: input.genome_id.clone(),
            analyzed_at,
            database_versions: input.database_versions.clone(),
            risk_assessments,
            metabolizer_phenotypes,
            carrier_statuses,
            trait_associations,
            polygenic_risk_scores,
            key_findings,
            summary,
        }
    }
}

/// Analyze a match result with the given options
pub fn analyze(input: &MatchResult, options: &AnalysisOptions) -> AnalysisResult {
    GeneticsAnalyzer::new(options.clone()).analyze(input)
}
