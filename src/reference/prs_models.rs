// ==============================================================================
// reference/prs_models.rs - Polygenic Risk Score Models
// ==============================================================================
// Description: Fixed catalogue of per-trait weighted variant models
// Author: Matt Barham
// Created: 2026-09-20
// Modified: 2026-10-02
// Version: 1.0.1
// ==============================================================================
// Weights are per-allele log odds ratios from published GWAS meta-analyses,
// rounded to two decimals. Risk alleles are forward strand.
// ==============================================================================

/// Single weighted model variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrsVariant {
    pub rsid: &'static str,
    pub risk_allele: &'static str,
    pub weight: f64,
}

/// Weighted variant model for one trait
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrsModel {
    pub trait_name: &'static str,
    pub description: &'static str,
    pub variants: &'static [PrsVariant],
}

impl PrsModel {
    /// Sum of all model weights (expected mean raw score)
    pub fn weight_sum(&self) -> f64 {
        self.variants.iter().map(|v| v.weight).sum()
    }
}

const fn v(rsid: &'static str, risk_allele: &'static str, weight: f64) -> PrsVariant {
    PrsVariant { rsid, risk_allele, weight }
}

pub static PRS_MODELS: &[PrsModel] = &[
    PrsModel {
        trait_name: "Coronary Artery Disease",
        description: "Common variants at 9p21 and other loci associated with coronary artery disease",
        variants: &[
            v("rs10757274", "G", 0.18),
            v("rs1333049", "C", 0.20),
            v("rs4977574", "G", 0.17),
            v("rs2383206", "G", 0.15),
            v("rs6725887", "C", 0.14),
            v("rs9982601", "T", 0.13),
            v("rs17465637", "C", 0.12),
        ],
    },
    PrsModel {
        trait_name: "Type 2 Diabetes",
        description: "Common variants affecting insulin secretion and sensitivity",
        variants: &[
            v("rs7903146", "T", 0.31),
            v("rs1801282", "C", 0.14),
            v("rs5219", "T", 0.13),
            v("rs13266634", "C", 0.12),
            v("rs10811661", "T", 0.16),
            v("rs4402960", "T", 0.12),
            v("rs7754840", "C", 0.10),
        ],
    },
    PrsModel {
        trait_name: "Breast Cancer",
        description: "Low-penetrance susceptibility loci for breast cancer",
        variants: &[
            v("rs2981582", "T", 0.23),
            v("rs3803662", "T", 0.20),
            v("rs889312", "C", 0.12),
            v("rs13281615", "G", 0.08),
            v("rs3817198", "C", 0.07),
        ],
    },
    PrsModel {
        trait_name: "Alzheimer's Disease",
        description: "APOE and additional late-onset Alzheimer's disease loci",
        variants: &[
            v("rs429358", "C", 1.12),
            v("rs11136000", "C", 0.14),
            v("rs3851179", "C", 0.12),
            v("rs744373", "G", 0.10),
            v("rs3764650", "G", 0.13),
            v("rs6656401", "A", 0.17),
        ],
    },
    PrsModel {
        trait_name: "Atrial Fibrillation",
        description: "Common variants near PITX2, ZFHX3 and KCNN3",
        variants: &[
            v("rs2200733", "T", 0.39),
            v("rs10033464", "T", 0.18),
            v("rs7193343", "T", 0.19),
            v("rs6666258", "C", 0.16),
            v("rs3807989", "G", 0.12),
        ],
    },
    PrsModel {
        trait_name: "Prostate Cancer",
        description: "8q24 and other common prostate cancer susceptibility loci",
        variants: &[
            v("rs16901979", "A", 0.39),
            v("rs6983267", "G", 0.21),
            v("rs1447295", "A", 0.37),
            v("rs10993994", "T", 0.22),
            v("rs4242382", "A", 0.30),
        ],
    },
];
