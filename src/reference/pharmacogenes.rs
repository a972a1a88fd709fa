// ==============================================================================
// reference/pharmacogenes.rs - Star Allele and Activity Score Tables
// ==============================================================================
// Description: Marker-based star allele definitions, allele activity values,
//              and therapeutic drug categories
// Author: Matt Barham
// Created: 2026-09-15
// Modified: 2026-10-02
// Version: 1.1.0
// ==============================================================================
// Marker alleles are given on the forward (plus) strand as reported by
// consumer genotyping arrays. This is a small marker heuristic, not a full
// star-allele caller: structural variants, CYP2D6 copy number and phasing are
// not represented.
// ==============================================================================

/// Reference (wild-type) allele used to pad diplotypes
pub const REFERENCE_ALLELE: &str = "*1";

/// Activity value for alleles missing from a gene's table
pub const DEFAULT_ACTIVITY: f64 = 1.0;

/// A single (rsID, risk allele) marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub rsid: &'static str,
    pub allele: &'static str,
}

/// Named haplotype defined by one or more markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarAllele {
    pub name: &'static str,
    pub markers: &'static [Marker],
}

/// Per-gene star allele and activity definitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneDefinition {
    pub gene: &'static str,
    pub star_alleles: &'static [StarAllele],
    pub activity: &'static [(&'static str, f64)],
}

const fn marker(rsid: &'static str, allele: &'static str) -> Marker {
    Marker { rsid, allele }
}

pub static PHARMACOGENES: &[GeneDefinition] = &[
    GeneDefinition {
        gene: "CYP2D6",
        star_alleles: &[
            StarAllele { name: "*4", markers: &[marker("rs3892097", "T")] },
            StarAllele { name: "*10", markers: &[marker("rs1065852", "A")] },
            StarAllele { name: "*41", markers: &[marker("rs28371725", "T")] },
        ],
        activity: &[("*1", 1.0), ("*2", 1.0), ("*4", 0.0), ("*10", 0.25), ("*17", 0.5), ("*41", 0.5)],
    },
    GeneDefinition {
        gene: "CYP2C19",
        star_alleles: &[
            StarAllele { name: "*2", markers: &[marker("rs4244285", "A")] },
            StarAllele { name: "*3", markers: &[marker("rs4986893", "A")] },
            StarAllele { name: "*17", markers: &[marker("rs12248560", "T")] },
        ],
        activity: &[("*1", 1.0), ("*2", 0.0), ("*3", 0.0), ("*17", 1.5)],
    },
    GeneDefinition {
        gene: "CYP2C9",
        star_alleles: &[
            StarAllele { name: "*2", markers: &[marker("rs1799853", "T")] },
            StarAllele { name: "*3", markers: &[marker("rs1057910", "C")] },
        ],
        activity: &[("*1", 1.0), ("*2", 0.5), ("*3", 0.0)],
    },
    GeneDefinition {
        gene: "CYP3A5",
        star_alleles: &[
            StarAllele { name: "*3", markers: &[marker("rs776746", "C")] },
            StarAllele { name: "*6", markers: &[marker("rs10264272", "T")] },
        ],
        activity: &[("*1", 1.0), ("*3", 0.0), ("*6", 0.0)],
    },
    GeneDefinition {
        gene: "TPMT",
        star_alleles: &[
            StarAllele { name: "*2", markers: &[marker("rs1800462", "C")] },
            StarAllele {
                name: "*3A",
                markers: &[marker("rs1800460", "T"), marker("rs1142345", "C")],
            },
        ],
        activity: &[("*1", 1.0), ("*2", 0.0), ("*3A", 0.0), ("*3B", 0.0), ("*3C", 0.0)],
    },
    GeneDefinition {
        gene: "DPYD",
        star_alleles: &[
            StarAllele { name: "*2A", markers: &[marker("rs3918290", "T")] },
            StarAllele { name: "*13", markers: &[marker("rs55886062", "C")] },
        ],
        activity: &[("*1", 1.0), ("*2A", 0.0), ("*13", 0.0)],
    },
    GeneDefinition {
        gene: "NUDT15",
        star_alleles: &[StarAllele { name: "*3", markers: &[marker("rs116855232", "T")] }],
        activity: &[("*1", 1.0), ("*3", 0.0)],
    },
    GeneDefinition {
        gene: "SLCO1B1",
        star_alleles: &[StarAllele { name: "*5", markers: &[marker("rs4149056", "C")] }],
        activity: &[("*1", 1.0), ("*5", 0.5)],
    },
    GeneDefinition {
        gene: "UGT1A1",
        star_alleles: &[StarAllele { name: "*6", markers: &[marker("rs4148323", "A")] }],
        activity: &[("*1", 1.0), ("*6", 0.5)],
    },
];

/// Ordered therapeutic category → drug name keywords (first match wins)
pub static DRUG_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Anticoagulant/Antiplatelet",
        &["warfarin", "acenocoumarol", "phenprocoumon", "clopidogrel", "prasugrel", "ticagrelor"],
    ),
    (
        "Opioid Analgesic",
        &["codeine", "tramadol", "oxycodone", "hydrocodone", "morphine", "methadone"],
    ),
    (
        "Antidepressant",
        &[
            "citalopram", "escitalopram", "sertraline", "paroxetine", "fluoxetine", "fluvoxamine",
            "venlafaxine", "amitriptyline", "nortriptyline", "imipramine", "clomipramine",
            "desipramine", "doxepin", "trimipramine",
        ],
    ),
    (
        "Antipsychotic",
        &["aripiprazole", "risperidone", "haloperidol", "pimozide", "brexpiprazole", "iloperidone"],
    ),
    (
        "Statin",
        &["simvastatin", "atorvastatin", "rosuvastatin", "pravastatin", "lovastatin", "fluvastatin", "pitavastatin"],
    ),
    ("Beta Blocker", &["metoprolol", "carvedilol", "propranolol", "nebivolol"]),
    (
        "Oncology",
        &["fluorouracil", "capecitabine", "tegafur", "tamoxifen", "irinotecan", "mercaptopurine", "thioguanine"],
    ),
    ("Immunosuppressant", &["tacrolimus", "azathioprine", "cyclosporine"]),
    ("Proton Pump Inhibitor", &["omeprazole", "esomeprazole", "lansoprazole", "pantoprazole", "dexlansoprazole"]),
    ("Anticonvulsant", &["phenytoin", "fosphenytoin", "carbamazepine", "oxcarbazepine"]),
    ("NSAID", &["celecoxib", "ibuprofen", "flurbiprofen", "meloxicam", "piroxicam", "lornoxicam"]),
    ("Antiviral/Antifungal", &["efavirenz", "atazanavir", "voriconazole", "abacavir"]),
    ("ADHD", &["atomoxetine"]),
];

/// Fallback therapeutic category
pub const OTHER_DRUG_CATEGORY: &str = "Other";

/// Gene definition, matched case-insensitively
pub fn gene_definition(gene: &str) -> Option<&'static GeneDefinition> {
    PHARMACOGENES
        .iter()
        .find(|def| def.gene.eq_ignore_ascii_case(gene))
}

/// Star allele table for a gene
pub fn star_alleles(gene: &str) -> Option<&'static [StarAllele]> {
    gene_definition(gene).map(|def| def.star_alleles)
}

/// Activity value for a gene/allele pair (DEFAULT_ACTIVITY if unknown)
pub fn activity_value(gene: &str, allele: &str) -> f64 {
    gene_definition(gene)
        .and_then(|def| {
            def.activity
                .iter()
                .find(|(name, _)| *name == allele)
                .map(|(_, value)| *value)
        })
        .unwrap_or(DEFAULT_ACTIVITY)
}

/// Therapeutic category by first keyword match on the drug name
pub fn therapeutic_category(drug_name: &str) -> &'static str {
    let lowered = drug_name.to_lowercase();
    DRUG_CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER_DRUG_CATEGORY)
}
