// ==============================================================================
// reference/trait_categories.rs - GWAS Trait Category Keywords
// ==============================================================================
// Description: Ordered keyword table used to categorise GWAS trait names
// Author: Matt Barham
// Created: 2026-09-18
// Modified: 2026-09-18
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

/// Trait category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Cardiovascular,
    Metabolic,
    Neurological,
    Autoimmune,
    Cancer,
    PhysicalTrait,
    Response,
    Disease,
    /// Fallback, never matched by keyword
    Other,
}

impl TraitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitCategory::Cardiovascular => "cardiovascular",
            TraitCategory::Metabolic => "metabolic",
            TraitCategory::Neurological => "neurological",
            TraitCategory::Autoimmune => "autoimmune",
            TraitCategory::Cancer => "cancer",
            TraitCategory::PhysicalTrait => "physical_trait",
            TraitCategory::Response => "response",
            TraitCategory::Disease => "disease",
            TraitCategory::Other => "other",
        }
    }
}

/// Category → lowercase keywords, checked in order
pub static TRAIT_CATEGORY_KEYWORDS: &[(TraitCategory, &[&str])] = &[
    (
        TraitCategory::Cardiovascular,
        &[
            "coronary", "heart", "cardiac", "myocardial", "atrial", "hypertension",
            "blood pressure", "stroke", "cholesterol", "ldl", "hdl", "artery", "cardiovascular",
        ],
    ),
    (
        TraitCategory::Metabolic,
        &[
            "diabetes", "glucose", "insulin", "obesity", "body mass", "bmi", "triglyceride",
            "lipid", "metabolic", "uric acid", "gout",
        ],
    ),
    (
        TraitCategory::Neurological,
        &[
            "alzheimer", "parkinson", "dementia", "schizophrenia", "bipolar", "depress",
            "migraine", "epilep", "autism", "cognitive", "neuro",
        ],
    ),
    (
        TraitCategory::Autoimmune,
        &[
            "lupus", "rheumatoid", "crohn", "celiac", "coeliac", "psoriasis", "multiple sclerosis",
            "inflammatory bowel", "ulcerative colitis", "autoimmune", "vitiligo",
        ],
    ),
    (
        TraitCategory::Cancer,
        &["cancer", "carcinoma", "melanoma", "lymphoma", "leukemia", "glioma", "tumor", "neoplasm"],
    ),
    (
        TraitCategory::PhysicalTrait,
        &[
            "height", "eye color", "eye colour", "hair", "freckl", "skin pigment", "baldness",
            "tanning", "pigmentation",
        ],
    ),
    (
        TraitCategory::Response,
        &["response", "sensitivity", "adverse", "toxicity", "dose", "metabolism"],
    ),
    (
        TraitCategory::Disease,
        &["disease", "disorder", "syndrome", "deficiency", "infection"],
    ),
];

/// Category for a trait name by first keyword match, `Other` if none
pub fn categorize(trait_name: &str) -> TraitCategory {
    let lowered = trait_name.to_lowercase();
    TRAIT_CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(TraitCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("Coronary artery disease"), TraitCategory::Cardiovascular);
        assert_eq!(categorize("Type 2 Diabetes"), TraitCategory::Metabolic);
        assert_eq!(categorize("Late-onset Alzheimer's disease"), TraitCategory::Neurological);
        assert_eq!(categorize("Breast cancer"), TraitCategory::Cancer);
        assert_eq!(categorize("Hair color"), TraitCategory::PhysicalTrait);
        assert_eq!(categorize("Response to statin therapy"), TraitCategory::Response);
        assert_eq!(categorize("Kidney disease"), TraitCategory::Disease);
        assert_eq!(categorize("Sleep duration"), TraitCategory::Other);
    }

    #[test]
    fn test_first_match_wins() {
        // "disease" appears in both, cardiovascular is checked first
        assert_eq!(categorize("Coronary heart disease"), TraitCategory::Cardiovascular);
        // Crohn's disease is autoimmune, not the generic disease bucket
        assert_eq!(categorize("Crohn's disease"), TraitCategory::Autoimmune);
    }

    #[test]
    fn test_other_is_never_a_keyword_category() {
        assert!(TRAIT_CATEGORY_KEYWORDS
            .iter()
            .all(|(category, _)| *category != TraitCategory::Other));
    }
}
