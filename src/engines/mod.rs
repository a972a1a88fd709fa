// ==============================================================================
// engines/mod.rs - Interpretation Engines
// ==============================================================================
// Description: Independent scoring engines run by the analyzer
// Author: Matt Barham
// Created: 2026-09-16
// Modified: 2026-10-05
// Version: 1.2.0
// ==============================================================================

use std::collections::HashMap;

pub mod carrier;
pub mod findings;
pub mod pharmacogenomics;
pub mod polygenic;
pub mod risk;
pub mod traits;

pub use carrier::{CarrierStatus, CarrierType};
pub use findings::{FindingPriority, FindingType, KeyFinding};
pub use pharmacogenomics::{
    CpicAvailability, DrugRecommendation, DrugSeverity, MetabolizerPhenotype, Phenotype,
};
pub use polygenic::{PolygenicRiskScore, PrsRiskCategory};
pub use risk::{Inheritance, RiskAssessment, RiskLevel};
pub use traits::{TraitAssociation, TraitConfidence, TraitInterpretation};

/// Groups keyed by string, in order of first discovery
pub(crate) struct OrderedGroups<T> {
    positions: HashMap<String, usize>,
    groups: Vec<(String, Vec<T>)>,
}

impl<T> OrderedGroups<T> {
    pub(crate) fn new() -> Self {
        Self {
            positions: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: &str, item: T) {
        match self.positions.get(key) {
            Some(&pos) => self.groups[pos].1.push(item),
            None => {
                self.positions.insert(key.to_string(), self.groups.len());
                self.groups.push((key.to_string(), vec![item]));
            }
        }
    }

    pub(crate) fn into_groups(self) -> Vec<(String, Vec<T>)> {
        self.groups
    }
}
