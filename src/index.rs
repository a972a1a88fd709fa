// ==============================================================================
// index.rs - Annotation Index
// ==============================================================================
// Description: rsID lookup over annotated variants
// Author: Matt Barham
// Created: 2026-09-14
// Modified: 2026-09-14
// Version: 1.0.0
// ==============================================================================

use std::collections::HashMap;

use crate::models::AnnotatedVariant;

/// rsID → variant lookup built once per analysis
///
/// Duplicate rsIDs overwrite earlier entries (last one wins).
#[derive(Debug, Default)]
pub struct AnnotationIndex<'a> {
    by_rsid: HashMap<&'a str, &'a AnnotatedVariant>,
}

impl<'a> AnnotationIndex<'a> {
    pub fn build(variants: &'a [AnnotatedVariant]) -> Self {
        let mut by_rsid = HashMap::with_capacity(variants.len());
        for variant in variants {
            by_rsid.insert(variant.rsid.as_str(), variant);
        }
        Self { by_rsid }
    }

    pub fn get(&self, rsid: &str) -> Option<&'a AnnotatedVariant> {
        self.by_rsid.get(rsid).copied()
    }

    /// Genotype string for an rsID, if present
    pub fn genotype(&self, rsid: &str) -> Option<&'a str> {
        self.get(rsid).map(|v| v.genotype.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_rsid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rsid.is_empty()
    }
}
