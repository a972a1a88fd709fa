// ==============================================================================
// reference/mod.rs - Immutable Reference Tables
// ==============================================================================
// Description: Process-wide constant tables used by the interpretation engines
// Author: Matt Barham
// Created: 2026-09-15
// Modified: 2026-09-20
// Version: 1.0.0
// ==============================================================================

pub mod pharmacogenes;
pub mod prs_models;
pub mod trait_categories;

pub use pharmacogenes::{GeneDefinition, Marker, StarAllele, PHARMACOGENES};
pub use prs_models::{PrsModel, PrsVariant, PRS_MODELS};
pub use trait_categories::{TraitCategory, TRAIT_CATEGORY_KEYWORDS};
