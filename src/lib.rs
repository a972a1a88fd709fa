// ==============================================================================
// lib.rs - Genetics Interpreter Library
// ==============================================================================
// Description: Library interface for the genetic interpretation engine
// Author: Matt Barham
// Created: 2026-09-14
// Modified: 2026-10-14
// Version: 1.2.0
// ==============================================================================

pub mod models;
pub mod genotype;
pub mod index;
pub mod reference;
pub mod engines;
pub mod analyzer;
pub mod output;
pub mod legacy;
pub mod validator;
pub mod audit;

pub use analyzer::{analyze, AnalysisOptions, GeneticsAnalyzer};
pub use legacy::{to_legacy, LegacyAnalysisResult};
pub use models::MatchResult;
pub use output::{AnalysisResult, AnalysisSummary, OutputFormat};
