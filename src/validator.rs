// ==============================================================================
// validator.rs - Match Result Validation
// ==============================================================================
// Description: Validates match-result documents before interpretation
// Author: Matt Barham
// Created: 2026-09-24
// Modified: 2026-10-14
// Version: 1.1.0
// Security: Size cap before read, SHA-256 provenance digest
// ==============================================================================

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{AnnotatedVariant, MatchResult};

pub const MAX_INPUT_SIZE: u64 = 256 * 1024 * 1024; // 256 MB

const MAX_REVIEW_STARS: u8 = 4;
const MAX_ALLELE_COPIES: u8 = 2;

/// Content errors in an otherwise well-formed document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Genome identifier is empty")]
    EmptyGenomeId,

    #[error("Matched SNP count {matched} exceeds total SNP count {total}")]
    MatchedExceedsTotal { matched: u64, total: u64 },

    #[error("Variant at index {index} has an empty rsID")]
    EmptyRsid { index: usize },

    #[error("Variant {rsid}: impact score is not a finite number")]
    NonFiniteImpact { rsid: String },

    #[error("Variant {rsid}: review stars {stars} out of range (0-4)")]
    ReviewStarsOutOfRange { rsid: String, stars: u8 },

    #[error("Variant {rsid}: pharmacogene symbol is empty")]
    EmptyPharmacogene { rsid: String },

    #[error("Variant {rsid}: drug entry has an empty name")]
    EmptyDrugName { rsid: String },

    #[error("Variant {rsid}: p-value {p_value} for '{trait_name}' outside (0, 1]")]
    PValueOutOfRange {
        rsid: String,
        trait_name: String,
        p_value: f64,
    },

    #[error("Variant {rsid}: effect size for '{trait_name}' is not a finite number")]
    NonFiniteEffect { rsid: String, trait_name: String },

    #[error("Variant {rsid}: risk allele count {count} for '{trait_name}' exceeds 2")]
    RiskAlleleCountOutOfRange {
        rsid: String,
        trait_name: String,
        count: u8,
    },
}

/// Errors loading a document from disk
#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed match result JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Invalid match result: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug)]
pub struct ValidatedInput {
    pub match_result: MatchResult,
    pub size: u64,
    pub hash_sha256: String,
    pub validated_at: DateTime<Utc>,
}

/// Load, decode and validate a match-result document
pub fn load_match_result(path: &Path, max_size: u64) -> Result<ValidatedInput, InputError> {
    info!("Validating input: {}", path.display());

    // 1. Size check before reading
    let size = fs::metadata(path)?.len();
    if size > max_size {
        return Err(InputError::TooLarge { size, max: max_size });
    }
    debug!("Size check passed: {} bytes", size);

    let bytes = fs::read(path)?;
    parse_match_result(&bytes, max_size)
}

/// Decode and validate an in-memory match-result document
pub fn parse_match_result(bytes: &[u8], max_size: u64) -> Result<ValidatedInput, InputError> {
    let size = bytes.len() as u64;
    if size > max_size {
        return Err(InputError::TooLarge { size, max: max_size });
    }

    // 2. Decode
    let match_result: MatchResult = serde_json::from_slice(bytes)?;
    debug!("Decoded {} annotated variants", match_result.variants.len());

    // 3. Content validation
    validate_match_result(&match_result)?;

    // 4. Provenance digest
    let hash_sha256 = format!("{:x}", Sha256::digest(bytes));
    debug!("SHA-256: {}", hash_sha256);

    Ok(ValidatedInput {
        match_result,
        size,
        hash_sha256,
        validated_at: Utc::now(),
    })
}

/// Check value ranges the engines rely on
pub fn validate_match_result(match_result: &MatchResult) -> Result<(), ValidationError> {
    if match_result.genome_id.trim().is_empty() {
        return Err(ValidationError::EmptyGenomeId);
    }

    // A zero total means the matcher did not report one
    if match_result.total_snps > 0 && match_result.matched_snps > match_result.total_snps {
        return Err(ValidationError::MatchedExceedsTotal {
            matched: match_result.matched_snps,
            total: match_result.total_snps,
        });
    }

    for (index, variant) in match_result.variants.iter().enumerate() {
        validate_variant(index, variant)?;
    }

    Ok(())
}

fn validate_variant(index: usize, variant: &AnnotatedVariant) -> Result<(), ValidationError> {
    if variant.rsid.trim().is_empty() {
        return Err(ValidationError::EmptyRsid { index });
    }
    let rsid = || variant.rsid.clone();

    if !variant.impact_score.is_finite() {
        return Err(ValidationError::NonFiniteImpact { rsid: rsid() });
    }

    if let Some(stars) = variant.clinvar.as_ref().and_then(|c| c.review_stars) {
        if stars > MAX_REVIEW_STARS {
            return Err(ValidationError::ReviewStarsOutOfRange { rsid: rsid(), stars });
        }
    }

    if let Some(pharmgkb) = &variant.pharmgkb {
        if pharmgkb.gene.trim().is_empty() {
            return Err(ValidationError::EmptyPharmacogene { rsid: rsid() });
        }
        if pharmgkb.drugs.iter().any(|d| d.drug_name.trim().is_empty()) {
            return Err(ValidationError::EmptyDrugName { rsid: rsid() });
        }
    }

    for entry in &variant.gwas {
        if !(entry.p_value > 0.0 && entry.p_value <= 1.0) {
            return Err(ValidationError::PValueOutOfRange {
                rsid: rsid(),
                trait_name: entry.trait_name.clone(),
                p_value: entry.p_value,
            });
        }
        if entry.or_beta.is_some_and(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteEffect {
                rsid: rsid(),
                trait_name: entry.trait_name.clone(),
            });
        }
        if let Some(count) = entry.risk_allele_count {
            if count > MAX_ALLELE_COPIES {
                return Err(ValidationError::RiskAlleleCountOutOfRange {
                    rsid: rsid(),
                    trait_name: entry.trait_name.clone(),
                    count,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{clinical, gwas, match_result, pharmaco, variant};
    use crate::models::ClinicalSignificance;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "genomeId": "genome-42",
        "totalSnps": 640000,
        "matchedSnps": 2,
        "variants": [
            {
                "rsid": "rs3892097",
                "chromosome": "22",
                "position": 42524947,
                "genotype": "CT",
                "pharmgkb": {
                    "gene": "CYP2D6",
                    "drugs": [{"drugName": "codeine", "evidenceLevel": "1A", "significant": true}]
                }
            },
            {
                "rsid": "rs7903146",
                "chromosome": "10",
                "position": 114758349,
                "genotype": "TT",
                "gwas": [{"traitName": "Type 2 Diabetes", "pValue": 1e-50, "orBeta": 1.4}]
            }
        ],
        "databaseVersions": {"clinvar": "2026-09"}
    }"#;

    #[test]
    fn test_load_valid_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE).unwrap();
        temp_file.flush().unwrap();

        let validated = load_match_result(temp_file.path(), MAX_INPUT_SIZE).unwrap();

        assert_eq!(validated.match_result.genome_id, "genome-42");
        assert_eq!(validated.match_result.variants.len(), 2);
        assert_eq!(validated.size, SAMPLE.len() as u64);
        assert_eq!(validated.hash_sha256.len(), 64);
        assert!(validated.hash_sha256.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_stable() {
        let a = parse_match_result(SAMPLE.as_bytes(), MAX_INPUT_SIZE).unwrap();
        let b = parse_match_result(SAMPLE.as_bytes(), MAX_INPUT_SIZE).unwrap();
        assert_eq!(a.hash_sha256, b.hash_sha256);
    }

    #[test]
    fn test_oversize_rejected_before_read() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE).unwrap();
        temp_file.flush().unwrap();

        let err = load_match_result(temp_file.path(), 16).unwrap_err();
        assert!(matches!(err, InputError::TooLarge { max: 16, .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_match_result(b"{\"genomeId\": ", MAX_INPUT_SIZE).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_match_result(Path::new("/nonexistent/match.json"), MAX_INPUT_SIZE).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn test_invalid_content_is_wrapped() {
        let doc = SAMPLE.replace("1e-50", "1.5");
        let err = parse_match_result(doc.as_bytes(), MAX_INPUT_SIZE).unwrap_err();
        assert!(matches!(
            err,
            InputError::Invalid(ValidationError::PValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_document_level() {
        let mut doc = match_result(Vec::new());
        assert!(validate_match_result(&doc).is_ok());

        doc.genome_id = "  ".to_string();
        assert_eq!(validate_match_result(&doc), Err(ValidationError::EmptyGenomeId));

        let mut doc = match_result(Vec::new());
        doc.total_snps = 10;
        doc.matched_snps = 11;
        assert!(matches!(
            validate_match_result(&doc),
            Err(ValidationError::MatchedExceedsTotal { matched: 11, total: 10 })
        ));

        doc.total_snps = 0;
        assert!(validate_match_result(&doc).is_ok());
    }

    #[test]
    fn test_validate_variant_ranges() {
        let check = |v: AnnotatedVariant| validate_match_result(&match_result(vec![v]));

        assert!(matches!(check(variant("", "AG")), Err(ValidationError::EmptyRsid { index: 0 })));

        let mut v = variant("rs1", "AG");
        v.impact_score = f64::NAN;
        assert!(matches!(check(v), Err(ValidationError::NonFiniteImpact { .. })));

        let v = clinical("rs1", "AG", "CFTR", ClinicalSignificance::Pathogenic, 5, &[]);
        assert!(matches!(check(v), Err(ValidationError::ReviewStarsOutOfRange { stars: 5, .. })));

        let v = pharmaco("rs1", "AG", " ", Vec::new());
        assert!(matches!(check(v), Err(ValidationError::EmptyPharmacogene { .. })));

        let mut v = variant("rs1", "AG");
        v.gwas.push(gwas("Height", 0.0));
        assert!(matches!(check(v), Err(ValidationError::PValueOutOfRange { .. })));

        let mut v = variant("rs1", "AG");
        let mut entry = gwas("Height", 0.01);
        entry.or_beta = Some(f64::INFINITY);
        v.gwas.push(entry);
        assert!(matches!(check(v), Err(ValidationError::NonFiniteEffect { .. })));

        let mut v = variant("rs1", "AG");
        let mut entry = gwas("Height", 0.01);
        entry.risk_allele_count = Some(3);
        v.gwas.push(entry);
        assert!(matches!(check(v), Err(ValidationError::RiskAlleleCountOutOfRange { count: 3, .. })));

        let mut v = variant("rs1", "AG");
        v.gwas.push(gwas("Height", 1.0));
        assert!(check(v).is_ok());
    }
}
