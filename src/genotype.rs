// ==============================================================================
// genotype.rs - Genotype Tokenising and Allele Dosage
// ==============================================================================
// Description: Splits genotype calls into allele pairs and counts allele copies
// Author: Matt Barham
// Created: 2026-09-14
// Modified: 2026-09-30
// Version: 1.0.0
// ==============================================================================
// Accepted genotype forms:
//   - Two characters, 23andMe style     "AG", "TT"
//   - Two tokens separated by / or |    "A/G", "T|T", "AT/A"
// Anything else ("--", "A", "ATG", "A/G/T", "") is indeterminate:
//   - zygosity is Indeterminate
//   - every allele dosage is 0
// ==============================================================================

use serde::{Deserialize, Serialize};

/// Zygosity of a diploid call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    Homozygous,
    Heterozygous,
    Indeterminate,
}

/// Split a genotype into exactly two allele tokens
///
/// # Returns
/// * `Some((a, b))` - Both alleles called
/// * `None` - No-call or malformed genotype
///
/// # Examples
/// ```
/// use genetics_interpreter::genotype::split_alleles;
///
/// assert_eq!(split_alleles("AG"), Some(("A", "G")));
/// assert_eq!(split_alleles("C/T"), Some(("C", "T")));
/// assert_eq!(split_alleles("--"), None);
/// assert_eq!(split_alleles("ATG"), None);
/// ```
pub fn split_alleles(genotype: &str) -> Option<(&str, &str)> {
    let genotype = genotype.trim();

    let (first, second) = if genotype.contains(['/', '|']) {
        let mut tokens = genotype.split(['/', '|']);
        let first = tokens.next()?;
        let second = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        (first.trim(), second.trim())
    } else {
        let mut boundaries = genotype.char_indices().map(|(idx, _)| idx);
        boundaries.next()?;
        let split_at = boundaries.next()?;
        if boundaries.next().is_some() {
            return None;
        }
        genotype.split_at(split_at)
    };

    if is_called(first) && is_called(second) {
        Some((first, second))
    } else {
        None
    }
}

fn is_called(token: &str) -> bool {
    !token.is_empty() && token != "-" && token != "."
}

/// Zygosity of a genotype string
pub fn classify(genotype: &str) -> Zygosity {
    match split_alleles(genotype) {
        Some((a, b)) => zygosity_of(a, b),
        None => Zygosity::Indeterminate,
    }
}

/// Zygosity of two explicit allele calls
pub fn zygosity_of(allele1: &str, allele2: &str) -> Zygosity {
    let (a, b) = (allele1.trim(), allele2.trim());
    if !is_called(a) || !is_called(b) {
        Zygosity::Indeterminate
    } else if a.eq_ignore_ascii_case(b) {
        Zygosity::Homozygous
    } else {
        Zygosity::Heterozygous
    }
}

/// Count copies of `allele` in a genotype (0, 1 or 2)
///
/// Indeterminate genotypes and empty alleles count as 0.
///
/// # Examples
/// ```
/// use genetics_interpreter::genotype::allele_dosage;
///
/// assert_eq!(allele_dosage("TT", "T"), 2);
/// assert_eq!(allele_dosage("CT", "T"), 1);
/// assert_eq!(allele_dosage("CC", "T"), 0);
/// assert_eq!(allele_dosage("--", "T"), 0);
/// ```
pub fn allele_dosage(genotype: &str, allele: &str) -> u8 {
    let allele = allele.trim();
    if allele.is_empty() {
        return 0;
    }

    match split_alleles(genotype) {
        Some((a, b)) => [a, b]
            .iter()
            .filter(|token| token.eq_ignore_ascii_case(allele))
            .count() as u8,
        None => 0,
    }
}

/// X chromosome, accepting "X", "chrX" and numeric "23"
pub fn is_x_chromosome(chromosome: &str) -> bool {
    let chromosome = chromosome.trim();
    let name = chromosome
        .strip_prefix("chr")
        .or_else(|| chromosome.strip_prefix("CHR"))
        .unwrap_or(chromosome);
    name.eq_ignore_ascii_case("x") || name == "23"
}
