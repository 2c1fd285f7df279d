//! Input validation for grouping problems.
//!
//! Checks referential integrity of the individual records before any
//! placement starts. Detects:
//! - Duplicate identifiers
//! - Affinity or exclusion references naming an unknown identifier
//! - Self-references
//! - More references than the slot bounds allow
//!
//! All problems are accumulated and returned together; the core never
//! silently invents a record for an unknown identifier.

use std::collections::HashSet;

use crate::models::{Individual, MAX_AFFINITIES, MAX_EXCLUSIONS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two individuals share the same identifier.
    DuplicateId,
    /// An affinity slot names an identifier with no record.
    UnknownAffinityReference,
    /// An exclusion slot names an identifier with no record.
    UnknownExclusionReference,
    /// An individual names itself.
    SelfReference,
    /// More affinity references than [`MAX_AFFINITIES`].
    TooManyAffinities,
    /// More exclusion references than [`MAX_EXCLUSIONS`].
    TooManyExclusions,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the individual records for a grouping run.
///
/// Checks:
/// 1. No duplicate identifiers
/// 2. Every affinity reference resolves to a record
/// 3. Every exclusion reference resolves to a record
/// 4. No individual references itself
/// 5. Reference counts stay within the slot bounds (5 / 3)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(individuals: &[Individual]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for ind in individuals {
        if !ids.insert(ind.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate identifier: {}", ind.id),
            ));
        }
    }

    for ind in individuals {
        if ind.affinities.len() > MAX_AFFINITIES {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyAffinities,
                format!(
                    "'{}' declares {} affinities (limit {MAX_AFFINITIES})",
                    ind.id,
                    ind.affinities.len()
                ),
            ));
        }
        if ind.exclusions.len() > MAX_EXCLUSIONS {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyExclusions,
                format!(
                    "'{}' declares {} exclusions (limit {MAX_EXCLUSIONS})",
                    ind.id,
                    ind.exclusions.len()
                ),
            ));
        }

        for friend in &ind.affinities {
            if *friend == ind.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfReference,
                    format!("'{}' names itself as an affinity", ind.id),
                ));
            } else if !ids.contains(friend.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownAffinityReference,
                    format!(
                        "'{}' names unknown individual '{friend}' as an affinity",
                        ind.id
                    ),
                ));
            }
        }

        for excl in &ind.exclusions {
            if *excl == ind.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfReference,
                    format!("'{}' names itself as an exclusion", ind.id),
                ));
            } else if !ids.contains(excl.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownExclusionReference,
                    format!(
                        "'{}' names unknown individual '{excl}' as an exclusion",
                        ind.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
