//! Shared data model and entry validation for the sorting pipeline.
//!
//! Everything here is immutable once constructed: the pipeline takes the
//! inputs by reference and builds fresh result containers. Performance
//! tables are plain nested maps keyed by entity and criterion name, the
//! same shape the CSV loader and any other front end must deliver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nested performance map: entity name -> criterion name -> score.
///
/// Two instances exist per run, one for candidate actions and one for
/// boundary profiles.
pub type PerformanceTable = HashMap<String, HashMap<String, f64>>;

/// Per-criterion threshold triple `(q, p, v)`.
///
/// Must satisfy `q < p < v` strictly; [`validate_thresholds`] enforces this
/// once at pipeline entry so the scoring denominators `p - q` and `v - p`
/// are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTriple {
    /// Indifference threshold `q`.
    pub indifference: f64,
    /// Preference threshold `p`.
    pub preference: f64,
    /// Veto threshold `v`.
    pub veto: f64,
}

impl ThresholdTriple {
    pub fn new(indifference: f64, preference: f64, veto: f64) -> Self {
        Self {
            indifference,
            preference,
            veto,
        }
    }

    /// Whether the triple is strictly increasing.
    pub fn is_increasing(&self) -> bool {
        self.indifference < self.preference && self.preference < self.veto
    }
}

/// A pair of values computed in both comparison directions.
///
/// Every intermediate of the method exists twice: once for "action over
/// profile" and once for "profile over action". Carrying both in one struct
/// keeps the two directions from ever being mixed up downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directed<T> {
    pub action_over_profile: T,
    pub profile_over_action: T,
}

impl<T> Directed<T> {
    pub fn new(action_over_profile: T, profile_over_action: T) -> Self {
        Self {
            action_over_profile,
            profile_over_action,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ElectreError {
    /// Fatal configuration error: the input parameters are invalid and the
    /// pipeline refuses to produce any result. Carries the human-readable
    /// cause. Never retried.
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },
    #[error("no weight supplied for criterion {name}")]
    MissingWeight { name: String },
    #[error("no threshold triple supplied for criterion {name}")]
    MissingThresholds { name: String },
    #[error("missing performance value for {entity} on criterion {criterion}")]
    MissingPerformance { entity: String, criterion: String },
    #[error("category list has {got} names but the boundary ladder defines {expected} categories")]
    CategoryCountMismatch { expected: usize, got: usize },
    #[error("no outranking relations recorded for boundary profile {profile}")]
    MissingRelations { profile: String },
    #[error("relation vector for profile {profile} has {got} entries, expected {expected}")]
    RelationLengthMismatch {
        profile: String,
        expected: usize,
        got: usize,
    },
    #[error("no category admits action {action}")]
    UnassignedAction { action: String },
}

impl ElectreError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate the criterion weights at pipeline entry.
///
/// Every criterion must carry a non-negative weight and the sum must be
/// 1 (±1e-6) or 100 (±1e-6). Percent-style weights are accepted unchanged
/// because global concordance divides by the total.
pub fn validate_weights(
    criteria: &[String],
    weights: &HashMap<String, f64>,
) -> Result<(), ElectreError> {
    if criteria.is_empty() {
        return Err(ElectreError::configuration(
            "at least one criterion is required",
        ));
    }
    let mut sum = 0.0;
    for name in criteria {
        let w = *weights
            .get(name)
            .ok_or_else(|| ElectreError::MissingWeight { name: name.clone() })?;
        if !w.is_finite() || w < 0.0 {
            return Err(ElectreError::configuration(format!(
                "weight of criterion {name} must be finite and non-negative, got {w}"
            )));
        }
        sum += w;
    }
    let unit = (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
    let percent = (sum - 100.0).abs() <= WEIGHT_SUM_TOLERANCE;
    if !unit && !percent {
        return Err(ElectreError::configuration(format!(
            "criterion weights must sum to 1 or 100, got {sum}"
        )));
    }
    Ok(())
}

/// Validate the threshold triples at pipeline entry.
///
/// Each criterion needs a triple with `q < p < v` strictly.
pub fn validate_thresholds(
    criteria: &[String],
    thresholds: &HashMap<String, ThresholdTriple>,
) -> Result<(), ElectreError> {
    for name in criteria {
        let t = thresholds
            .get(name)
            .ok_or_else(|| ElectreError::MissingThresholds { name: name.clone() })?;
        if !t.is_increasing() {
            return Err(ElectreError::configuration(format!(
                "thresholds of criterion {name} must satisfy q < p < v, got ({}, {}, {})",
                t.indifference, t.preference, t.veto
            )));
        }
    }
    Ok(())
}

/// Look up one performance value, with a typed error naming the hole.
pub(crate) fn performance(
    table: &PerformanceTable,
    entity: &str,
    criterion: &str,
) -> Result<f64, ElectreError> {
    table
        .get(entity)
        .and_then(|row| row.get(criterion))
        .copied()
        .ok_or_else(|| ElectreError::MissingPerformance {
            entity: entity.to_string(),
            criterion: criterion.to_string(),
        })
}
