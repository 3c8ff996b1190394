//! Separability of the boundary ladder, and the minimum admissible
//! cutting threshold it implies.
//!
//! Two adjacent boundary profiles that outrank each other too credibly
//! cannot separate their categories: the check runs the scoring stages
//! between every consecutive pair and inspects how credibly the lower
//! profile outranks the one above it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ElectreError, PerformanceTable, ThresholdTriple};
use crate::scoring::{credibility, global_concordance, pairwise_scores};

/// How cleanly the boundary profiles separate their categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparabilityDegree {
    /// No lower profile outranks its upper neighbour at all.
    HyperStrict,
    /// Some residual credibility, at most 0.5.
    Strict,
    /// Credibility above 0.5: the ladder cannot support any admissible
    /// cutting threshold and the inputs must be redefined.
    Weak,
}

impl fmt::Display for SeparabilityDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeparabilityDegree::HyperStrict => "Hyper-strict",
            SeparabilityDegree::Strict => "Strict",
            SeparabilityDegree::Weak => "Weak",
        };
        f.write_str(label)
    }
}

/// Outcome of the separability check on one boundary ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparabilityReport {
    /// Credibility of each lower profile outranking its upper neighbour,
    /// keyed `"<lower>:<upper>"` in ladder order.
    pub sigma: HashMap<String, f64>,
    pub degree: SeparabilityDegree,
    /// Minimum admissible cutting threshold, `max(sigma)` rounded up to
    /// three decimals.
    pub lambda_min: f64,
}

/// Round a maximum credibility up to three decimals.
///
/// Rounding up keeps the published minimum from falling below the true
/// one when the maximum is not representable exactly.
pub(crate) fn minimum_lambda(max_sigma: f64) -> f64 {
    (max_sigma * 1000.0).ceil() / 1000.0
}

/// Run the scoring stages between every consecutive boundary pair and
/// grade the ladder.
///
/// The boundary sequence itself plays the role of the action list; the
/// recorded value for the pair `(b_{k-1}, b_k)` is the credibility of
/// `b_{k-1}` outranking `b_k`.
pub fn check(
    criteria: &[String],
    weights: &HashMap<String, f64>,
    profiles: &[String],
    profile_perf: &PerformanceTable,
    thresholds: &HashMap<String, ThresholdTriple>,
) -> Result<SeparabilityReport, ElectreError> {
    if profiles.len() < 2 {
        return Err(ElectreError::configuration(
            "at least two boundary profiles are required",
        ));
    }

    let mut sigma = HashMap::new();
    let mut max_sigma = 0.0_f64;
    for k in 1..profiles.len() {
        let upper = &profiles[k];
        let (conc, disc) =
            pairwise_scores(criteria, profiles, profile_perf, upper, profile_perf, thresholds)?;
        let global = global_concordance(&conc, weights)?;
        let cred = credibility(&global, &disc);

        let value = cred.action_over_profile[k - 1];
        max_sigma = max_sigma.max(value);
        sigma.insert(format!("{}:{}", profiles[k - 1], upper), value);
    }

    let degree = if max_sigma == 0.0 {
        SeparabilityDegree::HyperStrict
    } else if max_sigma <= 0.5 {
        SeparabilityDegree::Strict
    } else {
        SeparabilityDegree::Weak
    };

    Ok(SeparabilityReport {
        sigma,
        degree,
        lambda_min: minimum_lambda(max_sigma),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThresholdTriple;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ladder(levels: &[(&str, f64)], criteria: &[String]) -> PerformanceTable {
        levels
            .iter()
            .map(|(name, value)| {
                let row = criteria.iter().map(|c| (c.clone(), *value)).collect();
                (name.to_string(), row)
            })
            .collect()
    }

    fn setup(criteria: &[String]) -> (HashMap<String, f64>, HashMap<String, ThresholdTriple>) {
        let weights = criteria
            .iter()
            .map(|c| (c.clone(), 1.0 / criteria.len() as f64))
            .collect();
        let thresholds = criteria
            .iter()
            .map(|c| (c.clone(), ThresholdTriple::new(1.0, 2.0, 3.0)))
            .collect();
        (weights, thresholds)
    }

    #[test]
    fn well_spread_ladder_is_hyper_strict() {
        let criteria = names(&["g1", "g2", "g3"]);
        let (weights, thresholds) = setup(&criteria);
        let profiles = names(&["b0", "b1", "b2"]);
        let perf = ladder(&[("b0", 0.0), ("b1", 10.0), ("b2", 20.0)], &criteria);

        let report = check(&criteria, &weights, &profiles, &perf, &thresholds).unwrap();
        assert_eq!(report.degree, SeparabilityDegree::HyperStrict);
        assert_eq!(report.lambda_min, 0.0);
        assert_eq!(report.sigma.len(), 2);
        assert_eq!(report.sigma["b0:b1"], 0.0);
        assert_eq!(report.sigma["b1:b2"], 0.0);
    }

    #[test]
    fn identical_profiles_are_weak() {
        let criteria = names(&["g1", "g2"]);
        let (weights, thresholds) = setup(&criteria);
        let profiles = names(&["b0", "b1", "b2"]);
        // b1 and b2 coincide: b1 outranks b2 with credibility 1.
        let perf = ladder(&[("b0", 0.0), ("b1", 10.0), ("b2", 10.0)], &criteria);

        let report = check(&criteria, &weights, &profiles, &perf, &thresholds).unwrap();
        assert_eq!(report.degree, SeparabilityDegree::Weak);
        assert_eq!(report.sigma["b1:b2"], 1.0);
        assert_eq!(report.lambda_min, 1.0);
    }

    #[test]
    fn close_but_distinct_profiles_are_strict() {
        let criteria = names(&["g1"]);
        let (weights, thresholds) = setup(&criteria);
        let profiles = names(&["b0", "b1"]);
        // Gap of 1.5 with q = 1, p = 2: concordance of b0 over b1 is
        // (-1.5 + 2) / 1 = 0.5, no discordance kicks in below p + v gap.
        let perf = ladder(&[("b0", 8.5), ("b1", 10.0)], &criteria);

        let report = check(&criteria, &weights, &profiles, &perf, &thresholds).unwrap();
        assert_eq!(report.degree, SeparabilityDegree::Strict);
        assert!((report.sigma["b0:b1"] - 0.5).abs() < 1e-12);
        assert_eq!(report.lambda_min, 0.5);
    }

    #[test]
    fn single_profile_is_a_configuration_error() {
        let criteria = names(&["g1"]);
        let (weights, thresholds) = setup(&criteria);
        let profiles = names(&["b0"]);
        let perf = ladder(&[("b0", 0.0)], &criteria);

        let err = check(&criteria, &weights, &profiles, &perf, &thresholds).unwrap_err();
        assert!(matches!(err, ElectreError::Configuration { .. }));
    }

    #[test]
    fn minimum_lambda_rounds_up_to_three_decimals() {
        assert_eq!(minimum_lambda(0.0), 0.0);
        assert_eq!(minimum_lambda(0.2501), 0.251);
        assert_eq!(minimum_lambda(0.25), 0.25);
        assert_eq!(minimum_lambda(0.250_000_1), 0.251);
        assert_eq!(minimum_lambda(1.0), 1.0);
    }
}
