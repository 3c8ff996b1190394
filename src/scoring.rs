//! Pairwise scoring against one boundary profile.
//!
//! Three stages, each a pure function over the previous one:
//!
//! 1. [`pairwise_scores`] builds the per-criterion concordance and
//!    discordance matrices (actions x criteria), in both directions.
//! 2. [`global_concordance`] reduces a concordance matrix to one weighted
//!    mean per action.
//! 3. [`credibility`] attenuates global concordance by every criterion
//!    whose discordance exceeds it (the veto rule).
//!
//! All values live in `[0, 1]` by construction: the fuzzy scores are
//! clamped, the weighted mean of clamped scores stays clamped, and the
//! attenuation factors are in `[0, 1]`.

use std::collections::HashMap;

use nalgebra::DMatrix;

use crate::model::{performance, Directed, ElectreError, PerformanceTable, ThresholdTriple};

/// A real-valued matrix indexed by (action, criterion), together with the
/// row and column labels it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    pub actions: Vec<String>,
    pub criteria: Vec<String>,
    pub values: DMatrix<f64>,
}

impl ScoreMatrix {
    /// Export the matrix as plain nested vectors, row-major.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.values.nrows())
            .map(|r| (0..self.values.ncols()).map(|c| self.values[(r, c)]).collect())
            .collect()
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Build the concordance and discordance matrices for one boundary profile.
///
/// For action performance `g_a`, profile performance `g_b` and thresholds
/// `(q, p, v)` on a criterion:
///
/// - concordance, action over profile: `clamp01((g_a - g_b + p) / (p - q))`
/// - concordance, profile over action: `clamp01((g_b - g_a + p) / (p - q))`
/// - discordance, against the action:  `clamp01((g_b - g_a - p) / (v - p))`
/// - discordance, against the profile: `clamp01((g_a - g_b - p) / (v - p))`
///
/// The denominators are non-zero because the threshold triples are
/// validated to be strictly increasing at pipeline entry.
///
/// Returns `(concordance, discordance)`.
#[allow(clippy::type_complexity)]
pub fn pairwise_scores(
    criteria: &[String],
    actions: &[String],
    action_perf: &PerformanceTable,
    profile: &str,
    profile_perf: &PerformanceTable,
    thresholds: &HashMap<String, ThresholdTriple>,
) -> Result<(Directed<ScoreMatrix>, Directed<ScoreMatrix>), ElectreError> {
    let rows = actions.len();
    let cols = criteria.len();
    let mut conc_fwd = DMatrix::<f64>::zeros(rows, cols);
    let mut conc_rev = DMatrix::<f64>::zeros(rows, cols);
    let mut disc_fwd = DMatrix::<f64>::zeros(rows, cols);
    let mut disc_rev = DMatrix::<f64>::zeros(rows, cols);

    for (i, action) in actions.iter().enumerate() {
        for (j, criterion) in criteria.iter().enumerate() {
            let t = thresholds
                .get(criterion)
                .ok_or_else(|| ElectreError::MissingThresholds {
                    name: criterion.clone(),
                })?;
            let g_a = performance(action_perf, action, criterion)?;
            let g_b = performance(profile_perf, profile, criterion)?;
            let q = t.indifference;
            let p = t.preference;
            let v = t.veto;

            conc_fwd[(i, j)] = clamp01((g_a - g_b + p) / (p - q));
            conc_rev[(i, j)] = clamp01((g_b - g_a + p) / (p - q));
            disc_fwd[(i, j)] = clamp01((g_b - g_a - p) / (v - p));
            disc_rev[(i, j)] = clamp01((g_a - g_b - p) / (v - p));
        }
    }

    let matrix = |values: DMatrix<f64>| ScoreMatrix {
        actions: actions.to_vec(),
        criteria: criteria.to_vec(),
        values,
    };
    Ok((
        Directed::new(matrix(conc_fwd), matrix(conc_rev)),
        Directed::new(matrix(disc_fwd), matrix(disc_rev)),
    ))
}

fn weighted_mean_rows(
    matrix: &ScoreMatrix,
    weights: &HashMap<String, f64>,
) -> Result<Vec<f64>, ElectreError> {
    let mut total = 0.0;
    let mut column_weights = Vec::with_capacity(matrix.criteria.len());
    for criterion in &matrix.criteria {
        let w = *weights
            .get(criterion)
            .ok_or_else(|| ElectreError::MissingWeight {
                name: criterion.clone(),
            })?;
        total += w;
        column_weights.push(w);
    }
    if total <= 0.0 {
        return Err(ElectreError::configuration(
            "total criterion weight must be positive",
        ));
    }

    let mut out = Vec::with_capacity(matrix.values.nrows());
    for i in 0..matrix.values.nrows() {
        let mut acc = 0.0;
        for (j, w) in column_weights.iter().enumerate() {
            acc += w * matrix.values[(i, j)];
        }
        out.push(acc / total);
    }
    Ok(out)
}

/// Reduce a concordance matrix pair to one global concordance per action.
///
/// The reduction is a weighted mean, `sum_c w_c * m[a][c] / sum_c w_c`, so
/// percent-style weights produce the same result as unit weights.
/// Zero-weight criteria contribute nothing.
pub fn global_concordance(
    concordance: &Directed<ScoreMatrix>,
    weights: &HashMap<String, f64>,
) -> Result<Directed<Vec<f64>>, ElectreError> {
    Ok(Directed::new(
        weighted_mean_rows(&concordance.action_over_profile, weights)?,
        weighted_mean_rows(&concordance.profile_over_action, weights)?,
    ))
}

fn attenuate(global: &[f64], discordance: &ScoreMatrix) -> Vec<f64> {
    let mut out = Vec::with_capacity(global.len());
    for (i, &c) in global.iter().enumerate() {
        let mut cr = c;
        for j in 0..discordance.values.ncols() {
            let d = discordance.values[(i, j)];
            if d > c {
                // d and c both lie in [0, 1], so d > c implies c < 1 and
                // the denominator is non-zero.
                debug_assert!(c < 1.0);
                cr *= (1.0 - d) / (1.0 - c);
            }
        }
        out.push(cr);
    }
    out
}

/// Combine global concordance with the discordance matrices into one
/// credibility degree per action, per direction.
///
/// `cr_i = C_i * prod_c f_c` where `f_c = 1` when the criterion's
/// discordance does not exceed `C_i`, and `(1 - d_c) / (1 - C_i)`
/// otherwise. A single full-veto criterion (`d_c = 1`) drives the
/// credibility to zero.
pub fn credibility(
    global: &Directed<Vec<f64>>,
    discordance: &Directed<ScoreMatrix>,
) -> Directed<Vec<f64>> {
    Directed::new(
        attenuate(
            &global.action_over_profile,
            &discordance.action_over_profile,
        ),
        attenuate(
            &global.profile_over_action,
            &discordance.profile_over_action,
        ),
    )
}
