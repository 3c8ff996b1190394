//! Top-level orchestration of one sorting run.
//!
//! [`run`] is a pure function chain over the shared data model: validate
//! everything up front, then for each boundary profile compute the
//! concordance/discordance matrices, the global concordance and credibility
//! vectors and the outranking relations, and finally sort the actions with
//! both procedures and synthesize median ranks. On any fatal configuration
//! error nothing is produced — there are no partial results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    validate_thresholds, validate_weights, Directed, ElectreError, PerformanceTable,
    ThresholdTriple,
};
use crate::outranking::{classify, Relation};
use crate::scoring::{credibility, global_concordance, pairwise_scores, ScoreMatrix};
use crate::separability::{self, SeparabilityReport};
use crate::sorting::{median_rank, optimistic, pessimistic, Assignment};

/// Complete input of one sorting run, the shape any loader must deliver.
///
/// `profiles` is ordered worst to best and defines the category ladder:
/// `categories` must have exactly `profiles.len() - 1` names, worst first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRequest {
    pub criteria: Vec<String>,
    pub weights: HashMap<String, f64>,
    pub actions: Vec<String>,
    pub action_performance: PerformanceTable,
    pub profiles: Vec<String>,
    pub profile_performance: PerformanceTable,
    pub thresholds: HashMap<String, ThresholdTriple>,
    pub categories: Vec<String>,
    /// Cutting threshold in (0, 1].
    pub lambda: f64,
}

/// Everything one run produces. Intermediate maps are keyed by boundary
/// profile name.
#[derive(Debug, Clone, PartialEq)]
pub struct SortOutcome {
    pub concordance: HashMap<String, Directed<ScoreMatrix>>,
    pub discordance: HashMap<String, Directed<ScoreMatrix>>,
    pub global_concordance: HashMap<String, Directed<Vec<f64>>>,
    pub credibility: HashMap<String, Directed<Vec<f64>>>,
    pub relations: HashMap<String, Vec<Relation>>,
    pub pessimistic: Assignment,
    pub optimistic: Assignment,
    pub median_rank: HashMap<String, f64>,
    pub separability: SeparabilityReport,
}

/// Run the full sorting pipeline.
///
/// Fatal configuration errors (unnormalized weights, non-increasing
/// thresholds, weak separability, `lambda` below the minimum admissible
/// threshold) abort before any main scoring happens.
pub fn run(request: &SortRequest) -> Result<SortOutcome, ElectreError> {
    validate_weights(&request.criteria, &request.weights)?;
    validate_thresholds(&request.criteria, &request.thresholds)?;

    if !(request.lambda > 0.0 && request.lambda <= 1.0) {
        return Err(ElectreError::configuration(format!(
            "cutting threshold must lie in (0, 1], got {}",
            request.lambda
        )));
    }
    let expected_categories = request.profiles.len().saturating_sub(1);
    if request.categories.len() != expected_categories {
        return Err(ElectreError::CategoryCountMismatch {
            expected: expected_categories,
            got: request.categories.len(),
        });
    }

    let separability = separability::check(
        &request.criteria,
        &request.weights,
        &request.profiles,
        &request.profile_performance,
        &request.thresholds,
    )?;
    if separability.degree == separability::SeparabilityDegree::Weak {
        return Err(ElectreError::configuration(format!(
            "separability is Weak (minimum threshold would be {}); redefine the boundary profiles or thresholds",
            separability.lambda_min
        )));
    }
    if request.lambda < separability.lambda_min {
        return Err(ElectreError::configuration(format!(
            "cutting threshold {} is below the minimum admissible threshold {}",
            request.lambda, separability.lambda_min
        )));
    }

    tracing::debug!(
        actions = request.actions.len(),
        criteria = request.criteria.len(),
        profiles = request.profiles.len(),
        lambda = request.lambda,
        degree = %separability.degree,
        "separability accepted, scoring all boundary profiles"
    );

    let mut concordance = HashMap::with_capacity(request.profiles.len());
    let mut discordance = HashMap::with_capacity(request.profiles.len());
    let mut globals = HashMap::with_capacity(request.profiles.len());
    let mut credibilities = HashMap::with_capacity(request.profiles.len());
    let mut relations = HashMap::with_capacity(request.profiles.len());

    // Each profile's matrices are independent of every other profile's;
    // the maps are keyed by profile name so the outcome does not depend
    // on computation order.
    for profile in &request.profiles {
        let (conc, disc) = pairwise_scores(
            &request.criteria,
            &request.actions,
            &request.action_performance,
            profile,
            &request.profile_performance,
            &request.thresholds,
        )?;
        let global = global_concordance(&conc, &request.weights)?;
        let cred = credibility(&global, &disc);
        relations.insert(profile.clone(), classify(&cred, request.lambda));
        concordance.insert(profile.clone(), conc);
        discordance.insert(profile.clone(), disc);
        globals.insert(profile.clone(), global);
        credibilities.insert(profile.clone(), cred);
    }

    let pess = pessimistic(
        &relations,
        &request.categories,
        &request.actions,
        &request.profiles,
    )?;
    let opti = optimistic(
        &relations,
        &request.categories,
        &request.actions,
        &request.profiles,
    )?;
    let ranks = median_rank(&pess, &opti, &request.actions)?;

    Ok(SortOutcome {
        concordance,
        discordance,
        global_concordance: globals,
        credibility: credibilities,
        relations,
        pessimistic: pess,
        optimistic: opti,
        median_rank: ranks,
        separability,
    })
}

/// JSON-friendly mirror of [`SortOutcome`], matrices flattened row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortReport {
    pub concordance: HashMap<String, Directed<Vec<Vec<f64>>>>,
    pub discordance: HashMap<String, Directed<Vec<Vec<f64>>>>,
    pub global_concordance: HashMap<String, Directed<Vec<f64>>>,
    pub credibility: HashMap<String, Directed<Vec<f64>>>,
    pub relations: HashMap<String, Vec<Relation>>,
    pub pessimistic: Assignment,
    pub optimistic: Assignment,
    pub median_rank: HashMap<String, f64>,
    pub separability: SeparabilityReport,
}

impl SortOutcome {
    /// Flatten the matrix-carrying fields for serialization.
    pub fn report(&self) -> SortReport {
        let flatten = |map: &HashMap<String, Directed<ScoreMatrix>>| {
            map.iter()
                .map(|(profile, pair)| {
                    (
                        profile.clone(),
                        Directed::new(
                            pair.action_over_profile.rows(),
                            pair.profile_over_action.rows(),
                        ),
                    )
                })
                .collect()
        };
        SortReport {
            concordance: flatten(&self.concordance),
            discordance: flatten(&self.discordance),
            global_concordance: self.global_concordance.clone(),
            credibility: self.credibility.clone(),
            relations: self.relations.clone(),
            pessimistic: self.pessimistic.clone(),
            optimistic: self.optimistic.clone(),
            median_rank: self.median_rank.clone(),
            separability: self.separability.clone(),
        }
    }
}
