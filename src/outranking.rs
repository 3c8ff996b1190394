//! Four-valued outranking relation between actions and one boundary profile.

use serde::{Deserialize, Serialize};

use crate::model::Directed;

/// Qualitative verdict of an action against a boundary profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// The action outranks the profile (`>`).
    Preferred,
    /// The profile outranks the action (`<`).
    PreferredBy,
    /// Both outranking claims are credible (`I`).
    Indifferent,
    /// Neither claim is credible (`R`).
    Incomparable,
}

impl Relation {
    /// Conventional one-character notation for the relation.
    pub fn symbol(&self) -> char {
        match self {
            Relation::Preferred => '>',
            Relation::PreferredBy => '<',
            Relation::Indifferent => 'I',
            Relation::Incomparable => 'R',
        }
    }
}

/// Threshold the credibility pair of every action at the cutting level
/// `lambda`.
///
/// Indifferent when both directions reach `lambda`, incomparable when
/// neither does, otherwise preferred in whichever direction clears it.
pub fn classify(credibility: &Directed<Vec<f64>>, lambda: f64) -> Vec<Relation> {
    credibility
        .action_over_profile
        .iter()
        .zip(credibility.profile_over_action.iter())
        .map(|(&fwd, &rev)| match (fwd >= lambda, rev >= lambda) {
            (true, true) => Relation::Indifferent,
            (true, false) => Relation::Preferred,
            (false, true) => Relation::PreferredBy,
            (false, false) => Relation::Incomparable,
        })
        .collect()
}
