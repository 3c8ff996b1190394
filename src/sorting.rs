//! Category assignment from the outranking relations, plus median-rank
//! synthesis.
//!
//! Both procedures scan the category ladder once per action and stop at
//! the first admissible category. The index alignment is deliberate and
//! easy to get wrong: category `j + 1` sits between boundary profiles
//! `B[j]` (its floor) and `B[j + 1]` (its ceiling).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ElectreError;
use crate::outranking::Relation;

/// One sorting procedure's output: members per category (in action input
/// order) and the 1-based category index per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub members: HashMap<String, Vec<String>>,
    pub index: HashMap<String, usize>,
}

fn relation_at<'a>(
    relations: &'a HashMap<String, Vec<Relation>>,
    profile: &str,
    action_count: usize,
) -> Result<&'a [Relation], ElectreError> {
    let row = relations
        .get(profile)
        .ok_or_else(|| ElectreError::MissingRelations {
            profile: profile.to_string(),
        })?;
    if row.len() != action_count {
        return Err(ElectreError::RelationLengthMismatch {
            profile: profile.to_string(),
            expected: action_count,
            got: row.len(),
        });
    }
    Ok(row)
}

fn scan(
    relations: &HashMap<String, Vec<Relation>>,
    categories: &[String],
    actions: &[String],
    profiles: &[String],
    admits: impl Fn(Relation, Relation) -> bool,
    order: &[usize],
) -> Result<Assignment, ElectreError> {
    let mut members: HashMap<String, Vec<String>> = categories
        .iter()
        .map(|cat| (cat.clone(), Vec::new()))
        .collect();
    let mut index = HashMap::with_capacity(actions.len());

    for (i, action) in actions.iter().enumerate() {
        let mut assigned = false;
        for &j in order {
            let floor = relation_at(relations, &profiles[j], actions.len())?[i];
            let ceiling = relation_at(relations, &profiles[j + 1], actions.len())?[i];
            if admits(floor, ceiling) {
                members
                    .entry(categories[j].clone())
                    .or_default()
                    .push(action.clone());
                index.insert(action.clone(), j + 1);
                assigned = true;
                break;
            }
        }
        if !assigned {
            return Err(ElectreError::UnassignedAction {
                action: action.clone(),
            });
        }
    }

    Ok(Assignment { members, index })
}

/// Pessimistic procedure: scan from the best category downward and stop at
/// the first `j` where the action is preferred to the category floor
/// `B[j]` or indifferent with its ceiling `B[j + 1]`.
pub fn pessimistic(
    relations: &HashMap<String, Vec<Relation>>,
    categories: &[String],
    actions: &[String],
    profiles: &[String],
) -> Result<Assignment, ElectreError> {
    let order: Vec<usize> = (0..categories.len()).rev().collect();
    scan(
        relations,
        categories,
        actions,
        profiles,
        |floor, ceiling| floor == Relation::Preferred || ceiling == Relation::Indifferent,
        &order,
    )
}

/// Optimistic procedure: scan from the worst category upward and stop at
/// the first `j` where the ceiling `B[j + 1]` is preferred to the action
/// or the relation with the floor `B[j]` is incomparable.
pub fn optimistic(
    relations: &HashMap<String, Vec<Relation>>,
    categories: &[String],
    actions: &[String],
    profiles: &[String],
) -> Result<Assignment, ElectreError> {
    let order: Vec<usize> = (0..categories.len()).collect();
    scan(
        relations,
        categories,
        actions,
        profiles,
        |floor, ceiling| ceiling == Relation::PreferredBy || floor == Relation::Incomparable,
        &order,
    )
}

/// Arithmetic mean of the two category indices, per action. May be a
/// half-integer.
pub fn median_rank(
    pessimistic: &Assignment,
    optimistic: &Assignment,
    actions: &[String],
) -> Result<HashMap<String, f64>, ElectreError> {
    let mut out = HashMap::with_capacity(actions.len());
    for action in actions {
        let pess = pessimistic
            .index
            .get(action)
            .ok_or_else(|| ElectreError::UnassignedAction {
                action: action.clone(),
            })?;
        let opti = optimistic
            .index
            .get(action)
            .ok_or_else(|| ElectreError::UnassignedAction {
                action: action.clone(),
            })?;
        out.insert(action.clone(), (*pess + *opti) as f64 / 2.0);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Relation::{Incomparable, Indifferent, Preferred, PreferredBy};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Relations for one action across the ladder b0, b1, b2.
    fn relations_for(rows: &[(&str, Vec<Relation>)]) -> HashMap<String, Vec<Relation>> {
        rows.iter()
            .map(|(profile, row)| (profile.to_string(), row.clone()))
            .collect()
    }

    #[test]
    fn pessimistic_requires_strict_preference_over_the_floor() {
        // Two categories, ladder b0 < b1 < b2. The action outranks b0 and
        // b1: it clears the floor of the top category.
        let relations = relations_for(&[
            ("b0", vec![Preferred]),
            ("b1", vec![Preferred]),
            ("b2", vec![PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = pessimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.index["a1"], 2);
        assert_eq!(result.members["high"], vec!["a1".to_string()]);
        assert!(result.members["low"].is_empty());
    }

    #[test]
    fn pessimistic_drops_an_action_indifferent_with_an_interior_boundary() {
        // Indifference with b1 is not strict preference, so the action
        // falls to the category whose ceiling it is indifferent with.
        let relations = relations_for(&[
            ("b0", vec![Preferred]),
            ("b1", vec![Indifferent]),
            ("b2", vec![PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = pessimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.index["a1"], 1);
    }

    #[test]
    fn pessimistic_lifts_an_action_indifferent_with_the_top_boundary() {
        let relations = relations_for(&[
            ("b0", vec![Preferred]),
            ("b1", vec![Preferred]),
            ("b2", vec![Indifferent]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = pessimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.index["a1"], 2);
    }

    #[test]
    fn optimistic_stops_below_the_first_dominating_ceiling() {
        let relations = relations_for(&[
            ("b0", vec![Preferred]),
            ("b1", vec![PreferredBy]),
            ("b2", vec![PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = optimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.index["a1"], 1);
    }

    #[test]
    fn optimistic_stops_on_incomparability_with_the_floor() {
        let relations = relations_for(&[
            ("b0", vec![Preferred]),
            ("b1", vec![Incomparable]),
            ("b2", vec![PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = optimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.index["a1"], 2);
    }

    #[test]
    fn members_keep_action_input_order() {
        let relations = relations_for(&[
            ("b0", vec![Preferred, Preferred, Preferred]),
            ("b1", vec![Preferred, PreferredBy, Preferred]),
            ("b2", vec![PreferredBy, PreferredBy, PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1", "a2", "a3"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let result = pessimistic(&relations, &categories, &actions, &profiles).unwrap();
        assert_eq!(result.members["high"], names(&["a1", "a3"]));
        assert_eq!(result.members["low"], names(&["a2"]));
    }

    #[test]
    fn unassignable_action_is_a_typed_error() {
        // A ladder that admits nothing anywhere (not producible by the
        // pipeline, but the scan must not loop or panic on it).
        let relations = relations_for(&[
            ("b0", vec![PreferredBy]),
            ("b1", vec![PreferredBy]),
            ("b2", vec![PreferredBy]),
        ]);
        let categories = names(&["low", "high"]);
        let actions = names(&["a1"]);
        let profiles = names(&["b0", "b1", "b2"]);

        let err = pessimistic(&relations, &categories, &actions, &profiles).unwrap_err();
        assert_eq!(
            err,
            ElectreError::UnassignedAction {
                action: "a1".to_string()
            }
        );
    }

    #[test]
    fn median_rank_is_the_exact_mean_of_the_two_indices() {
        let actions = names(&["a1", "a2"]);
        let assignment = |pairs: &[(&str, usize)]| Assignment {
            members: HashMap::new(),
            index: pairs.iter().map(|(a, i)| (a.to_string(), *i)).collect(),
        };
        let pess = assignment(&[("a1", 1), ("a2", 3)]);
        let opti = assignment(&[("a1", 2), ("a2", 3)]);

        let ranks = median_rank(&pess, &opti, &actions).unwrap();
        assert_eq!(ranks["a1"], 1.5);
        assert_eq!(ranks["a2"], 3.0);
    }
}
