//! CSV input loading.
//!
//! Four files, each with a header row of names followed by numeric rows:
//!
//! - weights: row 0 = criterion names, row 1 = one weight per criterion.
//! - action performances: row 0 = action names; row k is the k-th action's
//!   performance on every criterion, in criterion order.
//! - boundary performances: same shape, profiles ordered worst to best.
//! - thresholds: row 0 = column labels (ignored); row k is the `(q, p, v)`
//!   triple of the k-th criterion.
//!
//! The loader only produces the data model; all semantic validation
//! (weight sums, threshold ordering, separability) happens in the pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{PerformanceTable, ThresholdTriple};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },
    #[error("{}: row {row} has {got} cells, expected {expected}", path.display())]
    RowLength {
        path: PathBuf,
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("{}: expected {expected} data rows, found {got}", path.display())]
    RowCount {
        path: PathBuf,
        expected: usize,
        got: usize,
    },
    #[error("{}: non-numeric cell {value:?} at row {row}, column {column}", path.display())]
    NumericCell {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },
}

/// Everything the four CSV files deliver, ready to become a
/// [`SortRequest`](crate::pipeline::SortRequest).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedInputs {
    pub criteria: Vec<String>,
    pub weights: HashMap<String, f64>,
    pub actions: Vec<String>,
    pub action_performance: PerformanceTable,
    pub profiles: Vec<String>,
    pub profile_performance: PerformanceTable,
    pub thresholds: HashMap<String, ThresholdTriple>,
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

fn numeric_row(
    path: &Path,
    row_index: usize,
    cells: &[String],
    expected: usize,
) -> Result<Vec<f64>, LoadError> {
    if cells.len() != expected {
        return Err(LoadError::RowLength {
            path: path.to_path_buf(),
            row: row_index,
            expected,
            got: cells.len(),
        });
    }
    cells
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            cell.parse::<f64>().map_err(|_| LoadError::NumericCell {
                path: path.to_path_buf(),
                row: row_index,
                column,
                value: cell.clone(),
            })
        })
        .collect()
}

/// Load the criterion names and their weights.
pub fn load_weights(path: &Path) -> Result<(Vec<String>, HashMap<String, f64>), LoadError> {
    let rows = read_rows(path)?;
    let criteria = rows[0].clone();
    if rows.len() != 2 {
        return Err(LoadError::RowCount {
            path: path.to_path_buf(),
            expected: 1,
            got: rows.len() - 1,
        });
    }
    let values = numeric_row(path, 1, &rows[1], criteria.len())?;
    let weights = criteria.iter().cloned().zip(values).collect();
    Ok((criteria, weights))
}

/// Load a performance table: header of entity names, one numeric row per
/// entity in criterion order. Used for both actions and boundary profiles.
pub fn load_performances(
    path: &Path,
    criteria: &[String],
) -> Result<(Vec<String>, PerformanceTable), LoadError> {
    let rows = read_rows(path)?;
    let entities = rows[0].clone();
    if rows.len() - 1 != entities.len() {
        return Err(LoadError::RowCount {
            path: path.to_path_buf(),
            expected: entities.len(),
            got: rows.len() - 1,
        });
    }

    let mut table = PerformanceTable::with_capacity(entities.len());
    for (k, entity) in entities.iter().enumerate() {
        let values = numeric_row(path, k + 1, &rows[k + 1], criteria.len())?;
        let row = criteria.iter().cloned().zip(values).collect();
        table.insert(entity.clone(), row);
    }
    Ok((entities, table))
}

/// Load the threshold triples, one `(q, p, v)` row per criterion after the
/// header row.
pub fn load_thresholds(
    path: &Path,
    criteria: &[String],
) -> Result<HashMap<String, ThresholdTriple>, LoadError> {
    let rows = read_rows(path)?;
    if rows.len() - 1 != criteria.len() {
        return Err(LoadError::RowCount {
            path: path.to_path_buf(),
            expected: criteria.len(),
            got: rows.len() - 1,
        });
    }

    let mut thresholds = HashMap::with_capacity(criteria.len());
    for (k, criterion) in criteria.iter().enumerate() {
        let values = numeric_row(path, k + 1, &rows[k + 1], 3)?;
        thresholds.insert(
            criterion.clone(),
            ThresholdTriple::new(values[0], values[1], values[2]),
        );
    }
    Ok(thresholds)
}

/// Load all four input files.
pub fn load_inputs(
    weights_path: &Path,
    actions_path: &Path,
    profiles_path: &Path,
    thresholds_path: &Path,
) -> Result<LoadedInputs, LoadError> {
    let (criteria, weights) = load_weights(weights_path)?;
    let (actions, action_performance) = load_performances(actions_path, &criteria)?;
    let (profiles, profile_performance) = load_performances(profiles_path, &criteria)?;
    let thresholds = load_thresholds(thresholds_path, &criteria)?;
    Ok(LoadedInputs {
        criteria,
        weights,
        actions,
        action_performance,
        profiles,
        profile_performance,
        thresholds,
    })
}
