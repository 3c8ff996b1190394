#![forbid(unsafe_code)]

//! # electre-tri
//!
//! ELECTRE Tri-B multi-criteria sorting: assign each candidate action to an
//! ordered category by comparing it against boundary reference profiles
//! under per-criterion indifference, preference and veto thresholds.
//!
//! The core is a pure function chain: pairwise concordance/discordance
//! scoring, weighted global concordance, veto-attenuated credibility, a
//! four-valued outranking relation, a separability check on the boundary
//! ladder, and two independent sorting procedures (pessimistic and
//! optimistic) whose category indices are averaged into a median rank.
//!
//! [`pipeline::run`] drives everything from a [`pipeline::SortRequest`];
//! [`loader`] reads the conventional four-CSV input layout.

pub mod loader;
pub mod model;
pub mod outranking;
pub mod pipeline;
pub mod scoring;
pub mod separability;
pub mod sorting;

pub use loader::{load_inputs, LoadError, LoadedInputs};
pub use model::{Directed, ElectreError, PerformanceTable, ThresholdTriple};
pub use outranking::Relation;
pub use pipeline::{run, SortOutcome, SortReport, SortRequest};
pub use separability::{SeparabilityDegree, SeparabilityReport};
pub use sorting::Assignment;
