#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use electre_tri::loader;
use electre_tri::pipeline::{self, SortRequest};
use electre_tri::separability;
use electre_tri::SortOutcome;

/// Sort actions into ordered categories with ELECTRE Tri-B.
#[derive(Parser)]
#[command(name = "electre", version, about = "ELECTRE Tri-B sorting CLI")]
struct Cli {
    /// CSV with criterion names (row 1) and weights (row 2)
    #[arg(long)]
    weights: PathBuf,
    /// CSV with action names (row 1) and one performance row per action
    #[arg(long)]
    actions: PathBuf,
    /// CSV with boundary-profile names (row 1, worst to best) and one
    /// performance row per profile
    #[arg(long)]
    profiles: PathBuf,
    /// CSV with one (q,p,v) threshold row per criterion after the header
    #[arg(long)]
    thresholds: PathBuf,
    /// Category names, worst to best, comma separated; must be one fewer
    /// than the boundary profiles
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,
    /// Cutting threshold in (0, 1]
    #[arg(long, default_value_t = 0.75)]
    lambda: f64,
    /// Only run the separability test and report the minimum threshold
    #[arg(long)]
    check_only: bool,
    /// Write the full result bundle as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn print_outcome(
    outcome: &SortOutcome,
    actions: &[String],
    profiles: &[String],
    categories: &[String],
) {
    println!();
    println!("Outranking relations (one column per action, worst profile first):");
    for profile in profiles {
        let row: String = outcome.relations[profile]
            .iter()
            .map(|relation| relation.symbol())
            .collect();
        println!("  {profile}: {row}");
    }
    println!();
    println!("Pessimistic sorting:");
    for category in categories {
        println!("  {category}: {:?}", outcome.pessimistic.members[category]);
    }
    println!();
    println!("Optimistic sorting:");
    for category in categories {
        println!("  {category}: {:?}", outcome.optimistic.members[category]);
    }
    println!();
    for action in actions {
        println!(
            "Action {action}: optimistic category {}, pessimistic category {}, median rank {}",
            outcome.optimistic.index[action],
            outcome.pessimistic.index[action],
            outcome.median_rank[action],
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let inputs = loader::load_inputs(&cli.weights, &cli.actions, &cli.profiles, &cli.thresholds)?;

    let report = separability::check(
        &inputs.criteria,
        &inputs.weights,
        &inputs.profiles,
        &inputs.profile_performance,
        &inputs.thresholds,
    )?;
    println!("Degree of separability: {}", report.degree);
    println!("Minimum required cutting threshold: {}", report.lambda_min);
    if cli.check_only {
        return Ok(());
    }
    println!("Chosen cutting threshold: {}", cli.lambda);

    let request = SortRequest {
        criteria: inputs.criteria,
        weights: inputs.weights,
        actions: inputs.actions,
        action_performance: inputs.action_performance,
        profiles: inputs.profiles,
        profile_performance: inputs.profile_performance,
        thresholds: inputs.thresholds,
        categories: cli.categories.clone(),
        lambda: cli.lambda,
    };
    let outcome = pipeline::run(&request)?;

    print_outcome(
        &outcome,
        &request.actions,
        &request.profiles,
        &request.categories,
    );

    if let Some(path) = cli.json {
        let mut file = File::create(&path)?;
        serde_json::to_writer_pretty(&mut file, &outcome.report())?;
        file.write_all(b"\n")?;
        println!();
        println!("Wrote result bundle to {}", path.display());
    }

    Ok(())
}
