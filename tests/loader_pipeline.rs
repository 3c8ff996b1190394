use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use electre_tri::pipeline::{run, SortRequest};
use electre_tri::{loader, SeparabilityDegree};

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn csv_inputs_drive_a_full_sorting_run() {
    let dir = TempDir::new().unwrap();
    let weights = write_csv(&dir, "weights.csv", "g1,g2,g3\n0.4,0.35,0.25\n");
    let actions = write_csv(
        &dir,
        "actions.csv",
        "a1,a2,a3\n2.0,1.0,3.0\n12.0,13.0,11.0\n19.0,18.0,21.0\n",
    );
    let profiles = write_csv(
        &dir,
        "profiles.csv",
        "b0,b1,b2\n0.0,0.0,0.0\n10.0,10.0,10.0\n20.0,20.0,20.0\n",
    );
    let thresholds = write_csv(&dir, "thresholds.csv", "q,p,v\n1,2,3\n1,2,3\n1,2,3\n");

    let inputs = loader::load_inputs(&weights, &actions, &profiles, &thresholds).unwrap();
    assert_eq!(inputs.actions, vec!["a1", "a2", "a3"]);
    assert_eq!(inputs.profiles, vec!["b0", "b1", "b2"]);

    let request = SortRequest {
        criteria: inputs.criteria,
        weights: inputs.weights,
        actions: inputs.actions,
        action_performance: inputs.action_performance,
        profiles: inputs.profiles,
        profile_performance: inputs.profile_performance,
        thresholds: inputs.thresholds,
        categories: vec!["moderate".to_string(), "good".to_string()],
        lambda: 0.75,
    };
    let outcome = run(&request).unwrap();

    assert_eq!(outcome.separability.degree, SeparabilityDegree::HyperStrict);
    assert_eq!(outcome.pessimistic.index["a1"], 1);
    assert_eq!(outcome.pessimistic.index["a2"], 2);
    assert_eq!(outcome.pessimistic.index["a3"], 2);
    assert_eq!(outcome.median_rank["a1"], 1.0);
    assert_eq!(outcome.median_rank["a2"], 2.0);
    assert_eq!(outcome.median_rank["a3"], 2.0);

    // The JSON-facing report round-trips.
    let json = serde_json::to_string(&outcome.report()).unwrap();
    let parsed: electre_tri::SortReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.median_rank["a2"], 2.0);
}
