use clap::Parser;
use rps_qlearning::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "rps-train",
        "--rounds",
        "30",
        "--opponent",
        "random",
        "--summary",
        summary_stem.to_str().unwrap(),
        "--eval-rounds",
        "0",
        "--seed",
        "1",
        "--no-progress",
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_rounds"], 30);
    assert_eq!(parsed["schedule"][0]["opponent"], "random");
    assert!(parsed["evaluation"].is_null());
    assert_eq!(parsed["learner"]["seed"], 1);
    assert_eq!(parsed["policy"].as_array().unwrap().len(), 9);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "rps-train",
        "--curriculum",
        "cycle:20,markov:10",
        "--summary",
        &summary_arg,
        "--eval-rounds",
        "15",
        "--no-progress",
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_rounds"], 30);
    assert_eq!(parsed["schedule"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["evaluation"]["opponent"], "markov");
    assert_eq!(parsed["evaluation"]["result"]["total_rounds"], 15);
}

#[test]
fn observation_files_are_written() {
    let tmp = tempdir().unwrap();
    let jsonl = tmp.path().join("rounds.jsonl");
    let history = tmp.path().join("history.csv");

    let args = parse_args([
        "rps-train",
        "-o",
        "paper",
        "-n",
        "12",
        "--eval-rounds",
        "0",
        "--observations",
        jsonl.to_str().unwrap(),
        "--history-csv",
        history.to_str().unwrap(),
        "--no-progress",
    ]);

    execute(args).unwrap();

    let rounds = std::fs::read_to_string(&jsonl).unwrap();
    assert_eq!(rounds.lines().count(), 12);
    let rows = std::fs::read_to_string(&history).unwrap();
    assert_eq!(rows.lines().count(), 13);
}

#[test]
fn learner_flags_reach_the_summary() {
    let tmp = tempdir().unwrap();
    let summary = tmp.path().join("flags.json");

    let args = parse_args([
        "rps-train",
        "-n",
        "5",
        "--eval-rounds",
        "0",
        "--actions",
        "R,P",
        "--learning-rate",
        "0.5",
        "--discount",
        "0.9",
        "--summary",
        summary.to_str().unwrap(),
        "--no-progress",
    ]);

    execute(args).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["learner"]["learning_rate"], 0.5);
    assert_eq!(parsed["learner"]["discount_factor"], 0.9);
    assert_eq!(parsed["learner"]["actions"], serde_json::json!(["R", "P"]));
    assert_eq!(parsed["policy"].as_array().unwrap().len(), 4);
}

#[test]
fn invalid_inputs_are_rejected() {
    let unknown_opponent = parse_args(["rps-train", "-o", "lizard", "--no-progress"]);
    assert!(execute(unknown_opponent).is_err());

    let bad_rate = parse_args([
        "rps-train",
        "--learning-rate",
        "0",
        "--no-progress",
    ]);
    assert!(execute(bad_rate).is_err());

    let empty = parse_args(["rps-train", "-n", "0", "--no-progress"]);
    assert!(execute(empty).is_err());
}
