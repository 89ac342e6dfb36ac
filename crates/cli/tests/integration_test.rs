//! Runs the `marquee` binary against artifacts written to a temp dir.

use std::path::Path;
use std::process::{Command, Output};

const MOVIES_JSON: &str = r#"[
  {"Title": "Lagaan", "Year": 2001, "Rating": 8.1, "Actors": "Aamir Khan",
   "Overview": "A cricket match against the Raj.", "Poster_URL": null,
   "Reviews": "Brilliant and inspiring.\n\nToo long and boring in places."},
  {"Title": "Swades", "Year": 2004, "Rating": 8.2, "Actors": null,
   "Overview": "A scientist returns home.", "Poster_URL": "https://img/swades.jpg",
   "Reviews": "No reviews available"}
]"#;

const SIMILARITY_CSV: &str = "1.0,0.7\n0.7,1.0\n";

fn marquee(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_marquee"))
        .arg("--movies")
        .arg(dir.join("movies.json"))
        .arg("--similarity")
        .arg(dir.join("similarity.csv"))
        .args(args)
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn write_artifacts() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("movies.json"), MOVIES_JSON).unwrap();
    std::fs::write(dir.path().join("similarity.csv"), SIMILARITY_CSV).unwrap();
    dir
}

#[test]
fn test_show_json_stdout_is_only_json() {
    let dir = write_artifacts();
    let output = marquee(dir.path(), &["show", "--title", "Lagaan", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["movie"]["Title"], "Lagaan");
    assert_eq!(page["sentiment"]["status"], "analyzed");
    assert_eq!(page["recommendations"].as_array().unwrap().len(), 1);

    // Progress lines still reach the user, just not on stdout
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loaded 2 movies"));
}

#[test]
fn test_show_json_without_reviews() {
    let dir = write_artifacts();
    let output = marquee(dir.path(), &["show", "--title", "Swades", "--json"]);
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["sentiment"]["status"], "no_reviews");
    assert_eq!(page["movie"]["Actors"], "");
}

#[test]
fn test_show_unknown_title_fails() {
    let dir = write_artifacts();
    let output = marquee(dir.path(), &["show", "--title", "Dangal", "--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
