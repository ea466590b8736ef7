//! Refresh `expected_project.json` for the golden cases.
//!
//! Usage: `regenerate_golden [--check] [CASE...]`. Without case names every
//! directory under `tests/golden` holding an `input.flp` is processed. With
//! `--check` nothing is written and the exit code reports stale cases.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use flpdump_core::decode_project_file;

const GOLDEN_ROOT: &str = "tests/golden";
const INPUT_FILE: &str = "input.flp";
const EXPECTED_FILE: &str = "expected_project.json";

enum Outcome {
    Unchanged,
    Stale,
    Written,
}

fn main() -> ExitCode {
    let mut check = false;
    let mut cases = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--check" => check = true,
            _ => cases.push(arg),
        }
    }

    let root = PathBuf::from(GOLDEN_ROOT);
    let cases = if cases.is_empty() {
        match discover_cases(&root) {
            Ok(found) => found,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(1);
            }
        }
    } else {
        cases
    };

    let mut stale = 0usize;
    for case in &cases {
        match refresh_case(&root.join(case), check) {
            Ok(Outcome::Unchanged) => println!("{case}: unchanged"),
            Ok(Outcome::Written) => println!("{case}: updated"),
            Ok(Outcome::Stale) => {
                println!("{case}: stale");
                stale += 1;
            }
            Err(err) => {
                eprintln!("error: {case}: {err}");
                return ExitCode::from(1);
            }
        }
    }

    if stale > 0 {
        eprintln!("{stale} golden case(s) out of date; rerun without --check");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn discover_cases(root: &Path) -> Result<Vec<String>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("cannot list {}: {err}", root.display()))?;
    let mut cases = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("cannot list {}: {err}", root.display()))?
            .path();
        if path.join(INPUT_FILE).is_file() {
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                cases.push(name.to_string());
            }
        }
    }
    cases.sort();
    Ok(cases)
}

fn refresh_case(dir: &Path, check: bool) -> Result<Outcome, String> {
    let input = dir.join(INPUT_FILE);
    let file = decode_project_file(&input).map_err(|err| format!("decode failed: {err}"))?;
    let mut json =
        serde_json::to_string_pretty(&file).map_err(|err| format!("serialize failed: {err}"))?;
    json.push('\n');

    let expected = dir.join(EXPECTED_FILE);
    if fs::read_to_string(&expected).is_ok_and(|current| current == json) {
        return Ok(Outcome::Unchanged);
    }
    if check {
        return Ok(Outcome::Stale);
    }
    fs::write(&expected, json)
        .map_err(|err| format!("cannot write {}: {err}", expected.display()))?;
    Ok(Outcome::Written)
}
