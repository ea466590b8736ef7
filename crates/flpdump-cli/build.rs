use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FLPDUMP_COMMIT");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    // Packagers building from a tarball pass the commit explicitly.
    let commit = env_value("FLPDUMP_COMMIT")
        .or_else(|| env_value("GITHUB_SHA"))
        .or_else(|| run_git(&["rev-parse", "HEAD"]))
        .map(|full| short_commit(&full))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let build_date = run_git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| UNKNOWN.to_string());

    println!("cargo:rustc-env=FLPDUMP_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=FLPDUMP_BUILD_DATE={build_date}");
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

fn short_commit(full: &str) -> String {
    full.trim().chars().take(7).collect()
}
