//! Build script to inject build-time information into the binary.
//!
//! This sets environment variables that can be read at compile time:
//! - `MODESYNC_BUILD_TIMESTAMP`: ISO 8601 build time, taken from
//!   `SOURCE_DATE_EPOCH` when set so that release builds are reproducible
//! - `MODESYNC_GIT_COMMIT`: Short git commit hash (or "unknown" if not in a git repo)

use chrono::{DateTime, Utc};
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let timestamp = build_time().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    println!("cargo:rustc-env=MODESYNC_BUILD_TIMESTAMP={}", timestamp);

    let commit = get_git_commit().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=MODESYNC_GIT_COMMIT={}", commit);
}

/// `SOURCE_DATE_EPOCH` if it holds a valid Unix timestamp, otherwise now.
fn build_time() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn get_git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}
