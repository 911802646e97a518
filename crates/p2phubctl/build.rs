//! Build script for p2phubctl.
//!
//! Stamps the `--version` string with the commit and build date so a
//! catalog report can be traced back to the binary that produced it.
//!
//! Sets:
//! - P2PHUB_GIT_SHA: Short git commit hash
//! - P2PHUB_BUILD_DATE: UTC date of the build

use std::process::Command;

fn main() {
    let git_sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();

    println!("cargo:rustc-env=P2PHUB_GIT_SHA={}", git_sha);
    println!("cargo:rustc-env=P2PHUB_BUILD_DATE={}", build_date);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
