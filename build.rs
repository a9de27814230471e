//! Build script to inject version and git SHA at compile time.
//!
//! Environment variables (set by CI or fall back to defaults):
//! - MPD_REMOTE_VERSION: Version string (defaults to CARGO_PKG_VERSION)
//! - MPD_REMOTE_GIT_SHA: Git commit SHA (defaults to git rev-parse, or "unknown")

use std::process::Command;

fn main() {
    let version = std::env::var("MPD_REMOTE_VERSION").unwrap_or_else(|_| {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".into())
    });
    println!("cargo:rustc-env=MPD_REMOTE_VERSION={}", version);

    let git_sha = std::env::var("MPD_REMOTE_GIT_SHA").unwrap_or_else(|_| git_sha());
    println!("cargo:rustc-env=MPD_REMOTE_GIT_SHA={}", git_sha);

    println!("cargo:rerun-if-env-changed=MPD_REMOTE_VERSION");
    println!("cargo:rerun-if-env-changed=MPD_REMOTE_GIT_SHA");
}

fn git_sha() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".into())
}
