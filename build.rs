use std::env;
use std::process::Command;

const FALLBACK_VERSION: &str = "dev";

fn main() {
    for path in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }
    println!("cargo:rerun-if-env-changed=GIT_VERSION");

    let version = version_from_env()
        .or_else(version_from_git)
        .unwrap_or_else(|| FALLBACK_VERSION.to_string());
    println!("cargo:rustc-env=GIT_VERSION={version}");
}

/// Container images are built without `.git`, so the version is passed in.
fn version_from_env() -> Option<String> {
    env::var("GIT_VERSION")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != FALLBACK_VERSION)
}

fn version_from_git() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!version.is_empty()).then_some(version)
}
