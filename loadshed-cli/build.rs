//! Embeds `git describe` output so `loadshed --version` names the build.

use std::path::Path;
use std::process::Command;

fn git_describe(repo: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let desc = String::from_utf8(out.stdout).ok()?;
    let desc = desc.trim();
    (!desc.is_empty()).then(|| desc.to_string())
}

fn main() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let build = git_describe(&workspace).unwrap_or_else(|| "untracked".to_string());

    println!("cargo:rustc-env=LOADSHED_BUILD_SHA={build}");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
