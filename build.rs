use std::process::Command;

/// Stdout of a successful git invocation, trimmed.
fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    Some(text.trim().to_owned()).filter(|t| !t.is_empty())
}

fn main() {
    // Shown by `benchplot --version`; "-dirty" marks uncommitted changes.
    let commit = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| "unknown".to_owned());
    println!("cargo:rustc-env=BENCHPLOT_BUILD_COMMIT={commit}");

    for watched in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={watched}");
    }
}
