use std::process::Command;

fn main() {
    // KLIGHD_INTERACTIVE_VERSION from the environment (CI), else the git tag, else "dev".
    let version = std::env::var("KLIGHD_INTERACTIVE_VERSION")
        .ok()
        .filter(|s| !s.is_empty() && s != "dev")
        .or_else(|| {
            Command::new("git")
                .args(["describe", "--tags", "--always"])
                .output()
                .ok()
                .filter(|o| o.status.success())
                .and_then(|o| String::from_utf8(o.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=KLIGHD_INTERACTIVE_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=KLIGHD_INTERACTIVE_VERSION");
}
