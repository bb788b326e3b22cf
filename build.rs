//! Build script for the spotydown CLI.
//!
//! Installs the configuration template next to the `.env` the binary loads at
//! startup, so `cp .env.example .env` in that directory is all a user needs.

use std::{env, fs, path::PathBuf};

const TEMPLATE: &str = ".env.example";
const APP_DIR: &str = "spotydown";
const KEY_PREFIX: &str = "SPOTYDOWN_";

/// Installs `.env.example` into `<data_local_dir>/spotydown/`.
///
/// - Linux: `~/.local/share/spotydown/.env.example`
/// - macOS: `~/Library/Application Support/spotydown/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotydown/.env.example`
///
/// The installed copy is only rewritten when its contents differ. Template
/// lines that do not assign a `SPOTYDOWN_*` key are reported as cargo
/// warnings, since the runtime ignores them.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", TEMPLATE);
    println!("cargo:rerun-if-changed=build.rs");

    let template_path = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join(TEMPLATE);
    let Ok(template) = fs::read_to_string(&template_path) else {
        println!(
            "cargo:warning={} not found at {}",
            TEMPLATE,
            template_path.display()
        );
        return Ok(());
    };

    for (number, line) in template.lines().enumerate() {
        if let Some(problem) = check_template_line(line) {
            println!("cargo:warning={}:{}: {}", TEMPLATE, number + 1, problem);
        }
    }

    let install_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    let installed = install_dir.join(TEMPLATE);

    if fs::read_to_string(&installed).is_ok_and(|current| current == template) {
        return Ok(());
    }

    fs::create_dir_all(&install_dir)?;
    fs::write(installed, template)?;
    Ok(())
}

fn check_template_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match line.split_once('=') {
        None => Some(format!("`{}` is not a KEY=value assignment", line)),
        Some((key, _)) if !key.trim().starts_with(KEY_PREFIX) => {
            Some(format!("`{}` is not read by spotydown", key.trim()))
        }
        Some(_) => None,
    }
}
