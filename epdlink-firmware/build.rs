//! Build script for epdlink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[path = "build/report.rs"]
mod report;

use report::format_error_lines;

/// Keys accepted in the `[reset]` table
const RESET_KEYS: &[&str] = &["assert_ms", "release_ms", "settle_ms", "poll_interval_ms"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/report.rs");
}

/// Validate link.toml at compile time
///
/// The firmware falls back to defaults when the embedded file does not
/// parse, so a broken file is caught here instead of silently ignored.
fn validate_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds link.toml. Please create one in the         ║\n\
            ║  epdlink-firmware directory (an empty file uses defaults).       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read link.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in link.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_edge_delay(&config, &mut errors);
    validate_reset(&config, &mut errors);
    validate_busy(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid link configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=link.toml validated successfully");
}

/// Check that `value` is a non-negative integer that fits in a u32
fn check_u32(value: &toml::Value, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match value {
        toml::Value::Integer(n) if (0..=u32::MAX as i64).contains(n) => Some(*n),
        toml::Value::Integer(_) => {
            errors.push(format!("{} must be 0-{}", key, u32::MAX));
            None
        }
        _ => {
            errors.push(format!("{} must be an integer", key));
            None
        }
    }
}

fn validate_edge_delay(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(value) = config.get("edge_delay_ns") {
        check_u32(value, "edge_delay_ns", errors);
    }
}

fn validate_reset(config: &toml::Value, errors: &mut Vec<String>) {
    let reset = match config.get("reset") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[reset] must be a table".to_string());
            return;
        }
        None => return,
    };

    for (key, value) in reset {
        if !RESET_KEYS.contains(&key.as_str()) {
            errors.push(format!("[reset] unknown key '{}'", key));
            continue;
        }
        let name = format!("[reset] {}", key);
        if check_u32(value, &name, errors) == Some(0) && key == "poll_interval_ms" {
            errors.push("[reset] poll_interval_ms must be at least 1".to_string());
        }
    }
}

fn validate_busy(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("busy") {
        None => {}
        Some(toml::Value::String(s)) if s == "unbounded" => {}
        Some(toml::Value::Table(t)) => match t.get("bounded") {
            Some(toml::Value::Table(bounded)) if t.len() == 1 => match bounded.get("timeout_ms") {
                Some(value) => {
                    if check_u32(value, "busy.bounded.timeout_ms", errors) == Some(0) {
                        errors.push("busy.bounded.timeout_ms must be at least 1".to_string());
                    }
                }
                None => errors.push("busy.bounded missing 'timeout_ms'".to_string()),
            },
            _ => errors.push("busy table must be { bounded = { timeout_ms = N } }".to_string()),
        },
        Some(_) => {
            errors.push("busy must be \"unbounded\" or { bounded = { ... } }".to_string());
        }
    }
}
