//! Box-drawn error report helpers for the build script
//!
//! Kept free of dependencies so the tests run with
//! `rustc --edition 2021 --test build/report.rs`.

/// Widest text that fits between the box borders
const WIDTH: usize = 64;

/// Format error message lines with box drawing
///
/// Lines wider than the box are cut on a character boundary and end in
/// `...`.
pub fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > WIDTH {
                let head: String = line.chars().take(WIDTH - 3).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
