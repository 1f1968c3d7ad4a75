//! Line-level cleanup of operator console output.
//!
//! Framework-generated marker lines and blank lines are stripped before
//! the output is shown to a human; everything else passes through
//! untouched, in its original order.

use std::sync::OnceLock;

use regex::Regex;

/// Marker lines injected around BOF output, e.g.
/// `[01/01 00:00:00] [+] BOF output received from beacon`.
/// Anchored at line start; case-sensitive. Trailing text is irrelevant.
const NOISE_LINE: &str = r"^\[\d{2}/\d{2}\s+\d{2}:\d{2}:\d{2}\]\s*\[\+\]\s*BOF output";

/// Compiled noise-line matcher, built once on first use.
pub fn noise_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NOISE_LINE).expect("noise pattern compiles"))
}

/// True when `line` starts with the bracketed-timestamp BOF marker.
pub fn is_noise_line(line: &str) -> bool {
    noise_line_pattern().is_match(line)
}

/// Join `fragments` with newlines, drop noise and blank lines, rejoin.
///
/// Order-preserving: surviving lines keep their relative order across and
/// within fragments. Returns an empty string when every line is removed.
/// Pure function of its input.
pub fn clean_fragments(fragments: &[String]) -> String {
    let combined = fragments.join("\n");
    let kept: Vec<&str> = combined
        .split('\n')
        .filter(|line| !is_noise_line(line))
        .filter(|line| !line.trim().is_empty())
        .collect();
    kept.join("\n")
}
