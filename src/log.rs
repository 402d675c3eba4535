//! Scanning and parsing for Pono solver run logs.
//!
//! Each experiment condition is a directory of `*_log.txt` files, one per
//! solved instance. A log either carries an explicit timeout marker or a
//! wall clock summary line somewhere in its unstructured output:
//!
//! STATUS: TIMEOUT
//! Pono wall clock time (s): 853.886

use crate::Result;

use anyhow::Context;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;

/// Filename suffix identifying solver logs within a directory.
pub const LOG_SUFFIX: &str = "_log.txt";

/// Literal marker a solver run prints when it hits the time limit.
pub const TIMEOUT_MARKER: &str = "STATUS: TIMEOUT";

/// Duration substituted for runs that timed out or left no timing line.
pub const TIMEOUT_SECS: f64 = 3600.0;

// Fractional part is optional: an integer-valued timing line parses as a
// measurement instead of falling to the timeout sentinel.
const TIME_LINE_RE: &str = r"Pono wall clock time \(s\): ([0-9]+(?:\.[0-9]+)?)";

/// Wall clock outcome of a single solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunTime {
    /// A parsed wall clock duration in seconds.
    Measured(f64),
    /// The log carries the explicit timeout marker.
    Timeout,
    /// Neither marker nor timing line was found.
    Unparsed,
}

impl RunTime {
    /// Project into the comparison domain. Timeouts and unparseable logs
    /// both map to the timeout sentinel; the distinction only matters for
    /// diagnostics.
    pub fn seconds(&self) -> f64 {
        match self {
            RunTime::Measured(secs) => *secs,
            RunTime::Timeout | RunTime::Unparsed => TIMEOUT_SECS,
        }
    }
}

/// Index by filename for pairing across conditions. BTreeMap keys keep the
/// join order lexicographic and reproducible.
pub type TimingTable = BTreeMap<String, RunTime>;

/// Compile the wall clock line pattern. Shared between the scanner and the
/// extractor so a directory scan compiles it once.
pub fn time_line_regex() -> Result<Regex> {
    Ok(Regex::new(TIME_LINE_RE)?)
}

/// Classify raw log text into a [`RunTime`].
///
/// Total: malformed text degrades to `Unparsed`, never an error. The
/// timeout marker wins over any timing line also present.
pub fn extract_run_time(re: &Regex, content: &str) -> RunTime {
    if content.contains(TIMEOUT_MARKER) {
        return RunTime::Timeout;
    }

    re.captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(RunTime::Measured)
        .unwrap_or(RunTime::Unparsed)
}

/// Scan one experiment directory into a filename-to-runtime table.
///
/// Entries that are not regular files ending in [`LOG_SUFFIX`] are ignored.
/// A missing or unreadable directory (or log file) is fatal; unparseable
/// content is not, it is counted as a timeout and flagged on stderr.
pub fn scan_log_dir(dir: &str) -> Result<TimingTable> {
    let re = time_line_regex()?;

    let entries = fs::read_dir(dir).with_context(|| format!("read log directory {}", dir))?;

    let mut out = TimingTable::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list log directory {}", dir))?;

        let file_type = entry
            .file_type()
            .with_context(|| format!("stat entry in {}", dir))?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name();
        // Non-UTF-8 names cannot key the table; they also cannot match the suffix.
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.ends_with(LOG_SUFFIX) {
            continue;
        }

        let path = entry.path();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("read log file {}", path.display()))?;

        let time = extract_run_time(&re, &content);
        if time == RunTime::Unparsed {
            eprintln!(
                "WARN: no timing line or timeout marker in {}, counting as timeout",
                name
            );
        }

        out.insert(name.to_string(), time);
    }

    Ok(out)
}
