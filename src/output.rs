//! Terminal output formatting for the matte CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for machine-readable output.

use std::io::{self, IsTerminal, Write};

use crate::segment::{BlobVerdict, RemovalReason, SegmentReport, Verdict};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// How chatty the printer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
    verbosity: Verbosity,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Printer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbosity,
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "    Cleaning knight.png (64x64)"
    pub fn status(&self, verb: &str, message: &str) {
        if self.verbosity > Verbosity::Quiet {
            self.print_line(GREEN, verb, message);
        }
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        if self.verbosity > Verbosity::Quiet {
            self.print_line(CYAN, verb, message);
        }
    }

    /// Print a detail line, only with --verbose.
    pub fn verbose(&self, verb: &str, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            self.print_line(CYAN, verb, &self.dim(message));
        }
    }

    /// Print a warning line with a yellow bold verb. Shown even when quiet.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Report a segmentation run: per-blob lines when verbose, then a summary.
    pub fn report(&self, label: &str, report: &SegmentReport) {
        for blob in &report.blobs {
            self.verbose(
                if blob.removed() { "Removed" } else { "Kept" },
                &describe_blob(blob),
            );
        }
        self.info("Cleaned", &format!("{} ({})", label, summarize(report)));
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// One-line description of a blob decision.
pub fn describe_blob(blob: &BlobVerdict) -> String {
    let why = match blob.verdict {
        Verdict::Kept => "enclosed detail",
        Verdict::Removed(RemovalReason::TouchesEdge) => "touches edge",
        Verdict::Removed(RemovalReason::Large) => "large",
        Verdict::Removed(RemovalReason::SizeOverride) => "size override",
    };
    format!(
        "blob at ({}, {}): {}, {}",
        blob.origin.x,
        blob.origin.y,
        plural(blob.size, "pixel", "pixels"),
        why
    )
}

/// Short summary of a whole run.
pub fn summarize(report: &SegmentReport) -> String {
    format!(
        "{} cleared, {} removed, {} kept",
        plural(report.removed_pixels(), "pixel", "pixels"),
        plural(report.removed_count(), "blob", "blobs"),
        report.kept_count()
    )
}

/// Pluralize a count: `plural(1, "frame", "frames")` → "1 frame".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
