//! CLI summary formatting.
//!
//! One `format_*` function per display (pure, returns `Vec<String>` for
//! testability) and a `print_*` wrapper that writes to stdout. Entities
//! follow a two-level pattern: a header line per archive, then indented
//! context lines for counts and failures.
//!
//! ```text
//! Sloth
//!     3 pages, 1 index page
//!     7 resources
//!     failed data/documentation/Broken.json: expected value at line 1
//! Exported 1 archive, 4 pages
//! ```

use crate::export::ExportReport;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count: `1 page`, `3 pages`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format the end-of-run export summary.
pub fn format_export_summary(report: &ExportReport) -> Vec<String> {
    let mut lines = Vec::new();

    for archive in &report.archives {
        lines.push(archive.name.clone());
        lines.push(format!(
            "{}{}, {}",
            indent(1),
            count(archive.build.pages.len(), "page"),
            count(archive.build.index_pages.len(), "index page"),
        ));
        lines.push(format!(
            "{}{}",
            indent(1),
            count(archive.resources.total(), "resource"),
        ));
        for failure in &archive.build.failures {
            lines.push(format!(
                "{}failed {}: {}",
                indent(1),
                failure.page.display(),
                failure.reason,
            ));
        }
    }

    let mut total = format!(
        "Exported {}, {}",
        count(report.archives.len(), "archive"),
        count(report.total_pages(), "page"),
    );
    if report.total_failures() > 0 {
        total.push_str(&format!(" ({} failed)", report.total_failures()));
    }
    lines.push(total);

    lines
}

/// Print the export summary to stdout.
pub fn print_export_summary(report: &ExportReport) {
    for line in format_export_summary(report) {
        println!("{line}");
    }
}
