//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each article is shown
//! by positional index and title, with its date as detail; file paths follow
//! as indented context lines. The inventory reads as a table of contents
//! while still letting users trace every entry back to a file.
//!
//! # Output Format
//!
//! ## Check / Import scan
//!
//! ```text
//! Articles
//! 001 Hello World (2023-05-01)
//!     Source: hello.md
//!     Slug: hello-world
//!     Tags: alpha, beta
//!
//! Skipped
//!     broken.md: Not valid UTF-8: notes/broken.md
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Hello World → post/hello-world/index.html
//!
//! Listings
//!     index.html
//!     archives/index.html
//!     tags/index.html
//!
//! Tags
//! 001 alpha (1 article) → tag/alpha/index.html
//!
//! Feed → atom.xml (1 entry)
//!
//! Generated 1 article, 1 tag page, 3 listings
//! ```
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use std::path::Path;

use crate::generate::{FEED_FILE, Report};
use crate::scan::{Scan, Skipped};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + title, with optional parenthesized detail.
///
/// ```text
/// 001 Hello World (2023-05-01)
/// 002 rust
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// `1 article`, `2 articles`.
fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn relative<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

fn format_skipped(skipped: &[Skipped], root: &Path, lines: &mut Vec<String>) {
    if skipped.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Skipped".to_string());
    for s in skipped {
        lines.push(format!("{}{}: {}", indent(1), relative(&s.path, root), s.reason));
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the article inventory of a scan rooted at `root`.
pub fn format_scan_output(scan: &Scan, root: &Path) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];

    for (i, article) in scan.articles.iter().enumerate() {
        let date = article.date_string();
        lines.push(entity_header(i + 1, &article.title, Some(&date)));
        lines.push(format!("{}Source: {}", indent(1), relative(&article.source, root)));
        lines.push(format!("{}Slug: {}", indent(1), article.slug));
        if !article.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), article.tags.join(", ")));
        }
        let summary = truncate_desc(&article.summary, 60);
        if !summary.is_empty() {
            lines.push(format!("{}{}", indent(1), summary));
        }
    }

    format_skipped(&scan.skipped, root, &mut lines);
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(scan: &Scan, root: &Path) {
    for line in format_scan_output(scan, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format what a generate run wrote. Paths are relative to `site_root`.
pub fn format_generate_output(report: &Report, site_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, page) in report.articles.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.path.display()
        ));
    }

    if !report.listings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Listings".to_string());
        for path in &report.listings {
            lines.push(format!("{}{}", indent(1), path.display()));
        }
    }

    if !report.tags.is_empty() {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for (i, tag) in report.tags.iter().enumerate() {
            let count = counted(tag.articles, "article", "articles");
            lines.push(format!(
                "{} \u{2192} {}",
                entity_header(i + 1, &tag.name, Some(&count)),
                tag.path.display()
            ));
        }
    }

    if !report.listings.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Feed \u{2192} {} ({})",
            FEED_FILE,
            counted(report.feed_entries, "entry", "entries")
        ));
    }

    format_skipped(&report.skipped, site_root, &mut lines);

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        counted(report.articles.len(), "article", "articles"),
        counted(report.tags.len(), "tag page", "tag pages"),
        counted(report.listings.len(), "listing", "listings")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &Report, site_root: &Path) {
    for line in format_generate_output(report, site_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
