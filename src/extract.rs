//! Article metadata extraction.
//!
//! Notes are loosely formatted: there is no front matter, so every field is
//! found by a heuristic, and every heuristic has a fallback.
//!
//! ## Source documents
//!
//! | Field    | Heuristic (first match wins)            | Fallback                   |
//! |----------|-----------------------------------------|----------------------------|
//! | title    | first `# heading` line, trimmed         | file name without extension |
//! | date     | first `YYYY-MM-DD` that is a real date  | file modification time      |
//! | tags     | first `tags:` / `tag:` line, any case   | no tags                     |
//! | abstract | first 100 characters, newlines → spaces | none                        |
//!
//! ## Rendered pages
//!
//! When the source notes are gone, [`parse_rendered`] reads the same fields
//! back out of a generated `post/<slug>/index.html`. The abstract there is
//! taken verbatim from the page's `post-abstract` region instead of being
//! recomputed.
//!
//! Reading is split from extraction so callers decide what a failure means:
//! [`read_document`] returns a typed [`ExtractError`], and the scanner logs
//! and skips while single-article import aborts.

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::DATE_FORMAT;

/// Length of the abstract in characters.
pub const SUMMARY_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    Missing(PathBuf),
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not valid UTF-8: {0}")]
    Encoding(PathBuf),
    #[error("No modification time for {0}")]
    Timestamp(PathBuf),
    #[error("No {what} found")]
    NoMatch { what: &'static str },
}

/// A source document read from disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub modified: DateTime<Local>,
}

/// Fields derived from a document or a rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub summary: String,
}

static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static TAGS_REGEX: OnceLock<Regex> = OnceLock::new();

fn title_regex() -> &'static Regex {
    TITLE_REGEX.get_or_init(|| Regex::new(r"(?m)^# (.+)$").unwrap())
}

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap())
}

fn tags_regex() -> &'static Regex {
    TAGS_REGEX.get_or_init(|| Regex::new(r"(?mi)^tags?:[ \t]*(.+)$").unwrap())
}

/// Read a note and its modification time.
///
/// `\r\n` line endings are turned into `\n`, so every later pass sees one
/// newline convention.
pub fn read_document(path: &Path) -> Result<Document, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::Missing(path.to_path_buf()));
    }
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(io_err)?;
    let text = String::from_utf8(bytes).map_err(|_| ExtractError::Encoding(path.to_path_buf()))?;
    let modified = fs::metadata(path)
        .map_err(io_err)?
        .modified()
        .map_err(|_| ExtractError::Timestamp(path.to_path_buf()))?;

    Ok(Document {
        path: path.to_path_buf(),
        text: normalize_newlines(&text),
        modified: modified.into(),
    })
}

pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Derive metadata from a document's text.
///
/// `path` supplies the title fallback and `modified` the date fallback.
pub fn extract_metadata(text: &str, path: &Path, modified: NaiveDate) -> Metadata {
    Metadata {
        title: extract_title(text).unwrap_or_else(|| file_title(path)),
        date: extract_date(text).unwrap_or(modified),
        tags: extract_tags(text),
        summary: summarize(text),
    }
}

/// [`extract_metadata`] for a document read with [`read_document`].
pub fn document_metadata(doc: &Document) -> Metadata {
    extract_metadata(&doc.text, &doc.path, doc.modified.date_naive())
}

pub fn extract_title(text: &str) -> Option<String> {
    title_regex()
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// The first `YYYY-MM-DD` substring that is a valid calendar date.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    date_regex()
        .find_iter(text)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT).ok())
}

pub fn extract_tags(text: &str) -> Vec<String> {
    tags_regex()
        .captures(text)
        .map(|c| split_tags(&c[1]))
        .unwrap_or_default()
}

/// Split a comma-separated tag list, trimming each piece and dropping empties.
pub fn split_tags(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// First [`SUMMARY_CHARS`] characters with newlines turned into spaces.
pub fn summarize(text: &str) -> String {
    let head: String = normalize_newlines(text).chars().take(SUMMARY_CHARS).collect();
    head.replace('\n', " ").trim().to_string()
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string())
}

// ============================================================================
// Rendered pages
// ============================================================================

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    document
        .select(&selector(css))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read metadata back from a generated article page.
///
/// A page without a title falls back to `slug`. A page without a parseable
/// date is rejected, since the date drives every listing.
pub fn parse_rendered(html: &str, slug: &str) -> Result<Metadata, ExtractError> {
    let document = Html::parse_document(html);

    let title = first_text(&document, "h2.post-title").unwrap_or_else(|| slug.to_string());

    let date = first_text(&document, "div.post-date")
        .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok())
        .ok_or(ExtractError::NoMatch { what: "date" })?;

    let summary = first_text(&document, "div.post-abstract p").unwrap_or_default();

    let tags = document
        .select(&selector(".tag-container .tag, span.tag"))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(Metadata {
        title,
        date,
        tags,
        summary,
    })
}
