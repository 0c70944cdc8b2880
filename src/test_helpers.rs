//! Shared test utilities for the notesite test suite.
//!
//! Provides article builders, fixture writers for notes and site trees, and
//! lookup helpers that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let notes = TempDir::new().unwrap();
//! write_note(notes.path(), "hello.md", "# Hello\n2024-01-01");
//! let scan = scan_sources(notes.path()).unwrap();
//!
//! let hello = find_article(&scan.articles, "hello");
//! assert_eq!(hello.date, day("2024-01-01"));
//! ```

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::generate::{self, Site};
use crate::slug;
use crate::types::{Article, DATE_FORMAT};

// =========================================================================
// Builders
// =========================================================================

/// Parse a `YYYY-MM-DD` literal.
pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

/// An in-memory article with its slug derived from the title.
pub fn article(title: &str, date: &str, tags: &[&str]) -> Article {
    let slug = slug::normalize(title);
    Article {
        source: PathBuf::from(format!("notes/{slug}.md")),
        slug,
        title: title.to_string(),
        date: day(date),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        summary: format!("Summary of {title}"),
        body: format!("<p>Body of {title}</p>"),
    }
}

/// A [`Site`] rooted at `root` with a fixed build date.
pub fn site<'a>(root: &'a Path, config: &'a SiteConfig) -> Site<'a> {
    Site {
        root,
        config,
        today: day("2026-03-01"),
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a note below `dir`, creating parent directories.
pub fn write_note(dir: &Path, rel: &str, text: &str) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

/// Write a published article page at `post/<slug>/index.html`.
pub fn write_post(site_root: &Path, slug: &str, title: &str, date: &str, tags: &[&str]) {
    let mut a = article(title, date, tags);
    a.slug = slug.to_string();
    let page = generate::render_article_page(&a, &SiteConfig::default()).into_string();
    let dir = site_root.join("post").join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.html"), page).unwrap();
}

/// A temp site root holding empty home, archive and tag index pages.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let config = SiteConfig::default();
    generate::scaffold(&site(tmp.path(), &config)).unwrap();
    tmp
}

/// Read a site-relative file. Panics with the path if it is missing.
pub fn read_page(site_root: &Path, rel: &str) -> String {
    let path = site_root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

// =========================================================================
// Lookups
// =========================================================================

/// Find an article by slug. Panics if not found.
pub fn find_article<'a>(articles: &'a [Article], slug: &str) -> &'a Article {
    articles.iter().find(|a| a.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();
        panic!("article '{slug}' not found. Available: {slugs:?}")
    })
}

/// All article titles in collection order.
pub fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}
