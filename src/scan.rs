//! Article discovery.
//!
//! Builds the in-memory article collection for one run. There are two
//! sources:
//!
//! - **Notes** ([`scan_sources`]): a content root walked recursively. Every
//!   `.md` / `.markdown` file becomes an article via [`crate::extract`] and
//!   [`crate::markup`]. Symlinks are followed.
//! - **Published pages** ([`scan_rendered`]): the `post/` directory of an
//!   existing site. Each `post/<slug>/index.html` is parsed back into an
//!   article, which lets listings be regenerated after the notes are gone.
//!
//! ## Ordering
//!
//! Discovery order is deterministic (entries sorted by file name), and the
//! result is stably sorted by date, newest first. Articles sharing a date
//! keep their discovery order. This canonical order is what every renderer
//! consumes.
//!
//! ## Slug collisions
//!
//! Two notes whose titles normalize to the same slug would write to the same
//! `post/<slug>/` directory. Within one scan, the first article in discovery
//! order keeps the slug and later ones get `-2`, `-3`, ... appended.
//!
//! ## Failures
//!
//! A missing root aborts the scan. A note or page that cannot be read or
//! parsed is recorded in [`Scan::skipped`], logged, and the scan continues.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::extract::{self, ExtractError};
use crate::markup;
use crate::slug;
use crate::types::Article;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory not found: {0}")]
    Missing(PathBuf),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Recognized note extensions, compared case-insensitively.
pub const NOTE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Slug used when a title has no word characters at all.
const FALLBACK_SLUG: &str = "untitled";

/// Result of a scan: articles in canonical order plus what was skipped.
#[derive(Debug, Default)]
pub struct Scan {
    pub articles: Vec<Article>,
    pub skipped: Vec<Skipped>,
}

/// A document left out of the collection, and why.
#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: ExtractError,
}

/// Operator-supplied values that take precedence over extracted metadata.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

/// Scan a notes directory recursively.
pub fn scan_sources(root: &Path) -> Result<Scan, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::Missing(root.to_path_buf()));
    }

    let mut scan = Scan::default();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "Skipping unreadable entry");
                scan.skipped.push(Skipped {
                    path: path.clone(),
                    reason: ExtractError::Io {
                        path,
                        source: err.into(),
                    },
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_note(entry.path()) {
            continue;
        }

        match read_article(entry.path()) {
            Ok(article) => {
                debug!(path = %entry.path().display(), slug = %article.slug, "Read note");
                scan.articles.push(article);
            }
            Err(reason) => {
                warn!(path = %entry.path().display(), error = %reason, "Skipping note");
                scan.skipped.push(Skipped {
                    path: entry.path().to_path_buf(),
                    reason,
                });
            }
        }
    }

    disambiguate_slugs(&mut scan.articles);
    sort_canonical(&mut scan.articles);
    Ok(scan)
}

/// Re-derive articles from a site's published `post/<slug>/index.html` pages.
pub fn scan_rendered(site_root: &Path) -> Result<Scan, ScanError> {
    let post_dir = site_root.join("post");
    if !post_dir.is_dir() {
        return Err(ScanError::Missing(post_dir));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(&post_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && !p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
        })
        .collect();
    dirs.sort();

    let mut scan = Scan::default();
    for dir in dirs {
        let page = dir.join("index.html");
        if !page.is_file() {
            continue;
        }
        let slug = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match read_rendered(&page, &slug) {
            Ok(article) => scan.articles.push(article),
            Err(reason) => {
                warn!(path = %page.display(), error = %reason, "Skipping published page");
                scan.skipped.push(Skipped { path: page, reason });
            }
        }
    }

    sort_canonical(&mut scan.articles);
    Ok(scan)
}

/// Load one note for single-article publishing.
///
/// Unlike [`scan_sources`], any failure is returned to the caller.
pub fn load_article(path: &Path, overrides: &Overrides) -> Result<Article, ScanError> {
    let mut article = read_article(path)?;
    if let Some(title) = &overrides.title {
        article.title = title.clone();
        article.slug = slug_for(title);
    }
    if let Some(date) = overrides.date {
        article.date = date;
    }
    if let Some(tags) = &overrides.tags {
        article.tags = tags.clone();
    }
    Ok(article)
}

/// Stable sort, newest first.
pub fn sort_canonical(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Give every article a unique slug, first come first served.
fn disambiguate_slugs(articles: &mut [Article]) {
    let mut taken: HashMap<String, PathBuf> = HashMap::new();
    for article in articles.iter_mut() {
        let base = article.slug.clone();
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains_key(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        if candidate != base {
            warn!(
                slug = %base,
                first = %taken[&base].display(),
                second = %article.source.display(),
                renamed = %candidate,
                "Slug collision"
            );
            article.slug = candidate.clone();
        }
        taken.insert(candidate, article.source.clone());
    }
}

fn read_article(path: &Path) -> Result<Article, ExtractError> {
    let doc = extract::read_document(path)?;
    let meta = extract::document_metadata(&doc);
    Ok(Article {
        slug: slug_for(&meta.title),
        title: meta.title,
        date: meta.date,
        tags: meta.tags,
        summary: meta.summary,
        body: markup::to_html(&doc.text),
        source: doc.path,
    })
}

fn read_rendered(page: &Path, slug: &str) -> Result<Article, ExtractError> {
    let html = fs::read_to_string(page).map_err(|source| ExtractError::Io {
        path: page.to_path_buf(),
        source,
    })?;
    let meta = extract::parse_rendered(&html, slug)?;
    Ok(Article {
        slug: slug.to_string(),
        title: meta.title,
        date: meta.date,
        tags: meta.tags,
        summary: meta.summary,
        body: String::new(),
        source: page.to_path_buf(),
    })
}

fn slug_for(title: &str) -> String {
    let slug = slug::normalize(title.trim());
    if slug.trim_matches('-').is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            NOTE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
