//! HTML site generation.
//!
//! Turns the article collection into the published site. Article pages, tag
//! pages and the feed are written wholesale. The home, archive and tag index
//! pages belong to the theme and only their generated region is rewritten
//! (see [`crate::template`]).
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                 # Home: teasers of the newest articles
//! ├── atom.xml                   # Feed
//! ├── archives/index.html        # All articles grouped by year
//! ├── tags/index.html            # Tag cloud
//! ├── post/
//! │   └── hello-world/index.html # One page per article
//! └── tag/
//!     └── rust/index.html        # One page per tag
//! ```
//!
//! ## Modes
//!
//! - [`import`]: convert a notes directory, write article pages, then
//!   regenerate everything derived from the published pages.
//! - [`publish`]: the same for a single note.
//! - [`rebuild`]: regenerate derived pages only, from `post/` as it stands.
//!
//! Derived pages are always computed from the full set of published pages,
//! so listings cover posts from earlier runs as well as the current one.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every page shares [`page_shell`]; links are relative, so a site works from
//! any base path.

use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::feed;
use crate::scan::{self, ScanError, Skipped};
use crate::slug;
use crate::template::{self, Region, TemplateError};
use crate::types::{Article, Tag};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub const HOME_PAGE: &str = "index.html";
pub const ARCHIVE_PAGE: &str = "archives/index.html";
pub const TAG_INDEX_PAGE: &str = "tags/index.html";
pub const FEED_FILE: &str = "atom.xml";
const STYLESHEET: &str = "styles/main.css";

const CSS_STATIC: &str = include_str!("../static/main.css");
const JS: &str = include_str!("../static/menu.js");

/// Where and how to generate.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    pub root: &'a Path,
    pub config: &'a SiteConfig,
    /// Build date, used only where no article date applies.
    pub today: NaiveDate,
}

/// What a run wrote.
#[derive(Debug, Default)]
pub struct Report {
    pub articles: Vec<ArticlePage>,
    /// Regenerated theme pages, site-relative
    pub listings: Vec<PathBuf>,
    pub tags: Vec<TagPage>,
    pub feed_entries: usize,
    /// Published pages that could not be read back
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticlePage {
    pub title: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagPage {
    pub name: String,
    pub path: PathBuf,
    pub articles: usize,
}

// ============================================================================
// Runs
// ============================================================================

/// Import every note under `notes`, then regenerate derived pages.
///
/// Returns the source scan (so callers can list what was skipped) together
/// with the report.
pub fn import(site: &Site, notes: &Path) -> Result<(scan::Scan, Report), GenerateError> {
    let scan = scan::scan_sources(notes)?;
    let written = write_articles(site, &scan.articles)?;
    let mut report = rebuild(site)?;
    report.articles = written;
    Ok((scan, report))
}

/// Publish one article, then regenerate derived pages.
///
/// An existing page with the same slug is replaced.
pub fn publish(site: &Site, article: &Article) -> Result<Report, GenerateError> {
    let written = write_articles(site, std::slice::from_ref(article))?;
    let mut report = rebuild(site)?;
    report.articles = written;
    Ok(report)
}

/// Regenerate derived pages from the published `post/` directory.
pub fn rebuild(site: &Site) -> Result<Report, GenerateError> {
    let published = scan::scan_rendered(site.root)?;
    let mut report = regenerate(site, &published.articles)?;
    report.skipped = published.skipped;
    Ok(report)
}

/// Write `post/<slug>/index.html` for each article.
pub fn write_articles(site: &Site, articles: &[Article]) -> Result<Vec<ArticlePage>, GenerateError> {
    let post_dir = site.root.join("post");
    fs::create_dir_all(&post_dir).map_err(|source| GenerateError::Io {
        path: post_dir.clone(),
        source,
    })?;

    let mut pages = Vec::with_capacity(articles.len());
    for article in articles {
        let rel = PathBuf::from(format!("{}index.html", article.path()));
        let html = render_article_page(article, site.config);
        write_file(&site.root.join(&rel), &html.into_string())?;
        debug!(slug = %article.slug, "Wrote article page");
        pages.push(ArticlePage {
            title: article.title.clone(),
            path: rel,
        });
    }
    info!(count = pages.len(), "Wrote article pages");
    Ok(pages)
}

/// Regenerate every derived artifact from `articles`, which must be in
/// canonical order.
pub fn regenerate(site: &Site, articles: &[Article]) -> Result<Report, GenerateError> {
    let config = site.config;
    let tags = Tag::collect(articles);
    let mut report = Report::default();

    let listings = [
        (HOME_PAGE, template::HOME, render_home_listing(articles, config.home.count)),
        (ARCHIVE_PAGE, template::ARCHIVES, render_archive_listing(articles)),
        (TAG_INDEX_PAGE, template::TAGS, render_tag_index(&tags)),
    ];
    for (rel, region, html) in listings {
        refill(site.root, rel, region, html)?;
        report.listings.push(PathBuf::from(rel));
    }

    for tag in &tags {
        let rel = PathBuf::from(format!("tag/{}/index.html", tag.slug));
        write_file(&site.root.join(&rel), &render_tag_page(tag, config).into_string())?;
        report.tags.push(TagPage {
            name: tag.name.clone(),
            path: rel,
            articles: tag.articles.len(),
        });
    }

    write_file(
        &site.root.join(FEED_FILE),
        &feed::render_feed(articles, config, site.today),
    )?;
    report.feed_entries = articles.len().min(config.feed.count);

    info!(
        articles = articles.len(),
        tags = report.tags.len(),
        feed_entries = report.feed_entries,
        "Regenerated listings"
    );
    Ok(report)
}

/// Write empty theme pages and the stylesheet wherever they are missing.
///
/// Existing files are left alone. Returns the site-relative paths written.
pub fn scaffold(site: &Site) -> Result<Vec<PathBuf>, GenerateError> {
    let config = site.config;
    let files = [
        (HOME_PAGE, render_home_shell(config).into_string()),
        (ARCHIVE_PAGE, render_archive_shell(config).into_string()),
        (TAG_INDEX_PAGE, render_tag_index_shell(config).into_string()),
        (STYLESHEET, CSS_STATIC.to_string()),
    ];

    let mut written = Vec::new();
    for (rel, contents) in files {
        let path = site.root.join(rel);
        if path.exists() {
            debug!(path = %path.display(), "Keeping existing file");
            continue;
        }
        write_file(&path, &contents)?;
        written.push(PathBuf::from(rel));
    }
    Ok(written)
}

fn refill(root: &Path, rel: &str, region: Region, html: Markup) -> Result<(), GenerateError> {
    let path = root.join(rel);
    let text = fs::read_to_string(&path).map_err(|source| GenerateError::Io {
        path: path.clone(),
        source,
    })?;
    let updated = template::replace_region(&text, region, &html.into_string()).map_err(
        |source| GenerateError::Template {
            path: path.clone(),
            source,
        },
    )?;

    if updated == text {
        debug!(path = %path.display(), "Listing unchanged");
        return Ok(());
    }
    write_file(&path, &updated)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let io_err = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Per-page values for [`page_shell`].
struct PageMeta<'a> {
    /// Page title; `None` for the home page
    title: Option<&'a str>,
    description: Option<&'a str>,
    keywords: Option<String>,
    /// Relative path back to the site root, e.g. `../../`
    root: &'a str,
}

/// The document every generated page shares: head, sidebar and scripts.
fn page_shell(config: &SiteConfig, meta: &PageMeta, content: Markup) -> Markup {
    let site = &config.site;
    let theme = &config.theme;
    let root = meta.root;

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title {
                    @if let Some(title) = meta.title { (title) " | " }
                    (site.title)
                }
                meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=1, user-scalable=no";
                @if let Some(description) = meta.description {
                    meta name="description" content=(description);
                }
                @if let Some(keywords) = &meta.keywords {
                    meta name="keywords" content=(keywords);
                }
                @if theme.assets {
                    link rel="stylesheet" href="https://use.fontawesome.com/releases/v5.7.2/css/all.css" crossorigin="anonymous";
                    link rel="shortcut icon" href={ (root) "favicon.ico" };
                    link rel="stylesheet" href="https://unpkg.com/aos@next/dist/aos.css";
                }
                link rel="stylesheet" href={ (root) (STYLESHEET) };
                link rel="alternate" type="application/atom+xml" title=(site.title) href={ (root) (FEED_FILE) };
            }
            body {
                div id="app" class="main" {
                    (sidebar(config, root))
                    div class="main-container" {
                        (content)
                    }
                }
                @if theme.scripts {
                    script src="https://unpkg.com/aos@next/dist/aos.js" {}
                    script { (PreEscaped(JS)) }
                }
            }
        }
    }
}

fn sidebar(config: &SiteConfig, root: &str) -> Markup {
    let site = &config.site;
    let nav = [
        ("Home", String::new()),
        ("Archives", "archives/".to_string()),
        ("Tags", "tags/".to_string()),
        ("About", "post/about/".to_string()),
    ];

    html! {
        div class="sidebar" {
            div class="top-container" {
                div class="top-header-container" {
                    a class="site-title-container" href=(root) {
                        @if config.theme.assets {
                            img src={ (root) "images/avatar.png" } class="site-logo";
                        }
                        h1 class="site-title" { (site.title) }
                    }
                    div class="menu-btn" { div class="line" {} }
                }
                div {
                    @for (label, href) in &nav {
                        a href={ (root) (href) } class="site-nav" { (label) }
                    }
                }
            }
            div class="bottom-container" {
                div class="site-description" { (site.description) }
                div class="site-footer" {
                    "Powered by notesite | "
                    a class="rss" href={ (root) (FEED_FILE) } target="_blank" { "RSS" }
                }
            }
        }
    }
}

/// Link or label for one tag of an article.
fn tag_link(name: &str, root: &str) -> Markup {
    let tag_slug = slug::normalize(name);
    html! {
        @if tag_slug.is_empty() {
            span class="tag" { (name) }
        } @else {
            a class="tag" href={ (root) "tag/" (tag_slug) "/" } { (name) }
        }
    }
}

/// Title, date and abstract of one article, as shown in listings.
fn teaser(article: &Article, root: &str) -> Markup {
    html! {
        article class="post-item" {
            a href={ (root) (article.path()) } {
                h2 class="post-title" { (article.title) }
            }
            div class="post-date" { (article.date_string()) }
            div class="post-abstract" {
                p { (article.summary) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders `post/<slug>/index.html`.
///
/// The title, date, abstract and tags are what [`crate::extract::parse_rendered`]
/// reads back when listings are rebuilt without the notes.
pub fn render_article_page(article: &Article, config: &SiteConfig) -> Markup {
    let root = "../../";
    let meta = PageMeta {
        title: Some(&article.title),
        description: Some(&article.summary),
        keywords: (!article.tags.is_empty()).then(|| article.tags.join(", ")),
        root,
    };

    let content = html! {
        div class="post-detail" {
            article class="post" {
                h2 class="post-title" { (article.title) }
                div class="post-date" { (article.date_string()) }
                div class="post-abstract" {
                    p { (article.summary) }
                }
                div class="post-content" {
                    (PreEscaped(&article.body))
                }
                @if !article.tags.is_empty() {
                    div class="tag-container" {
                        @for tag in &article.tags {
                            (tag_link(tag, root))
                        }
                    }
                }
            }
        }
    };

    page_shell(config, &meta, content)
}

/// Teasers for the home region: the `count` newest articles.
pub fn render_home_listing(articles: &[Article], count: usize) -> Markup {
    html! {
        @for article in articles.iter().take(count) {
            (teaser(article, "./"))
        }
    }
}

/// Archive region: articles grouped by year, newest year first.
///
/// Contains no `div` elements, since the region ends at the first `</div>`.
pub fn render_archive_listing(articles: &[Article]) -> Markup {
    let mut years: BTreeMap<String, Vec<&Article>> = BTreeMap::new();
    for article in articles {
        years.entry(article.year()).or_default().push(article);
    }

    html! {
        @for (year, list) in years.iter().rev() {
            h2 class="year" { (year) }
            @for article in list {
                article class="post" {
                    a href={ "../" (article.path()) } {
                        span class="post-date" { (article.date_string()) }
                        " "
                        span class="post-title" { (article.title) }
                    }
                }
            }
        }
    }
}

/// Tag index region: one link per tag, alphabetically.
pub fn render_tag_index(tags: &[Tag]) -> Markup {
    html! {
        @for tag in tags {
            a class="tag" href={ "../tag/" (tag.slug) "/" } {
                (tag.name)
                " "
                span class="tag-count" { (tag.articles.len()) }
            }
        }
    }
}

/// Renders `tag/<slug>/index.html`: every article carrying the tag.
pub fn render_tag_page(tag: &Tag, config: &SiteConfig) -> Markup {
    let root = "../../";
    let meta = PageMeta {
        title: Some(&tag.name),
        description: None,
        keywords: Some(tag.name.clone()),
        root,
    };

    let content = html! {
        div class="content-container" {
            h1 class="tag-title" { "#" (tag.name) }
            @for article in &tag.articles {
                (teaser(article, root))
            }
        }
    };

    page_shell(config, &meta, content)
}

fn render_home_shell(config: &SiteConfig) -> Markup {
    let meta = PageMeta {
        title: None,
        description: Some(&config.site.description),
        keywords: None,
        root: "./",
    };
    let content = html! {
        div class="content-container" data-aos="fade-up" {
            div class="pagination-container" {}
        }
    };
    page_shell(config, &meta, content)
}

fn render_archive_shell(config: &SiteConfig) -> Markup {
    let meta = PageMeta {
        title: Some("Archives"),
        description: None,
        keywords: None,
        root: "../",
    };
    let content = html! {
        div class="content-container" {
            div class="archives-container" {}
        }
    };
    page_shell(config, &meta, content)
}

fn render_tag_index_shell(config: &SiteConfig) -> Markup {
    let meta = PageMeta {
        title: Some("Tags"),
        description: None,
        keywords: None,
        root: "../",
    };
    let content = html! {
        div class="content-container" {
            div class="tags-container" {}
        }
    };
    page_shell(config, &meta, content)
}

/// Warn about each published page left out of a rebuild.
pub fn log_skipped(skipped: &[Skipped]) {
    for s in skipped {
        warn!(path = %s.path.display(), error = %s.reason, "Not listed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Article> {
        vec![
            article("Newest", "2024-03-01", &["rust", "notes"]),
            article("Middle", "2024-01-15", &["notes"]),
            article("Old One", "2023-11-30", &["rust"]),
        ]
    }

    // =========================================================================
    // Page shell
    // =========================================================================

    #[test]
    fn shell_includes_doctype_and_nav() {
        let html = render_article_page(&sample()[0], &SiteConfig::default()).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Newest | Gridea</title>"));
        assert!(html.contains(r#"href="../../archives/""#));
        assert!(html.contains(r#"href="../../tags/""#));
        assert!(html.contains(r#"href="../../styles/main.css""#));
    }

    #[test]
    fn shell_toggles_assets_and_scripts() {
        let mut config = SiteConfig::default();
        let full = render_article_page(&sample()[0], &config).into_string();
        assert!(full.contains("fontawesome"));
        assert!(full.contains("aos.js"));

        config.theme.assets = false;
        config.theme.scripts = false;
        let bare = render_article_page(&sample()[0], &config).into_string();
        assert!(!bare.contains("fontawesome"));
        assert!(!bare.contains("favicon.ico"));
        assert!(!bare.contains("<script"));
        assert!(bare.contains("styles/main.css"));
    }

    // =========================================================================
    // Article page
    // =========================================================================

    #[test]
    fn article_page_contents() {
        let mut a = article("Fish & Chips", "2023-05-01", &["food", "UK"]);
        a.body = "<p><strong>crispy</strong></p>".to_string();
        let html = render_article_page(&a, &SiteConfig::default()).into_string();

        assert!(html.contains(r#"<h2 class="post-title">Fish &amp; Chips</h2>"#));
        assert!(html.contains(r#"<div class="post-date">2023-05-01</div>"#));
        assert!(html.contains("<p><strong>crispy</strong></p>"));
        assert!(html.contains(r#"<a class="tag" href="../../tag/food/">food</a>"#));
        assert!(html.contains(r#"<a class="tag" href="../../tag/uk/">UK</a>"#));
        assert!(html.contains(r#"<meta name="keywords" content="food, UK">"#));
    }

    #[test]
    fn article_page_reads_back() {
        let a = article("Fish & Chips", "2023-05-01", &["food", "!!!"]);
        let html = render_article_page(&a, &SiteConfig::default()).into_string();
        let meta = extract::parse_rendered(&html, &a.slug).unwrap();
        assert_eq!(meta.title, a.title);
        assert_eq!(meta.date, a.date);
        assert_eq!(meta.summary, a.summary);
        assert_eq!(meta.tags, a.tags);
    }

    // =========================================================================
    // Listings
    // =========================================================================

    #[test]
    fn home_listing_limited_to_count() {
        let html = render_home_listing(&sample(), 2).into_string();
        assert_eq!(html.matches("post-item").count(), 2);
        assert!(html.contains(r#"href="./post/newest/""#));
        assert!(html.contains("Middle"));
        assert!(!html.contains("Old One"));
    }

    #[test]
    fn archive_groups_years_descending() {
        let html = render_archive_listing(&sample()).into_string();
        let y2024 = html.find(r#"<h2 class="year">2024</h2>"#).unwrap();
        let y2023 = html.find(r#"<h2 class="year">2023</h2>"#).unwrap();
        assert!(y2024 < y2023);
        let newest = html.find("Newest").unwrap();
        let middle = html.find("Middle").unwrap();
        assert!(y2024 < newest && newest < middle && middle < y2023);
        assert!(!html.contains("</div>"));
    }

    #[test]
    fn tag_index_sorted_with_links() {
        let articles = sample();
        let tags = Tag::collect(&articles);
        let html = render_tag_index(&tags).into_string();
        let notes = html.find(r#"href="../tag/notes/""#).unwrap();
        let rust = html.find(r#"href="../tag/rust/""#).unwrap();
        assert!(notes < rust);
        assert!(!html.contains("</div>"));
    }

    #[test]
    fn tag_page_lists_exactly_its_articles() {
        let articles = sample();
        let tags = Tag::collect(&articles);
        let rust = tags.iter().find(|t| t.slug == "rust").unwrap();
        let html = render_tag_page(rust, &SiteConfig::default()).into_string();

        assert_eq!(html.matches(r#"class="post-item""#).count(), 2);
        assert!(html.contains(r#"href="../../post/newest/""#));
        assert!(html.contains(r#"href="../../post/old-one/""#));
        assert!(!html.contains("Middle"));
        assert!(html.find("Newest").unwrap() < html.find("Old One").unwrap());
    }

    // =========================================================================
    // Runs
    // =========================================================================

    #[test]
    fn scaffold_writes_parseable_shells() {
        let tmp = setup_site();
        let home = read_page(tmp.path(), HOME_PAGE);
        assert!(template::PageTemplate::parse(&home, &[template::HOME]).is_ok());
        let archives = read_page(tmp.path(), ARCHIVE_PAGE);
        assert!(template::PageTemplate::parse(&archives, &[template::ARCHIVES]).is_ok());
        let tags = read_page(tmp.path(), TAG_INDEX_PAGE);
        assert!(template::PageTemplate::parse(&tags, &[template::TAGS]).is_ok());
        assert!(tmp.path().join(STYLESHEET).exists());
    }

    #[test]
    fn scaffold_keeps_existing_pages() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(HOME_PAGE), "mine").unwrap();
        let config = SiteConfig::default();
        let written = scaffold(&site(tmp.path(), &config)).unwrap();

        assert_eq!(read_page(tmp.path(), HOME_PAGE), "mine");
        assert!(!written.contains(&PathBuf::from(HOME_PAGE)));
        assert!(written.contains(&PathBuf::from(ARCHIVE_PAGE)));
    }

    #[test]
    fn regenerate_fills_regions_and_keeps_theme() {
        let tmp = TempDir::new().unwrap();
        let theme_home = format!(
            "<nav>theme</nav>{}old teaser{}</div><footer>theme</footer>",
            template::HOME.open,
            template::HOME.close
        );
        write_note(tmp.path(), HOME_PAGE, &theme_home);
        write_note(
            tmp.path(),
            ARCHIVE_PAGE,
            &format!("A{}stale</div>Z", template::ARCHIVES.open),
        );
        write_note(
            tmp.path(),
            TAG_INDEX_PAGE,
            &format!("T{}stale</div>Z", template::TAGS.open),
        );

        let config = SiteConfig::default();
        let report = regenerate(&site(tmp.path(), &config), &sample()).unwrap();

        let home = read_page(tmp.path(), HOME_PAGE);
        assert!(home.starts_with(&format!("<nav>theme</nav>{}", template::HOME.open)));
        assert!(home.ends_with("</div><footer>theme</footer>"));
        assert!(!home.contains("old teaser"));
        assert!(home.contains("Newest"));

        let archives = read_page(tmp.path(), ARCHIVE_PAGE);
        assert!(archives.starts_with('A') && archives.ends_with("</div>Z"));
        assert!(!archives.contains("stale"));

        assert_eq!(report.listings.len(), 3);
        let tag_names: Vec<&str> = report.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tag_names, vec!["notes", "rust"]);
        assert_eq!(report.feed_entries, 3);
        assert!(tmp.path().join("tag/rust/index.html").exists());
        assert!(tmp.path().join(FEED_FILE).exists());
    }

    #[test]
    fn regenerate_twice_is_byte_identical() {
        let tmp = setup_site();
        let config = SiteConfig::default();
        let site = site(tmp.path(), &config);
        let articles = sample();

        regenerate(&site, &articles).unwrap();
        let files = [HOME_PAGE, ARCHIVE_PAGE, TAG_INDEX_PAGE, FEED_FILE, "tag/rust/index.html"];
        let first: Vec<String> = files.iter().map(|f| read_page(tmp.path(), f)).collect();

        regenerate(&site, &articles).unwrap();
        let second: Vec<String> = files.iter().map(|f| read_page(tmp.path(), f)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_listing_page_names_path() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let err = regenerate(&site(tmp.path(), &config), &sample()).unwrap_err();
        match err {
            GenerateError::Io { path, .. } => assert!(path.ends_with(HOME_PAGE)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn listing_without_marker_reported() {
        let tmp = setup_site();
        fs::write(tmp.path().join(ARCHIVE_PAGE), "<html>no region</html>").unwrap();
        let config = SiteConfig::default();
        let err = regenerate(&site(tmp.path(), &config), &sample()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Template {
                source: TemplateError::RegionNotFound { region: "archives", .. },
                ..
            }
        ));
    }

    #[test]
    fn rebuild_uses_published_pages() {
        let tmp = setup_site();
        write_post(tmp.path(), "first", "First", "2024-01-01", &["a"]);
        write_post(tmp.path(), "second", "Second", "2024-02-01", &["a", "b"]);

        let config = SiteConfig::default();
        let report = rebuild(&site(tmp.path(), &config)).unwrap();
        assert_eq!(report.tags.len(), 2);
        assert_eq!(report.tags[0].articles, 2);

        let home = read_page(tmp.path(), HOME_PAGE);
        assert!(home.find("Second").unwrap() < home.find("First").unwrap());
    }

    #[test]
    fn publish_adds_to_existing_listings() {
        let tmp = setup_site();
        write_post(tmp.path(), "earlier", "Earlier", "2023-06-01", &[]);

        let config = SiteConfig::default();
        let report = publish(&site(tmp.path(), &config), &article("Later", "2024-06-01", &[])).unwrap();

        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].path, PathBuf::from("post/later/index.html"));
        let archives = read_page(tmp.path(), ARCHIVE_PAGE);
        assert!(archives.contains("Earlier") && archives.contains("Later"));
    }
}
