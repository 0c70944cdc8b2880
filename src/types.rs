//! Shared types used across the pipeline.
//!
//! The scanner produces [`Article`]s in canonical order and every renderer
//! consumes them as a read-only slice. [`Tag`]s are never persisted: they are
//! recomputed from the article collection on each run.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Date format used everywhere a date is written out.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One published content unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// URL path segment under `post/`, unique within a collection
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    /// Labels as authored; order is preserved for display only
    pub tags: Vec<String>,
    /// Teaser text shown in listings and feed entries
    pub summary: String,
    /// Converted HTML fragment. Empty for articles re-read from rendered pages.
    pub body: String,
    /// Where the article came from. Never written to output.
    pub source: PathBuf,
}

impl Article {
    /// `YYYY-MM-DD` form of the publish date.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// The 4-digit year prefix of the date, used to group the archive.
    pub fn year(&self) -> String {
        self.date_string()[..4].to_string()
    }

    /// Site-relative directory of the article page, e.g. `post/hello-world/`.
    pub fn path(&self) -> String {
        format!("post/{}/", self.slug)
    }
}

/// A tag and the articles carrying it, in canonical order.
#[derive(Debug)]
pub struct Tag<'a> {
    pub name: String,
    pub slug: String,
    pub articles: Vec<&'a Article>,
}

impl<'a> Tag<'a> {
    /// Collect every distinct tag across `articles`, sorted by name.
    ///
    /// Tags are identified by slug, so `Rust` and `rust` are one tag; the
    /// first spelling encountered names it. Tags whose slug is empty cannot
    /// have a page and are left out. Articles keep the order they have in
    /// `articles`, so passing the canonical collection yields canonically
    /// ordered tag listings.
    pub fn collect(articles: &'a [Article]) -> Vec<Tag<'a>> {
        let mut by_slug: BTreeMap<String, Tag<'a>> = BTreeMap::new();
        for article in articles {
            for name in &article.tags {
                let slug = crate::slug::normalize(name);
                if slug.is_empty() {
                    continue;
                }
                let tag = by_slug.entry(slug.clone()).or_insert_with(|| Tag {
                    name: name.clone(),
                    slug,
                    articles: Vec::new(),
                });
                // A tag listed twice on one article still lists it once
                if !tag.articles.iter().any(|a| std::ptr::eq(*a, article)) {
                    tag.articles.push(article);
                }
            }
        }

        let mut tags: Vec<Tag<'a>> = by_slug.into_values().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::article;

    #[test]
    fn date_string_is_iso() {
        let a = article("Hello", "2023-05-01", &[]);
        assert_eq!(a.date_string(), "2023-05-01");
        assert_eq!(a.year(), "2023");
    }

    #[test]
    fn article_path_under_post() {
        let a = article("Hello World", "2023-05-01", &[]);
        assert_eq!(a.path(), "post/hello-world/");
    }

    #[test]
    fn tags_collected_alphabetically() {
        let articles = vec![
            article("One", "2024-01-02", &["rust", "notes"]),
            article("Two", "2024-01-01", &["notes", "zig"]),
        ];
        let tags = Tag::collect(&articles);
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["notes", "rust", "zig"]);
    }

    #[test]
    fn tag_lists_exactly_its_articles() {
        let articles = vec![
            article("One", "2024-01-03", &["rust"]),
            article("Two", "2024-01-02", &["zig"]),
            article("Three", "2024-01-01", &["rust", "zig"]),
        ];
        let tags = Tag::collect(&articles);
        let rust = tags.iter().find(|t| t.name == "rust").unwrap();
        let titles: Vec<&str> = rust.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Three"]);
    }

    #[test]
    fn duplicate_tag_on_one_article_counted_once() {
        let articles = vec![article("One", "2024-01-03", &["rust", "rust"])];
        let tags = Tag::collect(&articles);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].articles.len(), 1);
    }

    #[test]
    fn tags_differing_in_case_merge() {
        let articles = vec![
            article("One", "2024-01-03", &["Rust"]),
            article("Two", "2024-01-02", &["rust"]),
        ];
        let tags = Tag::collect(&articles);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Rust");
        assert_eq!(tags[0].articles.len(), 2);
    }

    #[test]
    fn tags_without_slug_skipped() {
        let articles = vec![article("One", "2024-01-03", &["!!!", "ok"])];
        let tags = Tag::collect(&articles);
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn tag_slug_is_normalized() {
        let articles = vec![article("One", "2024-01-03", &["Rust Lang"])];
        let tags = Tag::collect(&articles);
        assert_eq!(tags[0].slug, "rust-lang");
    }
}
