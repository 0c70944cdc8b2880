//! # notesite
//!
//! Publishes a directory of loosely formatted notes as a static blog. Notes
//! carry no front matter: each note's title, date, tags and teaser are found
//! in its text, and its body goes through a small markup converter.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan       notes/  →  Vec<Article>     (text → metadata + HTML body)
//! 2. Write      articles → post/<slug>/     (one page per article)
//! 3. Regenerate post/   →  listings, tags, atom.xml
//! ```
//!
//! Step 3 reads the published `post/` pages back, so it can run on its own
//! (`notesite update`) after the notes are gone. It rewrites only the
//! generated region of the theme's home, archive and tag index pages and
//! leaves every other byte alone.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Article discovery from notes or published pages, slug assignment, canonical order |
//! | [`extract`] | Title, date, tags and teaser heuristics; reading fields back from pages |
//! | [`markup`] | Headings, emphasis, links and code to HTML, then paragraph wrapping |
//! | [`slug`] | Deterministic URL path segments from titles and tags |
//! | [`generate`] | Article, tag and listing pages; runs the import and update modes |
//! | [`template`] | Named regions inside theme pages, refilled in place |
//! | [`feed`] | Atom feed |
//! | [`config`] | `notesite.json` loading and validation |
//! | [`types`] | `Article` and `Tag`, shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Idempotent Output
//!
//! Running twice on the same notes produces byte-identical files. Discovery
//! is sorted by file name, ties in date keep discovery order, and the feed's
//! timestamps come from article dates rather than the clock.
//!
//! ## Regions Over Regeneration
//!
//! Theme pages are owned by the theme. The generator knows only the opening
//! and closing markers of the region it fills, and a page missing either
//! marker is an error rather than a silent pass.

pub mod config;
pub mod extract;
pub mod feed;
pub mod generate;
pub mod markup;
pub mod output;
pub mod scan;
pub mod slug;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
