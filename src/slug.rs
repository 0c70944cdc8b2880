//! Title → URL path segment.
//!
//! Every directory and link the generator creates goes through [`normalize`]:
//! `post/<slug>/` for articles and `tag/<slug>/` for tags.
//!
//! ```text
//! "Hello World"        → "hello-world"
//! "Rust & Safety!"     → "rust-safety"
//! "a  --  b"           → "a-b"
//! "笔记 2024"           → "笔记-2024"
//! ```
//!
//! Distinct titles can normalize to the same slug. This module does not
//! detect that; [`crate::scan`] disambiguates within a collection.

use regex::Regex;
use std::sync::OnceLock;

static STRIP_REGEX: OnceLock<Regex> = OnceLock::new();
static COLLAPSE_REGEX: OnceLock<Regex> = OnceLock::new();
static VALID_REGEX: OnceLock<Regex> = OnceLock::new();

fn strip_regex() -> &'static Regex {
    STRIP_REGEX.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

fn collapse_regex() -> &'static Regex {
    COLLAPSE_REGEX.get_or_init(|| Regex::new(r"[-\s]+").unwrap())
}

fn valid_regex() -> &'static Regex {
    VALID_REGEX.get_or_init(|| Regex::new(r"^[\w-]+$").unwrap())
}

/// Normalize a title into a slug.
///
/// Lowercases, drops uppercase characters with no lowercase form (`ℂ`) and
/// everything that is not a word character, whitespace or hyphen, then
/// collapses each run of whitespace and hyphens into a single
/// hyphen. Idempotent: `normalize(&normalize(t)) == normalize(t)`.
pub fn normalize(title: &str) -> String {
    let lowered: String = title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_uppercase())
        .collect();
    let stripped = strip_regex().replace_all(&lowered, "");
    collapse_regex().replace_all(&stripped, "-").into_owned()
}

/// Whether `slug` is non-empty and made only of lowercase word characters
/// and hyphens.
pub fn is_valid(slug: &str) -> bool {
    valid_regex().is_match(slug) && !slug.chars().any(char::is_uppercase)
}
