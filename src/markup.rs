//! Minimal markdown → HTML conversion.
//!
//! Not a CommonMark parser. Notes are rewritten by a
//! fixed sequence of regex passes, and the order of the passes matters:
//!
//! 1. `#`, `##`, `###` heading lines
//! 2. `**strong**`, then `*emphasis*` (strong first, so `**` is never read as
//!    two single markers)
//! 3. `[label](target)` links
//! 4. Fenced ```` ``` ```` blocks, then inline `` `code` `` spans
//! 5. Blank-line separated paragraphs. A segment that already starts with a
//!    tag produced above is left alone.
//!
//! Nested or overlapping constructs (a link label containing emphasis, a
//! `*` inside a code span) are converted on a best-effort basis.

use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
static PRE_BLOCK: OnceLock<Regex> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        [
            (r"(?m)^# (.+)$", "<h1>${1}</h1>"),
            (r"(?m)^## (.+)$", "<h2>${1}</h2>"),
            (r"(?m)^### (.+)$", "<h3>${1}</h3>"),
            (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
            (r"\*(.+?)\*", "<em>${1}</em>"),
            (r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}">${1}</a>"#),
            (r"```([^`]+)```", "<pre><code>${1}</code></pre>"),
            (r"`([^`]+)`", "<code>${1}</code>"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
    })
}

fn pre_block() -> &'static Regex {
    PRE_BLOCK.get_or_init(|| Regex::new(r"(?s)<pre><code>.*?</code></pre>").unwrap())
}

/// Convert a note body to an HTML fragment. `\r\n` counts as a newline.
pub fn to_html(source: &str) -> String {
    let mut html = crate::extract::normalize_newlines(source);
    for rule in rules() {
        html = rule
            .pattern
            .replace_all(&html, rule.replacement)
            .into_owned();
    }
    wrap_paragraphs(&html)
}

/// Split on blank lines and wrap plain segments in `<p>`.
///
/// Code blocks are kept whole so blank lines inside them survive.
fn wrap_paragraphs(html: &str) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut rest = 0;

    for block in pre_block().find_iter(html) {
        push_paragraphs(&html[rest..block.start()], &mut segments);
        segments.push(block.as_str().to_string());
        rest = block.end();
    }
    push_paragraphs(&html[rest..], &mut segments);

    segments.join("\n\n")
}

fn push_paragraphs(text: &str, segments: &mut Vec<String>) {
    for part in text.split("\n\n") {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.starts_with('<') {
            segments.push(part.to_string());
        } else {
            segments.push(format!("<p>{part}</p>"));
        }
    }
}
