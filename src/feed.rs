//! Atom feed (`atom.xml`).
//!
//! The feed is rebuilt wholesale on every run from the newest
//! `feed.count` articles. Entry timestamps are the article date plus the
//! configured time of day, and the feed's own `updated` is the newest
//! entry's timestamp, so an unchanged collection produces an identical file.
//! Only the rights line depends on the build date (its year).

use chrono::{Datelike, NaiveDate};
use maud::html;

use crate::config::SiteConfig;
use crate::types::{Article, DATE_FORMAT};

/// XML-escape text for element content and attribute values.
fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Wrap `text` in a CDATA section, splitting any embedded `]]>`.
fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

fn timestamp(date: NaiveDate, config: &SiteConfig) -> String {
    format!("{}T{}", date.format(DATE_FORMAT), config.feed.time_of_day)
}

/// Render the feed for `articles`, which must be in canonical order.
pub fn render_feed(articles: &[Article], config: &SiteConfig, today: NaiveDate) -> String {
    let site = &config.site;
    let base = site.base_url.trim_end_matches('/');
    let entries = &articles[..articles.len().min(config.feed.count)];
    let updated = timestamp(entries.first().map(|a| a.date).unwrap_or(today), config);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
    xml.push_str(&format!(
        r#"    <id>{base}</id>
    <title>{title}</title>
    <updated>{updated}</updated>
    <generator>{generator}</generator>
    <link rel="alternate" href="{base}"/>
    <link rel="self" href="{base}/atom.xml"/>
    <subtitle>{subtitle}</subtitle>
    <logo>{base}/images/avatar.png</logo>
    <icon>{base}/favicon.ico</icon>
    <rights>All rights reserved {year}, {author}</rights>"#,
        base = escape(base),
        title = escape(&site.title),
        generator = escape(&config.feed.generator),
        subtitle = escape(&site.description),
        year = today.year(),
        author = escape(&site.author),
    ));

    for article in entries {
        let link = escape(&format!("{base}/{}", article.path()));
        let summary = html! { p { (article.summary) } }.into_string();
        xml.push_str(&format!(
            r#"
    <entry>
        <title type="html">{title}</title>
        <id>{link}</id>
        <link href="{link}">
        </link>
        <updated>{updated}</updated>
        <summary type="html">{summary}</summary>
    </entry>"#,
            title = cdata(&article.title),
            updated = timestamp(article.date, config),
            summary = cdata(&summary),
        ));
    }

    xml.push_str("\n</feed>\n");
    xml
}
