//! Named insertion points inside hand-authored pages.
//!
//! The home, archive and tag index pages belong to the site theme: they carry
//! styling, navigation and scripts the generator knows nothing about. Only one
//! delimited region of each page is generated. A [`PageTemplate`] splits an
//! existing page into literal text and named slots, so a slot can be refilled
//! while every byte outside it is written back unchanged.
//!
//! ```text
//! ...theme markup...<div class="archives-container">[slot]</div>...theme markup...
//!                   └──────────── open ───────────┘      └close┘
//! ```
//!
//! A region's closing marker is the first occurrence after its opening
//! marker. A page that lacks a marker fails to parse with
//! [`TemplateError::RegionNotFound`]; it is never silently left as is.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("Region '{region}' not found: missing marker {marker}")]
    RegionNotFound {
        region: &'static str,
        marker: &'static str,
    },
    #[error("Regions '{0}' and '{1}' overlap")]
    Overlap(&'static str, &'static str),
    #[error("Template has no region '{0}'")]
    UnknownRegion(String),
    #[error("Content for region '{0}' contains its closing marker")]
    MarkerInContent(&'static str),
}

/// A delimited region: everything between `open` and the next `close`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub open: &'static str,
    pub close: &'static str,
}

/// Article teasers on `index.html`.
pub const HOME: Region = Region {
    name: "home",
    open: r#"<div class="content-container" data-aos="fade-up">"#,
    close: r#"<div class="pagination-container">"#,
};

/// Year-grouped listing on `archives/index.html`.
pub const ARCHIVES: Region = Region {
    name: "archives",
    open: r#"<div class="archives-container">"#,
    close: "</div>",
};

/// Tag cloud on `tags/index.html`.
pub const TAGS: Region = Region {
    name: "tags",
    open: r#"<div class="tags-container">"#,
    close: "</div>",
};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot { region: Region, content: String },
}

/// A page split into literal text and fillable slots.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplate {
    segments: Vec<Segment>,
}

impl PageTemplate {
    /// Split `text` around each of `regions`.
    ///
    /// Slots start out holding their current content, so rendering an
    /// unfilled template reproduces `text` exactly.
    pub fn parse(text: &str, regions: &[Region]) -> Result<Self, TemplateError> {
        // (content start, content end, region)
        let mut spans: Vec<(usize, usize, Region)> = Vec::with_capacity(regions.len());
        for region in regions {
            let open = text
                .find(region.open)
                .ok_or(TemplateError::RegionNotFound {
                    region: region.name,
                    marker: region.open,
                })?;
            let start = open + region.open.len();
            let end = text[start..]
                .find(region.close)
                .map(|i| start + i)
                .ok_or(TemplateError::RegionNotFound {
                    region: region.name,
                    marker: region.close,
                })?;
            spans.push((start, end, *region));
        }
        spans.sort_by_key(|(start, _, _)| *start);

        for pair in spans.windows(2) {
            let (_, prev_end, prev) = pair[0];
            let (next_start, _, next) = pair[1];
            if next_start - next.open.len() < prev_end + prev.close.len() {
                return Err(TemplateError::Overlap(prev.name, next.name));
            }
        }

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut cursor = 0;
        for (start, end, region) in spans {
            segments.push(Segment::Literal(text[cursor..start].to_string()));
            segments.push(Segment::Slot {
                region,
                content: text[start..end].to_string(),
            });
            cursor = end;
        }
        segments.push(Segment::Literal(text[cursor..].to_string()));

        Ok(Self { segments })
    }

    /// Replace the content of the named slot.
    pub fn fill(&mut self, name: &str, html: &str) -> Result<(), TemplateError> {
        let slot = self
            .segments
            .iter_mut()
            .find_map(|segment| match segment {
                Segment::Slot { region, content } if region.name == name => {
                    Some((region, content))
                }
                _ => None,
            });

        match slot {
            Some((region, _)) if html.contains(region.close) => {
                Err(TemplateError::MarkerInContent(region.name))
            }
            Some((_, content)) => {
                *content = html.to_string();
                Ok(())
            }
            None => Err(TemplateError::UnknownRegion(name.to_string())),
        }
    }

    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Slot { content, .. } => content.as_str(),
            })
            .collect()
    }
}

/// Parse `text`, fill one region, and render.
pub fn replace_region(text: &str, region: Region, html: &str) -> Result<String, TemplateError> {
    let mut template = PageTemplate::parse(text, &[region])?;
    template.fill(region.name, html)?;
    Ok(template.render())
}
