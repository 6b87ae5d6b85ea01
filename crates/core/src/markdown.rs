//! Markdown-to-HTML conversion and heading ids.

use crate::dom::Element;
use crate::slug::Slugger;
use crate::{RenderError, SourceLocation};
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Options for the Markdown converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists, autolinks).
    pub gfm: bool,
    /// Pass raw HTML (including scripts) and any link protocol through unchanged.
    pub raw_html: bool,
    /// Give headings an `id` derived from their text.
    pub heading_ids: bool,
}

impl MarkdownOptions {
    /// Notebook defaults: GFM, trusted raw HTML, heading ids.
    pub const fn notebook() -> Self {
        Self {
            gfm: true,
            raw_html: true,
            heading_ids: true,
        }
    }

    /// Plain CommonMark with raw HTML escaped.
    pub const fn commonmark() -> Self {
        Self {
            gfm: false,
            raw_html: false,
            heading_ids: false,
        }
    }

    /// Convert to markdown-rs `Options`.
    ///
    /// Math constructs stay disabled: math is protected before conversion.
    pub fn to_markdown(self) -> markdown::Options {
        let parse = if self.gfm {
            markdown::ParseOptions::gfm()
        } else {
            markdown::ParseOptions::default()
        };
        let mut compile = if self.gfm {
            markdown::CompileOptions::gfm()
        } else {
            markdown::CompileOptions::default()
        };
        compile.allow_dangerous_html = self.raw_html;
        compile.allow_dangerous_protocol = self.raw_html;
        compile.gfm_tagfilter = self.gfm && !self.raw_html;

        markdown::Options { parse, compile }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self::notebook()
    }
}

/// Converts Markdown to an HTML string.
pub fn markdown_to_html(input: &str, options: &MarkdownOptions) -> Result<String, RenderError> {
    markdown::to_html_with_options(input, &options.to_markdown()).map_err(|err| {
        let location = message_location(&err);
        RenderError::Markdown {
            message: err.to_string(),
            location,
        }
    })
}

/// Sets an `id` on every heading below `root` that lacks one.
///
/// Ids already present are reserved first so generated ones never collide.
pub fn assign_heading_ids(root: &mut Element) {
    let mut slugger = Slugger::new();
    root.visit_elements_mut(&mut |el| {
        if HEADINGS.contains(&el.tag_name())
            && let Some(id) = el.attribute("id")
        {
            slugger.reserve(id);
        }
    });
    root.visit_elements_mut(&mut |el| {
        if HEADINGS.contains(&el.tag_name()) && el.attribute("id").is_none() {
            let slug = slugger.next_slug(&el.text_content());
            el.set_attribute("id", slug);
        }
    });
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
