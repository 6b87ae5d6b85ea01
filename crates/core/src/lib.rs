#![deny(missing_docs)]
//! rendermime core: element tree, fragment parsing, ANSI and math helpers.

/// ANSI escape sequence to HTML conversion.
pub mod ansi;
/// Declarative element construction.
pub mod builder;
/// Owned element tree and HTML serialization.
pub mod dom;
/// Core error types.
pub mod error;
/// HTML fragment parsing.
pub mod fragment;
/// Markdown conversion and heading ids.
pub mod markdown;
/// Math placeholder protection for Markdown.
pub mod math;
/// Slug generation utilities.
pub mod slug;

pub use ansi::{ansi_to_html, escape_for_html};
pub use builder::{ElementOptions, create_element};
pub use dom::{Element, Node, is_valid_tag_name};
pub use error::{RenderError, SourceLocation};
pub use fragment::parse_fragment;
pub use markdown::{MarkdownOptions, assign_heading_ids, markdown_to_html};
pub use math::{ProtectedMath, remove_math, replace_math};
pub use slug::{Slugger, slugify};
