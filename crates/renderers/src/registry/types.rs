//! Registry configuration.

use super::defaults::default_order;
use rendermime_core::MarkdownOptions;
use serde::{Deserialize, Serialize};

/// Configuration for a [`RenderMime`](super::RenderMime) registry, as passed from JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderMimeConfig {
    /// MIME types from most to least preferred.
    pub order: Vec<String>,
    /// Options for the Markdown renderer.
    pub markdown: MarkdownOptions,
}

impl Default for RenderMimeConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            markdown: MarkdownOptions::default(),
        }
    }
}
