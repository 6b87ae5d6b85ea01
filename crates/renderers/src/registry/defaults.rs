//! The standard renderer set and preference order.

use super::RenderMime;
use super::types::RenderMimeConfig;
use crate::renderer::{
    HtmlRenderer, ImageRenderer, JavascriptRenderer, LatexRenderer, MarkdownRenderer, PdfRenderer,
    Renderer, SvgRenderer, TextRenderer,
};
use rendermime_core::MarkdownOptions;
use std::sync::Arc;

/// Default preference order: richest representation first, plain text last.
pub const DEFAULT_ORDER: &[&str] = &[
    "application/javascript",
    "text/javascript",
    "text/html",
    "text/markdown",
    "text/latex",
    "image/svg+xml",
    "image/png",
    "image/jpeg",
    "image/gif",
    "application/pdf",
    "application/vnd.jupyter.console-text",
    "text/plain",
];

/// [`DEFAULT_ORDER`] as owned strings.
pub fn default_order() -> Vec<String> {
    DEFAULT_ORDER.iter().map(|m| m.to_string()).collect()
}

/// The eight standard renderers.
pub fn default_renderers(markdown: MarkdownOptions) -> Vec<Arc<dyn Renderer>> {
    vec![
        Arc::new(JavascriptRenderer),
        Arc::new(HtmlRenderer),
        Arc::new(MarkdownRenderer::new(markdown)),
        Arc::new(LatexRenderer),
        Arc::new(SvgRenderer),
        Arc::new(ImageRenderer),
        Arc::new(PdfRenderer),
        Arc::new(TextRenderer),
    ]
}

/// A registry with every standard renderer and the default order.
///
/// ```
/// use rendermime_renderers::default_rendermime;
///
/// let rendermime = default_rendermime();
/// assert_eq!(rendermime.mimetypes().last().map(String::as_str), Some("text/plain"));
/// ```
pub fn default_rendermime() -> RenderMime {
    RenderMime::from_config(RenderMimeConfig::default())
}
