use crate::renderer::{Renderer, html_widget};
use crate::widget::Widget;
use rendermime_core::{
    MarkdownOptions, RenderError, assign_heading_ids, markdown_to_html, remove_math, replace_math,
};

const MIMETYPES: &[&str] = &["text/markdown"];

/// Markdown with embedded math.
///
/// Math spans are swapped for placeholders before conversion and restored
/// verbatim afterwards, so the typesetter sees them exactly as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    /// A renderer using the given converter options.
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// The converter options in use.
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Renderer for MarkdownRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, _mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let protected = remove_math(data);
        let html = markdown_to_html(&protected.text, &self.options)?;
        let html = replace_math(&html, &protected.math);

        let mut widget = html_widget(&html)?;
        if self.options.heading_ids {
            assign_heading_ids(widget.node_mut());
        }
        Ok(widget)
    }
}
