use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::{Element, RenderError, ansi_to_html, escape_for_html};

const MIMETYPES: &[&str] = &["text/plain", "application/vnd.jupyter.console-text"];

/// Plain and console text, with ANSI colours turned into styled spans.
///
/// The payload is escaped before colour conversion, so markup in the text is
/// always shown literally.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, _mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut pre = Element::new("pre")?;
        pre.set_inner_html(&ansi_to_html(&escape_for_html(data)))?;

        let mut widget = Widget::new();
        widget.node_mut().append_child(pre);
        Ok(widget)
    }
}
