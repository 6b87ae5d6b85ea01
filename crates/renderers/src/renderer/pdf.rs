use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::{ElementOptions, RenderError, create_element};

const MIMETYPES: &[&str] = &["application/pdf"];

/// PDF documents, as a link that opens the data URI in a new browsing context.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, _mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut link = create_element("a", ElementOptions::new().text("View PDF"))?;
        link.set_attribute("href", format!("data:application/pdf;base64,{}", data));
        link.set_attribute("target", "_blank");

        let mut widget = Widget::new();
        widget.node_mut().append_child(link);
        Ok(widget)
    }
}
