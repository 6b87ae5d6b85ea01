use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::{Element, RenderError};

const MIMETYPES: &[&str] = &["image/png", "image/jpeg", "image/gif"];

/// Base64 raster images, shown through a data URI. The payload is not decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenderer;

impl Renderer for ImageRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut img = Element::new("img")?;
        img.set_attribute("src", format!("data:{};base64,{}", mimetype, data));

        let mut widget = Widget::new();
        widget.node_mut().append_child(img);
        Ok(widget)
    }
}
