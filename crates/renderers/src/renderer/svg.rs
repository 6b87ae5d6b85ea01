use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::RenderError;

const MIMETYPES: &[&str] = &["image/svg+xml"];

/// Inline SVG markup. Fails when the payload holds no `<svg>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl Renderer for SvgRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut widget = Widget::new();
        widget.node_mut().set_inner_html(data)?;
        if widget.node().elements_by_tag_name("svg").is_empty() {
            return Err(RenderError::malformed(
                mimetype,
                "failed to create <svg> element",
            ));
        }
        Ok(widget)
    }
}
