use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::{Element, RenderError};

const MIMETYPES: &[&str] = &["text/javascript", "application/javascript"];

/// JavaScript, as a `<script>` element that runs once attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavascriptRenderer;

impl Renderer for JavascriptRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut script = Element::new("script")?;
        script.set_attribute("type", mimetype);
        script.set_text_content(data);

        let mut widget = Widget::new();
        widget.node_mut().append_child(script);
        widget.set_runs_scripts(true);
        Ok(widget)
    }
}
