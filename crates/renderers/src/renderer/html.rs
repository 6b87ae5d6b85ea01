use crate::renderer::{Renderer, html_widget};
use crate::widget::Widget;
use rendermime_core::RenderError;

const MIMETYPES: &[&str] = &["text/html"];

/// Raw HTML.
///
/// Scripts in the payload run when the widget is attached: the content is
/// trusted, exactly as a notebook trusts its own outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, _mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        html_widget(data)
    }
}
