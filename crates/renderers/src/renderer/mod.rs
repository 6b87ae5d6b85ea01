//! MIME-type keyed renderers.
//!
//! Each renderer is a stateless mapping from `(mimetype, data)` to a
//! [`Widget`]. Renderers never choose their own MIME type: the registry calls
//! `render` with one of the types the renderer declares.

mod html;
mod image;
mod javascript;
mod latex;
mod markdown;
mod pdf;
mod svg;
mod text;

pub use html::HtmlRenderer;
pub use image::ImageRenderer;
pub use javascript::JavascriptRenderer;
pub use latex::{LatexRenderer, strip_latex_delimiters};
pub use markdown::MarkdownRenderer;
pub use pdf::PdfRenderer;
pub use svg::SvgRenderer;
pub use text::TextRenderer;

use crate::widget::Widget;
use rendermime_core::RenderError;

/// A renderer for one family of MIME types.
pub trait Renderer: Send + Sync {
    /// The MIME types this renderer handles, in a fixed order.
    fn mimetypes(&self) -> &'static [&'static str];

    /// Renders `data`, which the caller declares to be of type `mimetype`.
    fn render(&self, mimetype: &str, data: &str) -> Result<Widget, RenderError>;
}

/// Typesets the widget's math each time it is attached.
fn typeset_on_attach(widget: &mut Widget) {
    widget.on_after_attach(|node, typesetter| {
        log::debug!("typesetting attached <{}>", node.tag_name());
        typesetter.typeset(node);
    });
}

/// A widget holding parsed markup whose scripts run on attach and whose
/// math is typeset on attach.
fn html_widget(html: &str) -> Result<Widget, RenderError> {
    let mut widget = Widget::new();
    widget.node_mut().set_inner_html(html)?;
    widget.set_runs_scripts(true);
    typeset_on_attach(&mut widget);
    Ok(widget)
}
