#![deny(missing_docs)]
//! rendermime renderers: MIME-type keyed rendering of notebook outputs.
//!
//! ```
//! use rendermime_renderers::{Document, MimeBundle, NoopTypesetter, Script, default_rendermime};
//!
//! let rendermime = default_rendermime();
//! let bundle: MimeBundle = [("text/plain", "x = 2"), ("text/html", "<b>x</b> = 2")]
//!     .into_iter()
//!     .collect();
//!
//! let (mimetype, widget) = rendermime.render_bundle(&bundle).unwrap().unwrap();
//! assert_eq!(mimetype, "text/html");
//!
//! let mut document = Document::new(|_: &Script| {}, NoopTypesetter);
//! document.attach(widget);
//! assert_eq!(document.inner_html(), "<div><b>x</b> = 2</div>");
//! ```

/// MIME bundles.
pub mod bundle;
/// Hosting document, script engine and typesetter seams.
pub mod host;
/// MIME type registry.
pub mod registry;
/// The standard renderers.
pub mod renderer;
/// Rendered output handles.
pub mod widget;

pub use bundle::MimeBundle;
pub use host::{Document, NoopTypesetter, Script, ScriptEngine, Typesetter, WidgetId};
pub use registry::{
    DEFAULT_ORDER, RenderMime, RenderMimeConfig, default_order, default_renderers,
    default_rendermime,
};
pub use renderer::{
    HtmlRenderer, ImageRenderer, JavascriptRenderer, LatexRenderer, MarkdownRenderer, PdfRenderer,
    Renderer, SvgRenderer, TextRenderer, strip_latex_delimiters,
};
pub use widget::{AttachCallback, Widget};
