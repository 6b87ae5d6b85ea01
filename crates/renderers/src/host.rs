//! The hosting document: attachment lifecycle, scripts and typesetting.
//!
//! Renderers never execute anything themselves. A widget is inert until the
//! host attaches it to a [`Document`]; attaching runs the widget's scripts
//! through the host's [`ScriptEngine`] (once per widget) and then fires its
//! after-attach callbacks (once per attachment), which is where math gets
//! handed to the [`Typesetter`].

use crate::widget::Widget;
use rendermime_core::Element;

/// JavaScript MIME types a browser executes; `module` covers ES modules.
const JAVASCRIPT_TYPES: &[&str] = &[
    "application/ecmascript",
    "application/javascript",
    "application/x-ecmascript",
    "application/x-javascript",
    "module",
    "text/ecmascript",
    "text/javascript",
    "text/jscript",
    "text/x-ecmascript",
    "text/x-javascript",
];

/// A script ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Value of the `type` attribute (empty when absent).
    pub mimetype: String,
    /// Script source.
    pub source: String,
}

impl Script {
    /// Builds a runnable script from a `<script>` element, or `None` for
    /// data blocks such as `type="math/tex"`.
    pub fn from_element(el: &Element) -> Option<Self> {
        let mimetype = el.attribute("type").unwrap_or_default().trim();
        if !is_javascript_type(mimetype) {
            return None;
        }
        Some(Self {
            mimetype: mimetype.to_string(),
            source: el.text_content(),
        })
    }
}

/// True for an empty type or any JavaScript MIME type.
pub fn is_javascript_type(mimetype: &str) -> bool {
    let essence = mimetype.split(';').next().unwrap_or_default().trim();
    essence.is_empty()
        || JAVASCRIPT_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence))
}

/// Runs scripts on behalf of the host.
pub trait ScriptEngine {
    /// Executes one script. Failures are the engine's to report.
    fn execute(&self, script: &Script);
}

impl<F> ScriptEngine for F
where
    F: Fn(&Script),
{
    fn execute(&self, script: &Script) {
        (self)(script)
    }
}

/// Typesets delimited math in place.
pub trait Typesetter {
    /// Typesets the math below `root`. Fire-and-forget.
    fn typeset(&self, root: &Element);
}

/// Typesetter for hosts without a math engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTypesetter;

impl Typesetter for NoopTypesetter {
    fn typeset(&self, _root: &Element) {}
}

/// Handle for an attached widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// The live document widgets are attached to.
pub struct Document {
    engine: Box<dyn ScriptEngine>,
    typesetter: Box<dyn Typesetter>,
    attached: Vec<(WidgetId, Widget)>,
    next_id: usize,
}

impl Document {
    /// Creates an empty document backed by the host's script engine and typesetter.
    pub fn new(
        engine: impl ScriptEngine + 'static,
        typesetter: impl Typesetter + 'static,
    ) -> Self {
        Self {
            engine: Box::new(engine),
            typesetter: Box::new(typesetter),
            attached: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a widget to the document.
    ///
    /// Scripts run first, in document order, and only on the widget's first
    /// attachment; after-attach callbacks then fire once for this attachment.
    pub fn attach(&mut self, mut widget: Widget) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;

        for script in widget.take_pending_scripts() {
            log::debug!("executing {} script", display_type(&script.mimetype));
            self.engine.execute(&script);
        }
        widget.notify_attached(self.typesetter.as_ref());

        self.attached.push((id, widget));
        id
    }

    /// Removes a widget, handing it back to the caller.
    pub fn detach(&mut self, id: WidgetId) -> Option<Widget> {
        let idx = self.attached.iter().position(|(wid, _)| *wid == id)?;
        Some(self.attached.remove(idx).1)
    }

    /// An attached widget.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.attached
            .iter()
            .find(|(wid, _)| *wid == id)
            .map(|(_, widget)| widget)
    }

    /// Number of attached widgets.
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// True when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Serialized body: every attached widget's container, in attachment order.
    pub fn inner_html(&self) -> String {
        self.attached
            .iter()
            .map(|(_, widget)| widget.node().outer_html())
            .collect()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

fn display_type(mimetype: &str) -> &str {
    if mimetype.is_empty() { "untyped" } else { mimetype }
}
