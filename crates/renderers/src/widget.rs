//! The output handle renderers return.

use crate::host::{Script, Typesetter};
use rendermime_core::Element;

/// Callback fired each time a widget is attached to a [`Document`](crate::Document).
pub type AttachCallback = Box<dyn Fn(&Element, &dyn Typesetter)>;

/// A rendered output: a container `div` plus its attachment behaviour.
pub struct Widget {
    node: Element,
    runs_scripts: bool,
    scripts_started: bool,
    after_attach: Vec<AttachCallback>,
}

impl Widget {
    /// An empty widget with inert scripts and no callbacks.
    pub fn new() -> Self {
        Self {
            node: Element::div(),
            runs_scripts: false,
            scripts_started: false,
            after_attach: Vec::new(),
        }
    }

    /// The container element.
    pub fn node(&self) -> &Element {
        &self.node
    }

    /// Mutable access to the container element.
    pub fn node_mut(&mut self) -> &mut Element {
        &mut self.node
    }

    /// Consumes the widget, returning its container element.
    pub fn into_node(self) -> Element {
        self.node
    }

    /// Whether `<script>` elements inside run when the widget is first attached.
    ///
    /// Markup parsed the way `innerHTML` parses it leaves scripts inert; markup
    /// inserted as a fragment or built element by element runs them.
    pub fn runs_scripts(&self) -> bool {
        self.runs_scripts
    }

    /// Marks the widget's scripts as runnable on attach.
    pub fn set_runs_scripts(&mut self, runs_scripts: bool) {
        self.runs_scripts = runs_scripts;
    }

    /// Registers a callback for every future attachment.
    pub fn on_after_attach(&mut self, callback: impl Fn(&Element, &dyn Typesetter) + 'static) {
        self.after_attach.push(Box::new(callback));
    }

    /// Scripts to execute for this attachment. Empty after the first call.
    pub(crate) fn take_pending_scripts(&mut self) -> Vec<Script> {
        if !self.runs_scripts || self.scripts_started {
            return Vec::new();
        }
        self.scripts_started = true;
        self.node
            .elements_by_tag_name("script")
            .into_iter()
            .filter_map(Script::from_element)
            .collect()
    }

    pub(crate) fn notify_attached(&self, typesetter: &dyn Typesetter) {
        for callback in &self.after_attach {
            callback(&self.node, typesetter);
        }
    }
}

impl Default for Widget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("node", &self.node)
            .field("runs_scripts", &self.runs_scripts)
            .field("scripts_started", &self.scripts_started)
            .field("after_attach", &self.after_attach.len())
            .finish()
    }
}
