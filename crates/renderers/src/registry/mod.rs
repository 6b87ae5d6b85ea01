//! MIME-type dispatch.
//!
//! A [`RenderMime`] maps each MIME type to one renderer and ranks MIME types
//! by preference, so that a bundle of alternative representations renders
//! through its richest supported entry.

/// Standard renderers and preference order.
pub mod defaults;
/// Registry configuration.
pub mod types;

pub use defaults::{DEFAULT_ORDER, default_order, default_renderers, default_rendermime};
pub use types::RenderMimeConfig;

use crate::bundle::MimeBundle;
use crate::renderer::Renderer;
use crate::widget::Widget;
use rendermime_core::RenderError;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of renderers keyed by MIME type.
#[derive(Clone, Default)]
pub struct RenderMime {
    order: Vec<String>,
    renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl RenderMime {
    /// An empty registry using the configured preference order.
    ///
    /// The Markdown options only take effect through [`RenderMime::from_config`].
    pub fn new(config: RenderMimeConfig) -> Self {
        Self {
            order: config.order,
            renderers: HashMap::new(),
        }
    }

    /// A registry with every standard renderer, configured by `config`.
    pub fn from_config(config: RenderMimeConfig) -> Self {
        let markdown = config.markdown;
        let mut rendermime = Self::new(config);
        for renderer in default_renderers(markdown) {
            rendermime.register(renderer);
        }
        rendermime
    }

    /// A registry with every standard renderer and the default order.
    pub fn with_defaults() -> Self {
        default_rendermime()
    }

    /// Registers a renderer for each of its MIME types.
    ///
    /// Later registrations replace earlier ones. MIME types missing from the
    /// preference order are appended to it.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        for &mimetype in renderer.mimetypes() {
            if self.renderers.contains_key(mimetype) {
                log::warn!("replacing renderer for {}", mimetype);
            }
            if !self.order.iter().any(|m| m == mimetype) {
                self.order.push(mimetype.to_string());
            }
            self.renderers
                .insert(mimetype.to_string(), Arc::clone(&renderer));
        }
    }

    /// The renderer for a MIME type.
    pub fn renderer(&self, mimetype: &str) -> Option<&Arc<dyn Renderer>> {
        self.renderers.get(mimetype)
    }

    /// Registered MIME types in preference order.
    pub fn mimetypes(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|m| self.renderers.contains_key(m.as_str()))
            .cloned()
            .collect()
    }

    /// Renders one payload with the renderer registered for `mimetype`.
    pub fn render(&self, mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let renderer = self
            .renderer(mimetype)
            .ok_or_else(|| RenderError::UnsupportedMimetype(mimetype.to_string()))?;
        log::debug!("rendering {} ({} bytes)", mimetype, data.len());
        renderer.render(mimetype, data)
    }

    /// The most preferred registered MIME type present in `bundle`.
    pub fn preferred_mimetype(&self, bundle: &MimeBundle) -> Option<&str> {
        self.order
            .iter()
            .map(String::as_str)
            .find(|m| self.renderers.contains_key(*m) && bundle.contains(m))
    }

    /// Renders the preferred entry of `bundle`, or `None` when no entry is supported.
    pub fn render_bundle(
        &self,
        bundle: &MimeBundle,
    ) -> Result<Option<(String, Widget)>, RenderError> {
        let Some(mimetype) = self.preferred_mimetype(bundle) else {
            log::debug!("no renderer for any of {} bundle entries", bundle.len());
            return Ok(None);
        };
        let data = bundle.get(mimetype).unwrap_or_default();
        let widget = self.render(mimetype, data)?;
        Ok(Some((mimetype.to_string(), widget)))
    }
}

impl std::fmt::Debug for RenderMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderMime")
            .field("order", &self.order)
            .field("mimetypes", &self.mimetypes())
            .finish()
    }
}
