//! Declarative element construction.

use crate::RenderError;
use crate::dom::{Element, Node};

/// Elements whose `value` option is reflected as an attribute.
const VALUE_ELEMENTS: &[&str] = &[
    "button", "data", "input", "li", "meter", "option", "output", "param", "progress", "select",
    "textarea",
];

/// Attributes and content for [`create_element`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementOptions {
    /// Space-delimited class list.
    pub class_name: Option<String>,
    /// Title attribute.
    pub title: Option<String>,
    /// Value for input-like elements; ignored elsewhere.
    pub value: Option<String>,
    /// Text content. Takes precedence over `children`.
    pub text: Option<String>,
    /// Child nodes, appended in order.
    pub children: Vec<Node>,
}

impl ElementOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class list.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Creates an element from a tag name and declarative options.
///
/// The element is detached; nothing else is touched.
///
/// ```
/// use rendermime_core::{ElementOptions, create_element};
///
/// let button = create_element(
///     "button",
///     ElementOptions::new().class_name("jp-Button primary").text("Run"),
/// )
/// .unwrap();
/// assert_eq!(
///     button.outer_html(),
///     "<button class=\"jp-Button primary\">Run</button>"
/// );
/// ```
pub fn create_element(tag: &str, options: ElementOptions) -> Result<Element, RenderError> {
    let mut el = Element::new(tag)?;
    let ElementOptions {
        class_name,
        title,
        value,
        text,
        children,
    } = options;

    if let Some(class_name) = class_name {
        el.set_attribute("class", class_name);
    }
    if let Some(title) = title {
        el.set_attribute("title", title);
    }
    if let Some(value) = value {
        if VALUE_ELEMENTS.contains(&el.tag_name()) {
            el.set_attribute("value", value);
        } else {
            log::debug!("ignoring value for <{}>", el.tag_name());
        }
    }

    match text {
        Some(text) => el.set_text_content(text),
        None => el.append_children(children),
    }
    Ok(el)
}
