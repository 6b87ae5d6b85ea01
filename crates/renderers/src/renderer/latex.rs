use crate::renderer::{Renderer, typeset_on_attach};
use crate::widget::Widget;
use once_cell::sync::Lazy;
use regex::Regex;
use rendermime_core::RenderError;
use std::borrow::Cow;

const MIMETYPES: &[&str] = &["text/latex"];

static LATEX_DELIMITERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<br>|\$\$|^\$|\$$|\\\(|\\\)|\\\[|\\\]").expect("valid delimiter regex")
});

/// Removes `<br>`, `$$`, a leading or trailing `$`, and `\(`, `\)`, `\[`, `\]`.
pub fn strip_latex_delimiters(text: &str) -> Cow<'_, str> {
    LATEX_DELIMITERS.replace_all(text, "")
}

/// LaTeX, prepared for the typesetter that runs on attach.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer;

impl Renderer for LatexRenderer {
    fn mimetypes(&self) -> &'static [&'static str] {
        MIMETYPES
    }

    fn render(&self, _mimetype: &str, data: &str) -> Result<Widget, RenderError> {
        let mut widget = Widget::new();
        widget
            .node_mut()
            .set_inner_html(&strip_latex_delimiters(data))?;
        typeset_on_attach(&mut widget);
        Ok(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_delimiter_kind() {
        assert_eq!(strip_latex_delimiters("$$x^2$$"), "x^2");
        assert_eq!(strip_latex_delimiters("$x$"), "x");
        assert_eq!(strip_latex_delimiters("\\(a\\) and \\[b\\]"), "a and b");
        assert_eq!(strip_latex_delimiters("a<br>b"), "ab");
    }

    #[test]
    fn inner_dollars_survive() {
        assert_eq!(strip_latex_delimiters("a $ b"), "a $ b");
    }
}
