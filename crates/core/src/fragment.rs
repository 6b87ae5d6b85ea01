//! HTML fragment parsing into the owned element tree.
//!
//! lol_html only tokenizes, so the tree is assembled from its callbacks: an
//! element handler opens nodes and registers an end-tag handler that closes
//! them, and document-level text/comment handlers fill in the content. An end
//! tag closes every element still open above its own element, which is how
//! unclosed children (`<p>` without `</p>`) get folded back into the tree.
//! Start tags that imply an end tag (`<li>` after `<li>`, a block after an
//! open `<p>`) close the implied element first, as the HTML tree builder does.

use crate::RenderError;
use crate::dom::{Element, Node};
use lol_html::html_content::{Element as HtmlElement, EndTag, TextType};
use lol_html::{EndTagHandler, RewriteStrSettings, doc_comments, doc_text, element, rewrite_str};
use std::cell::RefCell;
use std::rc::Rc;

/// Start tags that close an open `<p>`.
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "dd", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "li", "listing", "main", "menu", "nav", "ol",
    "p", "pre", "section", "summary", "table", "ul",
];

/// Elements an implied end tag never reaches past.
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
    "svg", "math",
];

/// Foreign roots whose tag and attribute names keep their source case.
const FOREIGN_ROOTS: &[&str] = &["svg", "math"];

struct TreeBuilder {
    stack: Vec<(usize, Element)>,
    next_id: usize,
    text: String,
    decode_text: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![(0, Element::unchecked("#fragment"))],
            next_id: 1,
            text: String::new(),
            decode_text: true,
        }
    }

    fn append(&mut self, node: Node) {
        if let Some((_, top)) = self.stack.last_mut() {
            top.append_child(node);
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.text);
        let text = if self.decode_text {
            html_escape::decode_html_entities(&raw).into_owned()
        } else {
            raw
        };
        self.append(Node::Text(text));
    }

    fn in_foreign_content(&self) -> bool {
        self.stack.iter().any(|(_, el)| {
            FOREIGN_ROOTS
                .iter()
                .any(|root| root.eq_ignore_ascii_case(el.tag_name()))
        })
    }

    /// Position of the innermost open element named in `tags`, unless one of
    /// `boundaries` is open above it.
    fn find_open(&self, tags: &[&str], boundaries: &[&str]) -> Option<usize> {
        for (pos, (_, el)) in self.stack.iter().enumerate().skip(1).rev() {
            let tag = el.tag_name();
            if tags.contains(&tag) {
                return Some(pos);
            }
            if boundaries.contains(&tag) {
                return None;
            }
        }
        None
    }

    /// Closes whatever an incoming `tag` start tag implicitly ends.
    fn close_implied(&mut self, tag: &str) {
        let implied = match tag {
            "li" => self.find_open(&["li"], &["ol", "ul", "td", "th", "table"]),
            "dd" | "dt" => self.find_open(&["dd", "dt"], &["dl", "td", "th", "table"]),
            "option" | "optgroup" => match self.stack.last() {
                Some((_, el)) if el.tag_name() == "option" => Some(self.stack.len() - 1),
                _ => None,
            },
            "tr" => self.find_open(&["tr"], &["table", "tbody", "thead", "tfoot"]),
            "td" | "th" => self.find_open(&["td", "th"], &["tr", "table"]),
            "tbody" | "thead" | "tfoot" => {
                self.find_open(&["tbody", "thead", "tfoot"], &["table"])
            }
            _ => None,
        };
        if let Some(pos) = implied {
            self.truncate(pos);
        }
        if tag == "optgroup"
            && let Some(pos) = self.find_open(&["optgroup"], &["select"])
        {
            self.truncate(pos);
        }
        if CLOSES_P.contains(&tag)
            && let Some(pos) = self.find_open(&["p"], SCOPE_BOUNDARIES)
        {
            self.truncate(pos);
        }
    }

    /// Pushes an element that can have content; returns the id its end tag closes.
    fn open(&mut self, el: Element) -> usize {
        self.flush_text();
        let id = self.next_id;
        self.next_id += 1;
        self.stack.push((id, el));
        id
    }

    fn leaf(&mut self, el: Element) {
        self.flush_text();
        self.append(Node::Element(el));
    }

    /// Closes the element with `id` and everything above it. A no-op when the
    /// element was already closed by an implied end tag.
    fn close(&mut self, id: usize) {
        if let Some(pos) = self.stack.iter().position(|(open, _)| *open == id) {
            self.truncate(pos);
        }
    }

    /// Pops elements until only `len` remain (never the fragment root).
    fn truncate(&mut self, len: usize) {
        self.flush_text();
        while self.stack.len() > len.max(1) {
            if let Some((_, el)) = self.stack.pop() {
                self.append(Node::Element(el));
            }
        }
    }

    fn push_text(&mut self, chunk: &str, decode: bool) {
        if self.text.is_empty() {
            self.decode_text = decode;
        }
        self.text.push_str(chunk);
    }

    fn comment(&mut self, text: String) {
        self.flush_text();
        self.append(Node::Comment(text));
    }

    fn finish(&mut self) -> Vec<Node> {
        self.truncate(1);
        self.stack
            .pop()
            .map(|(_, root)| root.into_children())
            .unwrap_or_default()
    }
}

/// Builds the tree element for a start tag, closing implied elements first.
fn start_element(builder: &mut TreeBuilder, el: &HtmlElement<'_, '_>) -> Element {
    let tag = el.tag_name();
    let foreign = builder.in_foreign_content() || FOREIGN_ROOTS.contains(&tag.as_str());
    if !builder.in_foreign_content() {
        builder.close_implied(&tag);
    }

    let mut node = Element::unchecked(if foreign {
        el.tag_name_preserve_case()
    } else {
        tag
    });
    for attr in el.attributes() {
        let name = if foreign {
            attr.name_preserve_case()
        } else {
            attr.name()
        };
        let value = html_escape::decode_html_entities(&attr.value()).into_owned();
        node.push_attribute(name, value);
    }
    node
}

/// Parses an HTML fragment into nodes, the way `innerHTML` assignment does.
///
/// Doctypes are dropped. Comments are kept, and so are XML declarations,
/// which HTML reads as bogus comments (`<!--?xml version="1.0"?-->`).
/// Inside `svg` and `math` subtrees tag and attribute names keep their
/// source case (`viewBox`, `foreignObject`).
///
/// ```
/// use rendermime_core::parse_fragment;
///
/// let nodes = parse_fragment("<h1>Hi &amp; bye</h1>").unwrap();
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "Hi & bye");
/// ```
pub fn parse_fragment(html: &str) -> Result<Vec<Node>, RenderError> {
    let builder = Rc::new(RefCell::new(TreeBuilder::new()));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", {
                let builder = Rc::clone(&builder);
                move |el| {
                    let node = start_element(&mut builder.borrow_mut(), el);
                    match el.end_tag_handlers() {
                        Some(handlers) => {
                            let id = builder.borrow_mut().open(node);
                            let builder = Rc::clone(&builder);
                            let handler: EndTagHandler<'static> =
                                Box::new(move |_end: &mut EndTag<'_>| {
                                    builder.borrow_mut().close(id);
                                    Ok(())
                                });
                            handlers.push(handler);
                        }
                        None => builder.borrow_mut().leaf(node),
                    }
                    Ok(())
                }
            })],
            document_content_handlers: vec![
                doc_text!({
                    let builder = Rc::clone(&builder);
                    move |chunk| {
                        let decode = matches!(chunk.text_type(), TextType::Data | TextType::RCData);
                        builder.borrow_mut().push_text(chunk.as_str(), decode);
                        Ok(())
                    }
                }),
                doc_comments!({
                    let builder = Rc::clone(&builder);
                    move |comment| {
                        builder.borrow_mut().comment(comment.text());
                        Ok(())
                    }
                }),
            ],
            strict: false,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| RenderError::Html(err.to_string()))?;

    let nodes = builder.borrow_mut().finish();
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        let mut root = Element::unchecked("div");
        root.append_children(parse_fragment(html).unwrap());
        root.inner_html()
    }

    #[test]
    fn keeps_structure_and_attribute_order() {
        assert_eq!(
            roundtrip("<a href=\"x\" target=\"_blank\">View <b>it</b></a>"),
            "<a href=\"x\" target=\"_blank\">View <b>it</b></a>"
        );
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        assert_eq!(roundtrip("<p>a<br>b</p><hr/>c"), "<p>a<br>b</p><hr>c");
    }

    #[test]
    fn script_text_stays_raw() {
        let nodes = parse_fragment("<script>if (a < b && c) {}</script>").unwrap();
        assert_eq!(nodes[0].text_content(), "if (a < b && c) {}");
        assert_eq!(
            roundtrip("<script type=\"math/tex\">x &lt; y</script>"),
            "<script type=\"math/tex\">x &lt; y</script>"
        );
    }

    #[test]
    fn unclosed_children_are_closed_by_parent_end_tag() {
        assert_eq!(
            roundtrip("<div><p>one<span>two</div>three"),
            "<div><p>one<span>two</span></p></div>three"
        );
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let nodes = parse_fragment("<span title=\"a &amp; b\">&lt;tag&gt;</span>").unwrap();
        let span = nodes[0].as_element().unwrap();
        assert_eq!(span.attribute("title"), Some("a & b"));
        assert_eq!(span.text_content(), "<tag>");
    }

    #[test]
    fn implied_end_tags_make_siblings() {
        assert_eq!(
            roundtrip("<ul><li>a<li>b</ul><p>x<p>y"),
            "<ul><li>a</li><li>b</li></ul><p>x</p><p>y</p>"
        );
        assert_eq!(
            roundtrip("<dl><dt>term<dd>one<dd>two</dl>"),
            "<dl><dt>term</dt><dd>one</dd><dd>two</dd></dl>"
        );
        assert_eq!(
            roundtrip("<select><option>a<option>b</select>"),
            "<select><option>a</option><option>b</option></select>"
        );
        assert_eq!(
            roundtrip("<table><tr><td>1<td>2<tr><td>3</table>"),
            "<table><tr><td>1</td><td>2</td></tr><tr><td>3</td></tr></table>"
        );
    }

    #[test]
    fn block_start_tag_closes_open_paragraph() {
        assert_eq!(roundtrip("<p>text<div>block</div>"), "<p>text</p><div>block</div>");
        assert_eq!(roundtrip("<p>a<hr>b"), "<p>a</p><hr>b");
    }

    #[test]
    fn nested_lists_keep_their_items() {
        assert_eq!(
            roundtrip("<ul><li>a<ul><li>b<li>c</ul><li>d</ul>"),
            "<ul><li>a<ul><li>b</li><li>c</li></ul></li><li>d</li></ul>"
        );
    }

    #[test]
    fn svg_names_keep_their_case() {
        let nodes =
            parse_fragment("<svg viewBox=\"0 0 1 1\"><foreignObject></foreignObject></svg>")
                .unwrap();
        let svg = nodes[0].as_element().unwrap();
        assert_eq!(svg.attributes().next(), Some(("viewBox", "0 0 1 1")));
        assert_eq!(svg.first_element_child().unwrap().tag_name(), "foreignObject");
    }

    #[test]
    fn xml_declaration_becomes_a_comment() {
        assert_eq!(
            roundtrip("<?xml version=\"1.0\"?><svg></svg>"),
            "<!--?xml version=\"1.0\"?--><svg></svg>"
        );
    }

    #[test]
    fn keeps_comments_and_top_level_text() {
        assert_eq!(roundtrip("before<!-- note -->after"), "before<!-- note -->after");
    }
}
