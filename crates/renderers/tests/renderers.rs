use rendermime_renderers::{
    Document, HtmlRenderer, ImageRenderer, JavascriptRenderer, LatexRenderer, MarkdownRenderer,
    NoopTypesetter, PdfRenderer, Renderer, Script, SvgRenderer, TextRenderer, Typesetter,
};
use rendermime_core::{Element, MarkdownOptions, RenderError};
use std::cell::RefCell;
use std::rc::Rc;

/// Records the source of every executed script.
fn recording_document() -> (Document, Rc<RefCell<Vec<String>>>) {
    let ran = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&ran);
    let document = Document::new(
        move |script: &Script| log.borrow_mut().push(script.source.clone()),
        NoopTypesetter,
    );
    (document, ran)
}

#[derive(Default, Clone)]
struct RecordingTypesetter(Rc<RefCell<Vec<String>>>);

impl Typesetter for RecordingTypesetter {
    fn typeset(&self, root: &Element) {
        self.0.borrow_mut().push(root.text_content());
    }
}

mod text {
    use super::*;

    #[test]
    fn declares_text_mimetypes() {
        assert_eq!(
            TextRenderer.mimetypes(),
            ["text/plain", "application/vnd.jupyter.console-text"]
        );
    }

    #[test]
    fn escapes_into_a_pre() {
        let input = "x = 2 ** a";
        let widget = TextRenderer.render("text/plain", input).unwrap();
        insta::assert_snapshot!(widget.node().inner_html(), @"<pre>x = 2 ** a</pre>");
        assert_eq!(widget.node().text_content(), input);
    }

    #[test]
    fn markup_stays_literal() {
        let widget = TextRenderer
            .render("text/plain", "<b>not bold</b> & co")
            .unwrap();
        insta::assert_snapshot!(
            widget.node().inner_html(),
            @"<pre>&lt;b&gt;not bold&lt;/b&gt; &amp; co</pre>"
        );
    }

    #[test]
    fn stray_escapes_never_reach_the_page() {
        let widget = TextRenderer.render("text/plain", "a\x1bcb\x1b").unwrap();
        assert_eq!(widget.node().inner_html(), "<pre>ab</pre>");
    }

    #[test]
    fn colours_console_output() {
        let input = "There is no text but \x1b[01;41;32mtext\x1b[00m.\nWoo.";
        let widget = TextRenderer
            .render("application/vnd.jupyter.console-text", input)
            .unwrap();
        assert_eq!(
            widget.node().inner_html(),
            "<pre>There is no text but <span style=\"color:rgb(0, 255, 0);background-color:rgb(187, 0, 0)\">text</span>.\nWoo.</pre>"
        );
        assert_eq!(widget.node().text_content(), "There is no text but text.\nWoo.");
    }
}

mod latex {
    use super::*;

    #[test]
    fn declares_latex_mimetype() {
        assert_eq!(LatexRenderer.mimetypes(), ["text/latex"]);
    }

    #[test]
    fn keeps_mathjax_scripts() {
        let script = r#"<script type="math/tex">\sum\limits_{i=0}^{\infty} \frac{1}{n^2}</script>"#;
        let widget = LatexRenderer.render("text/latex", script).unwrap();
        assert_eq!(widget.node().inner_html(), script);
    }

    #[test]
    fn strips_delimiters_and_typesets_on_attach() {
        let widget = LatexRenderer.render("text/latex", "$$E = mc^2$$").unwrap();
        assert_eq!(widget.node().inner_html(), "E = mc^2");

        let typesetter = RecordingTypesetter::default();
        let typeset = Rc::clone(&typesetter.0);
        let mut document = Document::new(|_: &Script| {}, typesetter);
        assert!(typeset.borrow().is_empty());

        let id = document.attach(widget);
        assert_eq!(*typeset.borrow(), vec!["E = mc^2".to_string()]);

        let widget = document.detach(id).unwrap();
        document.attach(widget);
        assert_eq!(typeset.borrow().len(), 2);
    }

    #[test]
    fn math_scripts_are_not_executed() {
        let (mut document, ran) = recording_document();
        let widget = LatexRenderer
            .render("text/latex", r#"<script type="math/tex">x</script>"#)
            .unwrap();
        document.attach(widget);
        assert!(ran.borrow().is_empty());
    }
}

mod pdf {
    use super::*;

    #[test]
    fn declares_pdf_mimetype() {
        assert_eq!(PdfRenderer.mimetypes(), ["application/pdf"]);
    }

    #[test]
    fn links_to_the_literal_payload() {
        let widget = PdfRenderer
            .render("application/pdf", "I don't have a b64'd PDF")
            .unwrap();
        insta::assert_snapshot!(
            widget.node().inner_html(),
            @r#"<a href="data:application/pdf;base64,I don't have a b64'd PDF" target="_blank">View PDF</a>"#
        );
        assert_eq!(widget.node().elements_by_tag_name("a").len(), 1);
    }
}

mod javascript {
    use super::*;

    #[test]
    fn declares_javascript_mimetypes() {
        assert_eq!(
            JavascriptRenderer.mimetypes(),
            ["text/javascript", "application/javascript"]
        );
    }

    #[test]
    fn runs_once_attached() {
        let widget = JavascriptRenderer
            .render("text/javascript", "window.x = 1")
            .unwrap();
        let script = widget.node().first_element_child().unwrap();
        assert_eq!(script.tag_name(), "script");
        assert_eq!(script.attribute("type"), Some("text/javascript"));
        assert_eq!(script.text_content(), "window.x = 1");

        let (mut document, ran) = recording_document();
        assert!(ran.borrow().is_empty());

        let id = document.attach(widget);
        assert_eq!(*ran.borrow(), vec!["window.x = 1".to_string()]);

        let widget = document.detach(id).unwrap();
        document.attach(widget);
        assert_eq!(ran.borrow().len(), 1);
    }
}

mod svg {
    use super::*;

    #[test]
    fn declares_svg_mimetype() {
        assert_eq!(SvgRenderer.mimetypes(), ["image/svg+xml"]);
    }

    #[test]
    fn accepts_prolog_and_doctype() {
        let svg = r#"
          <?xml version="1.0" standalone="no"?>
          <!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
          "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
          <svg></svg>
      "#;
        let widget = SvgRenderer.render("image/svg+xml", svg).unwrap();
        assert_eq!(widget.node().elements_by_tag_name("svg").len(), 1);
    }

    #[test]
    fn rejects_payload_without_svg() {
        let err = SvgRenderer
            .render("image/svg+xml", "<p>not an image</p>")
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MalformedInput { ref mimetype, .. } if mimetype == "image/svg+xml"
        ));
    }
}

mod markdown {
    use super::*;

    #[test]
    fn declares_markdown_mimetype() {
        assert_eq!(MarkdownRenderer::default().mimetypes(), ["text/markdown"]);
    }

    #[test]
    fn math_survives_conversion() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "Energy $x_1^2 + y_1^2$ and _emphasis_")
            .unwrap();
        let html = widget.node().inner_html();
        assert!(html.contains("$x_1^2 + y_1^2$"), "{html}");
        assert!(html.contains("<em>emphasis</em>"), "{html}");
    }

    #[test]
    fn display_math_survives_conversion() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "$$\na_*b_*c\n$$")
            .unwrap();
        assert!(widget.node().inner_html().contains("$$\na_*b_*c\n$$"));
    }

    #[test]
    fn headings_get_ids() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "# Title first level\n\n## and another one")
            .unwrap();
        assert_eq!(
            widget.node().inner_html(),
            "<h1 id=\"title-first-level\">Title first level</h1>\n<h2 id=\"and-another-one\">and another one</h2>"
        );
    }

    #[test]
    fn repeated_headings_get_distinct_ids() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "# A\n\n# A\n\n# A 1")
            .unwrap();
        let ids: Vec<_> = widget
            .node()
            .elements_by_tag_name("h1")
            .into_iter()
            .filter_map(|h| h.attribute("id"))
            .collect();
        assert_eq!(ids, ["a", "a-1", "a-1-1"]);
    }

    #[test]
    fn headings_ids_can_be_disabled() {
        let options = MarkdownOptions {
            heading_ids: false,
            ..MarkdownOptions::notebook()
        };
        let widget = MarkdownRenderer::new(options)
            .render("text/markdown", "# Plain")
            .unwrap();
        assert_eq!(widget.node().inner_html(), "<h1>Plain</h1>");
    }

    #[test]
    fn embedded_scripts_run_on_attach() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "text\n\n<script>window.md = 1</script>\n")
            .unwrap();
        let (mut document, ran) = recording_document();
        document.attach(widget);
        assert_eq!(*ran.borrow(), vec!["window.md = 1".to_string()]);
    }

    #[test]
    fn typesets_on_attach() {
        let widget = MarkdownRenderer::default()
            .render("text/markdown", "$a$")
            .unwrap();
        let typesetter = RecordingTypesetter::default();
        let typeset = Rc::clone(&typesetter.0);
        let mut document = Document::new(|_: &Script| {}, typesetter);
        document.attach(widget);
        assert_eq!(*typeset.borrow(), vec!["$a$".to_string()]);
    }
}

mod html {
    use super::*;

    #[test]
    fn declares_html_mimetype() {
        assert_eq!(HtmlRenderer.mimetypes(), ["text/html"]);
    }

    #[test]
    fn parses_markup() {
        let widget = HtmlRenderer
            .render("text/html", "<h1>This is great</h1>")
            .unwrap();
        let heading = widget.node().first_element_child().unwrap();
        assert_eq!(heading.inner_html(), "This is great");
    }

    #[test]
    fn implied_end_tags_match_the_browser() {
        let widget = HtmlRenderer
            .render("text/html", "<ul><li>a<li>b</ul><p>x<p>y")
            .unwrap();
        assert_eq!(
            widget.node().inner_html(),
            "<ul><li>a</li><li>b</li></ul><p>x</p><p>y</p>"
        );
    }

    #[test]
    fn script_runs_on_attach_not_before() {
        let widget = HtmlRenderer
            .render("text/html", "<script>window.y=3;</script>")
            .unwrap();
        let (mut document, ran) = recording_document();
        assert!(ran.borrow().is_empty());

        document.attach(widget);
        assert_eq!(*ran.borrow(), vec!["window.y=3;".to_string()]);
    }
}

mod image {
    use super::*;

    #[test]
    fn declares_image_mimetypes() {
        assert_eq!(
            ImageRenderer.mimetypes(),
            ["image/png", "image/jpeg", "image/gif"]
        );
    }

    #[test]
    fn builds_data_uri() {
        let png = "R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";
        let widget = ImageRenderer.render("image/png", png).unwrap();
        let img = widget.node().first_element_child().unwrap();
        assert_eq!(img.tag_name(), "img");
        assert_eq!(img.attribute("src").unwrap(), format!("data:image/png;base64,{png}"));
        assert_eq!(img.inner_html(), "");

        let gif = "R0lGODlhAQABAIAAAP///wAAACwAAAAAAQABAAACAkQBADs=";
        let widget = ImageRenderer.render("image/gif", gif).unwrap();
        let img = widget.node().first_element_child().unwrap();
        assert_eq!(img.attribute("src").unwrap(), format!("data:image/gif;base64,{gif}"));
    }
}
