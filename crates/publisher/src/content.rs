// ABOUTME: Converts free-form HTML into the Telegraph node model.
// ABOUTME: Applies the tag and attribute allow-lists and unwraps the parser's html/head/body wrappers.

//! HTML to node conversion.
//!
//! Input is parsed with `scraper` into a full document. The body element is
//! located by walking the tree, and each of its children is converted:
//! text stays text, elements keep their tag only when Telegraph allows it,
//! and only `href`/`src` attributes survive. Comments and doctypes vanish.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Read;

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::Html;

use crate::error::Error;
use crate::node::{Document, Element, Node};

/// Text placed in the fallback paragraph when the input has no content.
pub const NO_CONTENT_TEXT: &str = "no content";

const OP: &str = "content_format";

static ALLOWED_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a",
        "aside",
        "b",
        "blockquote",
        "br",
        "code",
        "em",
        "figcaption",
        "figure",
        "h3",
        "h4",
        "hr",
        "i",
        "iframe",
        "img",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "strong",
        "u",
        "ul",
        "video",
    ]
    .into_iter()
    .collect()
});

const ALLOWED_ATTRS: &[&str] = &["href", "src"];

/// Returns true if Telegraph accepts the (lower-case) tag name.
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(tag)
}

/// HTML input accepted by [`content_format`].
pub enum HtmlInput<'a> {
    /// UTF-8 text.
    Text(Cow<'a, str>),
    /// Raw bytes; UTF-8 when valid, otherwise the encoding is detected.
    Bytes(Cow<'a, [u8]>),
    /// Bytes in a declared charset (an encoding label such as `windows-1252`).
    Encoded {
        bytes: Cow<'a, [u8]>,
        charset: Cow<'a, str>,
    },
    /// A byte stream, read to the end before parsing.
    Reader(Box<dyn Read + 'a>),
}

impl<'a> HtmlInput<'a> {
    /// Wrap a readable stream.
    pub fn reader(reader: impl Read + 'a) -> Self {
        HtmlInput::Reader(Box::new(reader))
    }

    /// Bytes with an explicit charset label.
    pub fn encoded(bytes: impl Into<Cow<'a, [u8]>>, charset: impl Into<Cow<'a, str>>) -> Self {
        HtmlInput::Encoded {
            bytes: bytes.into(),
            charset: charset.into(),
        }
    }

    /// Decode the input into a UTF-8 string.
    fn into_text(self) -> Result<String, Error> {
        match self {
            HtmlInput::Text(s) => Ok(s.into_owned()),
            HtmlInput::Bytes(bytes) => Ok(decode_bytes(&bytes)),
            HtmlInput::Encoded { bytes, charset } => {
                let encoding = encoding_rs::Encoding::for_label(charset.trim().as_bytes())
                    .ok_or_else(|| {
                        Error::conversion(
                            OP,
                            "unsupported input type",
                            Some(anyhow::anyhow!("unknown charset {:?}", charset)),
                        )
                    })?;
                let (decoded, _, _) = encoding.decode(&bytes);
                Ok(decoded.into_owned())
            }
            HtmlInput::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(|e| {
                    Error::conversion(OP, "parse failure", Some(anyhow::Error::new(e)))
                })?;
                Ok(decode_bytes(&buf))
            }
        }
    }
}

impl<'a> From<&'a str> for HtmlInput<'a> {
    fn from(s: &'a str) -> Self {
        HtmlInput::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for HtmlInput<'a> {
    fn from(s: &'a String) -> Self {
        HtmlInput::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for HtmlInput<'static> {
    fn from(s: String) -> Self {
        HtmlInput::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a [u8]> for HtmlInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        HtmlInput::Bytes(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for HtmlInput<'static> {
    fn from(b: Vec<u8>) -> Self {
        HtmlInput::Bytes(Cow::Owned(b))
    }
}

/// Decode bytes as UTF-8, falling back to charset detection.
fn decode_bytes(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Transform HTML into the Telegraph content format.
///
/// Returns the converted children of the document body. An input with no
/// content yields a single paragraph holding [`NO_CONTENT_TEXT`]; an input that
/// is nothing but text is wrapped in a paragraph.
pub fn content_format<'a>(input: impl Into<HtmlInput<'a>>) -> Result<Document, Error> {
    let html = input.into().into_text()?;
    let doc = Html::parse_document(&html);
    Ok(document_from_html(&doc))
}

/// Convert an already parsed document.
pub fn document_from_html(doc: &Html) -> Document {
    let container = find_body(doc).unwrap_or_else(|| *doc.root_element());
    let nodes = convert_children(container);
    finish_document(nodes)
}

/// Walk the tree to the first `body` element.
fn find_body(doc: &Html) -> Option<NodeRef<'_, scraper::Node>> {
    doc.tree.root().descendants().find(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| el.name().eq_ignore_ascii_case("body"))
    })
}

fn convert_children(node: NodeRef<'_, scraper::Node>) -> Vec<Node> {
    node.children().filter_map(convert_node).collect()
}

/// Convert one DOM node. Comments, doctypes and processing instructions
/// produce nothing.
fn convert_node(node: NodeRef<'_, scraper::Node>) -> Option<Node> {
    match node.value() {
        scraper::Node::Text(text) => Some(Node::Text(text.to_string())),
        scraper::Node::Element(el) => {
            let mut element = Element::default();
            let name = el.name().to_ascii_lowercase();
            if is_allowed_tag(&name) {
                element.tag = name;
                for (key, value) in el.attrs() {
                    let key = key.to_ascii_lowercase();
                    if ALLOWED_ATTRS.contains(&key.as_str()) {
                        // first occurrence wins
                        element.set_attr(key, value);
                    }
                }
            }
            element.children = convert_children(node);
            Some(Node::Element(element))
        }
        _ => None,
    }
}

fn finish_document(mut nodes: Vec<Node>) -> Document {
    if nodes.is_empty() {
        return vec![Node::element_with_text("p", NO_CONTENT_TEXT)];
    }
    if nodes.len() == 1 && nodes[0].as_text().is_some() {
        let text = nodes.remove(0);
        return vec![Element::new("p").with_child(text).into()];
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(text: &str) -> Node {
        Node::element_with_text("p", text)
    }

    #[test]
    fn converts_simple_paragraph() {
        let doc = content_format("<p>hello</p>").unwrap();
        assert_eq!(doc, vec![p("hello")]);
    }

    #[test]
    fn empty_input_yields_fallback_paragraph() {
        let doc = content_format("").unwrap();
        assert_eq!(doc, vec![p(NO_CONTENT_TEXT)]);
    }

    #[test]
    fn comment_only_input_yields_fallback_paragraph() {
        let doc = content_format("<!-- nothing here -->").unwrap();
        assert_eq!(doc, vec![p(NO_CONTENT_TEXT)]);
    }

    #[test]
    fn bare_text_is_wrapped_in_paragraph() {
        let doc = content_format("just words").unwrap();
        assert_eq!(doc, vec![p("just words")]);
    }

    #[test]
    fn skips_head_and_wrappers() {
        let html = "<html><head><title>T</title></head><body><h3>A</h3><p>B</p></body></html>";
        let doc = content_format(html).unwrap();
        assert_eq!(doc, vec![Node::element_with_text("h3", "A"), p("B")]);
    }

    #[test]
    fn unknown_tags_are_transparent_but_keep_children() {
        let doc = content_format("<div><span>x</span><b>y</b></div>").unwrap();
        let expected: Node = Element::new("")
            .with_child(Element::new("").with_child("x"))
            .with_child(Element::new("b").with_child("y"))
            .into();
        assert_eq!(doc, vec![expected]);
    }

    #[test]
    fn keeps_only_href_and_src() {
        let html = r#"<a HREF="https://Example.com/A" class="c" title="t">l</a><img src="/i.png" alt="x">"#;
        let doc = content_format(html).unwrap();

        let a = doc[0].as_element().unwrap();
        assert_eq!(a.tag, "a");
        assert_eq!(a.attrs.len(), 1);
        assert_eq!(
            a.attrs.get("href").map(String::as_str),
            Some("https://Example.com/A")
        );

        let img = doc[1].as_element().unwrap();
        assert_eq!(img.tag, "img");
        assert_eq!(img.attrs.get("src").map(String::as_str), Some("/i.png"));
        assert!(img.children.is_empty());
    }

    #[test]
    fn attributes_dropped_on_unknown_tags() {
        let doc = content_format(r#"<span><a href="/x">x</a></span>"#).unwrap();
        let span = doc[0].as_element().unwrap();
        assert!(span.is_transparent());
        assert!(span.attrs.is_empty());
        let a = span.children[0].as_element().unwrap();
        assert_eq!(a.attrs.get("href").map(String::as_str), Some("/x"));
    }

    #[test]
    fn upper_case_tags_are_normalized() {
        let doc = content_format("<P>Hi <STRONG>there</STRONG></P>").unwrap();
        let expected: Node = Element::new("p")
            .with_child("Hi ")
            .with_child(Element::new("strong").with_child("there"))
            .into();
        assert_eq!(doc, vec![expected]);
    }

    #[test]
    fn comments_are_skipped_inside_elements() {
        let doc = content_format("<p>a<!-- c -->b</p>").unwrap();
        let el = doc[0].as_element().unwrap();
        assert_eq!(el.children, vec![Node::text("a"), Node::text("b")]);
    }

    #[test]
    fn preserves_source_order() {
        let doc = content_format("<p>1</p><p>2</p><p>3</p>").unwrap();
        let texts: Vec<String> = doc.iter().map(Node::text_content).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn accepts_bytes_and_readers() {
        let from_bytes = content_format(b"<p>hello</p>".as_slice()).unwrap();
        let from_reader = content_format(HtmlInput::reader(&b"<p>hello</p>"[..])).unwrap();
        assert_eq!(from_bytes, vec![p("hello")]);
        assert_eq!(from_reader, from_bytes);
    }

    #[test]
    fn decodes_declared_charset() {
        // "café" in windows-1252
        let bytes = b"<p>caf\xe9</p>".to_vec();
        let doc = content_format(HtmlInput::encoded(bytes, "windows-1252")).unwrap();
        assert_eq!(doc, vec![p("café")]);
    }

    #[test]
    fn detects_charset_of_undeclared_bytes() {
        // windows-1252, no charset given
        let bytes: &[u8] =
            b"<p>Le caf\xe9 cr\xe8me br\xfbl\xe9e \xe9tait d\xe9licieux, tr\xe8s appr\xe9ci\xe9.</p>";
        let expected = vec![p("Le café crème brûlée était délicieux, très apprécié.")];

        let from_bytes = content_format(bytes.to_vec()).unwrap();
        assert_eq!(from_bytes, expected);

        let from_reader = content_format(HtmlInput::reader(bytes)).unwrap();
        assert_eq!(from_reader, expected);
    }

    #[test]
    fn unknown_charset_is_unsupported() {
        let err = content_format(HtmlInput::encoded(b"<p>x</p>".as_slice(), "klingon-8"))
            .unwrap_err();
        assert!(err.is_conversion());
        assert_eq!(err.message, "unsupported input type");
    }

    #[test]
    fn reader_failure_is_parse_failure() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let err = content_format(HtmlInput::reader(Broken)).unwrap_err();
        assert!(err.is_conversion());
        assert_eq!(err.message, "parse failure");
    }

    #[test]
    fn allow_list_matches_telegraph() {
        for tag in ["a", "figure", "h3", "h4", "iframe", "video", "s"] {
            assert!(is_allowed_tag(tag), "{} should be allowed", tag);
        }
        for tag in ["h1", "h2", "div", "span", "script", "table"] {
            assert!(!is_allowed_tag(tag), "{} should not be allowed", tag);
        }
    }
}
