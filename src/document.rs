//! A small typed view over a parsed HTML tree.
//!
//! Extraction only needs to move between neighbouring nodes and read their text, so the walk is
//! written against [`DocNode`] rather than against the parser's own node type. [`HtmlNode`] backs
//! it with `scraper`.

use std::ops::Deref;

use scraper::{ElementRef, Html, Node};

use crate::text::normalize_ws;

/// scraper's tree node handle, named through `ElementRef` which derefs to it.
type TreeRef<'a> = <ElementRef<'a> as Deref>::Target;

/// The navigation a document walk needs.
pub trait DocNode: Copy {
    /// Lower-case element name, or `None` for text and other non-element nodes.
    fn tag(&self) -> Option<&str>;
    /// All text contained in the node, in document order.
    fn text(&self) -> String;
    fn next_sibling(&self) -> Option<Self>;
    fn parent(&self) -> Option<Self>;
    fn first_child(&self) -> Option<Self>;
}

/// A node of a document parsed by `scraper`.
#[derive(Clone, Copy)]
pub struct HtmlNode<'a>(TreeRef<'a>);

impl<'a> HtmlNode<'a> {
    pub fn root(html: &'a Html) -> Self {
        HtmlNode(html.tree.root())
    }
}

impl DocNode for HtmlNode<'_> {
    fn tag(&self) -> Option<&str> {
        match self.0.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }

    fn text(&self) -> String {
        match self.0.value() {
            Node::Text(text) => String::from(&**text),
            Node::Element(_) => ElementRef::wrap(self.0)
                .map(|element| element.text().collect())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next_sibling().map(HtmlNode)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().map(HtmlNode)
    }

    fn first_child(&self) -> Option<Self> {
        self.0.first_child().map(HtmlNode)
    }
}

/// `root` and everything below it, depth first in document order.
pub fn descendants<N: DocNode>(root: N) -> impl Iterator<Item = N> {
    let mut stack = vec![root];
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        let mut children = Vec::new();
        let mut child = node.first_child();
        while let Some(c) = child {
            child = c.next_sibling();
            children.push(c);
        }
        stack.extend(children.into_iter().rev());
        Some(node)
    })
}

/// Text below `node` as it reads on the page: `<br>` counts as a space.
pub fn flowing_text<N: DocNode>(node: N) -> String {
    let mut out = String::new();
    for n in descendants(node) {
        match n.tag() {
            Some("br") => out.push(' '),
            Some(_) => {}
            None => out.push_str(&n.text()),
        }
    }
    out
}

/// First element named `tag` at or below `root`.
pub fn find_first<N: DocNode>(root: N, tag: &str) -> Option<N> {
    descendants(root).find(|n| n.tag() == Some(tag))
}

/// First element named `tag` whose text is exactly `label`.
pub fn find_anchor<N: DocNode>(root: N, tag: &str, label: &str) -> Option<N> {
    descendants(root).find(|n| n.tag() == Some(tag) && n.text() == label)
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "li", "ol", "p", "pre", "section", "table", "ul",
];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// How far [`read_following`] may travel from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Only the inline content that follows the anchor inside its parent.
    Inline,
    /// Inline content inside the parent, then the parent's following siblings, one paragraph per
    /// block element.
    Blocks,
}

/// Read the content after `anchor` as normalized paragraphs, stopping before the first node for
/// which `stop` holds.
///
/// Text and inline elements accumulate into the current paragraph and every block element is a
/// paragraph of its own. A block that holds the stopping node contributes the inline text in
/// front of it as a last paragraph. Paragraphs left empty after normalization are dropped.
pub fn read_following<N, F>(anchor: N, reach: Reach, stop: F) -> Vec<String>
where
    N: DocNode,
    F: Fn(&N) -> bool,
{
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut cursor = anchor.next_sibling();
    let mut inside_parent = true;

    loop {
        let Some(node) = cursor else {
            if reach == Reach::Inline || !inside_parent {
                break;
            }
            inside_parent = false;
            flush(&mut current, &mut paragraphs);
            cursor = anchor.parent().and_then(|p| p.next_sibling());
            continue;
        };

        if stop(&node) {
            if reach == Reach::Blocks && node.tag().is_some_and(is_block) {
                flush(&mut current, &mut paragraphs);
                current = inline_prefix(node, &stop);
            }
            break;
        }

        if node.tag().is_some_and(is_block) {
            if reach == Reach::Inline {
                break;
            }
            flush(&mut current, &mut paragraphs);
            current = flowing_text(node);
            flush(&mut current, &mut paragraphs);
        } else {
            current.push_str(&flowing_text(node));
        }
        cursor = node.next_sibling();
    }

    flush(&mut current, &mut paragraphs);
    paragraphs
}

/// Text of the children of `block` that come before the first stopping child.
fn inline_prefix<N, F>(block: N, stop: &F) -> String
where
    N: DocNode,
    F: Fn(&N) -> bool,
{
    let mut out = String::new();
    let mut child = block.first_child();
    while let Some(c) = child {
        if stop(&c) {
            break;
        }
        out.push_str(&flowing_text(c));
        child = c.next_sibling();
    }
    out
}

fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    let paragraph = normalize_ws(current);
    current.clear();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
}
