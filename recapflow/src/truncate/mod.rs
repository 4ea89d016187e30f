//! Word-budget truncation of a chapter body.
//!
//! Keeps the last `budget` words of a body, at two granularities:
//!
//! 1. Paragraphs are scanned from the end. Whole paragraphs are kept while
//!    they fit strictly inside the remaining budget.
//! 2. The first paragraph that does not fit is the boundary paragraph. It is
//!    rebuilt by [`slice_tail`] so that exactly the remaining number of words
//!    survive, and everything before it is dropped.
//!
//! Element names and attributes inside the kept portion are preserved; only
//! the single text node at the cut is shortened, and it gains a leading
//! [`ELLIPSIS`].

use crate::config::PARAGRAPH_SELECTOR;
use crate::dom::{count_words, last_words, Element, Node};
use tracing::trace;

/// Marker prefixed to the text node where content was cut.
pub const ELLIPSIS: &str = "...";

/// Keeps the last `budget` words across `paragraphs` (given in document
/// order) and returns the kept paragraphs in document order.
///
/// Paragraphs without words are skipped and never consume budget.
#[must_use]
pub fn truncate_paragraphs(paragraphs: &[Element], budget: usize) -> Vec<Node> {
    let mut remaining = budget;
    let mut selected = Vec::new();

    for (index, paragraph) in paragraphs.iter().enumerate().rev() {
        let words = paragraph.word_count();
        if words == 0 {
            continue;
        }

        if remaining > words {
            selected.push(Node::Element(paragraph.clone()));
            remaining -= words;
        } else {
            trace!(words, remaining, "Slicing boundary paragraph");
            let mut boundary = slice_element(paragraph, remaining);
            let dropped_before = paragraphs[..index].iter().any(|p| p.word_count() > 0);
            if remaining == words && dropped_before {
                mark_cut(&mut boundary);
            }
            selected.push(boundary);
            break;
        }
    }

    selected.reverse();
    selected
}

/// Truncates `body` to its last `budget` words and wraps the kept paragraphs
/// in a fresh `div`.
///
/// Paragraphs are the [`PARAGRAPH_SELECTOR`] elements below `body`, in
/// document order.
#[must_use]
pub fn truncate_body(body: &Element, budget: usize) -> Element {
    let paragraphs: Vec<Element> = body
        .descendants_named(PARAGRAPH_SELECTOR)
        .into_iter()
        .cloned()
        .collect();
    let mut container = Element::new("div");
    container.children = truncate_paragraphs(&paragraphs, budget);
    container
}

/// Rebuilds `node` keeping only its last `budget` words.
///
/// - Text: kept verbatim if it fits, otherwise its last `budget` words
///   prefixed with [`ELLIPSIS`].
/// - Element: tag and attributes are copied; children that lie entirely
///   before the cut are dropped, the child containing the cut is sliced
///   recursively, and later children are kept whole. When the cut falls
///   between two children, the first kept word carries the ellipsis.
/// - Comments, and any node when `budget` is zero, become an empty text node.
#[must_use]
pub fn slice_tail(node: &Node, budget: usize) -> Node {
    if budget == 0 {
        return Node::Text(String::new());
    }
    match node {
        Node::Text(text) => slice_text(text, budget),
        Node::Element(element) => slice_element(element, budget),
        Node::Comment(_) => Node::Text(String::new()),
    }
}

fn slice_text(text: &str, budget: usize) -> Node {
    let kept = last_words(text, budget);
    if kept.len() == count_words(text) {
        return Node::Text(text.to_string());
    }

    let mut sliced = format!("{ELLIPSIS}{}", kept.join(" "));
    if text.ends_with(char::is_whitespace) {
        sliced.push(' ');
    }
    Node::Text(sliced)
}

fn slice_element(element: &Element, budget: usize) -> Node {
    if budget == 0 {
        return Node::Text(String::new());
    }

    let mut skip = element.word_count().saturating_sub(budget);
    let mut dropped = false;
    let mut sliced = element.shallow_clone();

    for child in &element.children {
        if matches!(child, Node::Comment(_)) {
            continue;
        }
        if skip == 0 {
            let mut kept = child.clone();
            if dropped && mark_cut(&mut kept) {
                dropped = false;
            }
            sliced.children.push(kept);
            continue;
        }

        let words = child.word_count();
        if skip >= words {
            skip -= words;
            dropped |= words > 0;
            continue;
        }

        sliced.children.push(slice_tail(child, words - skip));
        skip = 0;
        dropped = false;
    }

    Node::Element(sliced)
}

/// Prefixes the first word below `node` with [`ELLIPSIS`]. Returns false if
/// `node` holds no words.
fn mark_cut(node: &mut Node) -> bool {
    match node {
        Node::Text(text) if count_words(text) > 0 => {
            *text = format!("{ELLIPSIS}{}", text.trim_start());
            true
        }
        Node::Element(element) => element.children.iter_mut().any(mark_cut),
        _ => false,
    }
}
