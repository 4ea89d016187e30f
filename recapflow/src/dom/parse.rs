//! Conversion from `scraper` parses into the owned tree, plus selector
//! helpers shared by the processor and the current-page accessors.

use scraper::{ElementRef, Html, Selector};

use super::node::{Element, Fragment, Node};
use crate::errors::RecapError;

/// Parses a CSS selector.
pub fn parse_selector(selector: &str) -> Result<Selector, RecapError> {
    Selector::parse(selector).map_err(|e| RecapError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Returns the first element of `doc` matching `selector`.
#[must_use]
pub fn select_first<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).next()
}

/// Returns the element's text content with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Deep-copies a parsed element into an owned [`Element`].
#[must_use]
pub fn to_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element {
        name: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children: convert_children(element),
    }
}

fn convert_children(element: ElementRef<'_>) -> Vec<Node> {
    element
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(Node::Text(String::from(&**text))),
            scraper::Node::Comment(comment) => Some(Node::Comment(String::from(&**comment))),
            scraper::Node::Element(_) => ElementRef::wrap(child).map(|e| Node::Element(to_element(e))),
            _ => None,
        })
        .collect()
}

/// Parses a markup fragment (no `<html>`/`<body>` wrapper expected).
#[must_use]
pub fn parse_fragment(markup: &str) -> Fragment {
    let html = Html::parse_fragment(markup);
    Fragment::from(convert_children(html.root_element()))
}

/// Returns the `href` of the nearest `a[href]` that is `element` itself or
/// one of its ancestors.
#[must_use]
pub fn enclosing_href(element: ElementRef<'_>) -> Option<String> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|e| e.value().name() == "a" && e.value().attr("href").is_some())
        .and_then(|e| e.value().attr("href"))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
            <a href="/fiction/1"><h2 class="title">  My Story </h2></a>
            <div class="chapter-inner">
                <p class="a">First <em data-x="1">para</em>.</p>
                <!-- note -->
                <p>Second</p>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_selector_error() {
        let err = parse_selector("p[[").unwrap_err();
        assert!(matches!(err, RecapError::InvalidSelector { .. }));
    }

    #[test]
    fn test_trimmed_text() {
        let doc = Html::parse_document(PAGE);
        let selector = parse_selector("h2.title").unwrap();
        let title = select_first(&doc, &selector).unwrap();
        assert_eq!(trimmed_text(title), "My Story");
    }

    #[test]
    fn test_to_element_preserves_structure() {
        let doc = Html::parse_document(PAGE);
        let selector = parse_selector("p.a").unwrap();
        let p = to_element(select_first(&doc, &selector).unwrap());
        assert_eq!(p.to_html(), r#"<p class="a">First <em data-x="1">para</em>.</p>"#);
    }

    #[test]
    fn test_to_element_keeps_comments() {
        let doc = Html::parse_document(PAGE);
        let selector = parse_selector(".chapter-inner").unwrap();
        let body = to_element(select_first(&doc, &selector).unwrap());
        assert!(body
            .children
            .iter()
            .any(|child| matches!(child, Node::Comment(c) if c.trim() == "note")));
    }

    #[test]
    fn test_parse_fragment() {
        let fragment = parse_fragment("<p>one</p>two<br>");
        assert_eq!(fragment.len(), 3);
        assert_eq!(fragment.to_html(), "<p>one</p>two<br>");
    }

    #[test]
    fn test_enclosing_href() {
        let doc = Html::parse_document(PAGE);
        let selector = parse_selector("h2.title").unwrap();
        let title = select_first(&doc, &selector).unwrap();
        assert_eq!(enclosing_href(title), Some("/fiction/1".to_string()));

        let selector = parse_selector("p.a").unwrap();
        let p = select_first(&doc, &selector).unwrap();
        assert_eq!(enclosing_href(p), None);
    }
}
