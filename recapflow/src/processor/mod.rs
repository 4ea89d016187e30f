//! Assembly of recap and blurb fragments from fetched HTML.
//!
//! This module provides:
//! - [`ContentProcessor`], which turns a fetched page plus a settings
//!   snapshot into excerpt markup or a typed error
//! - [`CurrentPage`] lookups on the page the reader already has open
//!
//! The processor does no I/O. Each call parses its own copy of the input.

mod page;

pub use page::{CurrentPage, HtmlPage};

use scraper::Html;
use tracing::debug;

use crate::config::{RecapConfig, PARAGRAPH_SELECTOR};
use crate::dom::{
    parse_selector, select_first, to_element, trimmed_text, Element, Fragment, Node,
};
use crate::errors::RecapError;
use crate::truncate::truncate_body;

/// Builds excerpt fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentProcessor;

impl ContentProcessor {
    /// Creates a processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the recap fragment for a fetched chapter page.
    ///
    /// The chapter body is checked first (missing, empty, no paragraphs),
    /// then the fiction title on `page`, then the chapter title in `html`.
    pub fn create_recap(
        &self,
        html: &str,
        page: &dyn CurrentPage,
        config: &RecapConfig,
    ) -> Result<String, RecapError> {
        let selectors = &config.selectors;
        let doc = Html::parse_document(html);

        let body = required_element(&doc, &selectors.chapter_body, "chapter content")?;
        if body.descendants_named(PARAGRAPH_SELECTOR).is_empty() {
            return Err(RecapError::NoParagraphs {
                selector: selectors.chapter_body.clone(),
            });
        }
        let truncated = truncate_body(&body, config.word_budget);

        let fiction = required_text(
            page.text_of(&selectors.fiction_title)?,
            "fiction title",
            &selectors.fiction_title,
        )?;
        let chapter = required_text(
            first_text(&doc, &selectors.chapter_title)?,
            "chapter title",
            &selectors.chapter_title,
        )?;

        debug!(
            word_budget = config.word_budget,
            source_words = body.word_count(),
            kept_words = truncated.word_count(),
            "Built recap"
        );

        let fragment: Fragment = [
            Element::new("hr"),
            Element::new("h1").with_text(format!("Recap of {fiction}")),
            Element::new("h2").with_text(format!("Previous chapter: {chapter}")),
            Element::new("h4").with_text(format!("Showing last ~{} words:", config.word_budget)),
            truncated,
            Element::new("hr"),
        ]
        .into_iter()
        .map(Node::from)
        .collect();

        Ok(fragment.to_html())
    }

    /// Builds the blurb fragment for a fetched story overview page.
    ///
    /// The labels block is included only when it matches and holds text.
    /// Form controls are stripped from the blurb before it is checked for
    /// text.
    pub fn create_blurb(
        &self,
        html: &str,
        page: &dyn CurrentPage,
        config: &RecapConfig,
    ) -> Result<String, RecapError> {
        let selectors = &config.selectors;
        let doc = Html::parse_document(html);

        let blurb_selector = parse_selector(&selectors.blurb_body)?;
        let mut blurb = select_first(&doc, &blurb_selector)
            .map(to_element)
            .ok_or_else(|| RecapError::not_found("story blurb", &selectors.blurb_body))?;
        blurb.remove_descendants(&["input", "label"]);
        if blurb.word_count() == 0 {
            return Err(RecapError::EmptyContent { what: "story blurb" });
        }

        let labels_selector = parse_selector(&selectors.blurb_labels)?;
        let labels = select_first(&doc, &labels_selector)
            .filter(|element| !trimmed_text(*element).is_empty())
            .map(to_element);

        let fiction = required_text(
            page.text_of(&selectors.fiction_title)?,
            "fiction title",
            &selectors.fiction_title,
        )?;

        debug!(has_labels = labels.is_some(), "Built blurb");

        let mut fragment = Fragment::new();
        fragment.push(Element::new("hr"));
        fragment.push(Element::new("h1").with_text(format!("Blurb: {fiction}")));
        if let Some(labels) = labels {
            fragment.push(labels);
        }
        fragment.push(blurb);
        fragment.push(Element::new("hr"));

        Ok(fragment.to_html())
    }
}

/// First match of `selector` in `doc`, which must hold some text.
fn required_element(
    doc: &Html,
    selector: &str,
    what: &'static str,
) -> Result<Element, RecapError> {
    let parsed = parse_selector(selector)?;
    let element =
        select_first(doc, &parsed).ok_or_else(|| RecapError::not_found(what, selector))?;
    if trimmed_text(element).is_empty() {
        return Err(RecapError::EmptyContent { what });
    }
    Ok(to_element(element))
}

fn first_text(doc: &Html, selector: &str) -> Result<Option<String>, RecapError> {
    let parsed = parse_selector(selector)?;
    Ok(select_first(doc, &parsed).map(trimmed_text))
}

fn required_text(
    value: Option<String>,
    what: &'static str,
    selector: &str,
) -> Result<String, RecapError> {
    match value {
        None => Err(RecapError::not_found(what, selector)),
        Some(text) if text.is_empty() => Err(RecapError::EmptyContent { what }),
        Some(text) => Ok(text),
    }
}
