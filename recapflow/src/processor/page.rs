//! Lookups on the page the reader already has open.

use scraper::Html;
use url::Url;

use crate::dom::{enclosing_href, parse_selector, select_first, trimmed_text};
use crate::errors::RecapError;

/// Selector-based access to the current, already-rendered page.
///
/// Every method returns `Ok(None)` when the selector matches nothing and an
/// error only for a malformed selector or an unresolvable link.
pub trait CurrentPage: Send + Sync {
    /// Trimmed text of the first element matching `selector`.
    fn text_of(&self, selector: &str) -> Result<Option<String>, RecapError>;

    /// Absolute URL from the nearest `a[href]` that is the first match of
    /// `selector` or one of its ancestors.
    fn enclosing_href_of(&self, selector: &str) -> Result<Option<String>, RecapError>;
}

/// A [`CurrentPage`] over a captured HTML snapshot.
///
/// The snapshot is reparsed on each lookup, so no parser state is shared.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    html: String,
    url: Option<Url>,
}

impl HtmlPage {
    /// Wraps a snapshot with no base URL. Only absolute hrefs resolve.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: None,
        }
    }

    /// Sets the page URL that relative hrefs resolve against.
    pub fn with_url(mut self, url: &str) -> Result<Self, RecapError> {
        let parsed = Url::parse(url).map_err(|e| RecapError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.url = Some(parsed);
        Ok(self)
    }

    /// Returns the page URL, if known.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn resolve(&self, href: &str) -> Result<String, RecapError> {
        let resolved = match &self.url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        resolved
            .map(String::from)
            .map_err(|e| RecapError::InvalidUrl {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }
}

impl CurrentPage for HtmlPage {
    fn text_of(&self, selector: &str) -> Result<Option<String>, RecapError> {
        let selector = parse_selector(selector)?;
        let doc = Html::parse_document(&self.html);
        Ok(select_first(&doc, &selector).map(trimmed_text))
    }

    fn enclosing_href_of(&self, selector: &str) -> Result<Option<String>, RecapError> {
        let selector = parse_selector(selector)?;
        let doc = Html::parse_document(&self.html);
        let href = select_first(&doc, &selector).and_then(enclosing_href);
        href.map(|h| self.resolve(&h)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorSet;
    use crate::testing::{current_page, FICTION_URL, PAGE_URL, PREV_CHAPTER_URL};

    fn page(has_previous: bool) -> HtmlPage {
        HtmlPage::new(current_page("A Story", has_previous))
            .with_url(PAGE_URL)
            .unwrap()
    }

    #[test]
    fn test_text_of() {
        let page = page(true);
        let selectors = SelectorSet::default();
        assert_eq!(
            page.text_of(&selectors.fiction_title).unwrap(),
            Some("A Story".to_string())
        );
        assert_eq!(page.text_of("h5.missing").unwrap(), None);
    }

    #[test]
    fn test_previous_chapter_link_resolves() {
        let page = page(true);
        let selectors = SelectorSet::default();
        assert_eq!(
            page.enclosing_href_of(&selectors.prev_chapter_link).unwrap(),
            Some(PREV_CHAPTER_URL.to_string())
        );
    }

    #[test]
    fn test_previous_chapter_link_absent() {
        let page = page(false);
        let selectors = SelectorSet::default();
        assert_eq!(page.enclosing_href_of(&selectors.prev_chapter_link).unwrap(), None);
    }

    #[test]
    fn test_overview_link_from_title() {
        let page = page(true);
        let selectors = SelectorSet::default();
        assert_eq!(
            page.enclosing_href_of(&selectors.fiction_title).unwrap(),
            Some(FICTION_URL.to_string())
        );
    }

    #[test]
    fn test_selector_matching_icon_resolves_to_anchor() {
        let page = page(true);
        assert_eq!(
            page.enclosing_href_of("a.btn > i.fa-chevron-double-left").unwrap(),
            Some(PREV_CHAPTER_URL.to_string())
        );
    }

    #[test]
    fn test_relative_href_without_base_is_error() {
        let page = HtmlPage::new(current_page("A Story", true));
        let err = page.enclosing_href_of("a.btn").unwrap_err();
        assert!(matches!(err, RecapError::InvalidUrl { .. }));
    }

    #[test]
    fn test_invalid_selector() {
        let page = page(true);
        assert!(matches!(
            page.text_of("h2[["),
            Err(RecapError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_with_url_rejects_garbage() {
        assert!(HtmlPage::new("").with_url("not a url").is_err());
    }
}
