//! Allow-list sanitization of excerpt markup.
//!
//! Fetched pages are untrusted. Every fragment the content manager returns
//! passes through a [`Sanitizer`] first.

use ammonia::{Builder, UrlRelative};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

/// Makes markup safe to hand to a renderer.
pub trait Sanitizer: Send + Sync + Debug {
    /// Returns a cleaned copy of `markup`.
    fn sanitize(&self, markup: &str) -> String;
}

/// Tags kept as-is.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "s", "sup", "sub", "h1", "h2", "h3", "h4", "h5",
    "h6", "ul", "ol", "li", "a", "blockquote", "div", "span", "hr", "table", "thead", "tbody",
    "tr", "td", "th",
];

/// Attributes kept on any allowed tag. `href` is kept on `a` only.
pub const ALLOWED_ATTRS: &[&str] = &["title", "alt", "class", "id", "colspan", "rowspan"];

/// Tags removed together with their content.
pub const FORBIDDEN_TAGS: &[&str] = &["script", "style", "object", "embed", "iframe", "form", "input"];

/// Schemes an absolute `href` may use. Relative references always pass.
pub const URL_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "tel", "callto", "sms", "cid", "xmpp",
];

/// Attributes dropped when their value is empty.
const DROP_IF_EMPTY: &[&str] = &["class", "id", "title"];

/// Tag and attribute allow-list sanitizer built on `ammonia`.
///
/// - Allowed tags are kept with their allowed attributes.
/// - Forbidden tags are removed with everything inside them.
/// - Any other tag is unwrapped: the tag goes, its content stays.
/// - Comments are dropped.
/// - `href` survives if it is relative or uses an allowed scheme.
#[derive(Debug)]
pub struct AllowListSanitizer {
    policy: Builder<'static>,
}

impl Default for AllowListSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl AllowListSanitizer {
    /// Creates a sanitizer with the default policy.
    #[must_use]
    pub fn new() -> Self {
        let mut policy = Builder::default();
        policy
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .clean_content_tags(FORBIDDEN_TAGS.iter().copied().collect())
            .generic_attributes(ALLOWED_ATTRS.iter().copied().collect())
            .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None)
            .strip_comments(true)
            .attribute_filter(|_, attr, value| {
                if value.is_empty() && DROP_IF_EMPTY.contains(&attr) {
                    None
                } else {
                    Some(Cow::Borrowed(value))
                }
            });
        Self { policy }
    }
}

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }
        self.policy.clean(markup).to_string().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sanitize(markup: &str) -> String {
        AllowListSanitizer::new().sanitize(markup)
    }

    #[test]
    fn test_allowed_markup_unchanged() {
        let markup = r#"<hr><h1>Recap</h1><div><p class="a">Hello <em>there</em> <a href="https://x.test/c">link</a></p></div><hr>"#;
        assert_eq!(sanitize(markup), markup);
    }

    #[test]
    fn test_forbidden_tags_removed_with_content() {
        assert_eq!(
            sanitize("<p>a</p><script>alert(1)</script><style>p{}</style><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(sanitize(r#"<div><input type="checkbox">x</div>"#), "<div>x</div>");
        assert_eq!(sanitize(r#"<div><iframe src="x">y</iframe>z</div>"#), "<div>z</div>");
    }

    #[test]
    fn test_unknown_tags_unwrapped() {
        assert_eq!(
            sanitize("<p><font color=red>kept</font> <label>also</label></p>"),
            "<p>kept also</p>"
        );
    }

    #[test]
    fn test_attributes_filtered() {
        assert_eq!(
            sanitize(r#"<p style="color:red" onclick="x()" id="keep" data-x="1">t</p>"#),
            r#"<p id="keep">t</p>"#
        );
        assert_eq!(sanitize(r#"<p href="/x">t</p>"#), "<p>t</p>");
    }

    #[test]
    fn test_empty_attributes_dropped() {
        assert_eq!(
            sanitize(r#"<span class="" id="" title="">t</span>"#),
            "<span>t</span>"
        );
    }

    #[test]
    fn test_unsafe_href_dropped() {
        assert_eq!(
            sanitize(r#"<a href="javascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize(r#"<a href=" java&#9;script:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(sanitize(r#"<a href="data:text/html,x">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn test_safe_hrefs_kept() {
        for href in [
            "https://a.test/",
            "/fiction/1",
            "mailto:a@b.test",
            "#top",
            "../c/2",
            "?page=2",
        ] {
            let markup = format!(r#"<a href="{href}">x</a>"#);
            assert_eq!(sanitize(&markup), markup);
        }
    }

    #[test]
    fn test_bare_relative_hrefs_kept() {
        for href in ["chapter/2", "page2.html", "next-chapter"] {
            let markup = format!(r#"<a href="{href}">x</a>"#);
            assert_eq!(sanitize(&markup), markup);
        }
    }

    #[test]
    fn test_links_get_no_rel() {
        assert!(!sanitize(r#"<a href="https://a.test/">x</a>"#).contains("rel="));
    }

    #[test]
    fn test_comments_dropped_and_trimmed() {
        assert_eq!(sanitize("  <!-- c --><p>t</p>  "), "<p>t</p>");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_usable_behind_trait_object() {
        let sanitizer: std::sync::Arc<dyn Sanitizer> = std::sync::Arc::new(AllowListSanitizer::new());
        assert_eq!(sanitizer.sanitize("<p>ok</p>"), "<p>ok</p>");
    }
}
