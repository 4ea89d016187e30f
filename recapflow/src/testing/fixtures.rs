//! HTML fixtures shaped like the default selectors expect.

/// URL of the chapter the reader is on.
pub const PAGE_URL: &str = "https://www.royalroad.com/fiction/1/a-story/chapter/3/three";

/// Absolute URL of the previous chapter linked from [`current_page`].
pub const PREV_CHAPTER_URL: &str = "https://www.royalroad.com/fiction/1/a-story/chapter/2/two";

/// Absolute URL of the story overview linked from [`current_page`].
pub const FICTION_URL: &str = "https://www.royalroad.com/fiction/1/a-story";

/// Returns `count` distinct words `{prefix}1 .. {prefix}{count}`.
#[must_use]
pub fn paragraph_words(prefix: &str, count: usize) -> String {
    (1..=count)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fetched chapter page with the given title and paragraphs.
#[must_use]
pub fn chapter_page(title: &str, paragraphs: &[String]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title}</title></head><body>
<div class="chapter">
  <h1 class="font-white">{title}</h1>
  <div class="chapter-inner chapter-content">{body}</div>
</div>
</body></html>"#
    )
}

/// The page the reader is on. The fiction title is wrapped in a link to the
/// overview; the previous-chapter link is present only when `has_previous`.
#[must_use]
pub fn current_page(fiction_title: &str, has_previous: bool) -> String {
    let previous = if has_previous {
        r#"<a class="btn btn-primary" href="/fiction/1/a-story/chapter/2/two"><i class="far fa-chevron-double-left"></i> Previous</a>"#
    } else {
        r#"<button class="btn btn-primary" disabled>Previous</button>"#
    };
    format!(
        r#"<!DOCTYPE html>
<html><body>
<div class="fic-header">
  <a href="/fiction/1/a-story"><h2 class="font-white">{fiction_title}</h2></a>
</div>
<div class="nav-buttons">
  {previous}
  <a class="btn btn-primary" href="/fiction/1/a-story/chapter/4/four">Next <i class="far fa-chevron-double-right"></i></a>
</div>
<div class="chapter-inner"><p>current chapter text</p></div>
</body></html>"#
    )
}

/// A story overview page. `labels` fills the warning/tag block when given.
#[must_use]
pub fn overview_page(blurb: &str, labels: Option<&str>) -> String {
    let labels = labels
        .map(|l| format!(r#"<div class="text-center font-red-sunglo">{l}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html><body>
<div class="portlet">{labels}</div>
<div class="description">
  <input type="checkbox" id="showMore">
  <div class="hidden-content"><p>{blurb}</p><label for="showMore">Show More</label></div>
</div>
</body></html>"#
    )
}
