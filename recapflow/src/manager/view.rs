//! Reader-facing display state of the recap panel.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::excerpt::{Excerpt, ExcerptKind};
use crate::errors::RecapError;

/// Whether the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Collapsed.
    #[default]
    Hidden,
    /// Waiting for an excerpt.
    Loading,
    /// Showing `content`.
    Visible,
}

/// Snapshot of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Panel visibility.
    pub visibility: Visibility,
    /// Last excerpt markup shown. Kept when an error arrives.
    pub content: String,
    /// Last error message, cleared by new content.
    pub error: Option<String>,
    /// Kind of `content`, if any has been shown.
    pub kind: Option<ExcerptKind>,
}

impl ViewState {
    /// Whether an excerpt is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.visibility == Visibility::Loading
    }
}

/// Shared display state, updated by UI handlers and the settings refresh
/// task.
#[derive(Debug, Default)]
pub struct RecapView {
    state: RwLock<ViewState>,
}

impl RecapView {
    /// Creates a hidden, empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.state.read().clone()
    }

    /// Hides a visible panel, otherwise starts loading. Returns the new
    /// visibility.
    pub fn toggle(&self) -> Visibility {
        let mut state = self.state.write();
        state.visibility = match state.visibility {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden | Visibility::Loading => Visibility::Loading,
        };
        state.visibility
    }

    /// Label for the toggle button.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        match self.state.read().visibility {
            Visibility::Visible => "Hide",
            Visibility::Hidden | Visibility::Loading => "Show",
        }
    }

    /// Marks the panel as loading.
    pub fn begin_loading(&self) {
        self.state.write().visibility = Visibility::Loading;
    }

    /// Shows `excerpt` and clears any error.
    pub fn show_content(&self, excerpt: Excerpt) {
        let mut state = self.state.write();
        state.content = excerpt.content;
        state.kind = Some(excerpt.kind);
        state.visibility = Visibility::Visible;
        state.error = None;
    }

    /// Records an error. Previous content is left untouched, and a visible
    /// panel stays visible; a loading panel collapses.
    pub fn show_error(&self, error: impl Into<String>) {
        let mut state = self.state.write();
        state.error = Some(error.into());
        if state.visibility == Visibility::Loading {
            state.visibility = Visibility::Hidden;
        }
    }

    /// Applies the outcome of a content manager call.
    pub fn apply(&self, result: Result<Excerpt, RecapError>) {
        match result {
            Ok(excerpt) => self.show_content(excerpt),
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Collapses the panel.
    pub fn hide(&self) {
        self.state.write().visibility = Visibility::Hidden;
    }

    /// Shows the panel again if it has content.
    pub fn show(&self) {
        let mut state = self.state.write();
        if !state.content.is_empty() {
            state.visibility = Visibility::Visible;
        }
    }

    /// Whether the panel currently holds recap content.
    #[must_use]
    pub fn holds_recap(&self) -> bool {
        let state = self.state.read();
        state.kind == Some(ExcerptKind::Recap) && !state.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let view = RecapView::new();
        assert_eq!(view.toggle_label(), "Show");
        assert_eq!(view.toggle(), Visibility::Loading);
        assert!(view.snapshot().is_loading());

        view.show_content(Excerpt::recap("<p>x</p>"));
        assert_eq!(view.toggle_label(), "Hide");
        assert_eq!(view.toggle(), Visibility::Hidden);
    }

    #[test]
    fn test_error_keeps_content() {
        let view = RecapView::new();
        view.show_content(Excerpt::recap("<p>old</p>"));

        view.show_error("boom");

        let state = view.snapshot();
        assert_eq!(state.content, "<p>old</p>");
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.visibility, Visibility::Visible);
    }

    #[test]
    fn test_error_while_loading_collapses() {
        let view = RecapView::new();
        view.begin_loading();
        view.apply(Err(RecapError::NoCachedContent { url: "u".into() }));

        let state = view.snapshot();
        assert_eq!(state.visibility, Visibility::Hidden);
        assert!(state.error.unwrap().starts_with("No cached content"));
    }

    #[test]
    fn test_content_clears_error() {
        let view = RecapView::new();
        view.show_error("boom");
        view.apply(Ok(Excerpt::blurb("<p>b</p>")));

        let state = view.snapshot();
        assert_eq!(state.error, None);
        assert_eq!(state.kind, Some(ExcerptKind::Blurb));
        assert!(!view.holds_recap());
    }

    #[test]
    fn test_show_requires_content() {
        let view = RecapView::new();
        view.show();
        assert_eq!(view.snapshot().visibility, Visibility::Hidden);

        view.show_content(Excerpt::recap("<p>x</p>"));
        view.hide();
        view.show();
        assert_eq!(view.snapshot().visibility, Visibility::Visible);
        assert!(view.holds_recap());
    }
}
