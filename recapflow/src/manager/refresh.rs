//! Rebuilding the displayed recap when settings change.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::view::RecapView;
use super::ContentManager;
use crate::config::SettingsSubscription;

/// Spawns a task that, on every settings change, rebuilds the recap shown
/// in `view` from the cache.
///
/// Changes arriving while the view holds no recap are ignored. A failed
/// rebuild is logged and recorded in the view; previous content stays.
/// The task ends when the settings store is dropped.
pub fn spawn_settings_refresh(
    manager: Arc<ContentManager>,
    mut subscription: SettingsSubscription,
    view: Arc<RecapView>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(config) = subscription.changed().await {
            if !view.holds_recap() {
                debug!("Settings changed with no recap shown");
                continue;
            }

            match manager.refresh_recap_from_cache(&config) {
                Ok(excerpt) => {
                    debug!(word_budget = config.word_budget, "Recap rebuilt after settings change");
                    view.show_content(excerpt);
                }
                Err(e) => {
                    warn!(error = %e, kind = ?e.kind(), "Recap rebuild after settings change failed");
                    view.show_error(e.to_string());
                }
            }
        }
        debug!("Settings store closed, stopping recap refresh");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecapConfig, SettingsStore};
    use crate::manager::ExcerptKind;
    use crate::processor::HtmlPage;
    use crate::testing::{
        chapter_page, current_page, paragraph_words, StaticFetcher, PAGE_URL, PREV_CHAPTER_URL,
    };
    use std::time::Duration;

    fn setup() -> (Arc<ContentManager>, Arc<StaticFetcher>) {
        let page = HtmlPage::new(current_page("A Story", true))
            .with_url(PAGE_URL)
            .unwrap();
        let fetcher = Arc::new(StaticFetcher::new().with_page(
            PREV_CHAPTER_URL,
            chapter_page("Chapter 2", &[paragraph_words("w", 300)]),
        ));
        let manager = Arc::new(ContentManager::new(fetcher.clone(), Arc::new(page)));
        (manager, fetcher)
    }

    async fn wait_for(view: &RecapView, condition: impl Fn(&RecapView) -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition(view) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_budget_change_rebuilds_without_fetch() {
        let (manager, fetcher) = setup();
        let store = SettingsStore::default();
        let view = Arc::new(RecapView::new());

        view.apply(manager.fetch_recap(&store.snapshot()).await);
        let _task = spawn_settings_refresh(manager.clone(), store.subscribe(), view.clone());

        store.update(|c| c.word_budget = 40).unwrap();

        wait_for(&view, |v| v.snapshot().content.contains("last ~40 words")).await;
        assert_eq!(view.snapshot().kind, Some(ExcerptKind::Recap));
        assert_eq!(fetcher.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_content() {
        let (manager, _fetcher) = setup();
        let store = SettingsStore::default();
        let view = Arc::new(RecapView::new());

        view.apply(manager.fetch_recap(&store.snapshot()).await);
        let before = view.snapshot().content;
        manager.clear_cache();
        let _task = spawn_settings_refresh(manager.clone(), store.subscribe(), view.clone());

        store.update(|c| c.word_budget = 40).unwrap();

        wait_for(&view, |v| v.snapshot().error.is_some()).await;
        let state = view.snapshot();
        assert_eq!(state.content, before);
        assert!(state.error.unwrap().starts_with("No cached content"));
    }

    #[tokio::test]
    async fn test_ignored_without_recap() {
        let (manager, _fetcher) = setup();
        let store = SettingsStore::default();
        let view = Arc::new(RecapView::new());
        let task = spawn_settings_refresh(manager, store.subscribe(), view.clone());

        store.replace(RecapConfig::new().with_word_budget(10)).unwrap();
        drop(store);

        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.snapshot().error, None);
        assert!(view.snapshot().content.is_empty());
    }
}
