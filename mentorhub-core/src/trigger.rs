use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::feed::{DiscoveryFeed, LoadOutcome, PageSource, SkipReason};

/// Loads the next page whenever the sentinel at the end of the list is
/// reported visible. The renderer sends `true` each time the sentinel enters
/// the viewport; sending `true` again after a failed load retries it.
///
/// The task ends when the sender is dropped or the feed has nothing left.
pub fn spawn_load_trigger<S>(
    feed: DiscoveryFeed<S>,
    mut visibility: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    S: PageSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut visible = *visibility.borrow_and_update();
        loop {
            if visible {
                match feed.load_more().await {
                    LoadOutcome::Skipped(SkipReason::Exhausted | SkipReason::Unmounted) => break,
                    LoadOutcome::Loaded { .. } if !feed.has_more() => break,
                    outcome => trace!("sentinel visible: {outcome:?}"),
                }
            }
            if visibility.changed().await.is_err() {
                break;
            }
            visible = *visibility.borrow_and_update();
        }
        debug!("load trigger stopped after page {}", feed.page() - 1);
    })
}
