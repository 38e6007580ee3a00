use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::{Debouncer, Navigator};
use crate::config::NavConfig;
use crate::index::{IndexLoader, PublishedIndex, SearchIndex};
use crate::page::PageContext;

/// Event-loop facing side of the sidebar.
///
/// Owns the navigator, the published index slot and the keystroke debouncer.
/// All methods must be called from within a tokio runtime.
#[derive(Debug)]
pub struct SidebarController {
    navigator: Arc<Mutex<Navigator>>,
    index: PublishedIndex,
    debouncer: Debouncer,
}

impl SidebarController {
    pub fn new(config: NavConfig, page: PageContext) -> Self {
        let index = PublishedIndex::new();
        let debouncer = Debouncer::new(config.debounce());
        let navigator = Navigator::new(config, page, index.clone());

        Self {
            navigator: Arc::new(Mutex::new(navigator)),
            index,
            debouncer,
        }
    }

    /// Load the index, publish it and derive the nearby view.
    ///
    /// Never fails: an unavailable index is logged and the sidebar behaves as
    /// if the index were empty.
    pub async fn load(&self, loader: &IndexLoader) {
        let index = loader.load().await;
        publish_and_derive(&self.index, &self.navigator, index);
    }

    /// Start [`load`](Self::load) in the background, like a page-load fetch.
    pub fn spawn_load(&self, loader: IndexLoader) -> JoinHandle<()> {
        let index = self.index.clone();
        let navigator = Arc::clone(&self.navigator);
        tokio::spawn(async move {
            let loaded = loader.load().await;
            publish_and_derive(&index, &navigator, loaded);
        })
    }

    /// The search input changed to `value`.
    ///
    /// A pending filter is always cancelled first. An empty query restores
    /// the sidebar at once, anything else is filtered after the debounce
    /// delay unless another keystroke arrives in between. A filter that has
    /// already woken up but lost the race for the lock sees a newer input
    /// generation and does nothing.
    pub fn on_input(&mut self, value: &str) {
        self.debouncer.cancel();

        let query = value.trim().to_string();
        let generation = {
            let mut navigator = self.navigator.lock();
            let generation = navigator.next_input();
            if query.is_empty() {
                navigator.restore();
                return;
            }
            generation
        };

        let navigator = Arc::clone(&self.navigator);
        self.debouncer.schedule(move || {
            navigator.lock().search_for_input(generation, &query);
        });
    }

    /// Whether a debounced filter is waiting to run
    pub fn is_filter_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock()
    }

    pub fn markup(&self) -> String {
        self.navigator.lock().markup().to_string()
    }

    pub fn index(&self) -> &PublishedIndex {
        &self.index
    }
}

fn publish_and_derive(
    slot: &PublishedIndex,
    navigator: &Mutex<Navigator>,
    index: SearchIndex,
) {
    slot.publish(index);
    navigator.lock().index_loaded();
}
