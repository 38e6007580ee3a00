//! Sidebar navigator
//!
//! [`Navigator`] is the synchronous state machine that owns the sidebar
//! region. [`SidebarController`] wraps it for use from an event loop: it
//! loads the index in the background and debounces keystrokes.
//!
//! ```text
//!   Static --index loaded--> Nearby --input--> Results --cleared--> Restored
//!                                                 ^                    |
//!                                                 +-------input--------+
//! ```

mod controller;
mod debounce;
mod nearby;

pub use controller::SidebarController;
pub use debounce::Debouncer;
pub use nearby::nearby_view;

use crate::config::NavConfig;
use crate::index::PublishedIndex;
use crate::page::PageContext;
use crate::render::{self, SidebarView};

/// Which content the sidebar region currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Markup shipped with the page, nothing rendered yet
    Static,
    Nearby,
    Results,
    Restored,
}

/// Sidebar content captured right after the first nearby render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    view: SidebarView,
    markup: String,
}

impl RenderSnapshot {
    pub fn view(&self) -> &SidebarView {
        &self.view
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

#[derive(Debug)]
pub struct Navigator {
    config: NavConfig,
    page: PageContext,
    index: PublishedIndex,
    mode: ViewMode,
    /// `None` while the static page content is displayed
    view: Option<SidebarView>,
    markup: String,
    snapshot: Option<RenderSnapshot>,
    nearby_derived: bool,
    /// Bumped on every input change; a filter for an older value is stale
    input_generation: u64,
    renders: usize,
    filter_runs: usize,
}

impl Navigator {
    pub fn new(config: NavConfig, page: PageContext, index: PublishedIndex) -> Self {
        let markup = page.static_sidebar.clone();
        Self {
            config,
            page,
            index,
            mode: ViewMode::Static,
            view: None,
            markup,
            snapshot: None,
            nearby_derived: false,
            input_generation: 0,
            renders: 0,
            filter_runs: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn view(&self) -> Option<&SidebarView> {
        self.view.as_ref()
    }

    /// Current content of the sidebar region
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn snapshot(&self) -> Option<&RenderSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Number of times the sidebar region has been replaced
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Number of filter passes over the index
    pub fn filter_runs(&self) -> usize {
        self.filter_runs
    }

    fn replace(&mut self, view: Option<SidebarView>, markup: String, mode: ViewMode) {
        tracing::debug!("Sidebar {:?} -> {:?}", self.mode, mode);
        self.view = view;
        self.markup = markup;
        self.mode = mode;
        self.renders += 1;
    }

    fn render(&mut self, view: SidebarView, mode: ViewMode) {
        let markup = render::to_html(&view);
        self.replace(Some(view), markup, mode);
    }

    /// Derive the nearby view once the index is published.
    ///
    /// The result becomes the restore point. It is only displayed when no
    /// search is showing, so a late index never clobbers the user's results.
    pub fn index_loaded(&mut self) {
        if self.nearby_derived {
            return;
        }
        self.nearby_derived = true;

        let Some(current) = self.page.current_class_name(&self.config) else {
            tracing::debug!("Page title does not name a class, keeping static sidebar");
            return;
        };

        let Some(view) =
            nearby_view(self.index.current(), current, self.config.nearby_mode)
        else {
            tracing::debug!("Class {} not found in search index", current);
            return;
        };

        let snapshot = RenderSnapshot {
            markup: render::to_html(&view),
            view,
        };

        if self.mode != ViewMode::Results {
            self.replace(
                Some(snapshot.view.clone()),
                snapshot.markup.clone(),
                ViewMode::Nearby,
            );
        }
        self.snapshot = Some(snapshot);
    }

    /// Record that the search input changed and return its generation.
    pub fn next_input(&mut self) -> u64 {
        self.input_generation += 1;
        self.input_generation
    }

    /// Run a deferred filter, unless the input changed after it was
    /// scheduled. Returns whether the filter ran.
    pub fn search_for_input(&mut self, generation: u64, query: &str) -> bool {
        if generation != self.input_generation {
            tracing::debug!("Dropping stale filter for {:?}", query);
            return false;
        }
        self.search(query);
        true
    }

    /// Handle the full value of the search input.
    pub fn apply_query(&mut self, value: &str) {
        self.next_input();
        let query = value.trim();
        if query.is_empty() {
            self.restore();
        } else {
            self.search(query);
        }
    }

    /// Filter the published index and show results or the placeholder.
    pub fn search(&mut self, query: &str) {
        self.filter_runs += 1;

        let view = {
            let matches = self
                .index
                .current()
                .search_classes(query, self.config.result_cap);
            if matches.is_empty() {
                SidebarView::NoResults
            } else {
                SidebarView::Results(
                    matches
                        .into_iter()
                        .map(|entry| render::LinkDescriptor::for_entry(entry, false))
                        .collect(),
                )
            }
        };

        tracing::debug!(
            "Search {:?} matched {} classes",
            query,
            view.links().len()
        );
        self.render(view, ViewMode::Results);
    }

    /// Put back the captured nearby view, or the static page content when
    /// nothing was captured.
    pub fn restore(&mut self) {
        match &self.snapshot {
            Some(snapshot) => {
                let (view, markup) = (snapshot.view.clone(), snapshot.markup.clone());
                self.replace(Some(view), markup, ViewMode::Restored);
            }
            None => {
                let markup = self.page.static_sidebar.clone();
                self.replace(None, markup, ViewMode::Restored);
            }
        }
    }

    /// Expand or collapse a package section of the displayed nearby view.
    ///
    /// Returns `false` when no nearby view is displayed or the package is not
    /// part of it. The restore point is not affected.
    pub fn toggle_package(&mut self, package: &str) -> bool {
        let Some(SidebarView::Nearby(groups)) = &self.view else {
            return false;
        };

        let mut groups = groups.clone();
        let Some(group) = groups.iter_mut().find(|g| g.package == package) else {
            return false;
        };
        group.expanded = !group.expanded;

        let mode = self.mode;
        self.render(SidebarView::Nearby(groups), mode);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NearbyMode;
    use crate::index::{IndexEntry, SearchIndex};
    use crate::render::NO_RESULTS_MESSAGE;
    use pretty_assertions::assert_eq;

    const STATIC_SIDEBAR: &str = r#"<div class="package-group">static</div>"#;

    fn sample_index() -> SearchIndex {
        SearchIndex::build(vec![
            IndexEntry::class("Foo", "a.b", "Foo.html"),
            IndexEntry::class("Bar", "a.b", "Bar.html"),
            IndexEntry::class("Baz", "a.c", "Baz.html"),
        ])
    }

    fn navigator(title: &str, mode: NearbyMode) -> (Navigator, PublishedIndex) {
        let index = PublishedIndex::new();
        let config = NavConfig {
            nearby_mode: mode,
            ..NavConfig::default()
        };
        let navigator = Navigator::new(
            config,
            PageContext::new(title, STATIC_SIDEBAR),
            index.clone(),
        );
        (navigator, index)
    }

    fn loaded(title: &str) -> Navigator {
        let (mut navigator, index) = navigator(title, NearbyMode::Package);
        index.publish(sample_index());
        navigator.index_loaded();
        navigator
    }

    #[test]
    fn test_nearby_after_load() {
        let navigator = loaded("Foo - API");
        assert_eq!(navigator.mode(), ViewMode::Nearby);

        let view = navigator.view().unwrap();
        assert_eq!(view.labels(), vec!["Foo", "Bar"]);
        assert!(view.links()[0].active);
        assert_eq!(navigator.snapshot().unwrap().markup(), navigator.markup());
    }

    #[test]
    fn test_search_results_are_sound() {
        let mut navigator = loaded("Foo - API");
        navigator.apply_query("  ba ");
        assert_eq!(navigator.mode(), ViewMode::Results);
        assert_eq!(navigator.view().unwrap().labels(), vec!["Bar", "Baz"]);
        assert!(!navigator.markup().contains(">Foo<"));
    }

    #[test]
    fn test_no_matches_render_placeholder() {
        let mut navigator = loaded("Foo - API");
        navigator.apply_query("zzz");
        assert_eq!(navigator.view(), Some(&SidebarView::NoResults));
        assert!(navigator.markup().contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_clearing_restores_snapshot_exactly() {
        let mut navigator = loaded("Foo - API");
        let captured = navigator.markup().to_string();

        navigator.apply_query("ba");
        navigator.apply_query("zzz");
        navigator.apply_query("   ");
        assert_eq!(navigator.mode(), ViewMode::Restored);
        assert_eq!(navigator.markup(), captured);

        navigator.apply_query("foo");
        navigator.apply_query("");
        assert_eq!(navigator.markup(), captured);
    }

    #[test]
    fn test_search_before_load_sees_empty_index() {
        let (mut navigator, index) = navigator("Foo - API", NearbyMode::Package);
        navigator.apply_query("ba");
        assert_eq!(navigator.view(), Some(&SidebarView::NoResults));

        navigator.apply_query("");
        assert_eq!(navigator.mode(), ViewMode::Restored);
        assert_eq!(navigator.markup(), STATIC_SIDEBAR);

        index.publish(sample_index());
        navigator.index_loaded();
        assert_eq!(navigator.mode(), ViewMode::Nearby);
    }

    #[test]
    fn test_late_load_keeps_results_on_screen() {
        let (mut navigator, index) = navigator("Foo - API", NearbyMode::Package);
        navigator.apply_query("ba");
        let results = navigator.markup().to_string();

        index.publish(sample_index());
        navigator.index_loaded();
        assert_eq!(navigator.mode(), ViewMode::Results);
        assert_eq!(navigator.markup(), results);

        navigator.apply_query("");
        assert_eq!(navigator.markup(), navigator.snapshot().unwrap().markup());
    }

    #[test]
    fn test_unknown_page_keeps_static_sidebar() {
        let navigator = loaded("Overview - API");
        assert_eq!(navigator.mode(), ViewMode::Static);
        assert_eq!(navigator.markup(), STATIC_SIDEBAR);
        assert!(navigator.snapshot().is_none());
        assert_eq!(navigator.render_count(), 0);
    }

    #[test]
    fn test_result_cap_applies() {
        let (mut navigator, index) = navigator("Nothing", NearbyMode::Package);
        index.publish(SearchIndex::build(
            (0..100)
                .map(|i| IndexEntry::class(&format!("Item{i}"), "p", "Item.html"))
                .collect(),
        ));
        navigator.index_loaded();
        navigator.apply_query("item");
        assert_eq!(navigator.view().unwrap().links().len(), 20);
    }

    #[test]
    fn test_stale_filter_does_not_overwrite_restore() {
        let mut navigator = loaded("Foo - API");
        let captured = navigator.markup().to_string();

        let typed = navigator.next_input();
        let cleared = navigator.next_input();
        navigator.restore();

        assert!(!navigator.search_for_input(typed, "ba"));
        assert_eq!(navigator.mode(), ViewMode::Restored);
        assert_eq!(navigator.markup(), captured);
        assert_eq!(navigator.filter_runs(), 0);

        assert!(navigator.search_for_input(cleared, "ba"));
        assert_eq!(navigator.mode(), ViewMode::Results);
    }

    #[test]
    fn test_toggle_package_leaves_snapshot_alone() {
        let (mut navigator, index) = navigator("Foo - API", NearbyMode::Tree);
        index.publish(sample_index());
        navigator.index_loaded();
        let captured = navigator.markup().to_string();

        assert!(navigator.toggle_package("a.b"));
        assert!(navigator.markup().contains("package-section collapsed"));
        assert_ne!(navigator.markup(), captured);
        assert!(!navigator.toggle_package("z.z"));

        navigator.apply_query("");
        assert_eq!(navigator.markup(), captured);

        navigator.apply_query("ba");
        assert!(!navigator.toggle_package("a.b"));
    }
}
