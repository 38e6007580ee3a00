use std::ptr;

use crate::config::NearbyMode;
use crate::index::{IndexEntry, SearchIndex};
use crate::render::{LinkDescriptor, PackageGroup, SidebarView};

/// Contextual navigation around the class a page documents.
///
/// Returns `None` when `current` is not a known class or has no package, in
/// which case the sidebar keeps whatever the static page shipped with.
pub fn nearby_view(index: &SearchIndex, current: &str, mode: NearbyMode) -> Option<SidebarView> {
    let current = index.get_class(current)?;
    if current.package_path.is_empty() {
        return None;
    }

    let groups = match mode {
        NearbyMode::Package => vec![package_group(index, current)],
        NearbyMode::Tree => tree_groups(index, current),
    };
    Some(SidebarView::Nearby(groups))
}

fn sorted_by_name(mut entries: Vec<&IndexEntry>) -> Vec<&IndexEntry> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Current class first, then the rest of its package sorted by name
fn package_group(index: &SearchIndex, current: &IndexEntry) -> PackageGroup {
    let siblings = index
        .package_classes(&current.package_path)
        .into_iter()
        .filter(|entry| !ptr::eq(*entry, current))
        .collect();

    let links = std::iter::once(LinkDescriptor::for_entry(current, true))
        .chain(
            sorted_by_name(siblings)
                .into_iter()
                .map(|entry| LinkDescriptor::for_entry(entry, false)),
        )
        .collect();

    PackageGroup::new(&current.package_path, true, links)
}

fn tree_groups(index: &SearchIndex, current: &IndexEntry) -> Vec<PackageGroup> {
    index
        .related_packages(&current.package_path)
        .into_iter()
        .map(|package| {
            let links = sorted_by_name(index.package_classes(package))
                .into_iter()
                .map(|entry| LinkDescriptor::for_entry(entry, ptr::eq(entry, current)))
                .collect();
            PackageGroup::new(package, package == current.package_path, links)
        })
        .collect()
}
