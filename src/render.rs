//! Typed sidebar views and their markup
//!
//! The navigator only ever builds [`SidebarView`] values. Markup is produced
//! here, at the boundary, by [`to_html`].

use std::borrow::Cow;

use crate::index::IndexEntry;

/// Placeholder shown instead of an empty result list
pub const NO_RESULTS_MESSAGE: &str = "No classes found";

/// Pixel height reserved per link when a package group is expanded
const LINK_ROW_HEIGHT: usize = 40;

/// Package paths longer than this are shortened for display
const MAX_PACKAGE_SEGMENTS: usize = 3;

/// One navigable link in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDescriptor {
    pub href: String,
    pub label: String,
    pub active: bool,
}

impl LinkDescriptor {
    pub fn for_entry(entry: &IndexEntry, active: bool) -> Self {
        Self {
            href: entry.href().to_string(),
            label: entry.name.clone(),
            active,
        }
    }
}

/// A collapsible package section of the nearby view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGroup {
    pub package: String,
    pub display_name: String,
    pub expanded: bool,
    pub links: Vec<LinkDescriptor>,
}

impl PackageGroup {
    pub fn new(package: &str, expanded: bool, links: Vec<LinkDescriptor>) -> Self {
        Self {
            package: package.to_string(),
            display_name: shorten_package(package),
            expanded,
            links,
        }
    }
}

/// Everything the sidebar can show once the navigator has taken over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    Nearby(Vec<PackageGroup>),
    Results(Vec<LinkDescriptor>),
    NoResults,
}

impl SidebarView {
    /// All links of the view in display order
    pub fn links(&self) -> Vec<&LinkDescriptor> {
        match self {
            SidebarView::Nearby(groups) => groups.iter().flat_map(|g| g.links.iter()).collect(),
            SidebarView::Results(links) => links.iter().collect(),
            SidebarView::NoResults => Vec::new(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.links().into_iter().map(|l| l.label.as_str()).collect()
    }
}

/// `a.b.c.d.e` is displayed as `...c.d.e`
pub fn shorten_package(package: &str) -> String {
    let parts: Vec<&str> = package.split('.').collect();
    if parts.len() > MAX_PACKAGE_SEGMENTS {
        format!("...{}", parts[parts.len() - MAX_PACKAGE_SEGMENTS..].join("."))
    } else {
        package.to_string()
    }
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn link_html(link: &LinkDescriptor) -> String {
    format!(
        r#"<a href="{}" class="class-link{}">{}</a>"#,
        escape_html(&link.href),
        if link.active { " active" } else { "" },
        escape_html(&link.label)
    )
}

fn group_html(group: &PackageGroup) -> String {
    let links: String = group.links.iter().map(link_html).collect();
    let max_height = if group.expanded {
        group.links.len() * LINK_ROW_HEIGHT
    } else {
        0
    };

    format!(
        concat!(
            r#"<div class="package-section{}">"#,
            r#"<div class="package-name" data-toggle="collapse" title="{}">"#,
            r#"<span class="chevron">▼</span>{} ({})</div>"#,
            r#"<div class="package-classes" style="max-height: {}px;">{}</div>"#,
            "</div>"
        ),
        if group.expanded { "" } else { " collapsed" },
        escape_html(&group.package),
        escape_html(&group.display_name),
        group.links.len(),
        max_height,
        links
    )
}

/// Markup for the sidebar navigation container.
pub fn to_html(view: &SidebarView) -> String {
    match view {
        SidebarView::Nearby(groups) => groups.iter().map(group_html).collect(),
        SidebarView::Results(links) => format!(
            concat!(
                r#"<div class="package-group">"#,
                r#"<div class="package-title">Search Results ({})</div>"#,
                r#"<div class="search-results">{}</div>"#,
                "</div>"
            ),
            links.len(),
            links.iter().map(link_html).collect::<String>()
        ),
        SidebarView::NoResults => {
            format!(r#"<div class="no-results">{}</div>"#, NO_RESULTS_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(label: &str, active: bool) -> LinkDescriptor {
        LinkDescriptor {
            href: format!("{label}.html"),
            label: label.to_string(),
            active,
        }
    }

    #[test]
    fn test_shorten_package() {
        assert_eq!(shorten_package("a.b.c"), "a.b.c");
        assert_eq!(shorten_package("com.example.server.core.plugin"), "...server.core.plugin");
    }

    #[test]
    fn test_escape_html() {
        assert!(matches!(escape_html("Plain"), Cow::Borrowed("Plain")));
        assert_eq!(escape_html("List<T> & \"x\""), "List&lt;T&gt; &amp; &quot;x&quot;");
    }

    #[test]
    fn test_results_markup() {
        let view = SidebarView::Results(vec![link("Bar", false), link("Baz", false)]);
        assert_eq!(
            to_html(&view),
            concat!(
                r#"<div class="package-group"><div class="package-title">Search Results (2)</div>"#,
                r#"<div class="search-results"><a href="Bar.html" class="class-link">Bar</a>"#,
                r#"<a href="Baz.html" class="class-link">Baz</a></div></div>"#
            )
        );
    }

    #[test]
    fn test_group_markup_marks_active_and_collapsed() {
        let open = SidebarView::Nearby(vec![PackageGroup::new(
            "a.b",
            true,
            vec![link("Foo", true), link("Bar", false)],
        )]);
        let html = to_html(&open);
        assert!(html.starts_with(r#"<div class="package-section">"#));
        assert!(html.contains(r#"<a href="Foo.html" class="class-link active">Foo</a>"#));
        assert!(html.contains(r#"<a href="Bar.html" class="class-link">Bar</a>"#));
        assert!(html.contains("a.b (2)"));
        assert!(html.contains("max-height: 80px;"));

        let closed = SidebarView::Nearby(vec![PackageGroup::new("a.c", false, vec![link("Baz", false)])]);
        let html = to_html(&closed);
        assert!(html.starts_with(r#"<div class="package-section collapsed">"#));
        assert!(html.contains("max-height: 0px;"));
    }

    #[test]
    fn test_placeholder_is_not_an_empty_list() {
        let html = to_html(&SidebarView::NoResults);
        assert!(html.contains(NO_RESULTS_MESSAGE));
        assert!(!html.contains("class-link"));
        assert!(SidebarView::NoResults.links().is_empty());
    }
}
