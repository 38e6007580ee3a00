//! Small per-page helpers that sit next to the sidebar: title parsing,
//! breadcrumb links, member visibility and type tooltips.
//!
//! [`MemberVisibility`] and [`type_tooltip`] are library API for page hosts
//! that wire up the private-member toggle and type links; the CLI has no
//! page DOM to apply them to.

use crate::config::NavConfig;
use crate::render::LinkDescriptor;

/// URL fragment that keeps private and protected members visible
pub const SHOW_PRIVATE_FRAGMENT: &str = "show-private";

/// What the component reads from the hosting page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub title: String,
    /// Sidebar markup shipped with the static page
    pub static_sidebar: String,
}

impl PageContext {
    pub fn new(title: impl Into<String>, static_sidebar: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            static_sidebar: static_sidebar.into(),
        }
    }

    /// Class name the page documents, if the title identifies one.
    ///
    /// `"Foo - My API"` yields `Foo`. The class browser page and titles with
    /// an empty leading part yield `None`.
    pub fn current_class_name(&self, config: &NavConfig) -> Option<&str> {
        if config
            .all_classes_title
            .as_deref()
            .is_some_and(|all| all == self.title)
        {
            return None;
        }

        let name = self
            .title
            .split(config.title_separator.as_str())
            .next()
            .unwrap_or_default();
        (!name.is_empty()).then_some(name)
    }
}

/// `encodeURIComponent` semantics: everything but unreserved characters is
/// percent-encoded as UTF-8.
pub fn encode_uri_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Breadcrumb segments point at the class browser filtered by the package
/// prefix ending at that segment.
pub fn breadcrumb_links(segments: &[&str]) -> Vec<LinkDescriptor> {
    let mut prefix: Vec<&str> = Vec::with_capacity(segments.len());
    segments
        .iter()
        .map(|segment| {
            let segment = segment.trim();
            prefix.push(segment);
            LinkDescriptor {
                href: format!("index.html?package={}", encode_uri_component(&prefix.join("."))),
                label: segment.to_string(),
                active: false,
            }
        })
        .collect()
}

/// Whether private and protected members are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberVisibility {
    pub show_private: bool,
}

impl MemberVisibility {
    /// Initial state from the page URL fragment (with or without `#`)
    pub fn from_fragment(fragment: &str) -> Self {
        Self {
            show_private: fragment.trim_start_matches('#') == SHOW_PRIVATE_FRAGMENT,
        }
    }

    /// Flip the toggle and return the fragment the URL should carry.
    pub fn toggle(&mut self) -> &'static str {
        self.show_private = !self.show_private;
        self.fragment()
    }

    pub fn fragment(&self) -> &'static str {
        if self.show_private {
            SHOW_PRIVATE_FRAGMENT
        } else {
            ""
        }
    }

    /// Whether a member item with the given CSS classes is displayed
    pub fn is_visible(&self, member_classes: &str) -> bool {
        self.show_private
            || !member_classes
                .split_whitespace()
                .any(|c| c == "private-member" || c == "protected-member")
    }
}

/// Tooltip for a type link: its fully qualified name, when present.
pub fn type_tooltip(full_name: Option<&str>) -> Option<&str> {
    full_name.map(str::trim).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_class_from_title() {
        let config = NavConfig {
            all_classes_title: Some("Hytale API - All Classes".to_string()),
            ..NavConfig::default()
        };

        let page = PageContext::new("JavaPlugin - Hytale Plugin API", "");
        assert_eq!(page.current_class_name(&config), Some("JavaPlugin"));

        let plain = PageContext::new("JavaPlugin", "");
        assert_eq!(plain.current_class_name(&config), Some("JavaPlugin"));

        let browser = PageContext::new("Hytale API - All Classes", "");
        assert_eq!(browser.current_class_name(&config), None);

        let untitled = PageContext::new(" - Hytale Plugin API", "");
        assert_eq!(untitled.current_class_name(&config), None);
    }

    #[test]
    fn test_breadcrumb_links() {
        let links = breadcrumb_links(&["com", "example", "my plugin"]);
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "index.html?package=com",
                "index.html?package=com.example",
                "index.html?package=com.example.my%20plugin",
            ]
        );
        assert_eq!(links[2].label, "my plugin");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a.b-c_d~"), "a.b-c_d~");
        assert_eq!(encode_uri_component("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_member_visibility() {
        let mut visibility = MemberVisibility::from_fragment("");
        assert!(!visibility.is_visible("member-item private-member"));
        assert!(!visibility.is_visible("member-item protected-member"));
        assert!(visibility.is_visible("member-item"));

        assert_eq!(visibility.toggle(), "show-private");
        assert!(visibility.is_visible("member-item private-member"));
        assert_eq!(visibility.toggle(), "");

        assert!(MemberVisibility::from_fragment("#show-private").show_private);
    }

    #[test]
    fn test_type_tooltip() {
        assert_eq!(type_tooltip(Some("java.lang.String")), Some("java.lang.String"));
        assert_eq!(type_tooltip(Some("  ")), None);
        assert_eq!(type_tooltip(None), None);
    }
}
