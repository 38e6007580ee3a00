//! docnav - sidebar search and navigation for generated API docs
//!
//! Loads the site's search index, shows the classes around the one being
//! documented and swaps in incremental search results as the user types.

pub mod config;
pub mod error;
pub mod index;
pub mod navigator;
pub mod page;
pub mod render;

// Re-export commonly used types
pub use config::{NavConfig, NearbyMode};
pub use error::{BuildError, IndexError};
pub use index::{IndexEntry, IndexLoader, PublishedIndex, SearchIndex};
pub use navigator::{Navigator, SidebarController, ViewMode};
pub use page::PageContext;
pub use render::{LinkDescriptor, SidebarView};
