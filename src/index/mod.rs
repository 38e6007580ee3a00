//! Search index for generated API documentation
//!
//! The index is a flat JSON array of documented entities produced when the
//! docs are generated (see [`IndexBuilder`]) and read back once per page view
//! by the sidebar (see [`IndexLoader`]).
//!
//! # Usage
//!
//! ```rust,no_run
//! use docnav::index::{IndexLoader, PublishedIndex};
//!
//! # async fn demo() {
//! let published = PublishedIndex::new();
//! let loader = IndexLoader::new("docs/assets/search-index.json");
//! published.publish(loader.load().await);
//!
//! for class in published.current().search_classes("plugin", 20) {
//!     println!("{} -> {}", class.name, class.href());
//! }
//! # }
//! ```

mod builder;
mod loader;
mod types;

pub use builder::{ClassPage, IndexBuilder, parse_class_page};
pub use loader::{IndexLoader, PublishedIndex};
pub use types::{EntryKind, IndexEntry, SearchIndex};
