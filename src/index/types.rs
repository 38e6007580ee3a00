use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::IndexError;

/// Tag distinguishing the kinds of documented entities in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    Class,
    Method,
    /// Any other tag (fields, constructors, ...)
    Other,
}

impl From<String> for EntryKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "class" => EntryKind::Class,
            "method" => EntryKind::Method,
            _ => EntryKind::Other,
        }
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Class => "class",
            EntryKind::Method => "method",
            EntryKind::Other => "other",
        }
        .to_string()
    }
}

/// One row of the search index as produced by the docs generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    #[serde(
        rename = "package",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub package_path: String,
    #[serde(rename = "file")]
    pub target_file: String,
    /// Owning class for member entries
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl IndexEntry {
    pub fn class(name: &str, package_path: &str, target_file: &str) -> Self {
        Self {
            kind: EntryKind::Class,
            name: name.to_string(),
            package_path: package_path.to_string(),
            target_file: target_file.to_string(),
            owner: None,
        }
    }

    pub fn method(name: &str, owner: &str, target_file: &str) -> Self {
        Self {
            kind: EntryKind::Method,
            name: name.to_string(),
            package_path: String::new(),
            target_file: target_file.to_string(),
            owner: Some(owner.to_string()),
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind == EntryKind::Class
    }

    /// Link target relative to the current page.
    ///
    /// Class pages are generated side by side, so only the last path segment
    /// of `target_file` is kept (`classes/Foo.html` becomes `Foo.html`).
    pub fn href(&self) -> &str {
        self.target_file
            .rsplit('/')
            .next()
            .unwrap_or(&self.target_file)
    }

    /// Number of segments in the package path, 0 when the entry has none.
    pub fn package_depth(&self) -> usize {
        package_depth(&self.package_path)
    }
}

pub(crate) fn package_depth(package: &str) -> usize {
    if package.is_empty() {
        0
    } else {
        package.split('.').count()
    }
}

/// Parent of a dotted package path, `None` for top-level packages.
pub(crate) fn parent_package(package: &str) -> Option<&str> {
    package.rsplit_once('.').map(|(parent, _)| parent)
}

/// Immutable, in-memory search index with a name lookup table.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    /// Map from class name to the position of its first class entry
    classes: HashMap<String, usize>,
}

impl SearchIndex {
    /// Build an index from already parsed entries
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        let mut classes = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.is_class() {
                classes.entry(entry.name.clone()).or_insert(position);
            }
        }

        SearchIndex { entries, classes }
    }

    /// Parse the JSON document (an array of entries) and build the index.
    ///
    /// An entry with an empty name makes the whole document invalid.
    pub fn from_json(bytes: &[u8]) -> Result<Self, IndexError> {
        let entries: Vec<IndexEntry> = serde_json::from_slice(bytes)?;

        if let Some(position) = entries.iter().position(|e| e.name.trim().is_empty()) {
            return Err(IndexError::InvalidEntry {
                position,
                reason: "entry name is empty".to_string(),
            });
        }

        Ok(Self::build(entries))
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_class()).count()
    }

    /// Lookup a class entry by exact name. With duplicates, the first one wins.
    pub fn get_class(&self, name: &str) -> Option<&IndexEntry> {
        self.classes.get(name).map(|position| &self.entries[*position])
    }

    /// Case-insensitive substring search over class names.
    ///
    /// Entries come back in index order and scanning stops once `cap` matches
    /// have been collected.
    pub fn search_classes(&self, query: &str, cap: usize) -> Vec<&IndexEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.is_class() && e.name.to_lowercase().contains(&query_lower))
            .take(cap)
            .collect()
    }

    /// All class entries whose package path equals `package`, in index order.
    pub fn package_classes(&self, package: &str) -> Vec<&IndexEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_class() && e.package_path == package)
            .collect()
    }

    /// Packages shown around `package` in the tree view: the package itself,
    /// its siblings under the same parent and its direct children.
    ///
    /// Only packages that contain at least one class are returned.
    pub fn related_packages(&self, package: &str) -> BTreeSet<&str> {
        let depth = package_depth(package);
        let parent = parent_package(package);
        let mut related = BTreeSet::new();

        for entry in self.entries.iter().filter(|e| e.is_class()) {
            let candidate = entry.package_path.as_str();
            if candidate == package {
                related.insert(candidate);
                continue;
            }

            let candidate_depth = entry.package_depth();
            let is_sibling = candidate_depth == depth
                && parent.is_some_and(|p| parent_package(candidate) == Some(p));
            let is_child =
                candidate_depth == depth + 1 && parent_package(candidate) == Some(package);

            if is_sibling || is_child {
                related.insert(candidate);
            }
        }

        related
    }
}
