//! Search index generation from a directory of generated class pages

use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use super::types::IndexEntry;
use crate::error::BuildError;

lazy_static! {
    static ref BREADCRUMB: Regex =
        Regex::new(r#"(?s)<div class="navbar-breadcrumb"[^>]*>(.*?)</div>"#).unwrap();
    static ref ANCHOR_TEXT: Regex = Regex::new(r"(?s)<a\b[^>]*>(.*?)</a>").unwrap();
    static ref SECTION_HEADING: Regex = Regex::new(r"<h2[^>]*>\s*([^<]*?)\s*</h2>").unwrap();
    static ref SIGNATURE_CODE: Regex = Regex::new(
        r#"(?s)<div class="member-signature"[^>]*>\s*<code\b[^>]*>(.*?)</code>"#
    )
    .unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref CALL_NAME: Regex = Regex::new(r"\b(\w+)\s*\(").unwrap();
}

/// What the index needs to know about one class page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPage {
    pub package: String,
    pub methods: BTreeSet<String>,
}

/// Extract the package (from the breadcrumb) and the method names (from the
/// member signatures of the `Methods` section) of a generated class page.
///
/// Only the `<code>` of each `member-signature` counts; code spans in member
/// descriptions or the page footer are ignored.
pub fn parse_class_page(html: &str) -> ClassPage {
    let package = BREADCRUMB
        .captures(html)
        .map(|breadcrumb| {
            ANCHOR_TEXT
                .captures_iter(&breadcrumb[1])
                .map(|anchor| anchor[1].trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    let mut methods = BTreeSet::new();
    if let Some(section) = methods_section(html) {
        for code in SIGNATURE_CODE.captures_iter(section) {
            let text = TAG.replace_all(&code[1], "");
            if let Some(name) = CALL_NAME.captures(&text) {
                methods.insert(name[1].to_string());
            }
        }
    }

    ClassPage { package, methods }
}

/// Slice of the page between the `Methods` heading and the next heading
fn methods_section(html: &str) -> Option<&str> {
    let start = SECTION_HEADING
        .captures_iter(html)
        .find(|heading| &heading[1] == "Methods")
        .and_then(|heading| heading.get(0))?
        .end();
    let end = SECTION_HEADING
        .find_at(html, start)
        .map(|next| next.start())
        .unwrap_or(html.len());
    Some(&html[start..end])
}

/// Builds `search-index.json` for a docs root containing `classes/*.html`.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    docs_root: PathBuf,
}

impl IndexBuilder {
    pub fn new(docs_root: impl Into<PathBuf>) -> Self {
        Self {
            docs_root: docs_root.into(),
        }
    }

    fn class_pages(&self) -> Result<Vec<PathBuf>, BuildError> {
        let classes_dir = self.docs_root.join("classes");
        if !classes_dir.is_dir() {
            return Err(BuildError::MissingClassesDir(classes_dir));
        }

        let read_dir = fs::read_dir(&classes_dir).map_err(|source| BuildError::Scan {
            path: classes_dir.clone(),
            source,
        })?;

        let mut pages: Vec<PathBuf> = read_dir
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension().is_some_and(|ext| ext == "html")
                    && path.file_name().is_some_and(|name| name != "index.html")
            })
            .collect();
        pages.sort();
        Ok(pages)
    }

    /// Scan every class page. Unreadable pages are logged and skipped.
    pub fn build(&self) -> Result<Vec<IndexEntry>, BuildError> {
        let pages = self.class_pages()?;
        tracing::info!("Processing {} class pages", pages.len());

        let mut entries = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            if (i + 1) % 500 == 0 {
                tracing::info!("  Processed {}/{}", i + 1, pages.len());
            }

            let Some(class_name) = page.file_stem().map(|s| s.to_string_lossy().to_string())
            else {
                continue;
            };

            let html = match fs::read_to_string(page) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", page.display(), e);
                    continue;
                }
            };

            let parsed = parse_class_page(&html);
            let file = format!("classes/{}.html", class_name);

            entries.push(IndexEntry::class(&class_name, &parsed.package, &file));
            for method in &parsed.methods {
                entries.push(IndexEntry::method(
                    method,
                    &class_name,
                    &format!("{}#methods", file),
                ));
            }
        }

        tracing::info!("Generated index with {} entries", entries.len());
        Ok(entries)
    }

    /// Serialize compactly to `out`, creating its parent directory.
    pub fn write(&self, entries: &[IndexEntry], out: &Path) -> Result<(), BuildError> {
        let json = serde_json::to_string(entries)?;

        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(out, json).map_err(|source| BuildError::Write {
            path: out.to_path_buf(),
            source,
        })
    }
}
