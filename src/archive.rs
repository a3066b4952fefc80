//! Archive bundle ingestion.
//!
//! A documentation archive is a directory bundle with a fixed shape:
//!
//! ```text
//! Sloth.doccarchive/
//! ├── data/
//! │   ├── documentation/           # Logical content tree (level 1)
//! │   │   ├── sloth.json           # Page document (render JSON)
//! │   │   └── sloth/               # Subfolder (level 2)
//! │   │       └── food.json
//! │   └── tutorials/               # Optional second tree
//! ├── images/                      # User images
//! ├── videos/                      # User videos
//! ├── downloads/                   # User downloads
//! ├── img/                         # System images (content-hashed names)
//! ├── css/                         # System stylesheets (content-hashed)
//! └── favicon.ico                  # Favicons at the bundle root
//! ```
//!
//! [`load_archives`] validates each path and produces immutable
//! [`DocArchive`] handles. Format detection is structural only: a directory
//! with a `data/` subdirectory holding at least one of `documentation/` or
//! `tutorials/`. Anything else is rejected up front; loading is
//! all-or-nothing across the given paths.
//!
//! Every enumeration (assets, subfolders, pages) is sorted by file name so
//! repeated exports of the same bundle produce identical output trees.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("not a documentation archive: {0}")]
    NotAnArchive(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse page {path}: {source}")]
    Page {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Open every path as an archive bundle.
///
/// Fails on the first path that is not a recognized bundle; a run never
/// proceeds with a partial archive list.
pub fn load_archives(paths: &[PathBuf]) -> Result<Vec<DocArchive>, ArchiveError> {
    paths.iter().map(|p| DocArchive::open(p)).collect()
}

/// A parsed, read-only handle to one archive bundle.
///
/// Constructed once by [`load_archives`]; the folder trees are built
/// eagerly at open time and never change afterwards.
#[derive(Debug)]
pub struct DocArchive {
    root: PathBuf,
    documentation: Option<DocumentFolder>,
    tutorials: Option<DocumentFolder>,
}

impl DocArchive {
    /// Open a bundle directory, validating its structure.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let data = path.join("data");
        if !path.is_dir() || !data.is_dir() {
            return Err(ArchiveError::NotAnArchive(path.to_path_buf()));
        }

        // The data/ directory is level 0 of the logical tree, so both
        // top-level content folders sit at level 1: one directory
        // ("documentation/" or "tutorials/") separates their pages from
        // the site root in the output.
        let documentation = read_folder_if_present(&data.join("documentation"), 1)?;
        let tutorials = read_folder_if_present(&data.join("tutorials"), 1)?;

        if documentation.is_none() && tutorials.is_none() {
            return Err(ArchiveError::NotAnArchive(path.to_path_buf()));
        }

        Ok(Self {
            root: path.to_path_buf(),
            documentation,
            tutorials,
        })
    }

    /// The bundle directory this archive was opened from.
    pub fn source_path(&self) -> &Path {
        &self.root
    }

    /// Display name: the bundle directory name without its extension.
    pub fn name(&self) -> String {
        self.root
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// User images under `images/`.
    pub fn user_images(&self) -> Vec<PathBuf> {
        files_under(&self.root.join("images"))
    }

    /// User videos under `videos/`.
    pub fn user_videos(&self) -> Vec<PathBuf> {
        files_under(&self.root.join("videos"))
    }

    /// User downloads under `downloads/`.
    pub fn user_downloads(&self) -> Vec<PathBuf> {
        files_under(&self.root.join("downloads"))
    }

    /// System images under `img/`. These carry content-hash suffixes.
    pub fn system_images(&self) -> Vec<PathBuf> {
        files_under(&self.root.join("img"))
    }

    /// System stylesheets under `css/`.
    pub fn stylesheets(&self) -> Vec<PathBuf> {
        files_under(&self.root.join("css"))
            .into_iter()
            .filter(|p| p.extension().is_some_and(|e| e == "css"))
            .collect()
    }

    /// Favicon files at the bundle root (`favicon.ico`, `favicon.svg`, ...).
    pub fn favicons(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut favicons: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .is_some_and(|n| n.to_string_lossy().starts_with("favicon."))
            })
            .collect();
        favicons.sort();
        favicons
    }

    /// The documentation content tree, if the archive has one.
    pub fn documentation_folder(&self) -> Option<&DocumentFolder> {
        self.documentation.as_ref()
    }

    /// The tutorials content tree, if the archive has one.
    pub fn tutorials_folder(&self) -> Option<&DocumentFolder> {
        self.tutorials.as_ref()
    }
}

/// All files below a directory, sorted, or empty if the directory is absent.
fn files_under(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

fn read_folder_if_present(path: &Path, level: usize) -> io::Result<Option<DocumentFolder>> {
    if path.is_dir() {
        read_folder(path, level).map(Some)
    } else {
        Ok(None)
    }
}

/// One directory level within an archive's logical content tree.
///
/// `level` is the depth from the bundle's `data/` directory; a subfolder's
/// level is always its parent's plus one. Subfolders and pages are sorted
/// by name.
#[derive(Debug)]
pub struct DocumentFolder {
    path: PathBuf,
    name: String,
    level: usize,
    subfolders: Vec<DocumentFolder>,
    page_urls: Vec<PathBuf>,
}

impl DocumentFolder {
    /// The folder's own directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The folder's final path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depth from the data root. Drives the `../` path-to-root prefix of
    /// every page rendered from this folder.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Child folders, sorted by name.
    pub fn subfolders(&self) -> &[DocumentFolder] {
        &self.subfolders
    }

    /// Page documents directly in this folder, sorted by file name.
    pub fn page_urls(&self) -> &[PathBuf] {
        &self.page_urls
    }

    /// Parse one of this folder's pages into a [`Document`].
    pub fn load_document(&self, page: &Path) -> Result<Document, ArchiveError> {
        let raw = fs::read_to_string(page)?;
        serde_json::from_str(&raw).map_err(|source| ArchiveError::Page {
            path: page.to_path_buf(),
            source,
        })
    }
}

fn read_folder(path: &Path, level: usize) -> io::Result<DocumentFolder> {
    let mut subfolders = Vec::new();
    let mut page_urls = Vec::new();

    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            subfolders.push(read_folder(&entry, level + 1)?);
        } else if entry.extension().is_some_and(|e| e == "json") {
            page_urls.push(entry);
        }
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(DocumentFolder {
        path: path.to_path_buf(),
        name,
        level,
        subfolders,
        page_urls,
    })
}

// ============================================================================
// Page documents
// ============================================================================

/// A parsed page document.
///
/// Only the fields the renderer consumes are modeled; everything else in
/// the page JSON is ignored on deserialization.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub metadata: Metadata,
    /// Leading abstract, as inline text fragments.
    #[serde(default, rename = "abstract")]
    pub abstract_fragments: Vec<InlineText>,
    /// Cross-document reference table, keyed by identifier.
    #[serde(default)]
    pub references: BTreeMap<String, Reference>,
    #[serde(default, rename = "topicSections")]
    pub topic_sections: Vec<TopicSection>,
}

impl Document {
    /// Page title, falling back to "Untitled" for pages without metadata.
    pub fn title(&self) -> &str {
        if self.metadata.title.is_empty() {
            "Untitled"
        } else {
            &self.metadata.title
        }
    }

    /// The abstract joined into one plain-text string.
    pub fn abstract_text(&self) -> String {
        self.abstract_fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
}

/// One inline text fragment of an abstract.
#[derive(Debug, Deserialize)]
pub struct InlineText {
    #[serde(default)]
    pub text: String,
}

/// An entry in a document's reference table.
#[derive(Debug, Deserialize)]
pub struct Reference {
    pub title: Option<String>,
    /// Site-absolute URL like `/documentation/sloth/food`. No extension for
    /// topic references; media references keep theirs.
    pub url: Option<String>,
}

/// A titled group of references shown as a link list on the page.
#[derive(Debug, Deserialize)]
pub struct TopicSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{page_json, sloth_bundle, write_file};

    #[test]
    fn open_rejects_missing_path() {
        let err = DocArchive::open(Path::new("/nonexistent/Sloth.doccarchive")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotAnArchive(_)));
    }

    #[test]
    fn open_rejects_directory_without_data() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = DocArchive::open(tmp.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::NotAnArchive(_)));
    }

    #[test]
    fn open_rejects_data_without_content_folders() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("data")).unwrap();
        let err = DocArchive::open(tmp.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::NotAnArchive(_)));
    }

    #[test]
    fn load_archives_fails_on_first_bad_path() {
        let good = sloth_bundle();
        let bad = tempfile::TempDir::new().unwrap();
        let err = load_archives(&[
            good.path().to_path_buf(),
            bad.path().to_path_buf(),
        ])
        .unwrap_err();
        match err {
            ArchiveError::NotAnArchive(p) => assert_eq!(p, bad.path()),
            other => panic!("expected NotAnArchive, got {other:?}"),
        }
    }

    #[test]
    fn folder_tree_levels_and_order() {
        let tmp = sloth_bundle();
        let archive = DocArchive::open(tmp.path()).unwrap();
        let docs = archive.documentation_folder().unwrap();

        assert_eq!(docs.level(), 1);
        assert_eq!(docs.name(), "documentation");

        let page_names: Vec<_> = docs
            .page_urls()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(page_names, ["Foo.json", "Index.json"]);

        assert_eq!(docs.subfolders().len(), 1);
        let foo = &docs.subfolders()[0];
        assert_eq!(foo.name(), "Foo");
        assert_eq!(foo.level(), 2);
        assert_eq!(foo.page_urls().len(), 1);
    }

    #[test]
    fn asset_enumeration() {
        let tmp = sloth_bundle();
        let archive = DocArchive::open(tmp.path()).unwrap();

        let names = |paths: Vec<PathBuf>| -> Vec<String> {
            paths
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        };

        assert_eq!(names(archive.user_images()), ["sloth.png"]);
        assert_eq!(names(archive.user_videos()), ["intro.mov"]);
        assert_eq!(names(archive.user_downloads()), ["project.zip"]);
        assert_eq!(names(archive.system_images()), ["added-icon-1a2b3c4d.svg"]);
        assert_eq!(
            names(archive.stylesheets()),
            ["documentation-topic-2e49a7.css"]
        );
        assert_eq!(names(archive.favicons()), ["favicon.ico", "favicon.svg"]);
    }

    #[test]
    fn stylesheets_ignore_non_css_files() {
        let tmp = sloth_bundle();
        write_file(&tmp.path().join("css/topic.css.map"), "{}");
        let archive = DocArchive::open(tmp.path()).unwrap();
        assert_eq!(archive.stylesheets().len(), 1);
    }

    #[test]
    fn missing_asset_directories_are_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_file(
            &tmp.path().join("data/documentation/Index.json"),
            &page_json("Index"),
        );
        let archive = DocArchive::open(tmp.path()).unwrap();
        assert!(archive.user_videos().is_empty());
        assert!(archive.favicons().is_empty());
        assert!(archive.tutorials_folder().is_none());
    }

    #[test]
    fn document_parses_title_abstract_and_references() {
        let tmp = sloth_bundle();
        let archive = DocArchive::open(tmp.path()).unwrap();
        let docs = archive.documentation_folder().unwrap();
        let foo = docs
            .page_urls()
            .iter()
            .find(|p| p.file_name().unwrap() == "Foo.json")
            .unwrap();

        let doc = docs.load_document(foo).unwrap();
        assert_eq!(doc.title(), "Foo");
        assert_eq!(doc.abstract_text(), "All about Foo.");
        assert_eq!(doc.topic_sections.len(), 1);
        let reference = &doc.references["doc://sloth/documentation/Foo/Bar"];
        assert_eq!(reference.title.as_deref(), Some("Bar"));
        assert_eq!(reference.url.as_deref(), Some("/documentation/Foo/Bar"));
    }

    #[test]
    fn document_tolerates_minimal_json() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.title(), "Untitled");
        assert_eq!(doc.abstract_text(), "");
        assert!(doc.topic_sections.is_empty());
    }

    #[test]
    fn load_document_reports_malformed_json() {
        let tmp = sloth_bundle();
        let broken = tmp.path().join("data/documentation/Broken.json");
        write_file(&broken, "{ not json");
        let archive = DocArchive::open(tmp.path()).unwrap();
        let docs = archive.documentation_folder().unwrap();
        let err = docs.load_document(&broken).unwrap_err();
        assert!(matches!(err, ArchiveError::Page { .. }));
    }
}
