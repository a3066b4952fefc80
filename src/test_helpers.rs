//! Shared test utilities for the doccsite test suite.
//!
//! Archive bundles are synthesized programmatically into temp directories,
//! so there is no fixture tree to keep in sync. The standard fixture is
//! [`sloth_bundle`], the smallest bundle that exercises every export rule:
//! a nested documentation tree whose `Foo` page shadows a `Foo/` subfolder
//! (the index heuristic), plus one asset of every kind.
//!
//! # Usage
//!
//! ```rust
//! let bundle = sloth_bundle();
//! let archive = DocArchive::open(bundle.path()).unwrap();
//!
//! let out = TempDir::new().unwrap();
//! let report = export(&[bundle.path().to_path_buf()], out.path(), &options).unwrap();
//! assert!(out.path().join("documentation/Foo/index.html").is_file());
//! ```

use std::path::Path;
use tempfile::TempDir;

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Minimal valid page JSON: a title and a one-sentence abstract.
pub fn page_json(title: &str) -> String {
    serde_json::json!({
        "metadata": { "title": title },
        "abstract": [ { "type": "text", "text": format!("All about {title}.") } ],
        "references": {},
    })
    .to_string()
}

/// Page JSON with one topic section linking the given references.
///
/// Each reference is `(identifier, title, url)`.
pub fn page_json_with_topic(
    title: &str,
    section_title: &str,
    refs: &[(&str, &str, &str)],
) -> String {
    let references: serde_json::Map<String, serde_json::Value> = refs
        .iter()
        .map(|(identifier, title, url)| {
            (
                (*identifier).to_string(),
                serde_json::json!({ "title": title, "url": url, "type": "topic" }),
            )
        })
        .collect();
    let identifiers: Vec<&str> = refs.iter().map(|(identifier, _, _)| *identifier).collect();

    serde_json::json!({
        "metadata": { "title": title },
        "abstract": [ { "type": "text", "text": format!("All about {title}.") } ],
        "references": references,
        "topicSections": [ { "title": section_title, "identifiers": identifiers } ],
    })
    .to_string()
}

/// The standard archive fixture.
///
/// ```text
/// data/documentation/
/// ├── Index.json
/// ├── Foo.json          # links to Bar; shadows the Foo/ subfolder
/// └── Foo/
///     └── Bar.json
/// images/sloth.png
/// videos/intro.mov
/// downloads/project.zip
/// img/added-icon-1a2b3c4d.svg
/// css/documentation-topic-2e49a7.css
/// favicon.ico, favicon.svg
/// ```
///
/// No tutorials tree; tests that need one add it with [`write_file`].
pub fn sloth_bundle() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_file(
        &root.join("data/documentation/Index.json"),
        &page_json("Index"),
    );
    write_file(
        &root.join("data/documentation/Foo.json"),
        &page_json_with_topic(
            "Foo",
            "Topics",
            &[("doc://sloth/documentation/Foo/Bar", "Bar", "/documentation/Foo/Bar")],
        ),
    );
    write_file(
        &root.join("data/documentation/Foo/Bar.json"),
        &page_json("Bar"),
    );

    write_file(&root.join("images/sloth.png"), "png bytes");
    write_file(&root.join("videos/intro.mov"), "mov bytes");
    write_file(&root.join("downloads/project.zip"), "zip bytes");
    write_file(&root.join("img/added-icon-1a2b3c4d.svg"), "<svg/>");
    write_file(
        &root.join("css/documentation-topic-2e49a7.css"),
        "body { margin: 0 }",
    );
    write_file(&root.join("favicon.ico"), "ico bytes");
    write_file(&root.join("favicon.svg"), "<svg/>");

    tmp
}

/// All files below a root, as sorted root-relative forward-slash paths.
///
/// Used to compare whole output trees (idempotence, no-write-on-abort).
pub fn tree_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// Read a generated file. Panics with the missing path on failure.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("expected output file {}: {e}", path.display()))
}
