//! The export pipeline.
//!
//! Orchestrates one run in fixed phase order:
//!
//! ```text
//! 1. Prepare target     create the output root, or refuse if it exists
//!                       and --force was not given
//! 2. Load archives      all-or-nothing validation of every bundle path
//! 3. Copy resources     per archive: stylesheets, user assets, favicons,
//!                       system images; then the fixed css/site.css
//! 4. Generate pages     recursive folder walk per archive, one HTML file
//!                       per page, index variants per the landing heuristic
//! ```
//!
//! ## Failure isolation
//!
//! Phases 1 and 2 are fatal: nothing has been generated yet, so the run
//! aborts cleanly. From phase 3 on, failures affecting a single file are
//! warned and skipped: a page that does not parse or a resource that does
//! not copy never takes down its siblings. Per-page outcomes accumulate
//! into an [`ExportReport`] so callers and tests can assert on partial
//! failure instead of scraping logs.
//!
//! ## Output layout
//!
//! ```text
//! target/
//! ├── css/site.css               # Fixed site stylesheet
//! ├── css/*.css                  # Copied archive stylesheets (optional)
//! ├── images/ videos/ downloads/ # User assets
//! ├── img/                       # System images (hash-strippable)
//! ├── favicon.*                  # Copied to the root
//! ├── documentation/             # Mirrors the archive folder tree
//! │   ├── Foo.html
//! │   └── Foo/
//! │       ├── index.html         # Landing variant of Foo.html
//! │       └── Bar.html
//! └── tutorials/
//! ```

use crate::archive::{ArchiveError, DocArchive, DocumentFolder, load_archives};
use crate::options::ExportOptions;
use crate::render::{self, RenderingContext};
use crate::target::ExportTarget;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The fixed site stylesheet, written to `css/site.css` on every run.
const SITE_CSS: &str = include_str!("../static/site.css");

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("target directory already exists: {0} (use --force to overwrite)")]
    TargetExists(PathBuf),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Aggregated outcome of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub archives: Vec<ArchiveReport>,
}

impl ExportReport {
    /// Total pages written across all archives, index variants included.
    pub fn total_pages(&self) -> usize {
        self.archives
            .iter()
            .map(|a| a.build.pages.len() + a.build.index_pages.len())
            .sum()
    }

    /// Total pages that failed to load or render.
    pub fn total_failures(&self) -> usize {
        self.archives.iter().map(|a| a.build.failures.len()).sum()
    }
}

/// Per-archive outcome.
#[derive(Debug)]
pub struct ArchiveReport {
    pub name: String,
    pub resources: ResourceCount,
    pub build: BuildReport,
}

/// How many resources of each kind were copied for one archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceCount {
    pub images: usize,
    pub videos: usize,
    pub downloads: usize,
    pub favicons: usize,
    pub system_images: usize,
    pub stylesheets: usize,
}

impl ResourceCount {
    pub fn total(&self) -> usize {
        self.images
            + self.videos
            + self.downloads
            + self.favicons
            + self.system_images
            + self.stylesheets
    }
}

/// Page-level outcome of the folder walk, accumulated across recursion.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Target-relative paths of normal pages written.
    pub pages: Vec<String>,
    /// Target-relative paths of index variants written.
    pub index_pages: Vec<String>,
    /// Pages skipped after a load, render, or write failure.
    pub failures: Vec<PageFailure>,
}

/// One skipped page and why.
#[derive(Debug)]
pub struct PageFailure {
    pub page: PathBuf,
    pub reason: String,
}

/// Run the full export pipeline.
pub fn export(
    archive_paths: &[PathBuf],
    target_dir: &Path,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    let target = ExportTarget::new(target_dir);

    if target.exists() {
        if !options.force {
            return Err(ExportError::TargetExists(target_dir.to_path_buf()));
        }
        debug!(target = %target_dir.display(), "target exists, merging");
    } else {
        target.ensure_dir("")?;
    }

    let archives = load_archives(archive_paths)?;
    info!(archives = archives.len(), "archives loaded");

    let mut resource_counts = Vec::with_capacity(archives.len());
    for archive in &archives {
        resource_counts.push(copy_resources(archive, &target, options)?);
    }

    // The site is still browsable without the custom stylesheet, so a
    // failure here is not worth aborting an otherwise complete run.
    if let Err(e) = target.write(SITE_CSS, "css/site.css") {
        warn!(error = %e, "failed to write site stylesheet");
    }

    let mut reports = Vec::with_capacity(archives.len());
    for (archive, resources) in archives.iter().zip(resource_counts) {
        let mut build = BuildReport::default();

        if options.build_api_docs {
            if let Some(folder) = archive.documentation_folder() {
                build_folder(folder, &target, "documentation", options.build_index, &mut build)?;
            }
        }
        if options.build_tutorials {
            if let Some(folder) = archive.tutorials_folder() {
                build_folder(folder, &target, "tutorials", options.build_index, &mut build)?;
            }
        }

        info!(
            archive = %archive.name(),
            pages = build.pages.len(),
            failed = build.failures.len(),
            "archive exported"
        );
        reports.push(ArchiveReport {
            name: archive.name(),
            resources,
            build,
        });
    }

    Ok(ExportReport { archives: reports })
}

/// Copy one archive's static assets into the target.
///
/// Stylesheets first (when enabled), then user assets with hashes always
/// kept (user files are not content-hashed by convention), then system
/// images, which are and therefore honor `keep_hash`.
fn copy_resources(
    archive: &DocArchive,
    target: &ExportTarget,
    options: &ExportOptions,
) -> io::Result<ResourceCount> {
    let mut count = ResourceCount::default();

    if options.copy_system_css {
        count.stylesheets = target.copy_css(&archive.stylesheets(), options.keep_hash)?;
    }

    count.images = target.copy_raw(&archive.user_images(), "images", true)?;
    count.videos = target.copy_raw(&archive.user_videos(), "videos", true)?;
    count.downloads = target.copy_raw(&archive.user_downloads(), "downloads", true)?;
    count.favicons = target.copy_raw(&archive.favicons(), "", true)?;
    count.system_images = target.copy_raw(&archive.system_images(), "img", options.keep_hash)?;

    debug!(archive = %archive.name(), copied = count.total(), "resources copied");
    Ok(count)
}

/// Recursively render one document folder into the target.
///
/// Subfolders are built before this folder's own pages, so every subfolder
/// directory exists by the time the index heuristic below references one.
/// A page whose base name exactly matches a sibling subfolder's name is
/// treated as that subfolder's landing page and additionally rendered as
/// `<name>/index.html` one level deeper. The match is purely by name: a
/// page that coincidentally shares a subfolder's name gets a landing
/// variant too, since there is no stronger intent signal in the archive.
fn build_folder(
    folder: &DocumentFolder,
    target: &ExportTarget,
    into: &str,
    build_index: bool,
    report: &mut BuildReport,
) -> io::Result<()> {
    target.ensure_dir(into)?;

    for subfolder in folder.subfolders() {
        let sub_path = format!("{into}/{}", subfolder.name());
        build_folder(subfolder, target, &sub_path, build_index, report)?;
    }

    let subfolder_names: BTreeSet<&str> =
        folder.subfolders().iter().map(|s| s.name()).collect();

    for page in folder.page_urls() {
        let base = page
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path_to_root = "../".repeat(folder.level());

        let doc = match folder.load_document(page) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(page = %page.display(), error = %e, "skipping page");
                report.failures.push(PageFailure {
                    page: page.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let ctx = RenderingContext {
            path_to_root: path_to_root.clone(),
            references: &doc.references,
            is_index: false,
            index_links: build_index,
        };
        let out_path = format!("{into}/{base}.html");
        let html = render::render_page(&doc, &ctx).into_string();
        if let Err(e) = target.write(&html, &out_path) {
            warn!(page = %page.display(), error = %e, "skipping page");
            report.failures.push(PageFailure {
                page: page.clone(),
                reason: e.to_string(),
            });
            continue;
        }
        report.pages.push(out_path);

        if build_index && subfolder_names.contains(base.as_str()) {
            // The landing variant lives one directory deeper than the
            // normal page, hence the extra ../ level.
            let ctx = RenderingContext {
                path_to_root: format!("{path_to_root}../"),
                references: &doc.references,
                is_index: true,
                index_links: true,
            };
            let index_path = format!("{into}/{base}/index.html");
            let html = render::render_page(&doc, &ctx).into_string();
            match target.write(&html, &index_path) {
                Ok(()) => report.index_pages.push(index_path),
                Err(e) => {
                    warn!(page = %page.display(), error = %e, "skipping index variant");
                    report.failures.push(PageFailure {
                        page: page.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
