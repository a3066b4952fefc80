//! # doccsite
//!
//! A static HTML site exporter for DocC documentation archive bundles.
//! Point it at one or more archives and a target directory; it produces a
//! plain, browsable site that mirrors each archive's folder hierarchy and
//! needs nothing but a file server (or `file://`) to view.
//!
//! # Architecture: Four-Phase Pipeline
//!
//! Every run moves through the same fixed phases:
//!
//! ```text
//! 1. Prepare target    create the output root, or refuse if it exists
//! 2. Load archives     validate every bundle path, all-or-nothing
//! 3. Copy resources    images, videos, downloads, favicons, stylesheets
//! 4. Generate pages    recursive folder walk, one HTML file per page
//! ```
//!
//! Phases 1 and 2 fail fast: nothing has been written, so an abort is
//! clean. Phases 3 and 4 isolate failures to the single file they affect
//! and report them at the end; partial success is the normal failure mode
//! for a large archive.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Bundle validation, asset enumeration, folder tree, page JSON |
//! | [`export`] | The pipeline: orchestration, resource copying, recursive folder builder, report |
//! | [`naming`] | Content-hash filename parsing (`<name>-<hash>.<ext>`) |
//! | [`options`] | `ExportOptions`: the named boolean flags one run obeys |
//! | [`output`] | CLI summary formatting (pure `format_*` plus `print_*` wrappers) |
//! | [`render`] | Maud HTML templates and per-page `RenderingContext` |
//! | [`target`] | `ExportTarget`: every write to the output root goes through here |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped (archive content never becomes raw HTML), and there is no
//! template directory to ship or get out of sync.
//!
//! ## Relative Links Everywhere
//!
//! Generated pages never use site-absolute URLs. Each page carries a
//! `../`-per-level prefix back to the site root, computed from its folder's
//! nesting level, so an export works from any sub-path of any host without
//! a base-URL setting.
//!
//! ## Landing-Page ("Index") Variants
//!
//! A page named `Foo` next to a subfolder `Foo/` is conventionally that
//! subfolder's landing page. With index building enabled the exporter
//! additionally writes the same content to `Foo/index.html`, so both
//! `.../Foo.html` and `.../Foo/` resolve. The match is by exact name only.
//!
//! ## Hash Stripping
//!
//! Archive tooling content-hashes system assets (`added-icon-1a2b3c4d.svg`)
//! for cache busting. A static export does not need cache busting, so those
//! suffixes are stripped by default; `--keep-hash` retains them. User
//! assets are never content-hashed and are always copied verbatim.
//!
//! ## Failure Reporting, Not Failure Logging
//!
//! The folder builder returns an aggregated report of written and failed
//! pages rather than only logging. The CLI prints it; tests assert on it.

pub mod archive;
pub mod export;
pub mod naming;
pub mod options;
pub mod output;
pub mod render;
pub mod target;

#[cfg(test)]
pub(crate) mod test_helpers;
