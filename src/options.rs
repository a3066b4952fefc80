//! Export behavior flags.
//!
//! One plain struct of named booleans, shared by the CLI and the pipeline.
//! Call sites read `options.build_index` instead of testing bits, and every
//! combination remains expressible.

/// Flags selecting export behavior for one run.
///
/// Constructed by the CLI from its arguments; everything downstream takes it
/// by reference and never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Overwrite/merge into an existing target directory.
    pub force: bool,
    /// Keep content-hash suffixes in copied resource filenames
    /// (`added-icon-a1b2c3d4.svg` stays as-is instead of becoming
    /// `added-icon.svg`).
    pub keep_hash: bool,
    /// Copy the archive's own stylesheets into `css/`.
    pub copy_system_css: bool,
    /// Emit `<name>/index.html` landing variants for pages that share a
    /// name with a sibling subfolder.
    pub build_index: bool,
    /// Build the `documentation/` subtree.
    pub build_api_docs: bool,
    /// Build the `tutorials/` subtree.
    pub build_tutorials: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            force: false,
            keep_hash: false,
            copy_system_css: true,
            build_index: true,
            build_api_docs: true,
            build_tutorials: true,
        }
    }
}
