use clap::Parser;
use doccsite::archive::ArchiveError;
use doccsite::export::{self, ExportError};
use doccsite::options::ExportOptions;
use doccsite::output;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

// Process exit codes. Fatal conditions each get their own so scripts can
// tell a refused overwrite from a bad archive path.
const EXIT_NOT_ENOUGH_ARGUMENTS: i32 = 1;
const EXIT_TARGET_DIRECTORY_EXISTS: i32 = 2;
const EXIT_EXPECTED_DOCC_ARCHIVE: i32 = 3;
const EXIT_UNEXPECTED_ERROR: i32 = 4;

#[derive(Parser)]
#[command(name = "doccsite")]
#[command(about = "Export DocC documentation archives to a static HTML site")]
#[command(long_about = "\
Export DocC documentation archives to a static HTML site

Takes one or more archive bundles and writes a browsable site that mirrors
each archive's folder hierarchy. The last path is the target directory.

Output structure:

  target/
  ├── css/site.css               # Fixed site stylesheet
  ├── images/ videos/ downloads/ # User assets, copied verbatim
  ├── img/                       # System images (hash suffixes stripped)
  ├── favicon.*                  # Copied to the site root
  ├── documentation/
  │   ├── Foo.html               # One page per document
  │   └── Foo/
  │       ├── index.html         # Landing variant: browse .../Foo/ directly
  │       └── Bar.html
  └── tutorials/

Pages named like a sibling subfolder double as that subfolder's landing
page and are additionally written as <name>/index.html.")]
#[command(version)]
struct Cli {
    /// Archive bundles to export, followed by the target directory
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Overwrite/merge into an existing target directory
    #[arg(short, long)]
    force: bool,

    /// Error-level logging only
    #[arg(short, long, conflicts_with = "verbose")]
    silent: bool,

    /// Trace-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep content-hash suffixes in copied resource filenames
    #[arg(long)]
    keep_hash: bool,
}

fn main() {
    let cli = Cli::parse();

    // --silent and --verbose win over RUST_LOG; otherwise the environment
    // decides, defaulting to warnings and errors.
    let filter = if cli.silent {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.paths.len() < 2 {
        eprintln!("error: expected one or more archives followed by a target directory");
        eprintln!("usage: doccsite [OPTIONS] <ARCHIVE>... <TARGET>");
        process::exit(EXIT_NOT_ENOUGH_ARGUMENTS);
    }
    let (target, archives) = cli.paths.split_last().expect("length checked above");

    let options = ExportOptions {
        force: cli.force,
        keep_hash: cli.keep_hash,
        ..ExportOptions::default()
    };

    match export::export(archives, target, &options) {
        Ok(report) => {
            if !cli.silent {
                output::print_export_summary(&report);
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(exit_code(&err));
        }
    }
}

/// Map a fatal export error to its process exit code.
fn exit_code(err: &ExportError) -> i32 {
    match err {
        ExportError::TargetExists(_) => EXIT_TARGET_DIRECTORY_EXISTS,
        ExportError::Archive(ArchiveError::NotAnArchive(_)) => EXIT_EXPECTED_DOCC_ARCHIVE,
        ExportError::Archive(_) | ExportError::Io(_) => EXIT_UNEXPECTED_ERROR,
    }
}
