//! Filesystem scanning and manifest assembly.
//!
//! Stage 1 of the docweave build pipeline. Walks a content tree to discover
//! documents, producing the flat manifest that subsequent stages consume.
//!
//! ## Directory Structure
//!
//! The first path segment of every document is its section; deeper
//! directories nest items in the sidebar. An `index` file supplies its
//! directory's metadata:
//!
//! ```text
//! docs/                            # Content root
//! ├── docweave.toml                # Site configuration (optional)
//! ├── welcome.md                   # Root-level file → section "general"
//! ├── guides/
//! │   ├── index.mdx                # Section landing page (slug "guides")
//! │   ├── setup.mdx                # slug "guides/setup"
//! │   └── advanced/
//! │       ├── index.mdx            # slug "guides/advanced"
//! │       └── tuning.mdx           # slug "guides/advanced/tuning"
//! └── reference/
//!     └── cli.md
//! ```
//!
//! ## Output
//!
//! Produces a [`Manifest`] containing one [`DocumentRecord`] per content
//! file, in sorted filesystem enumeration order. No display sorting happens
//! here — that is the sidebar builder's job.
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - Every document carries a frontmatter block with a `title`
//! - Icon names resolve against the closed icon vocabulary
//! - No two documents produce the same slug
//!
//! A missing or empty content root is not an error: it yields an empty
//! manifest so downstream consumers always get well-formed (if empty)
//! artifacts. An I/O failure on a file that does exist aborts the scan —
//! a partial manifest is worse than a failed build.

use crate::config::{self, SiteConfig, CONFIG_FILENAME};
use crate::frontmatter::{self, FrontmatterError};
use crate::icons::Icon;
use crate::pathinfo::parse_doc_path;
use crate::types::{DocumentRecord, Manifest};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("{path}: {source}")]
    UnknownIcon {
        path: PathBuf,
        source: crate::icons::UnknownIcon,
    },
    #[error("duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Scan the content root into a manifest, loading `docweave.toml` from it.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    scan_with_config(root, config)
}

/// Scan with an already-loaded configuration.
///
/// Enumeration is sorted by file name at every level, so two scans of the
/// same tree produce identical manifests regardless of filesystem ordering.
pub fn scan_with_config(root: &Path, config: SiteConfig) -> Result<Manifest, ScanError> {
    let mut docs = Vec::new();

    if !root.is_dir() {
        // Missing content root means zero documents, not a failure.
        return Ok(Manifest { docs, config });
    }

    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    // depth 0 is the root itself — never filter it, whatever it is named.
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name == CONFIG_FILENAME {
            continue;
        }
        let ext = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        if !config.matches_extension(&ext) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("walk entries live under the root")
            .to_string_lossy()
            .to_string();

        let record = read_document(entry.path(), &rel, &config)?;

        if let Some(first) = seen.get(&record.slug) {
            return Err(ScanError::DuplicateSlug {
                slug: record.slug,
                first: first.clone(),
                second: entry.path().to_path_buf(),
            });
        }
        seen.insert(record.slug.clone(), entry.path().to_path_buf());
        docs.push(record);
    }

    Ok(Manifest { docs, config })
}

/// Build one record from a content file: identity from the path, metadata
/// from the frontmatter.
fn read_document(
    abs_path: &Path,
    rel_path: &str,
    config: &SiteConfig,
) -> Result<DocumentRecord, ScanError> {
    let content = std::fs::read_to_string(abs_path)?;

    let (meta, _body) =
        frontmatter::extract(&content).map_err(|source| ScanError::Frontmatter {
            path: abs_path.to_path_buf(),
            source,
        })?;

    let icon: Option<Icon> = meta
        .icon
        .as_deref()
        .map(|name| name.parse())
        .transpose()
        .map_err(|source| ScanError::UnknownIcon {
            path: abs_path.to_path_buf(),
            source,
        })?;

    let parsed = parse_doc_path(rel_path);

    Ok(DocumentRecord {
        path: config.url_for(&parsed.slug),
        slug: parsed.slug,
        source_path: rel_path.replace('\\', "/"),
        title: meta.title,
        description: meta.description,
        order: meta.order,
        icon,
        badge: meta.badge,
        section: parsed.section,
        parent: parsed.parent,
        depth: parsed.depth,
    })
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
