//! Document body compilation.
//!
//! Stage 2 of the docweave build pipeline. Takes the manifest from the scan
//! stage and renders every document body into a self-contained HTML fragment,
//! producing the slug-keyed registry that answers "is this slug renderable?".
//!
//! ## Output Structure
//!
//! ```text
//! compiled/
//! ├── registry.json              # slug → fragment path
//! ├── .cache-manifest.json       # compile cache (see crate::cache)
//! ├── guides.html                # fragment for slug "guides"
//! ├── guides/
//! │   ├── setup.html
//! │   └── advanced/
//! │       └── tuning.html
//! └── ...
//! ```
//!
//! Fragment paths mirror slugs (`{slug}.html`), so the registry stays
//! human-navigable on disk.
//!
//! ## HTML Generation
//!
//! Bodies are rendered with pulldown-cmark and wrapped in a
//! [maud](https://maud.lambda.xyz/) article template carrying the title
//! heading and optional badge. Templates are type-safe Rust code with
//! automatic XSS escaping; only the markdown renderer's own output is
//! inserted pre-escaped.
//!
//! ## Incremental Builds
//!
//! Rendering is skipped for documents whose body and render inputs are
//! unchanged since the last build (see [`crate::cache`]). `--no-cache`
//! forces a full re-render.

use crate::cache::{self, CacheManifest, CacheStats};
use crate::frontmatter::{self, FrontmatterError};
use crate::types::Manifest;
use maud::{html, PreEscaped};
use pulldown_cmark::{html as md_html, Parser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the registry file within the compiled directory.
pub const REGISTRY_FILENAME: &str = "registry.json";

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source document not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("{path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
}

/// Slug-keyed registry of compiled fragments.
///
/// A slug present here resolves to a renderable unit on disk; a slug
/// absent is "not found" — there is no third state. A BTreeMap keeps
/// `registry.json` in sorted order, so identical inputs serialize
/// byte-identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registry {
    units: BTreeMap<String, String>,
}

impl Registry {
    /// Whether a slug resolves to a compiled fragment.
    pub fn exists(&self, slug: &str) -> bool {
        self.units.contains_key(slug)
    }

    /// Fragment path (relative to the compiled directory) for a slug.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.units.get(slug).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn insert(&mut self, slug: String, fragment_path: String) {
        self.units.insert(slug, fragment_path);
    }

    /// Load the registry from a compiled directory. A missing file is an
    /// empty registry, so consumers of a never-built tree still get a
    /// well-formed "everything misses" answer.
    pub fn load(compiled_dir: &Path) -> Result<Self, CompileError> {
        let path = compiled_dir.join(REGISTRY_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, compiled_dir: &Path) -> Result<(), CompileError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(compiled_dir.join(REGISTRY_FILENAME), json)?;
        Ok(())
    }
}

/// Result of the compile stage.
#[derive(Debug)]
pub struct CompileResult {
    pub registry: Registry,
    pub cache_stats: CacheStats,
}

/// Compile every document in the manifest into an HTML fragment.
///
/// Reads the scan manifest at `manifest_path`, resolves each record's
/// source file under `source_root`, and writes fragments plus
/// `registry.json` under `compiled_dir`.
pub fn compile(
    manifest_path: &Path,
    source_root: &Path,
    compiled_dir: &Path,
    use_cache: bool,
) -> Result<CompileResult, CompileError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    std::fs::create_dir_all(compiled_dir)?;

    let mut cache_manifest = if use_cache {
        CacheManifest::load(compiled_dir)
    } else {
        CacheManifest::empty()
    };
    let mut stats = CacheStats::default();
    let mut registry = Registry::default();

    for doc in &manifest.docs {
        let source_path = source_root.join(&doc.source_path);
        if !source_path.exists() {
            return Err(CompileError::SourceNotFound(source_path));
        }
        let content = std::fs::read_to_string(&source_path)?;
        let (_, body) =
            frontmatter::extract(&content).map_err(|source| CompileError::Frontmatter {
                path: source_path.clone(),
                source,
            })?;

        let source_hash = cache::hash_content(body);
        let params_hash = cache::hash_render_params(&doc.title, doc.badge.as_deref());
        let fragment_rel = format!("{}.html", doc.slug);
        let fragment_abs = compiled_dir.join(&fragment_rel);
        if let Some(dir) = fragment_abs.parent() {
            std::fs::create_dir_all(dir)?;
        }

        match cache_manifest.find_cached(&source_hash, &params_hash, compiled_dir) {
            Some(stored) if stored == fragment_rel => {
                stats.hit();
            }
            Some(stored) => {
                // Same content under a new slug: reuse the old fragment.
                std::fs::copy(compiled_dir.join(&stored), &fragment_abs)?;
                stats.copy();
            }
            None => {
                let fragment = render_fragment(&doc.title, doc.badge.as_deref(), body);
                std::fs::write(&fragment_abs, fragment)?;
                stats.miss();
            }
        }

        cache_manifest.insert(fragment_rel.clone(), source_hash, params_hash);
        registry.insert(doc.slug.clone(), fragment_rel);
    }

    registry.save(compiled_dir)?;
    cache_manifest.save(compiled_dir)?;

    Ok(CompileResult {
        registry,
        cache_stats: stats,
    })
}

/// Render one document body into its article fragment.
fn render_fragment(title: &str, badge: Option<&str>, body: &str) -> String {
    let parser = Parser::new(body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let markup = html! {
        article.doc {
            header.doc-header {
                h1 { (title) }
                @if let Some(badge) = badge {
                    span.doc-badge { (badge) }
                }
            }
            div.doc-body {
                (PreEscaped(body_html))
            }
        }
    };
    markup.into_string()
}
