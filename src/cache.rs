//! Compile cache for incremental builds.
//!
//! Rendering a handful of markdown files is cheap, but documentation trees
//! grow, and CI re-runs the full pipeline on every push. This module lets
//! the compile stage skip rendering when a document's body and render
//! inputs haven't changed since the last build.
//!
//! # Design
//!
//! The cache is **content-addressed**: lookups are by the combination of
//! `source_hash` and `params_hash`, not by output fragment path. Moving a
//! document (slug change) does not invalidate its cache entry — only body
//! or render-input changes do. When a hit is found under a different
//! fragment path, the cached fragment is copied to the new location instead
//! of re-rendering.
//!
//! - **`source_hash`**: SHA-256 of the document body (frontmatter already
//!   stripped). Content-based rather than mtime-based so it survives
//!   `git checkout`, which resets modification times.
//!
//! - **`params_hash`**: SHA-256 of everything else that shapes the
//!   fragment: the display title, the badge, and a renderer version tag
//!   that is bumped whenever the fragment template or markdown options
//!   change.
//!
//! A cache hit requires an entry with matching hashes **and** the
//! previously-written fragment still on disk.
//!
//! ## Storage
//!
//! The cache manifest is a JSON file at `<compiled_dir>/.cache-manifest.json`.
//! It lives alongside the fragments so it travels with the directory when
//! cached in CI.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to the `build` or `compile` command to force a full
//! re-render. This loads an empty manifest, so every document is rendered
//! and old fragments are overwritten naturally.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the compiled directory.
const MANIFEST_FILENAME: &str = ".cache-manifest.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// Tag folded into every params hash. Bump when the fragment template or
/// markdown renderer options change in a way that alters output.
const RENDERER_TAG: &str = "docweave-fragment-v1";

/// A single cached fragment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// On-disk cache manifest mapping fragment paths to their cache entries.
///
/// Lookups go through a runtime `content_index` that maps
/// `"{source_hash}:{params_hash}"` to the stored fragment path, making
/// the cache resilient to document renames.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, CacheEntry>,
    /// Runtime reverse index: `"{source_hash}:{params_hash}"` → fragment
    /// path. Built at load time, maintained on insert. Never serialized.
    #[serde(skip)]
    content_index: HashMap<String, String>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
            content_index: HashMap::new(),
        }
    }

    /// Load from the compiled directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(compiled_dir: &Path) -> Self {
        let path = compiled_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let mut manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(_) => return Self::empty(),
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest.content_index = build_content_index(&manifest.entries);
        manifest
    }

    /// Save to the compiled directory.
    pub fn save(&self, compiled_dir: &Path) -> io::Result<()> {
        let path = compiled_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Look up a cached fragment by content hashes.
    ///
    /// Returns `Some(stored_fragment_path)` if an entry with matching
    /// hashes exists **and** the file is still on disk. The returned path
    /// may differ from the caller's expected path (after a rename); the
    /// caller copies the fragment to the new location in that case.
    pub fn find_cached(
        &self,
        source_hash: &str,
        params_hash: &str,
        compiled_dir: &Path,
    ) -> Option<String> {
        let content_key = format!("{}:{}", source_hash, params_hash);
        let stored_path = self.content_index.get(&content_key)?;
        if compiled_dir.join(stored_path).exists() {
            Some(stored_path.clone())
        } else {
            None
        }
    }

    /// Record a cache entry for a fragment.
    ///
    /// If an entry with the same content already exists under a different
    /// path, the old entry is removed to keep the manifest clean when
    /// documents move.
    pub fn insert(&mut self, fragment_path: String, source_hash: String, params_hash: String) {
        let content_key = format!("{}:{}", source_hash, params_hash);

        if let Some(old_path) = self.content_index.get(&content_key)
            && *old_path != fragment_path
        {
            self.entries.remove(old_path.as_str());
        }

        self.content_index.insert(content_key, fragment_path.clone());
        self.entries.insert(
            fragment_path,
            CacheEntry {
                source_hash,
                params_hash,
            },
        );
    }
}

/// Build the content_index reverse map from the entries map.
fn build_content_index(entries: &HashMap<String, CacheEntry>) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(fragment_path, entry)| {
            let content_key = format!("{}:{}", entry.source_hash, entry.params_hash);
            (content_key, fragment_path.clone())
        })
        .collect()
}

/// SHA-256 hash of a document body, returned as a hex string.
pub fn hash_content(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    format!("{:x}", digest)
}

/// SHA-256 hash of the non-body render inputs for a fragment.
///
/// Inputs: display title, badge, and the renderer tag. If any of these
/// change, the previously cached fragment is invalid.
pub fn hash_render_params(title: &str, badge: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(RENDERER_TAG.as_bytes());
    hasher.update(b"\0");
    hasher.update(title.as_bytes());
    hasher.update(b"\0");
    match badge {
        Some(badge) => {
            hasher.update(b"\x01");
            hasher.update(badge.as_bytes());
        }
        None => {
            hasher.update(b"\x00");
        }
    }
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u32,
    pub copies: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn copy(&mut self) {
        self.copies += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.copies + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 || self.copies > 0 {
            if self.copies > 0 {
                write!(
                    f,
                    "{} cached, {} copied, {} rendered ({} total)",
                    self.hits,
                    self.copies,
                    self.misses,
                    self.total()
                )
            } else {
                write!(
                    f,
                    "{} cached, {} rendered ({} total)",
                    self.hits,
                    self.misses,
                    self.total()
                )
            }
        } else {
            write!(f, "{} rendered", self.misses)
        }
    }
}

/// Resolve the cache manifest path for a compiled directory.
pub fn manifest_path(compiled_dir: &Path) -> PathBuf {
    compiled_dir.join(MANIFEST_FILENAME)
}
