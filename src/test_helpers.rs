//! Shared test utilities for the docweave test suite.
//!
//! Provides fixture-tree builders, record constructors, and lookup helpers
//! that work with manifest and sidebar data structures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let doc = find_doc(&manifest, "guides/setup");
//! assert_eq!(doc.title, "Setup");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::pathinfo::parse_doc_path;
use crate::types::{DocumentRecord, Manifest, SidebarItem, SidebarSection};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a content document with frontmatter at `rel` under `root`,
/// creating intermediate directories. `extra` holds additional frontmatter
/// lines as `(key, value)` pairs, written verbatim.
pub fn write_doc(root: &Path, rel: &str, title: &str, extra: &[(&str, &str)]) {
    let path = root.join(rel);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }
    let mut fm = format!("---\ntitle: {title}\n");
    for (key, value) in extra {
        fm.push_str(&format!("{key}: {value}\n"));
    }
    fm.push_str(&format!("---\n\n# {title}\n\nBody text for {rel}.\n"));
    std::fs::write(path, fm).unwrap();
}

/// Build the standard seven-document fixture tree in a temp directory:
///
/// ```text
/// guides/index.mdx                 # "Guides", order 0, icon book
/// guides/setup.mdx                 # "Setup", order 1, badge new
/// guides/advanced/tuning.mdx       # "Tuning", no order, dangling parent
/// reference/index.md               # "Reference", order 1
/// reference/cli.md                 # "CLI", order 2
/// reference/api/index.md           # "API", order 1
/// reference/api/endpoints.md       # "Endpoints", order 1
/// ```
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, "guides/index.mdx", "Guides", &[("order", "0"), ("icon", "book")]);
    write_doc(
        root,
        "guides/setup.mdx",
        "Setup",
        &[("order", "1"), ("badge", "new"), ("description", "First steps")],
    );
    write_doc(root, "guides/advanced/tuning.mdx", "Tuning", &[]);
    write_doc(root, "reference/index.md", "Reference", &[("order", "1")]);
    write_doc(root, "reference/cli.md", "CLI", &[("order", "2")]);
    write_doc(root, "reference/api/index.md", "API", &[("order", "1")]);
    write_doc(root, "reference/api/endpoints.md", "Endpoints", &[("order", "1")]);
    tmp
}

// =========================================================================
// Record constructors
// =========================================================================

/// Construct a record from a slug alone: section/parent/depth are derived
/// the same way the scanner derives them, the URL uses the stock base path.
pub fn doc(slug: &str, title: &str, order: u32) -> DocumentRecord {
    let parsed = parse_doc_path(&format!("{slug}.md"));
    DocumentRecord {
        slug: parsed.slug.clone(),
        path: format!("/docs/{}", parsed.slug),
        source_path: format!("{slug}.md"),
        title: title.to_string(),
        description: String::new(),
        order,
        icon: None,
        badge: None,
        section: parsed.section,
        parent: parsed.parent,
        depth: parsed.depth,
    }
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a record by slug. Panics if not found.
pub fn find_doc<'a>(manifest: &'a Manifest, slug: &str) -> &'a DocumentRecord {
    manifest
        .docs
        .iter()
        .find(|d| d.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.docs.iter().map(|d| d.slug.as_str()).collect();
            panic!("doc '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a sidebar section by its section key. Panics if not found.
pub fn find_section<'a>(sections: &'a [SidebarSection], name: &str) -> &'a SidebarSection {
    sections
        .iter()
        .find(|s| s.section == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = sections.iter().map(|s| s.section.as_str()).collect();
            panic!("section '{name}' not found. Available: {names:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Item titles in display order.
pub fn titles(items: &[SidebarItem]) -> Vec<&str> {
    items.iter().map(|i| i.title.as_str()).collect()
}
