//! Shared types serialized between pipeline stages.
//!
//! These shapes are written to JSON by one stage and read back by the next
//! (scan → compile → emit), so they must stay identical across all three
//! modules. They are also the shapes embedded in the emitted static data.

use crate::icons::Icon;
use serde::{Deserialize, Serialize};

/// Sort sentinel for documents whose frontmatter omits `order`: they sort
/// after everything that specifies a smaller explicit order.
pub const DEFAULT_ORDER: u32 = 999;

/// One content file, flattened into the manifest.
///
/// `slug`, `section`, `parent`, and `depth` are derived from the file's
/// location ([`crate::pathinfo::parse_doc_path`]); the rest comes from
/// frontmatter with the defaults documented per field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    /// Unique identity derived from the file path (`guides/setup`).
    pub slug: String,
    /// Public-facing URL: `{base_path}/{slug}`.
    pub path: String,
    /// Content-root-relative path of the source file (`guides/setup.mdx`).
    /// The compile stage reads document bodies through this.
    pub source_path: String,
    /// Display title from frontmatter.
    pub title: String,
    /// Frontmatter description; empty string when absent.
    #[serde(default)]
    pub description: String,
    /// Explicit sort position; [`DEFAULT_ORDER`] when absent.
    pub order: u32,
    /// Optional sidebar icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Optional free-form badge label ("new", "beta", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Top-level grouping key (first path segment, or `general`).
    pub section: String,
    /// Slug of the containing directory, when two or more segments deep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Path segment count after index collapsing.
    pub depth: usize,
}

/// A navigation node derived from a [`DocumentRecord`].
///
/// `children` is `None` when the node has no descendants — the key is
/// omitted from serialized output entirely, so consumers can treat
/// "key present" as "has children" without inspecting a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarItem {
    pub title: String,
    pub slug: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SidebarItem>>,
}

/// One sidebar group per distinct `section` value.
///
/// `title`, `icon`, and `order` come from the section's index document
/// (the record whose slug equals the section name) when one exists;
/// otherwise the title falls back to the capitalized section slug and
/// the order to [`DEFAULT_ORDER`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarSection {
    pub section: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub order: u32,
    pub items: Vec<SidebarItem>,
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub docs: Vec<DocumentRecord>,
    pub config: crate::config::SiteConfig,
}
