//! Centralized path parsing for the content-tree slug convention.
//!
//! Every document's identity is derived from its location on disk. This module
//! provides a single parsing function that turns a content-root-relative file
//! path into the `(section, slug, parent, depth)` tuple used everywhere else:
//! the manifest, the sidebar builder, and the lookup index.
//!
//! ## Slug Derivation
//!
//! - Path separators are normalized to `/`, the file extension is stripped.
//! - A trailing `index` segment is collapsed into its directory, so
//!   `guides/index.mdx` and a hypothetical `guides.mdx` produce the same
//!   slug `guides` — directory landing page semantics.
//! - `awfixeros/user-guide/installation.mdx` → slug
//!   `awfixeros/user-guide/installation`, section `awfixeros`,
//!   parent `awfixeros/user-guide`, depth 3.

/// Section assigned to documents that live directly in the content root.
pub const ROOT_SECTION: &str = "general";

/// Result of parsing a content-relative path like `guides/setup.mdx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// First path segment, or [`ROOT_SECTION`] for root-level files.
    pub section: String,
    /// All segments rejoined with `/`. The literal `index` for a bare
    /// root-level `index.mdx`.
    pub slug: String,
    /// Slug of the containing directory. `None` for documents directly
    /// under their section root.
    pub parent: Option<String>,
    /// Number of path segments after collapsing a trailing `index`.
    pub depth: usize,
}

/// Parse a relative document path into its identity parts.
///
/// Handles these patterns:
/// - `"guides/setup.mdx"` → section=`guides`, slug=`guides/setup`,
///   parent=Some(`guides`), depth=2 (a parent equal to the section slug
///   still places the document at the section root in the sidebar)
/// - `"guides/advanced/tuning.mdx"` → section=`guides`,
///   slug=`guides/advanced/tuning`, parent=Some(`guides/advanced`), depth=3
/// - `"guides/index.mdx"` → section=`guides`, slug=`guides`, parent=None, depth=1
/// - `"welcome.md"` → section=`general`, slug=`welcome`, parent=None, depth=1
/// - `"index.mdx"` → section=`general`, slug=`index`, parent=None, depth=0
///
/// This is a pure string transform; no path on disk is consulted.
pub fn parse_doc_path(relative: &str) -> ParsedPath {
    let normalized = relative.replace('\\', "/");

    let mut segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    // Strip the extension from the final segment only.
    if let Some(last) = segments.last_mut() {
        let stem: &str = *last;
        if let Some(dot) = stem.rfind('.') {
            *last = &stem[..dot];
        }
    }

    // `foo/index` collapses to `foo`: the file is its directory's landing page.
    if segments.last() == Some(&"index") {
        segments.pop();
    }

    let depth = segments.len();

    let section = segments
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| ROOT_SECTION.to_string());

    let slug = if segments.is_empty() {
        // A root-level `index.mdx` with no directory keeps its literal name.
        "index".to_string()
    } else {
        segments.join("/")
    };

    let parent = if segments.len() >= 2 {
        Some(segments[..segments.len() - 1].join("/"))
    } else {
        None
    };

    ParsedPath {
        section,
        slug,
        parent,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_document() {
        let p = parse_doc_path("awfixeros/user-guide/installation.mdx");
        assert_eq!(p.section, "awfixeros");
        assert_eq!(p.slug, "awfixeros/user-guide/installation");
        assert_eq!(p.parent.as_deref(), Some("awfixeros/user-guide"));
        assert_eq!(p.depth, 3);
    }

    #[test]
    fn section_root_document_parent_is_its_section() {
        let p = parse_doc_path("guides/setup.mdx");
        assert_eq!(p.section, "guides");
        assert_eq!(p.slug, "guides/setup");
        assert_eq!(p.parent.as_deref(), Some("guides"));
        assert_eq!(p.depth, 2);
    }

    #[test]
    fn index_collapses_into_directory() {
        let p = parse_doc_path("a/b/index.mdx");
        assert_eq!(p.slug, "a/b");
        assert_eq!(p.depth, 2);
        assert_eq!(p.parent.as_deref(), Some("a"));
    }

    #[test]
    fn section_index_document() {
        let p = parse_doc_path("guides/index.mdx");
        assert_eq!(p.section, "guides");
        assert_eq!(p.slug, "guides");
        assert_eq!(p.parent, None);
        assert_eq!(p.depth, 1);
    }

    #[test]
    fn root_level_file_lands_in_general() {
        let p = parse_doc_path("welcome.md");
        assert_eq!(p.section, "general");
        assert_eq!(p.slug, "welcome");
        assert_eq!(p.parent, None);
        assert_eq!(p.depth, 1);
    }

    #[test]
    fn bare_root_index_keeps_literal_name() {
        let p = parse_doc_path("index.mdx");
        assert_eq!(p.section, "general");
        assert_eq!(p.slug, "index");
        assert_eq!(p.parent, None);
        assert_eq!(p.depth, 0);
    }

    #[test]
    fn backslash_separators_normalized() {
        let p = parse_doc_path("guides\\setup.mdx");
        assert_eq!(p.slug, "guides/setup");
        assert_eq!(p.section, "guides");
    }

    #[test]
    fn only_final_extension_stripped() {
        let p = parse_doc_path("guides/v1.2-notes.mdx");
        assert_eq!(p.slug, "guides/v1.2-notes");
    }

    #[test]
    fn dotted_directory_names_untouched() {
        let p = parse_doc_path("api.v2/overview.md");
        assert_eq!(p.section, "api.v2");
        assert_eq!(p.slug, "api.v2/overview");
    }

    #[test]
    fn round_trip_without_index_segment() {
        // For any path with no `index` segment, the slug is the path with
        // its extension removed.
        for path in ["a/b/c.md", "docs/setup.mdx", "one.md"] {
            let p = parse_doc_path(path);
            let expected = &path[..path.rfind('.').unwrap()];
            assert_eq!(p.slug, expected, "slug mismatch for {path}");
        }
    }

    #[test]
    fn extensionless_file() {
        let p = parse_doc_path("guides/README");
        assert_eq!(p.slug, "guides/README");
        assert_eq!(p.depth, 2);
    }

    #[test]
    fn nested_index_parent_is_grandparent_dir() {
        let p = parse_doc_path("a/b/c/index.mdx");
        assert_eq!(p.slug, "a/b/c");
        assert_eq!(p.parent.as_deref(), Some("a/b"));
        assert_eq!(p.depth, 3);
    }
}
