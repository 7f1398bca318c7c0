//! Frontmatter extraction and metadata resolution.
//!
//! Every content file carries a YAML metadata block between `---` fences at
//! the top of the file:
//!
//! ```text
//! ---
//! title: Installation
//! description: Step-by-step install guide
//! order: 2
//! icon: rocket
//! badge: new
//! ---
//!
//! Body markdown starts here.
//! ```
//!
//! ## Field defaults
//!
//! - `title` — required. A document without a title is a content-authoring
//!   mistake; the scan fails loudly rather than propagating an empty title
//!   into sort keys and navigation labels.
//! - `description` — defaults to the empty string.
//! - `order` — defaults to [`DEFAULT_ORDER`] (sort last).
//! - `icon`, `badge` — optional, absent by default. Icon names are kept as
//!   raw strings here; the scan stage resolves them against the closed
//!   [`Icon`](crate::icons::Icon) vocabulary.
//!
//! YAML parsing is delegated to `serde_yaml`; this module only locates the
//! fenced block and applies the defaults.

use crate::types::DEFAULT_ORDER;
use serde::Deserialize;
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("missing frontmatter block (expected leading '---' fence)")]
    MissingBlock,
    #[error("unterminated frontmatter block (no closing '---' fence)")]
    Unterminated,
    #[error("missing required field 'title'")]
    MissingTitle,
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Typed frontmatter with all defaults applied. Icon stays a raw string;
/// vocabulary validation happens at scan time.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMeta {
    pub title: String,
    pub description: String,
    pub order: u32,
    pub icon: Option<String>,
    pub badge: Option<String>,
}

/// Raw deserialization target; `title` is optional here so its absence can
/// surface as [`FrontmatterError::MissingTitle`] instead of a generic YAML
/// error pointing at nothing.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawMeta {
    title: Option<String>,
    description: Option<String>,
    order: Option<u32>,
    icon: Option<String>,
    badge: Option<String>,
}

/// Split a document into its typed metadata and body.
///
/// The returned body is the content after the closing fence, with the
/// leading blank line (if any) removed.
pub fn extract(content: &str) -> Result<(DocMeta, &str), FrontmatterError> {
    let rest = content
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
        .ok_or(FrontmatterError::MissingBlock)?;

    // Find the closing fence on its own line.
    let mut offset = 0;
    let close = loop {
        let line_end = rest[offset..].find('\n').map(|i| offset + i);
        let line = match line_end {
            Some(end) => &rest[offset..end],
            None => &rest[offset..],
        };
        if line.trim_end_matches('\r') == FENCE {
            break offset;
        }
        match line_end {
            Some(end) => offset = end + 1,
            None => return Err(FrontmatterError::Unterminated),
        }
    };

    let yaml = &rest[..close];
    let body_start = rest[close..]
        .find('\n')
        .map(|i| close + i + 1)
        .unwrap_or(rest.len());
    let body = rest[body_start..].strip_prefix('\n').unwrap_or(&rest[body_start..]);

    let raw: RawMeta = if yaml.trim().is_empty() {
        RawMeta::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    let title = match raw.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(FrontmatterError::MissingTitle),
    };

    Ok((
        DocMeta {
            title,
            description: raw.description.unwrap_or_default(),
            order: raw.order.unwrap_or(DEFAULT_ORDER),
            icon: raw.icon,
            badge: raw.badge,
        },
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_block_parses() {
        let content = "---\ntitle: Installation\ndescription: How to install\norder: 2\nicon: rocket\nbadge: new\n---\n\n# Installing\n";
        let (meta, body) = extract(content).unwrap();
        assert_eq!(meta.title, "Installation");
        assert_eq!(meta.description, "How to install");
        assert_eq!(meta.order, 2);
        assert_eq!(meta.icon.as_deref(), Some("rocket"));
        assert_eq!(meta.badge.as_deref(), Some("new"));
        assert_eq!(body, "# Installing\n");
    }

    #[test]
    fn defaults_applied_for_omitted_fields() {
        let (meta, _) = extract("---\ntitle: Bare\n---\nbody").unwrap();
        assert_eq!(meta.description, "");
        assert_eq!(meta.order, DEFAULT_ORDER);
        assert_eq!(meta.icon, None);
        assert_eq!(meta.badge, None);
    }

    #[test]
    fn missing_title_is_an_error() {
        let err = extract("---\norder: 3\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingTitle));
    }

    #[test]
    fn empty_title_is_an_error() {
        let err = extract("---\ntitle: \"  \"\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingTitle));
    }

    #[test]
    fn no_fence_is_an_error() {
        let err = extract("# Just markdown\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingBlock));
    }

    #[test]
    fn unterminated_fence_is_an_error() {
        let err = extract("---\ntitle: Oops\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }

    #[test]
    fn unknown_field_is_a_yaml_error() {
        let err = extract("---\ntitle: T\nauthour: typo\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn body_preserved_without_leading_blank_line() {
        let (_, body) = extract("---\ntitle: T\n---\nline one\nline two\n").unwrap();
        assert_eq!(body, "line one\nline two\n");
    }

    #[test]
    fn crlf_fences_accepted() {
        let (meta, body) = extract("---\r\ntitle: T\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(meta.title, "T");
        assert!(body.starts_with("body"));
    }

    #[test]
    fn dashes_inside_yaml_values_not_mistaken_for_fence() {
        let (meta, _) = extract("---\ntitle: A --- B\n---\nbody").unwrap();
        assert_eq!(meta.title, "A --- B");
    }

    #[test]
    fn fence_with_trailing_content_is_not_a_close() {
        // `----` or `--- extra` lines are YAML content, not the close fence.
        let err = extract("---\ntitle: T\n--- trailing\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }
}
