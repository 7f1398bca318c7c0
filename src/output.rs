//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every document is its semantic identity — title and positional index
//! within its section — with filesystem paths shown as secondary context via
//! indented `Source:` lines. This makes the output readable as a content
//! inventory while still letting users trace data back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Documents
//! guides (3 docs)
//!     001 Guides
//!         Source: guides/index.mdx
//!     002 Setup
//!         Source: guides/setup.mdx
//! ```
//!
//! ## Compile
//!
//! ```text
//! Compiled 7 fragments
//! Cache: 2 cached, 5 rendered (7 total)
//! ```
//!
//! ## Emit
//!
//! ```text
//! manifest.json (7 docs)
//! sidebar.json (2 sections)
//! docs_data.rs
//! docs/ (7 fragments)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::compile::CompileResult;
use crate::emit::EmitSummary;
use crate::types::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Scan
// ============================================================================

/// Format the scan manifest as a section-grouped document inventory.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    if manifest.docs.is_empty() {
        lines.push("No documents found".to_string());
        return lines;
    }

    lines.push("Documents".to_string());

    // Sections in first-seen manifest order.
    let mut sections: Vec<&str> = Vec::new();
    for doc in &manifest.docs {
        if !sections.contains(&doc.section.as_str()) {
            sections.push(&doc.section);
        }
    }

    for section in sections {
        let docs: Vec<_> = manifest
            .docs
            .iter()
            .filter(|d| d.section == section)
            .collect();
        let noun = if docs.len() == 1 { "doc" } else { "docs" };
        lines.push(format!("{} ({} {})", section, docs.len(), noun));
        for (pos, doc) in docs.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(pos + 1), doc.title));
            lines.push(format!("{}Source: {}", indent(2), doc.source_path));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{line}");
    }
}

// ============================================================================
// Compile
// ============================================================================

/// Format the compile result: fragment count plus cache behavior.
pub fn format_compile_output(result: &CompileResult) -> Vec<String> {
    let noun = if result.registry.len() == 1 {
        "fragment"
    } else {
        "fragments"
    };
    vec![
        format!("Compiled {} {}", result.registry.len(), noun),
        format!("Cache: {}", result.cache_stats),
    ]
}

pub fn print_compile_output(result: &CompileResult) {
    for line in format_compile_output(result) {
        println!("{line}");
    }
}

// ============================================================================
// Emit
// ============================================================================

/// Format the emit summary: one line per artifact.
pub fn format_emit_output(summary: &EmitSummary) -> Vec<String> {
    let doc_noun = if summary.docs == 1 { "doc" } else { "docs" };
    let section_noun = if summary.sections == 1 {
        "section"
    } else {
        "sections"
    };
    let fragment_noun = if summary.fragments == 1 {
        "fragment"
    } else {
        "fragments"
    };
    vec![
        format!("manifest.json ({} {})", summary.docs, doc_noun),
        format!("sidebar.json ({} {})", summary.sections, section_noun),
        "docs_data.rs".to_string(),
        format!("docs/ ({} {})", summary.fragments, fragment_noun),
    ]
}

pub fn print_emit_output(summary: &EmitSummary) {
    for line in format_emit_output(summary) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::config::SiteConfig;
    use crate::test_helpers::doc;

    fn manifest_of(docs: Vec<crate::types::DocumentRecord>) -> Manifest {
        Manifest {
            docs,
            config: SiteConfig::default(),
        }
    }

    #[test]
    fn scan_output_groups_by_section() {
        let manifest = manifest_of(vec![
            doc("guides/setup", "Setup", 1),
            doc("guides/faq", "FAQ", 2),
            doc("reference/cli", "CLI", 1),
        ]);
        let lines = format_scan_output(&manifest);
        assert_eq!(lines[0], "Documents");
        assert_eq!(lines[1], "guides (2 docs)");
        assert_eq!(lines[2], "    001 Setup");
        assert_eq!(lines[3], "        Source: guides/setup.md");
        assert_eq!(lines[6], "reference (1 doc)");
    }

    #[test]
    fn scan_output_empty_manifest() {
        let lines = format_scan_output(&manifest_of(vec![]));
        assert_eq!(lines, vec!["No documents found"]);
    }

    #[test]
    fn emit_output_lists_artifacts() {
        let summary = EmitSummary {
            docs: 7,
            sections: 2,
            fragments: 7,
        };
        let lines = format_emit_output(&summary);
        assert_eq!(
            lines,
            vec![
                "manifest.json (7 docs)",
                "sidebar.json (2 sections)",
                "docs_data.rs",
                "docs/ (7 fragments)",
            ]
        );
    }

    #[test]
    fn emit_output_singular_nouns() {
        let summary = EmitSummary {
            docs: 1,
            sections: 1,
            fragments: 1,
        };
        let lines = format_emit_output(&summary);
        assert_eq!(lines[0], "manifest.json (1 doc)");
        assert_eq!(lines[1], "sidebar.json (1 section)");
        assert_eq!(lines[3], "docs/ (1 fragment)");
    }

    #[test]
    fn compile_output_reports_cache() {
        let mut stats = CacheStats::default();
        stats.miss();
        let result = CompileResult {
            registry: crate::compile::Registry::default(),
            cache_stats: stats,
        };
        let lines = format_compile_output(&result);
        assert_eq!(lines[0], "Compiled 0 fragments");
        assert_eq!(lines[1], "Cache: 1 rendered");
    }
}
