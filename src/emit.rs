//! Static output emission.
//!
//! Stage 3 of the docweave build pipeline. Takes the scan manifest and the
//! compiled fragments and writes the final artifacts a consuming site embeds
//! at build time.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── manifest.json              # Flat DocumentRecord list + config
//! ├── sidebar.json               # Nested SidebarSection tree
//! ├── docs_data.rs               # Same data as a generated Rust module
//! └── docs/
//!     ├── registry.json          # slug → fragment path
//!     ├── guides.html            # Compiled fragments (copied)
//!     └── guides/
//!         └── setup.html
//! ```
//!
//! `docs_data.rs` is self-contained — plain structs with `&'static str`
//! fields and two `static` arrays — so a consumer can `include!` it and
//! read documentation data with no runtime parsing at all.
//!
//! ## Determinism
//!
//! Running emit twice over the same inputs produces byte-identical output:
//! records keep manifest order, sidebar order is fully specified by the
//! builder, JSON field order is fixed by the struct definitions, and no
//! timestamps are written. Reproducible output is what makes the generated
//! files diffable in review.

use crate::sidebar::build_sidebar;
use crate::types::{DocumentRecord, Manifest, SidebarItem, SidebarSection};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What emit wrote, for CLI reporting.
#[derive(Debug)]
pub struct EmitSummary {
    pub docs: usize,
    pub sections: usize,
    pub fragments: usize,
}

/// Emit all static artifacts into `output_dir`.
///
/// `compiled_dir` may be absent (emit-only invocations on a tree that was
/// never compiled); the fragment copy is skipped in that case and the data
/// artifacts are still produced.
pub fn emit(
    manifest_path: &Path,
    compiled_dir: &Path,
    output_dir: &Path,
) -> Result<EmitSummary, EmitError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let sidebar = build_sidebar(&manifest.docs);

    fs::create_dir_all(output_dir)?;

    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    fs::write(output_dir.join("manifest.json"), manifest_json)?;

    let sidebar_json = serde_json::to_string_pretty(&sidebar)?;
    fs::write(output_dir.join("sidebar.json"), sidebar_json)?;

    let data_module = render_data_module(&manifest.docs, &sidebar);
    fs::write(output_dir.join("docs_data.rs"), data_module)?;

    let mut fragments = 0;
    if compiled_dir.is_dir() {
        let docs_dir = output_dir.join("docs");
        fs::create_dir_all(&docs_dir)?;
        fragments = copy_compiled(compiled_dir, &docs_dir)?;
    }

    Ok(EmitSummary {
        docs: manifest.docs.len(),
        sections: sidebar.len(),
        fragments,
    })
}

/// Copy compiled fragments (and the registry) into the output, skipping the
/// cache manifest. Returns the number of fragment files copied.
fn copy_compiled(src: &Path, dst: &Path) -> Result<usize, EmitError> {
    let mut copied = 0;
    let mut entries: Vec<_> = fs::read_dir(src)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();

    for src_path in entries {
        let name = src_path
            .file_name()
            .expect("read_dir entries have names")
            .to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        let dst_path = dst.join(src_path.file_name().expect("checked above"));
        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_compiled(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            if name.ends_with(".html") {
                copied += 1;
            }
        }
    }
    Ok(copied)
}

// ============================================================================
// Rust data module generation
// ============================================================================

const DATA_MODULE_HEADER: &str = "\
// Generated by docweave. Do not edit.
//
// Self-contained documentation data for compile-time embedding:
// `include!` this file and read DOCS / SIDEBAR directly.

#[derive(Debug, Clone, Copy)]
pub struct Doc {
    pub slug: &'static str,
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub order: u32,
    pub icon: Option<&'static str>,
    pub badge: Option<&'static str>,
    pub section: &'static str,
    pub parent: Option<&'static str>,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub title: &'static str,
    pub slug: &'static str,
    pub path: &'static str,
    pub icon: Option<&'static str>,
    pub badge: Option<&'static str>,
    pub children: &'static [NavItem],
}

#[derive(Debug, Clone, Copy)]
pub struct NavSection {
    pub section: &'static str,
    pub title: &'static str,
    pub icon: Option<&'static str>,
    pub order: u32,
    pub items: &'static [NavItem],
}
";

/// Render the generated Rust module embedding records and sidebar.
fn render_data_module(docs: &[DocumentRecord], sidebar: &[SidebarSection]) -> String {
    let mut out = String::from(DATA_MODULE_HEADER);

    out.push_str("\npub static DOCS: &[Doc] = &[\n");
    for doc in docs {
        let _ = writeln!(
            out,
            "    Doc {{ slug: {slug}, path: {path}, title: {title}, \
             description: {description}, order: {order}, icon: {icon}, \
             badge: {badge}, section: {section}, parent: {parent}, depth: {depth} }},",
            slug = lit(&doc.slug),
            path = lit(&doc.path),
            title = lit(&doc.title),
            description = lit(&doc.description),
            order = doc.order,
            icon = opt_lit(doc.icon.map(|i| i.name().to_string()).as_deref()),
            badge = opt_lit(doc.badge.as_deref()),
            section = lit(&doc.section),
            parent = opt_lit(doc.parent.as_deref()),
            depth = doc.depth,
        );
    }
    out.push_str("];\n");

    out.push_str("\npub static SIDEBAR: &[NavSection] = &[\n");
    for section in sidebar {
        let _ = writeln!(
            out,
            "    NavSection {{ section: {section}, title: {title}, icon: {icon}, \
             order: {order}, items: &[",
            section = lit(&section.section),
            title = lit(&section.title),
            icon = opt_lit(section.icon.map(|i| i.name().to_string()).as_deref()),
            order = section.order,
        );
        for item in &section.items {
            render_item(&mut out, item, 2);
        }
        out.push_str("    ] },\n");
    }
    out.push_str("];\n");

    out
}

fn render_item(out: &mut String, item: &SidebarItem, indent: usize) {
    let pad = "    ".repeat(indent);
    let _ = writeln!(
        out,
        "{pad}NavItem {{ title: {title}, slug: {slug}, path: {path}, \
         icon: {icon}, badge: {badge}, children: &[",
        title = lit(&item.title),
        slug = lit(&item.slug),
        path = lit(&item.path),
        icon = opt_lit(item.icon.map(|i| i.name().to_string()).as_deref()),
        badge = opt_lit(item.badge.as_deref()),
    );
    for child in item.children.as_deref().unwrap_or_default() {
        render_item(out, child, indent + 1);
    }
    let _ = writeln!(out, "{pad}] }},");
}

/// A Rust string literal for arbitrary content.
fn lit(s: &str) -> String {
    format!("\"{}\"", s.escape_default())
}

fn opt_lit(s: Option<&str>) -> String {
    match s {
        Some(s) => format!("Some({})", lit(s)),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{doc, setup_fixtures};
    use crate::{compile, scan};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn build_all(content: &Path, work: &Path) -> (PathBuf, PathBuf, PathBuf) {
        let manifest = scan::scan(content).unwrap();
        let manifest_path = work.join("manifest.json");
        fs::write(
            &manifest_path,
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();

        let compiled = work.join("compiled");
        compile::compile(&manifest_path, content, &compiled, true).unwrap();

        let dist = work.join("dist");
        (manifest_path, compiled, dist)
    }

    #[test]
    fn emits_all_artifacts() {
        let content = setup_fixtures();
        let work = TempDir::new().unwrap();
        let (manifest_path, compiled, dist) = build_all(content.path(), work.path());

        let summary = emit(&manifest_path, &compiled, &dist).unwrap();
        assert_eq!(summary.docs, 7);
        assert_eq!(summary.sections, 2);
        assert_eq!(summary.fragments, 7);

        assert!(dist.join("manifest.json").exists());
        assert!(dist.join("sidebar.json").exists());
        assert!(dist.join("docs_data.rs").exists());
        assert!(dist.join("docs/registry.json").exists());
        assert!(dist.join("docs/guides/setup.html").exists());
    }

    #[test]
    fn cache_manifest_not_copied_into_output() {
        let content = setup_fixtures();
        let work = TempDir::new().unwrap();
        let (manifest_path, compiled, dist) = build_all(content.path(), work.path());

        emit(&manifest_path, &compiled, &dist).unwrap();
        assert!(!dist.join("docs/.cache-manifest.json").exists());
    }

    #[test]
    fn sidebar_json_matches_builder_output() {
        let content = setup_fixtures();
        let work = TempDir::new().unwrap();
        let (manifest_path, compiled, dist) = build_all(content.path(), work.path());

        emit(&manifest_path, &compiled, &dist).unwrap();

        let manifest: Manifest =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        let expected = build_sidebar(&manifest.docs);
        let written: Vec<SidebarSection> =
            serde_json::from_str(&fs::read_to_string(dist.join("sidebar.json")).unwrap())
                .unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn emitting_twice_is_byte_identical() {
        let content = setup_fixtures();
        let work = TempDir::new().unwrap();
        let (manifest_path, compiled, dist) = build_all(content.path(), work.path());

        emit(&manifest_path, &compiled, &dist).unwrap();
        let first: Vec<(PathBuf, Vec<u8>)> = read_tree(&dist);

        emit(&manifest_path, &compiled, &dist).unwrap();
        let second = read_tree(&dist);

        assert_eq!(first, second);
    }

    fn read_tree(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files = Vec::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            let mut entries: Vec<_> = fs::read_dir(&current)
                .unwrap()
                .map(|e| e.unwrap().path())
                .collect();
            entries.sort();
            for path in entries {
                if path.is_dir() {
                    stack.push(path);
                } else {
                    files.push((path.clone(), fs::read(&path).unwrap()));
                }
            }
        }
        files.sort();
        files
    }

    #[test]
    fn empty_tree_emits_well_formed_empty_artifacts() {
        let content = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let manifest_path = work.path().join("manifest.json");
        fs::write(
            &manifest_path,
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();

        let dist = work.path().join("dist");
        let summary = emit(&manifest_path, &work.path().join("never-compiled"), &dist).unwrap();
        assert_eq!(summary.docs, 0);
        assert_eq!(summary.sections, 0);
        assert_eq!(summary.fragments, 0);

        let sidebar: Vec<SidebarSection> =
            serde_json::from_str(&fs::read_to_string(dist.join("sidebar.json")).unwrap())
                .unwrap();
        assert!(sidebar.is_empty());

        let module = fs::read_to_string(dist.join("docs_data.rs")).unwrap();
        assert!(module.contains("pub static DOCS: &[Doc] = &[\n];"));
        assert!(module.contains("pub static SIDEBAR: &[NavSection] = &[\n];"));
    }

    #[test]
    fn data_module_embeds_records_and_tree() {
        let docs = vec![
            doc("guides", "Guides", 0),
            doc("guides/advanced", "Advanced", 2),
            doc("guides/advanced/tuning", "Tuning", 1),
        ];
        let sidebar = build_sidebar(&docs);
        let module = render_data_module(&docs, &sidebar);

        assert!(module.contains("slug: \"guides/advanced/tuning\""));
        assert!(module.contains("parent: Some(\"guides/advanced\")"));
        // Tuning nests inside Advanced's children array.
        let advanced_pos = module.find("title: \"Advanced\", slug:").unwrap();
        let tuning_pos = module.find("title: \"Tuning\"").unwrap();
        assert!(tuning_pos > advanced_pos);
    }

    #[test]
    fn data_module_escapes_quotes_and_backslashes() {
        let mut record = doc("guides/odd", "She said \"hi\"", 1);
        record.description = "back\\slash".to_string();
        let module = render_data_module(&[record], &[]);
        assert!(module.contains(r#"title: "She said \"hi\"""#));
        assert!(module.contains(r#"description: "back\\slash""#));
    }
}
