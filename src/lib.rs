//! # docweave
//!
//! A minimal documentation manifest and sidebar generator. Your filesystem
//! is the data source: directories become sections, frontmatter supplies
//! titles and ordering, and the nesting of files becomes the nesting of
//! the navigation tree.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! docweave processes content through three independent stages, each
//! producing an artifact that the next stage consumes:
//!
//! ```text
//! 1. Scan     docs/     →  manifest.json    (filesystem → document records)
//! 2. Compile  manifest  →  compiled/        (markdown bodies → HTML fragments)
//! 3. Emit     manifest  →  dist/            (sidebar tree + static data files)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each manifest is human-readable JSON you can inspect.
//! - **Incremental builds**: the compile stage skips fragments whose inputs
//!   haven't changed.
//! - **Testability**: the sidebar builder and lookup index are pure
//!   functions over the manifest, so unit tests exercise the interesting
//!   logic without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content tree, extracts frontmatter, produces the manifest |
//! | [`compile`] | Stage 2 — renders document bodies to HTML fragments and builds the slug registry |
//! | [`emit`] | Stage 3 — writes manifest/sidebar JSON and the generated static-data module |
//! | [`sidebar`] | Pure transformation from the flat manifest to the nested navigation tree |
//! | [`index`] | Immutable slug lookup table: get, per-section listing, prev/next |
//! | [`pathinfo`] | Path → (section, slug, parent, depth) parsing |
//! | [`frontmatter`] | YAML frontmatter extraction with field defaults |
//! | [`icons`] | Closed icon vocabulary, validated at scan time |
//! | [`cache`] | Content-addressed compile cache for incremental builds |
//! | [`config`] | `docweave.toml` loading, validation, and defaults |
//! | [`types`] | Shared records serialized between stages |
//! | [`output`] | CLI output formatting — pure format functions, print wrappers |
//!
//! # Design Decisions
//!
//! ## Identity Lives in the Path
//!
//! A document's slug, section, parent, and depth are all derived from where
//! it sits on disk — frontmatter can't override them. This keeps moves and
//! renames honest: reorganizing the tree *is* reorganizing the navigation,
//! with no metadata to chase.
//!
//! ## Fail the Build, Not the Reader
//!
//! Content mistakes that would degrade navigation silently — a missing
//! title, a duplicate slug, an unknown icon name — fail the scan with the
//! offending file in the message. A missing parent reference is different:
//! the document still belongs in the sidebar, so it falls back to its
//! section root rather than vanishing.
//!
//! ## Deterministic Output
//!
//! Directory walks are sorted, JSON field order is fixed, and no timestamps
//! are written. Building twice from the same tree produces byte-identical
//! artifacts, which makes generated files diffable and CI caching safe.
//!
//! ## Maud Over Template Engines
//!
//! Fragment HTML is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system: malformed markup is a build error, and
//! interpolated titles and badges are auto-escaped.

pub mod cache;
pub mod compile;
pub mod config;
pub mod emit;
pub mod frontmatter;
pub mod icons;
pub mod index;
pub mod output;
pub mod pathinfo;
pub mod scan;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
