use clap::{Parser, Subcommand};
use docweave::{compile, config, emit, output, scan};
use std::path::PathBuf;

/// Shared flags for commands that render fragments.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the compile cache — force re-rendering of all documents
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docweave")]
#[command(about = "Documentation manifest and sidebar generator")]
#[command(long_about = "\
Documentation manifest and sidebar generator

Your filesystem is the data source. The first path segment of every
document is its section, frontmatter supplies titles and ordering, and
directory nesting becomes sidebar nesting.

Content structure:

  docs/
  ├── docweave.toml                # Site config (optional)
  ├── welcome.md                   # Root-level file → section \"general\"
  ├── guides/
  │   ├── index.mdx                # Section landing page: title/icon/order
  │   ├── setup.mdx                # Sidebar item under \"guides\"
  │   └── advanced/
  │       ├── index.mdx            # Nested item with children
  │       └── tuning.mdx           # Child of guides/advanced
  └── reference/
      └── cli.md

Frontmatter fields:
  title:       required
  description: optional, defaults to \"\"
  order:       optional, defaults to 999 (sorts last)
  icon:        optional, one of the known icon names
  badge:       optional free-form label

Run 'docweave gen-config' to generate a documented docweave.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest, compiled fragments)
    #[arg(long, default_value = ".docweave-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Render document bodies into HTML fragments
    Compile(CacheArgs),
    /// Produce the final data artifacts from the manifest and fragments
    Emit,
    /// Run the full pipeline: scan → compile → emit
    Build(CacheArgs),
    /// Validate the content directory without building
    Check,
    /// Print a stock docweave.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Compile(cache_args) => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let compiled_dir = cli.temp_dir.join("compiled");
            let result = compile::compile(
                &manifest_path,
                &cli.source,
                &compiled_dir,
                !cache_args.no_cache,
            )?;
            output::print_compile_output(&result);
        }
        Command::Emit => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let compiled_dir = cli.temp_dir.join("compiled");
            let summary = emit::emit(&manifest_path, &compiled_dir, &cli.output)?;
            output::print_emit_output(&summary);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Compiling fragments");
            let compiled_dir = cli.temp_dir.join("compiled");
            let result = compile::compile(
                &manifest_path,
                &cli.source,
                &compiled_dir,
                !cache_args.no_cache,
            )?;
            output::print_compile_output(&result);

            println!("==> Stage 3: Emitting → {}", cli.output.display());
            let summary = emit::emit(&manifest_path, &compiled_dir, &cli.output)?;
            output::print_emit_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
