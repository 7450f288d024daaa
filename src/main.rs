//! Math Slop Generator - Rust Implementation
//!
//! Takes a well-known identity and buries it under mathematically
//! meaningless (but true) clutter, then renders the result as a PNG.
//!
//! CLI commands:
//! - generate: Produce a slopped formula and render it
//! - list: List available identities

mod catalog;
mod compose;
mod config;
mod logging;
mod random;
mod render;
mod slop;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use catalog::Catalog;
use config::Settings;

#[derive(Parser)]
#[command(name = "math_slop")]
#[command(about = "Well-known identities buried under equivalent clutter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an optional catalog.yaml with extra identities
    #[arg(short, long, default_value = "catalog.yaml")]
    catalog: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a slopped formula and render it to PNG
    Generate {
        /// Base identity key, or "random"
        #[arg(short, long, default_value = "random")]
        base: String,

        /// Slop level (how much clutter, typically 1-5)
        #[arg(short, long, default_value_t = 3)]
        slop: i32,

        /// Output path (defaults to a timestamped file in the temp dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also swap constants for fancier equivalent spellings
        #[arg(long)]
        fancy: bool,

        /// Print the result record as JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// Emit the document source instead of rendering
        #[arg(long)]
        doc_only: bool,

        /// Document format to compose
        #[arg(long, value_enum, default_value = "latex")]
        format: DocFormat,
    },

    /// List available identities
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DocFormat {
    /// Standalone LaTeX for the pdflatex/convert pipeline
    Latex,
    /// Dark HTML page rendered by MathJax in a browser
    Html,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first
    logging::init_logging("logs");
    tracing::info!("Math Slop starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: catalog={:?}", cli.catalog);

    // Built-in identities, plus any extras from the manifest
    let catalog = if cli.catalog.exists() {
        tracing::info!("Loading catalog extras from {:?}", cli.catalog);
        let manifest = config::CatalogFile::load(&cli.catalog)?;
        Catalog::with_extras(manifest.identities)
    } else {
        tracing::warn!("Catalog file not found: {:?}, using built-ins", cli.catalog);
        Catalog::builtin()
    };
    tracing::info!("Catalog loaded: {} identities", catalog.identities().len());

    let settings = Settings::load();

    match cli.command {
        Commands::Generate {
            base,
            slop,
            out,
            fancy,
            json,
            doc_only,
            format,
        } => {
            generate(
                &catalog, &settings, &base, slop, out, fancy, json, doc_only, format,
            )
            .await?;
        }

        Commands::List => {
            list_identities(&catalog);
        }
    }

    Ok(())
}

/// Generate one slopped formula and emit the requested artifact
#[allow(clippy::too_many_arguments)]
async fn generate(
    catalog: &Catalog,
    settings: &Settings,
    base: &str,
    slop_level: i32,
    out: Option<PathBuf>,
    fancy: bool,
    json: bool,
    doc_only: bool,
    format: DocFormat,
) -> anyhow::Result<()> {
    let mut rng = rand::rng();

    let mut result = slop::generate_slop(catalog, base, slop_level, &mut rng);
    if fancy {
        result.slopped = slop::embellish(&result.slopped, catalog, &mut rng);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Base: {}", result.name);
        println!("Original: {}", result.original);
        println!("Slopped: {}", result.slopped);
        println!();
    }

    let document = match format {
        DocFormat::Latex => compose::latex_document(&result.slopped),
        DocFormat::Html => compose::html_page(&result.slopped),
    };

    if doc_only {
        match out {
            Some(path) => {
                std::fs::write(&path, document)?;
                println!("Wrote document to {:?}", path);
            }
            None => println!("{}", document),
        }
        return Ok(());
    }

    match format {
        DocFormat::Latex => {
            let out_path = out.unwrap_or_else(|| render::default_output_path("png"));
            render::render_png(&document, &out_path, settings).await?;
            println!("Generated: {:?}", out_path);
        }
        DocFormat::Html => {
            // No browser automation here; hand the page to the user
            let out_path = out.unwrap_or_else(|| render::default_output_path("html"));
            std::fs::write(&out_path, document)?;
            println!("Wrote HTML page to {:?} (open in a browser to render)", out_path);
        }
    }

    Ok(())
}

/// List available identities
fn list_identities(catalog: &Catalog) {
    println!("Available identities ({}):", catalog.identities().len());
    println!();

    for (index, identity) in catalog.identities().iter().enumerate() {
        let origin = if catalog.is_extra(index) { " [user]" } else { "" };
        println!("  - {}: {}{}", identity.key, identity.name, origin);
    }

    println!();
    println!("Use --base <key> to pick one, or --base random.");
}
