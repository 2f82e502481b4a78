//! Endpoint Codegen CLI
//!
//! Command-line interface for generating resource, data source, and
//! documentation stubs from an OpenAPI document.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use endpoint_codegen_common::{ArtifactKind, EndpointDescriptor, GeneratorConfig};
use endpoint_codegen_generator::EndpointGenerator;
use endpoint_codegen_parser::OpenApiParser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "endpoint-codegen")]
#[command(version, about = "Generate resource and doc stubs from OpenAPI endpoints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository root generated files are written under (default: current directory)
    #[arg(long, global = true, conflicts_with = "repo_name")]
    base_dir: Option<PathBuf>,

    /// Use the closest ancestor of the current directory with this name as the root
    #[arg(long, global = true)]
    repo_name: Option<String>,

    /// YAML file with layout overrides (base_dir, code_dir, docs_dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the code and doc stub for one endpoint
    #[command(after_help = "EXAMPLES:\n  \
        # Resource for a Vault transform role\n  \
        endpoint-codegen generate \\\n    \
        --spec vault-openapi.json \\\n    \
        --endpoint '/transform/role/{name}'\n\n  \
        # Data source, written under another checkout\n  \
        endpoint-codegen generate \\\n    \
        --spec vault-openapi.json \\\n    \
        --endpoint '/transform/decode/{role_name}' \\\n    \
        --kind data-source \\\n    \
        --base-dir ../terraform-provider-vault")]
    Generate {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Endpoint path exactly as it appears in the document
        #[arg(short, long)]
        endpoint: String,

        /// Kind of binding to generate
        #[arg(short, long, value_enum, default_value_t = KindArg::Resource)]
        kind: KindArg,
    },

    /// Generate stubs for every endpoint, skipping unsupported ones
    #[command(after_help = "EXAMPLES:\n  \
        # Everything under the transform mount\n  \
        endpoint-codegen generate-all \\\n    \
        --spec vault-openapi.json \\\n    \
        --prefix /transform/")]
    GenerateAll {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Only endpoints whose path starts with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Kind of binding to generate
        #[arg(short, long, value_enum, default_value_t = KindArg::Resource)]
        kind: KindArg,
    },

    /// Print the rendering context for one endpoint without writing files
    Inspect {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Endpoint path exactly as it appears in the document
        #[arg(short, long)]
        endpoint: String,

        /// Kind of binding the context is built for
        #[arg(short, long, value_enum, default_value_t = KindArg::Resource)]
        kind: KindArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Resource binding
    Resource,
    /// Data source binding
    DataSource,
}

impl From<KindArg> for ArtifactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Resource => ArtifactKind::Resource,
            KindArg::DataSource => ArtifactKind::DataSource,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let config = resolve_config(
        cli.config.as_deref(),
        cli.base_dir.as_deref(),
        cli.repo_name.as_deref(),
        &current_dir,
    )?;

    log::debug!(
        "Layout: code under {}, docs under {}",
        config.code_root().display(),
        config.docs_root().display()
    );
    if cli.verbose {
        println!(
            "{} Writing under {}",
            "→".cyan(),
            config.base_dir.display()
        );
    }

    match cli.command {
        Commands::Generate {
            spec,
            endpoint,
            kind,
        } => generate_command(&spec, &endpoint, kind.into(), config),
        Commands::GenerateAll { spec, prefix, kind } => generate_all_command(
            &spec,
            prefix.as_deref(),
            kind.into(),
            config,
            cli.verbose,
        ),
        Commands::Inspect {
            spec,
            endpoint,
            kind,
        } => inspect_command(&spec, &endpoint, kind.into(), config),
    }
}

/// Route `log` records from the library crates through tracing
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the layout config; explicit flags win over the config file
fn resolve_config(
    config_path: Option<&Path>,
    base_dir: Option<&Path>,
    repo_name: Option<&str>,
    current_dir: &Path,
) -> Result<GeneratorConfig> {
    let config = match config_path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::new(current_dir),
    };

    if let Some(dir) = base_dir {
        return Ok(config.with_base_dir(dir));
    }
    if let Some(name) = repo_name {
        return Ok(config.with_base_dir(find_repo_root(current_dir, name)?));
    }
    Ok(config)
}

/// Closest ancestor of `start` (inclusive) named `repo_name`
fn find_repo_root(start: &Path, repo_name: &str) -> Result<PathBuf> {
    match start
        .ancestors()
        .find(|dir| dir.file_name() == Some(OsStr::new(repo_name)))
    {
        Some(root) => Ok(root.to_path_buf()),
        None => bail!(
            "No directory named {:?} above {}",
            repo_name,
            start.display()
        ),
    }
}

fn load_endpoint(spec_path: &Path, endpoint: &str) -> Result<EndpointDescriptor> {
    let parser = OpenApiParser::from_file(spec_path).context("Failed to load OpenAPI document")?;
    match parser.endpoint(endpoint) {
        Some(descriptor) => Ok(descriptor),
        None => bail!(
            "Endpoint {} not found in {}",
            endpoint,
            spec_path.display()
        ),
    }
}

fn generate_command(
    spec_path: &Path,
    endpoint: &str,
    kind: ArtifactKind,
    config: GeneratorConfig,
) -> Result<()> {
    println!("{} Loading {}", "→".cyan(), spec_path.display());
    let descriptor = load_endpoint(spec_path, endpoint)?;

    let generator = EndpointGenerator::new(config).context("Failed to create generator")?;
    let files = generator
        .generate_files(kind, &descriptor)
        .with_context(|| format!("Failed to generate {}", endpoint))?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}", files.code.display());
    println!("  📄 {}", files.doc.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Fill in the TODO placeholders in both files");
    println!("  2. Add tests for the new {}", kind.dir_label());
    println!("  3. Register it with the provider");

    Ok(())
}

fn generate_all_command(
    spec_path: &Path,
    prefix: Option<&str>,
    kind: ArtifactKind,
    config: GeneratorConfig,
    verbose: bool,
) -> Result<()> {
    println!("{} Loading {}", "→".cyan(), spec_path.display());
    let parser = OpenApiParser::from_file(spec_path).context("Failed to load OpenAPI document")?;
    let endpoints = parser.endpoints_with_prefix(prefix.unwrap_or(""));

    println!(
        "{} Found {} endpoint(s)",
        "→".cyan(),
        endpoints.len().to_string().yellow()
    );

    let generator = EndpointGenerator::new(config).context("Failed to create generator")?;
    let mut generated = 0;
    let mut skipped = 0;

    for endpoint in &endpoints {
        if !(endpoint.supports_read() || endpoint.supports_write() || endpoint.supports_delete()) {
            log::debug!("{} has no GET, POST or DELETE operation", endpoint.path);
            if verbose {
                println!("  {} {} (no GET, POST or DELETE)", "-".dimmed(), endpoint.path);
            }
            continue;
        }

        match generator.generate_files(kind, endpoint) {
            Ok(files) => {
                generated += 1;
                if verbose {
                    println!("  {} {}", "✓".green(), files.code.display());
                    println!("  {} {}", "✓".green(), files.doc.display());
                }
            }
            Err(e) if e.is_unsupported() => {
                log::warn!("Skipping {}: {}", endpoint.path, e);
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to generate {}", endpoint.path));
            }
        }
    }

    if skipped > 0 {
        println!(
            "\n{} Skipped {} endpoint(s) with unsupported parameter types",
            "⚠".yellow(),
            skipped
        );
    }

    println!(
        "\n{} Generated {} {} with docs",
        "✓".green().bold(),
        generated,
        kind.dir_label()
    );

    Ok(())
}

fn inspect_command(
    spec_path: &Path,
    endpoint: &str,
    kind: ArtifactKind,
    config: GeneratorConfig,
) -> Result<()> {
    let descriptor = load_endpoint(spec_path, endpoint)?;

    let generator = EndpointGenerator::new(config).context("Failed to create generator")?;
    let context = generator
        .build_context(kind, &descriptor)
        .with_context(|| format!("Failed to build context for {}", endpoint))?;

    let json = serde_json::to_string_pretty(&context).context("Failed to serialize context")?;
    println!("{}", json);

    Ok(())
}
