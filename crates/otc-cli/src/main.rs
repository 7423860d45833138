use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use otc_core::naming::{DefaultNaming, NamingPolicy, NamingRules};
use otc_core::parse;
use otc_core::parse::spec::OpenApiDocument;
use otc_core::{CodeGenerator, GeneratedFile};
use otc_typescript::emitters::scaffold::{self, WrapperOptions};
use otc_typescript::{GenerateOptions, TsClientGenerator};

#[derive(Parser)]
#[command(name = "otc", about = "OpenAPI 3.x TypeScript client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the API and declaration modules into the current directory
    Generate {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short = 'f', long)]
        apifile: Option<PathBuf>,

        /// URL of the OpenAPI document, e.g. http://host:port/v3/api-docs
        #[arg(short, long)]
        url: Option<String>,

        /// Base name of the output files (<name>.ts, <name>.d.ts)
        #[arg(short, long, default_value = "index")]
        name: String,

        /// Path to a YAML naming-rules file overriding module/function names
        #[arg(short = 'm', long)]
        rules: Option<PathBuf>,
    },

    /// Parse an OpenAPI document and print a summary
    Validate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            apifile,
            url,
            name,
            rules,
        } => cmd_generate(apifile, url, name, rules),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "otc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load and parse a local document, dispatching on file extension.
fn load_local(path: &Path) -> Result<OpenApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let doc = match ext {
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_json(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(doc)
}

/// Fetch and parse a remote document. Any non-success status or body-parse
/// failure aborts the run.
fn load_remote(url: &str) -> Result<OpenApiDocument> {
    let response =
        reqwest::blocking::get(url).with_context(|| format!("failed to fetch {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("failed to fetch {url}: HTTP {status}");
    }

    let body = response
        .text()
        .with_context(|| format!("failed to read response body from {url}"))?;

    parse::from_json(&body).with_context(|| format!("failed to parse document from {url}"))
}

/// Write generated files into `base`, overwriting previous runs.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

/// Seed a collaborator file only when absent. Returns whether it was written.
fn seed_file(base: &Path, file: &GeneratedFile) -> Result<bool> {
    let path = base.join(&file.path);
    if path.exists() {
        log::info!("kept existing {}", path.display());
        return Ok(false);
    }
    fs::write(&path, &file.content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("seeded {}", path.display());
    Ok(true)
}

fn cmd_generate(
    apifile: Option<PathBuf>,
    url: Option<String>,
    name: String,
    rules: Option<PathBuf>,
) -> Result<()> {
    let doc = match (&apifile, &url) {
        (Some(path), _) => load_local(path)?,
        (None, Some(url)) => load_remote(url)?,
        (None, None) => bail!("either --apifile or --url is required"),
    };

    let policy: Box<dyn NamingPolicy> = match &rules {
        Some(path) => Box::new(NamingRules::load(path)?),
        None => Box::new(DefaultNaming),
    };

    let generator = TsClientGenerator::new(policy);
    let options = GenerateOptions { base_name: name };
    let files = generator.generate(&doc, &options)?;

    let out_dir = std::env::current_dir().context("failed to resolve working directory")?;
    write_files(&out_dir, &files)?;

    for file in scaffold::emit_seed_files(&WrapperOptions::default())? {
        seed_file(&out_dir, &file)?;
    }

    eprintln!(
        "Generated {} operations across {} paths from {}",
        doc.paths.values().map(|p| p.operations().count()).sum::<usize>(),
        doc.paths.len(),
        apifile
            .map(|p| p.display().to_string())
            .or(url)
            .unwrap_or_default()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_local(&input)?;

    eprintln!("Valid OpenAPI {} document: {}", doc.openapi, doc.info.title);
    eprintln!("  Version: {}", doc.info.version);
    eprintln!("  Paths: {}", doc.paths.len());
    eprintln!("  Schemas: {}", doc.schemas().count());
    Ok(())
}
