use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use ggen_core::config::{self, CONFIG_FILE_NAME, split_tags};
use ggen_core::naming::{output_file_name, resolve_package};
use ggen_core::request::check_output_collisions;
use ggen_core::output::write_file;
use ggen_core::{CodeGenerator, EntityConfig, GeneratedFile, GenerationRequest, TagPolicy};
use ggen_go::GoGenerator;
use ggen_go::emitters::imports::resolve_imports;

#[derive(Parser)]
#[command(
    name = "ggen",
    about = "Fluent API boilerplate generator",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    entity: EntityArgs,

    #[command(flatten)]
    target: TargetArgs,

    /// Print the generated source instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Run gofmt on the written file
    #[arg(long)]
    gofmt: bool,
}

#[derive(Args, Clone)]
struct EntityArgs {
    /// Entity struct name
    #[arg(long, default_value = "")]
    ent: String,

    /// Child entity struct name
    #[arg(long, default_value = "")]
    item: String,

    /// Has Conf() method
    #[arg(long)]
    conf: bool,

    /// Is collection entity
    #[arg(long)]
    coll: bool,

    /// Modifiers comma separated list
    #[arg(long, default_value = "")]
    mods: String,

    /// Helpers comma separated list
    #[arg(long, default_value = "")]
    helpers: String,
}

impl EntityArgs {
    fn to_config(&self) -> EntityConfig {
        EntityConfig {
            item: self.item.clone(),
            conf: self.conf,
            coll: self.coll,
            mods: split_tags(&self.mods),
            helpers: split_tags(&self.helpers),
        }
    }
}

#[derive(Args, Clone)]
struct TargetArgs {
    /// Package of the generated file (defaults to the output directory name)
    #[arg(long)]
    pkg: Option<String>,

    /// Directory the generated file is written into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Reject unknown or repeated modifiers and helpers
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every entity listed in a manifest
    Batch {
        /// Path to the manifest
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run gofmt on each written file
        #[arg(long)]
        gofmt: bool,
    },

    /// Show what would be generated for an entity, without writing anything
    Inspect {
        #[command(flatten)]
        entity: EntityArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a ggen manifest
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_generate(&cli.entity, &cli.target, cli.stdout, cli.gofmt),

        Some(Commands::Batch { config, gofmt }) => cmd_batch(config, gofmt),

        Some(Commands::Inspect {
            entity,
            target,
            format,
        }) => cmd_inspect(&entity, &target, format),

        Some(Commands::Init { force }) => cmd_init(force),

        Some(Commands::Completions { shell }) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ggen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// The literal command line, embedded in the generated-file banner.
fn invocation() -> String {
    env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_request(entity: &EntityArgs, target: &TargetArgs) -> Result<GenerationRequest> {
    let package = resolve_package(target.pkg.as_deref(), &target.out_dir)?;
    let request = GenerationRequest::resolve(
        &entity.ent,
        &entity.to_config(),
        &package,
        TagPolicy::from_strict(target.strict),
    )?;
    Ok(request)
}

/// Write a generated file and report it.
fn write_output(out_dir: &Path, file: &GeneratedFile, gofmt: bool) -> Result<()> {
    let path = write_file(out_dir, file)
        .with_context(|| format!("failed to write {}", out_dir.join(&file.path).display()))?;
    println!("Generated {} ({} bytes)", path.display(), file.content.len());

    if gofmt {
        try_run_gofmt(&path);
    }
    Ok(())
}

/// Try to run gofmt on a generated file. Never fails the run.
fn try_run_gofmt(path: &Path) {
    match Command::new("gofmt").arg("-w").arg(path).output() {
        Ok(result) if result.status.success() => {
            eprintln!("  formatted with gofmt");
        }
        Ok(result) => {
            log::warn!(
                "gofmt reported problems in {}: {}",
                path.display(),
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }
        Err(_) => {
            eprintln!(
                "  note: gofmt not found, run `gofmt -w {}` to format",
                path.display()
            );
        }
    }
}

fn cmd_generate(entity: &EntityArgs, target: &TargetArgs, stdout: bool, gofmt: bool) -> Result<()> {
    // Whitespace-only names count as missing.
    if entity.ent.trim().is_empty() {
        println!(
            "can't generate [{}] as no entity is provided, skipping...",
            invocation()
        );
        return Ok(());
    }

    let request = build_request(entity, target)?;
    let file = GoGenerator.generate(&request, &invocation())?;

    if stdout {
        print!("{}", file.content);
        return Ok(());
    }
    write_output(&target.out_dir, &file, gofmt)
}

fn cmd_batch(config_path: Option<PathBuf>, gofmt: bool) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let Some(cfg) = config::load_config(&path)? else {
        anyhow::bail!(
            "{} not found. Run `ggen init` to create one.",
            path.display()
        );
    };

    if cfg.entities.is_empty() {
        eprintln!("No entities configured in {}.", path.display());
        return Ok(());
    }

    let out_dir = PathBuf::from(&cfg.output);
    let package = resolve_package(cfg.package.as_deref(), &out_dir)?;
    let policy = TagPolicy::from_strict(cfg.strict);

    // Validate every entry before touching the output directory.
    let requests = cfg
        .entities
        .iter()
        .map(|(name, entity)| {
            GenerationRequest::resolve(name, entity, &package, policy)
                .with_context(|| format!("invalid entity {name} in {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    check_output_collisions(&requests, GoGenerator.extension())
        .with_context(|| format!("conflicting entities in {}", path.display()))?;

    let invocation = invocation();
    for request in &requests {
        let file = GoGenerator.generate(request, &invocation)?;
        write_output(&out_dir, &file, gofmt)?;
    }

    eprintln!(
        "Generated {} files in {}",
        requests.len(),
        out_dir.display()
    );
    Ok(())
}

fn cmd_inspect(entity: &EntityArgs, target: &TargetArgs, format: InspectFormat) -> Result<()> {
    let request = build_request(entity, target)?;
    let summary = build_inspect_summary(&request);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(request: &GenerationRequest) -> serde_json::Value {
    serde_json::json!({
        "request": request,
        "instance": request.instance(),
        "file": output_file_name(&request.entity, GoGenerator.extension()),
        "emits_helpers": request.emits_helpers(),
        "imports": resolve_imports(request),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "ggen manifest {} already exists, pass --force to replace it",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!(
        "Created ggen manifest {}; edit its entities and run `ggen batch`",
        config_path.display()
    );
    Ok(())
}
