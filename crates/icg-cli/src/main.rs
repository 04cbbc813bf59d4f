use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use icg_core::config::{self, CONFIG_FILE_NAME, GeneratorKind, IcgConfig};
use icg_core::parse::{self, spec::OpenApiSpec};
use icg_core::{CodeGenerator, GeneratedFile};
use icg_csharp::{CSharpClientCodegen, CSharpGenerator, Generation, InfluxCSharpGenerator};

#[derive(Parser)]
#[command(name = "icg", about = "InfluxDB C# client generator for OpenAPI 3.x", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C# client from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an OpenAPI spec and run the generator hooks over it
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the models and API classes the hooks produce
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new icg configuration
    Init {
        /// Overwrite existing files
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
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "icg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<IcgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &Path) -> Result<OpenApiSpec> {
    parse::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Run the configured generator's hooks without rendering anything.
fn run_hooks(spec: &OpenApiSpec, cfg: &IcgConfig) -> Result<Generation> {
    let generation = match cfg.generator {
        GeneratorKind::InfluxCsharp => icg_csharp::build(
            &mut InfluxCSharpGenerator::for_package(cfg.package_name.as_str()),
            spec,
        )?,
        GeneratorKind::Csharp => {
            icg_csharp::build(&mut CSharpClientCodegen::new(cfg.package_name.as_str()), spec)?
        }
    };
    Ok(generation)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Code, Do Not Edit

This directory is **auto-generated** by icg.
Any manual changes will be overwritten the next time `icg generate` is run.

To regenerate, run:
```
icg generate
```

To customize the generated output, edit your `.icg.yaml` configuration file.
"#
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let spec = load_spec(&input)?;

    eprintln!("Generating {} → {}", cfg.generator.as_str(), output_dir.display());
    let mut files = CSharpGenerator
        .generate(&spec, &cfg)
        .map_err(|e| anyhow::anyhow!(e))?;

    if !files.iter().any(|f| f.path == "README.md") {
        files.push(GeneratedFile {
            path: "README.md".to_string(),
            content: readme_content().to_string(),
        });
    }

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    write_files(&output_dir, &files)?;

    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    eprintln!("\nThe generated directory should not be edited manually; changes will be overwritten.");
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let spec = load_spec(&input)?;

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Schemas: {}", spec.definitions().len());

    let generation = run_hooks(&spec, &cfg)?;
    let operations: usize = generation.apis.iter().map(|api| api.operations.len()).sum();
    eprintln!("  Models: {}", generation.models.len());
    eprintln!("  API classes: {}", generation.apis.len());
    eprintln!("  Operations: {operations}");

    let mut mismatched = 0;
    for model in generation.models.values() {
        for adapter in model.type_adapters.values() {
            for item in adapter.mismatched_items() {
                mismatched += 1;
                eprintln!(
                    "  warning: {} discriminates on {} keys but {} has {} values",
                    adapter.classname,
                    adapter.discriminator.len(),
                    item.classname,
                    item.discriminator_values.len()
                );
            }
        }
    }

    if mismatched == 0 {
        eprintln!("Validation successful.");
    } else {
        eprintln!("Validation finished with {mismatched} discriminator warnings.");
    }
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let spec = load_spec(&input)?;
    let generation = run_hooks(&spec, &cfg)?;

    let summary = build_inspect_summary(&spec, &generation);

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

fn build_inspect_summary(spec: &OpenApiSpec, generation: &Generation) -> serde_json::Value {
    let models: Vec<serde_json::Value> = generation
        .models
        .values()
        .map(|model| {
            serde_json::json!({
                "name": model.classname,
                "kind": if model.is_enum { "enum" } else { "class" },
                "parent": model.parent,
                "adapters": model.type_adapters.values().map(|adapter| {
                    serde_json::json!({
                        "name": adapter.classname,
                        "is_array": adapter.is_array,
                        "discriminator": adapter.discriminator,
                        "variants": adapter.items.iter().map(|item| &item.classname).collect::<Vec<_>>(),
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    let apis: Vec<serde_json::Value> = generation
        .apis
        .iter()
        .map(|api| {
            let operations: Vec<serde_json::Value> = api
                .operations
                .iter()
                .map(|op| {
                    serde_json::json!({
                        "name": op.operation_id,
                        "method": op.http_method,
                        "path": op.path,
                        "return_type": op.return_type,
                        "produces": op.produces,
                    })
                })
                .collect();
            serde_json::json!({
                "name": api.classname,
                "operations": operations,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "models": models,
        "apis": apis,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
