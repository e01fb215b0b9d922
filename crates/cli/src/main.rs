mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use config::{LogFormat, RenderConfig};
use prompts::{BindingValue, Bindings, RelationshipLine, Template};

#[derive(Parser, Debug)]
#[command(
    name = "render_prompt",
    version,
    about = "Render GraphRAG prompt templates"
)]
struct Cli {
    /// JSON config file
    #[arg(long, env = "GRAPHRAG_PROMPTS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, ...)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also print the SHA-256 of the rendered prompt to stderr
    #[arg(long, global = true)]
    fingerprint: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List templates and their placeholders
    List,

    /// Render the triplet extraction prompt for a document
    Triplets {
        /// Upper bound on triplets requested from the model
        #[arg(long, env = "GRAPHRAG_MAX_KNOWLEDGE_TRIPLETS")]
        max_knowledge_triplets: Option<u64>,

        /// Document to analyze; read from stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Render any template from explicit bindings
    Render {
        /// Template name, e.g. triplet_extraction
        #[arg(long)]
        template: Template,

        /// JSON object of placeholder bindings
        #[arg(long)]
        bindings: Option<PathBuf>,

        /// Single binding; repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// File whose contents bind the `text` placeholder
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Build the community summary system/user prompt pair
    Community {
        /// JSON array of {source, target, relation, description}
        #[arg(long)]
        relationships: Option<PathBuf>,

        /// Print the pair as a JSON object
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RenderConfig::from_file(path)?,
        None => RenderConfig::default(),
    };
    init_tracing(&config, cli.verbose);
    debug!(?config, "Loaded config");

    let output = match cli.command {
        Command::List => {
            for template in Template::ALL {
                let placeholders = template.placeholders();
                if placeholders.is_empty() {
                    println!("{}: (no placeholders)", template);
                } else {
                    println!("{}: {}", template, placeholders.join(", "));
                }
            }
            return Ok(());
        }
        Command::Triplets {
            max_knowledge_triplets,
            input,
        } => {
            let max = max_knowledge_triplets.unwrap_or(config.max_knowledge_triplets);
            let text = read_document(input.as_deref()).await?;
            info!(max_knowledge_triplets = max, text_len = text.len(), "Rendering triplet prompt");
            prompts::triplet_extraction_prompt(max, &text)
        }
        Command::Render {
            template,
            bindings,
            set,
            input,
        } => {
            let bindings = collect_bindings(bindings.as_deref(), &set, input.as_deref()).await?;
            template
                .render(&bindings)
                .with_context(|| format!("Failed to render {} template", template))?
        }
        Command::Community {
            relationships,
            json,
        } => {
            let lines = match relationships {
                Some(path) => read_relationships(&path).await?,
                None => Vec::new(),
            };
            info!(relationships = lines.len(), "Building community summary prompt");
            let pair = prompts::community_summary_prompt(&lines);
            if json {
                serde_json::to_string_pretty(&pair)?
            } else {
                format!("{}\n\n{}", pair.system.trim_end(), pair.user)
            }
        }
    };

    println!("{}", output);
    if cli.fingerprint {
        eprintln!("sha256:{}", prompts::fingerprint(&output));
    }

    Ok(())
}

fn init_tracing(config: &RenderConfig, verbosity: u8) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.effective_level(verbosity))
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read document {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read document from stdin")?;
            Ok(text)
        }
    }
}

async fn read_relationships(path: &Path) -> Result<Vec<RelationshipLine>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read relationships {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse relationships {}", path.display()))
}

/// File bindings first, then `--input` as `text`, then `--set` overrides.
async fn collect_bindings(
    file: Option<&Path>,
    set: &[String],
    input: Option<&Path>,
) -> Result<Bindings> {
    let mut bindings = match file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read bindings {}", path.display()))?;
            serde_json::from_str::<Bindings>(&raw)
                .with_context(|| format!("Failed to parse bindings {}", path.display()))?
        }
        None => Bindings::new(),
    };

    if let Some(path) = input {
        bindings.insert(prompts::TEXT, read_document(Some(path)).await?);
    }

    for raw in set {
        let (name, value) = parse_set(raw)?;
        bindings.insert(name, value);
    }

    Ok(bindings)
}

fn parse_set(raw: &str) -> Result<(String, BindingValue)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Invalid --set '{}': expected NAME=VALUE", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid --set '{}': empty placeholder name", raw);
    }

    let value = match value.parse::<u64>() {
        Ok(n) => BindingValue::Integer(n),
        Err(_) => BindingValue::Text(value.to_string()),
    };
    Ok((name.to_string(), value))
}
