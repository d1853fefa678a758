use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use reshape::error::describe_error_code;
use reshape::{FilterError, FilterRegistry, Record, RegistryConfig};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Reshape structured data with template filters
#[derive(Parser)]
#[command(name = "reshape")]
#[command(about = "Apply data-reshaping filters to JSON/YAML or render templates with them", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a registry configuration file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered filter names with their parameters
    List,
    /// Apply one filter to a JSON or YAML document
    Apply {
        /// Filter name
        filter: String,

        /// Input document (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Extra positional argument as JSON (bare words are taken as strings)
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Keyword argument as name=JSON
        #[arg(short, long = "kwarg")]
        kwargs: Vec<String>,

        /// Print string results without JSON quoting
        #[arg(long)]
        raw: bool,
    },
    /// Render a tera template with every filter installed
    Render {
        /// Template file
        template: PathBuf,

        /// JSON or YAML file used as the template context
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("reshape started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        if let Some(filter_error) = e.chain().find_map(|c| c.downcast_ref::<FilterError>()) {
            let code = filter_error.code();
            eprintln!("  E{:04}: {}", code, describe_error_code(code));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => RegistryConfig::from_env(),
    };
    let registry = FilterRegistry::with_config(&config);

    match cli.command {
        Commands::List => run_list(&registry),
        Commands::Apply {
            filter,
            input,
            args,
            kwargs,
            raw,
        } => run_apply(&registry, &filter, input.as_deref(), &args, &kwargs, raw),
        Commands::Render { template, data } => run_render(&registry, &template, data.as_deref()),
    }
}

fn run_list(registry: &FilterRegistry) -> anyhow::Result<()> {
    for (name, entry) in registry.iter() {
        if name == entry.name {
            println!("{:<24} {}", entry.signature(), entry.summary);
        } else {
            println!("{:<24} alias of {}", name, entry.name);
        }
    }
    Ok(())
}

fn run_apply(
    registry: &FilterRegistry,
    filter: &str,
    input: Option<&Path>,
    args: &[String],
    kwargs: &[String],
    raw: bool,
) -> anyhow::Result<()> {
    let input_text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    let mut positional = vec![parse_document(&input_text).context("Invalid input document")?];
    positional.extend(args.iter().map(|arg| parse_argument(arg)));

    let mut keywords = Record::new();
    for kwarg in kwargs {
        let (name, value) = kwarg
            .split_once('=')
            .ok_or_else(|| anyhow!("Keyword argument '{}' must look like name=value", kwarg))?;
        keywords.insert(name.trim().to_string(), parse_argument(value));
    }

    debug!(
        "Applying {} with {} positional and {} keyword arguments",
        filter,
        positional.len(),
        keywords.len()
    );
    let result = registry.call(filter, &positional, &keywords)?;

    match result {
        Value::String(text) if raw => println!("{}", text),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}

fn run_render(
    registry: &FilterRegistry,
    template: &Path,
    data: Option<&Path>,
) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;

    let context = match data {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read data {}", path.display()))?;
            parse_document(&text)
                .with_context(|| format!("Invalid data document {}", path.display()))?
        }
        None => Value::Null,
    };

    let rendered = reshape::render_str(registry, &source, &context)
        .with_context(|| format!("Failed to render {}", template.display()))?;
    print!("{}", rendered);
    Ok(())
}

/// Parse JSON, falling back to YAML
fn parse_document(text: &str) -> anyhow::Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_error) => {
            trace!("Input is not JSON ({}), trying YAML", json_error);
            Ok(serde_yaml::from_str(text)?)
        }
    }
}

/// Parse a command line argument as JSON; anything else is a plain string
fn parse_argument(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
