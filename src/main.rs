use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use threadsplit::{Post, Segmenter, SegmenterConfig};
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_PATH: &str = "threadsplit.toml";

/// Split long-form prose into a thread of bounded-length posts.
#[derive(Debug, Parser)]
#[command(name = "threadsplit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase logging verbosity (-v, -vv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split text into a numbered thread.
    Split(SplitArgs),
    /// Print a rough estimate of how many posts the text needs.
    Estimate(CommonArgs),
    /// Check whether the text fits in a single post.
    Check(CommonArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Input file; reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
    /// TOML config file with a `[segmenter]` table.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Maximum characters per post.
    #[arg(long)]
    max_length: Option<usize>,
}

#[derive(Debug, Args)]
struct SplitArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Do not prefix posts with `k/n`.
    #[arg(long, action = ArgAction::SetTrue)]
    no_numbering: bool,
    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Split(args) => run_split(args),
        Commands::Estimate(args) => run_estimate(args),
        Commands::Check(args) => run_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,threadsplit={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_split(args: SplitArgs) -> Result<()> {
    let mut config = resolve_config(&args.common)?;
    if args.no_numbering {
        config.numbering = false;
    }
    let segmenter = Segmenter::from_config(config).context("Invalid segmenter settings")?;

    let content = read_input(args.common.input.as_deref())?;
    if content.trim().is_empty() {
        tracing::warn!("Input is empty, nothing to split");
    }

    let posts = segmenter.split_into_posts(&content);
    tracing::info!(
        posts = posts.len(),
        max_length = segmenter.max_length(),
        "Split input into thread"
    );

    match args.format {
        OutputFormat::Text => print_text(&posts),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&posts).context("Failed to encode posts")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn run_estimate(args: CommonArgs) -> Result<()> {
    let segmenter = build_segmenter(&args)?;
    let content = read_input(args.input.as_deref())?;
    println!("{}", segmenter.estimate_count(&content));
    Ok(())
}

fn run_check(args: CommonArgs) -> Result<()> {
    let segmenter = build_segmenter(&args)?;
    let content = read_input(args.input.as_deref())?;
    let text = content.trim();
    let count = text.chars().count();

    println!("{}/{} characters", count, segmenter.max_length());
    if !segmenter.is_valid_length(text) {
        bail!(
            "Text is {} characters over the limit",
            count - segmenter.max_length()
        );
    }
    Ok(())
}

fn build_segmenter(args: &CommonArgs) -> Result<Segmenter> {
    let config = resolve_config(args)?;
    Segmenter::from_config(config).context("Invalid segmenter settings")
}

/// Config file first, then command-line overrides
fn resolve_config(args: &CommonArgs) -> Result<SegmenterConfig> {
    let mut config = match &args.config {
        Some(path) => SegmenterConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                SegmenterConfig::load_or_default(default_path)
            } else {
                SegmenterConfig::default()
            }
        }
    };

    if let Some(max_length) = args.max_length {
        config.max_length = max_length;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_text(posts: &[Post]) {
    for post in posts {
        println!(
            "--- post {}/{} ({} chars) ---",
            post.metadata.index + 1,
            post.metadata.total,
            post.metadata.char_count
        );
        println!("{}\n", post.text);
    }
}
