//! Sumi-Sweep main entry point
//!
//! This is the command-line interface for the Sumi-Sweep crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sumi_sweep::analyzer::{AnalyzerRegistry, EchoUrlAnalyzer};
use sumi_sweep::config::{load_config_with_hash, validate, Config};
use sumi_sweep::output::{print_statistics, OutputSink, StdoutSink, WriterSink};
use sumi_sweep::Crawler;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Frontier capacity used when neither a config file nor `--max-crawls` sets one
const DEFAULT_MAX_CRAWLS: i64 = 200;

/// Sumi-Sweep: a breadth-first web crawler
///
/// Sumi-Sweep starts at ROOT, visits pages in breadth-first order and echoes
/// every page it processes. Press Ctrl-C to stop the crawl early.
#[derive(Parser, Debug)]
#[command(name = "sumi-sweep")]
#[command(version)]
#[command(about = "A breadth-first web crawler", long_about = None)]
struct Cli {
    /// Root URL to start from (http:// is assumed when no scheme is given)
    #[arg(value_name = "ROOT")]
    root: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of URLs to visit; zero or negative means unlimited
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    max_crawls: Option<i64>,

    /// Write visited URLs to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List every frontier entry once the crawl ends
    #[arg(long)]
    print_frontier: bool,

    /// Validate config and root, show what would be crawled, and exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            let mut config = Config::default();
            config.crawler.max_crawls = DEFAULT_MAX_CRAWLS;
            config
        }
    };

    if let Some(max_crawls) = cli.max_crawls {
        config.crawler.max_crawls = max_crawls;
    }
    validate(&config)?;

    if cli.dry_run {
        return handle_dry_run(&cli.root, &config);
    }

    handle_crawl(&cli, &config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sweep=info,warn"),
            1 => EnvFilter::new("sumi_sweep=debug,info"),
            2 => EnvFilter::new("sumi_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates the root and shows the settings
fn handle_dry_run(root: &str, config: &Config) -> anyhow::Result<()> {
    let crawler = Crawler::new(root, None, config)?;

    println!("=== Sumi-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    match crawler.frontier().capacity() {
        Some(capacity) => println!("  Max crawls: {}", capacity),
        None => println!("  Max crawls: unlimited"),
    }
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout);
    println!("  Max redirects: {}", config.crawler.max_redirects);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", crawler.root());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let sink: Arc<dyn OutputSink> = match &cli.output {
        Some(path) => {
            tracing::info!("Writing visited URLs to {}", path.display());
            Arc::new(WriterSink::create(path)?)
        }
        None => Arc::new(StdoutSink),
    };

    let mut registry = AnalyzerRegistry::new();
    registry.add(
        Arc::new(EchoUrlAnalyzer::new(sink.clone())),
        Some("echo-url"),
        false,
    )?;

    let mut crawler = Crawler::new(&cli.root, Some(registry), config)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            trigger.cancel();
        }
    });

    let stats = match crawler.crawl_with_cancellation(cancel).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    sink.flush()?;

    if cli.print_frontier {
        println!("=== Frontier ({} entries) ===\n", crawler.frontier().len());
        for url in crawler.frontier().iter() {
            println!("{}", url);
        }
        println!();
    }

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}
