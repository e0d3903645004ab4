//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `go2web` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All request, caching and rendering logic lives in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use go2web::config::{
    DEFAULT_CACHE_FILE, DEFAULT_REDIRECT_BUDGET, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use go2web::initialization::init_logger_with;
use go2web::{Client, Config, LogFormat, LogLevel, ACCEPT_HTML, ACCEPT_JSON};

/// Fetch web pages over raw HTTP(S) sockets, or search the web.
#[derive(Debug, Parser)]
#[command(name = "go2web", version, about)]
#[command(group(ArgGroup::new("action").required(true).args(["url", "search"])))]
struct Cli {
    /// Fetch URL and print its rendered body
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: Option<String>,

    /// Search the web and print the top 10 results
    #[arg(short = 's', long = "search", value_name = "TERM", num_args = 1..)]
    search: Option<Vec<String>>,

    /// Request JSON (Accept: application/json) when fetching with -u
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Response cache file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_FILE)]
    cache_file: PathBuf,

    /// Keep the cache in memory only for this run
    #[arg(long)]
    no_cache: bool,

    /// Deadline for each request in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = DEFAULT_REDIRECT_BUDGET)]
    max_redirects: usize,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            cache_path: (!self.no_cache).then(|| self.cache_file.clone()),
            timeout_seconds: self.timeout_seconds,
            max_redirects: self.max_redirects,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }

    /// Accept header for `-u`; `--json` has no effect on searches.
    fn accept(&self) -> &'static str {
        if self.json {
            ACCEPT_JSON
        } else {
            ACCEPT_HTML
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Invalid invocations exit here, before any network I/O
    let cli = Cli::parse();
    let config = cli.config();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    if let Err(e) = run(&cli, &config).await {
        eprintln!("go2web error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let mut client = Client::new(config)?;

    if let Some(url) = &cli.url {
        let output = client.fetch(url, cli.accept()).await?;
        if let Some(diagnostic) = &output.diagnostic {
            eprintln!("{diagnostic}");
        }
        println!("{}", output.text);
    } else if let Some(words) = &cli.search {
        let term = words.join(" ");
        let results = client.search(&term).await?;
        if results.is_empty() {
            println!("No results found for '{term}'");
        }
        for result in &results {
            println!("{result}");
        }
    }

    Ok(())
}
