use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use readtrack_core::{AppConfig, HttpLibraryService, LibraryService};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "readtrack",
    about = "Terminal client for your reading list",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Library service URL (overrides config and READTRACK_SERVER_URL).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the library service is reachable.
    Doctor {
        /// Output in JSON format.
        #[arg(long)]
        json: bool,
    },

    /// Write the whole library as JSON.
    Export {
        /// File to write; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location.
    Path,
    /// Print the effective config as TOML.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;
    config.apply_env_overrides()?;
    if let Some(ref url) = cli.server {
        config.set_base_url(url.clone())?;
    }

    init_logging(&config, cli.verbose)?;
    tracing::debug!(
        config = %config_path.display(),
        base_url = %config.service.base_url,
        "starting"
    );

    match cli.command {
        None => {
            let runtime = tokio::runtime::Runtime::new()?;
            let service: Arc<dyn LibraryService> =
                Arc::new(HttpLibraryService::new(&config.service)?);
            readtrack_tui::run_tui(config, service, runtime.handle().clone())?;
        }

        Some(Commands::Doctor { json }) => {
            let runtime = tokio::runtime::Runtime::new()?;
            let service = HttpLibraryService::new(&config.service)?;
            let healthy = runtime.block_on(doctor(&service, &config_path, json))?;
            if !healthy {
                std::process::exit(1);
            }
        }

        Some(Commands::Export { output }) => {
            let runtime = tokio::runtime::Runtime::new()?;
            let service = HttpLibraryService::new(&config.service)?;
            let export = runtime.block_on(service.export())?;
            let body = serde_json::to_string_pretty(&export)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, body)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Exported {} books to {}", export.books.len(), path.display());
                }
                None => println!("{body}"),
            }
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => println!("{}", config_path.display()),
            ConfigAction::Show => print!("{}", toml::to_string_pretty(&config)?),
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    eprintln!(
                        "Config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    );
                    std::process::exit(1);
                }
                AppConfig::default().save_to(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}

// ─── Doctor ─────────────────────────────────────────────────────────────────

async fn doctor(service: &HttpLibraryService, config_path: &Path, json: bool) -> Result<bool> {
    let start = Instant::now();
    let health = service.health().await;
    let stats = service.stats().await;
    let dur = start.elapsed().as_millis();

    let healthy = health.as_ref().is_ok_and(|h| h.is_healthy()) && stats.is_ok();

    if json {
        print_json(&serde_json::json!({
            "status": if healthy { "ok" } else { "error" },
            "data": {
                "config": config_path.display().to_string(),
                "server": service.base_url().as_str(),
                "health": health.as_ref().ok(),
                "health_error": health.as_ref().err().map(|e| e.to_string()),
                "stats": stats.as_ref().ok(),
                "stats_error": stats.as_ref().err().map(|e| e.to_string()),
            },
            "meta": { "duration_ms": dur }
        }))?;
        return Ok(healthy);
    }

    if config_path.exists() {
        println!("✓ Config: {}", config_path.display());
    } else {
        println!("○ Config: not found (using defaults)");
    }
    println!("  Server: {}", service.base_url());

    match health {
        Ok(ref report) if report.is_healthy() => println!(
            "✓ Health: {} (database {}, {} books)",
            report.status, report.database, report.books_count
        ),
        Ok(ref report) => println!("✗ Health: {}", report.status),
        Err(ref e) => println!("✗ Health: {e}"),
    }

    match stats {
        Ok(ref s) => println!(
            "✓ Stats: {} books, {} reading, {} completed, avg rating {:.1}",
            s.total_books, s.reading, s.completed, s.average_rating
        ),
        Err(ref e) => println!("✗ Stats: {e}"),
    }

    if healthy {
        println!("\nAll checks passed ✓ ({dur}ms)");
    } else {
        println!("\nService check failed");
    }
    Ok(healthy)
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

/// Log to a file; the TUI owns the terminal.
fn init_logging(config: &AppConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
