use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use sha1_cli::checksum::{self, CheckStatus};
use sha1_cli::config::{AppConfig, ConfigManager, get_config};
use sha1_cli::output::{HashRecord, OutputFormat, OutputFormatter, create_formatter};
use sha1_cli::terminal;
use sha1_core::{BatchProcessor, FileHasher, HashCalculator};

const STDIN_NAME: &str = "-";

#[derive(Parser)]
#[command(name = "sha1")]
#[command(author, version, about = "Compute and verify SHA-1 message digests", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash files, or standard input when no path is given
    Hash {
        /// Files to hash; `-` reads standard input
        paths: Vec<PathBuf>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print digests in uppercase hex
        #[arg(short, long)]
        uppercase: bool,

        /// Stop starting new files after the first failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Hash a string given on the command line
    String {
        /// Text to hash, as UTF-8 bytes without a trailing newline
        text: String,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the digest in uppercase hex
        #[arg(short, long)]
        uppercase: bool,
    },

    /// Verify files against a checksum list
    Check {
        /// Checksum list in `sha1sum` or BSD tagged layout; `-` reads standard input
        file: PathBuf,

        /// Only report files that did not verify
        #[arg(short, long)]
        quiet: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the configuration file path
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., engine.chunk_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., engine.chunk_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("sha1_core", log::LevelFilter::Trace)
            .filter_module("sha1_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Config { command } => config_command(command),
        Commands::Hash {
            paths,
            format,
            uppercase,
            fail_fast,
        } => hash_command(&load_config()?, paths, format, uppercase, fail_fast).await,
        Commands::String {
            text,
            format,
            uppercase,
        } => string_command(&load_config()?, &text, format, uppercase),
        Commands::Check { file, quiet } => check_command(&load_config()?, &file, quiet).await,
    }
}

fn load_config() -> Result<AppConfig> {
    get_config().context("Failed to load configuration")
}

/// CLI flag first, then the configured default
fn resolve_formatter(
    config: &AppConfig,
    flag: Option<OutputFormat>,
    uppercase: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let format = match flag {
        Some(format) => format,
        None => OutputFormat::from_string(&config.output.default_format)?,
    };
    Ok(create_formatter(format, uppercase || config.output.uppercase))
}

fn print_records(formatter: &dyn OutputFormatter, records: &[HashRecord]) -> Result<()> {
    if !records.is_empty() {
        println!("{}", formatter.format_batch(records)?);
    }
    Ok(())
}

async fn hash_command(
    config: &AppConfig,
    mut paths: Vec<PathBuf>,
    format: Option<OutputFormat>,
    uppercase: bool,
    fail_fast: bool,
) -> Result<()> {
    let formatter = resolve_formatter(config, format, uppercase)?;
    if paths.is_empty() {
        paths.push(PathBuf::from(STDIN_NAME));
    }

    let files: Vec<PathBuf> = paths
        .iter()
        .filter(|p| p.as_os_str() != STDIN_NAME)
        .cloned()
        .collect();
    log::debug!("Hashing {} file(s)", files.len());

    let processor = BatchProcessor::new(config.engine.clone())?.continue_on_error(!fail_fast);
    let batch = processor.process_files(files).await;
    log::debug!(
        "Hashed {} bytes in {:?}",
        batch.total_bytes(),
        batch.total_time
    );

    let hasher = FileHasher::new(config.engine.clone())?;
    let mut batch_entries = batch.entries.into_iter().peekable();
    let mut records = Vec::with_capacity(paths.len());
    let mut failures = batch.skipped;

    for path in &paths {
        let name = path.display().to_string();
        if path.as_os_str() == STDIN_NAME {
            let result = hasher
                .hash_async_reader(tokio::io::stdin())
                .await
                .context("Failed to read standard input")?;
            records.push(HashRecord::new(name, result.digest, result.file_size));
            continue;
        }

        // Skipped files are missing from the batch entries
        let Some(entry) = batch_entries.next_if(|entry| entry.path == *path) else {
            continue;
        };
        match entry.outcome {
            Ok(result) => records.push(HashRecord::new(name, result.digest, result.file_size)),
            Err(err) => {
                failures += 1;
                eprintln!("sha1: {err}");
            }
        }
    }

    print_records(formatter.as_ref(), &records)?;

    if failures > 0 {
        anyhow::bail!("{failures} input(s) could not be hashed");
    }
    Ok(())
}

fn string_command(
    config: &AppConfig,
    text: &str,
    format: Option<OutputFormat>,
    uppercase: bool,
) -> Result<()> {
    let formatter = resolve_formatter(config, format, uppercase)?;
    let result = HashCalculator::new().calculate_bytes(text.as_bytes())?;
    let record = HashRecord::new(format!("\"{text}\""), result.digest, result.input_size);
    print_records(formatter.as_ref(), &[record])
}

async fn check_command(config: &AppConfig, file: &Path, quiet: bool) -> Result<()> {
    let content = if file.as_os_str() == STDIN_NAME {
        let mut buffer = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut tokio::io::stdin(), &mut buffer)
            .await
            .context("Failed to read checksum list from standard input")?;
        buffer
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read checksum list {}", file.display()))?
    };

    let entries = checksum::parse_checksum_list(&content)
        .with_context(|| format!("Invalid checksum list {}", file.display()))?;
    if entries.is_empty() {
        anyhow::bail!("No checksum lines found in {}", file.display());
    }

    let hasher = FileHasher::new(config.engine.clone())?;
    let report = checksum::verify(entries, Path::new("."), &hasher).await;

    let color = terminal::use_color(config.output.color_enabled);
    for (entry, status) in &report.results {
        if quiet && *status == CheckStatus::Ok {
            continue;
        }
        let label = status.to_string();
        let label = match (color, status) {
            (false, _) => label,
            (true, CheckStatus::Ok) => label.green().to_string(),
            (true, _) => label.red().bold().to_string(),
        };
        println!("{}: {label}", entry.path.display());
    }

    if report.all_ok() {
        return Ok(());
    }

    let mismatched = report.count(CheckStatus::Failed);
    let unreadable = report.count(CheckStatus::Missing) + report.count(CheckStatus::Unreadable);
    if mismatched > 0 {
        eprintln!("sha1: WARNING: {mismatched} computed checksum(s) did NOT match");
    }
    if unreadable > 0 {
        eprintln!("sha1: WARNING: {unreadable} listed file(s) could not be read");
    }
    anyhow::bail!("Verification failed for {}", file.display())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            eprintln!("Config file: {}", manager.get_config_path().display());
            for (key, value) in manager.list()? {
                println!("{key} = {value}");
            }
        }
    }

    Ok(())
}
