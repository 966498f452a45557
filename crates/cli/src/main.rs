//! Splitkit CLI
//!
//! Splits files or stdin into overlapping, size-bounded chunks and prints
//! them as text or JSON.

mod commands;

use clap::{Parser, Subcommand};
use commands::{SeparatorsCommand, SplitCommand};
use splitkit_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Splitkit - language-aware recursive text splitting
#[derive(Parser, Debug)]
#[command(name = "splitkit")]
#[command(about = "Language-aware recursive text splitting", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SPLITKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split files, directories or stdin into chunks
    Split(SplitCommand),

    /// Show the separator table for a language
    Separators(SeparatorsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // --config (or SPLITKIT_CONFIG through clap) decides which file is read
    let config = AppConfig::load_from(cli.config.as_deref())?.with_overrides(
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Splitkit starting");
    tracing::debug!("Config file: {:?}", config.config_file);

    let command_name = match &cli.command {
        Commands::Split(_) => "split",
        Commands::Separators(_) => "separators",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Split(cmd) => cmd.execute(&config).await,
        Commands::Separators(cmd) => cmd.execute().await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_flags() {
        let cli = Cli::parse_from([
            "splitkit",
            "-v",
            "split",
            "notes.md",
            "--chunk-size",
            "64",
            "--separator",
            "\n",
            "--separator",
            " ",
            "--keep-separator",
            "end",
            "--json",
        ]);

        assert!(cli.verbose);
        let Commands::Split(cmd) = cli.command else {
            panic!("expected split command");
        };
        assert_eq!(cmd.files, vec![PathBuf::from("notes.md")]);
        assert_eq!(cmd.chunk_size, Some(64));
        assert_eq!(cmd.separators, vec!["\n", " "]);
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_separators() {
        let cli = Cli::parse_from(["splitkit", "separators", "python", "--strict"]);
        let Commands::Separators(cmd) = cli.command else {
            panic!("expected separators command");
        };
        assert_eq!(cmd.language.as_deref(), Some("python"));
        assert!(cmd.strict);
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::parse_from(["splitkit", "separators", "--log-level", "trace"]);
        assert_eq!(cli.log_level.as_deref(), Some("trace"));
    }
}
