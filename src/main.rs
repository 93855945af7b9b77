// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;

use snbt_trans::app_config::{self, Config};
use snbt_trans::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract description strings into the translation store
    Extract {
        /// Quest-book file, or a directory searched for .snbt files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Translation store file (created if missing)
        #[arg(value_name = "STORE")]
        store: PathBuf,
    },

    /// Write the store's translations back into quest-book files
    Apply {
        /// Quest-book file, or a directory searched for .snbt files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Translation store file
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Output file, or output directory when INPUT is a directory
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Copy each input to <input>.bak first (existing backups are kept)
        #[arg(short, long)]
        backup: bool,
    },

    /// Fill in missing translations using the Anthropic API
    Translate {
        /// Translation store file
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Model name to use for translation
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Generate shell completions for snbt-trans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// snbt-trans - Quest-book translation with AI
///
/// Extracts the description text of SNBT quest books into a translation
/// store, fills the store using an AI model and writes the translations back.
#[derive(Parser, Debug)]
#[command(name = "snbt-trans")]
#[command(version)]
#[command(about = "AI-assisted translation of SNBT quest books")]
#[command(long_about = "snbt-trans extracts quest descriptions from SNBT files, translates them with an AI model and applies the translations.

EXAMPLES:
    snbt-trans extract quests/ store.json             # Collect strings from every .snbt file
    snbt-trans translate store.json                   # Translate missing entries
    snbt-trans translate -m claude-3-5-sonnet-latest store.json
    snbt-trans apply quests/ store.json out/ --backup # Write translated copies
    snbt-trans completions bash > snbt-trans.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

    The API key is read from the environment variable named by
    provider.api_key_env (ANTHROPIC_API_KEY by default).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // The logger accepts everything; the effective level is set with
    // log::set_max_level once the config is known
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "snbt-trans", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = &cli.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Commands::Translate { model: Some(model), .. } = &cli.command {
        config.provider.model = model.clone();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Extract { input, store } => {
            controller.run_extract(&input, &store)?;
        }
        Commands::Apply { input, store, output, backup } => {
            controller.run_apply(&input, &store, &output, backup)?;
        }
        Commands::Translate { store, .. } => {
            controller.run_translate(&store).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
