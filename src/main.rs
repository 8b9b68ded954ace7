// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, VideoQuality};
use app_controller::{Controller, DownloadRequest};

mod app_config;
mod app_controller;
mod download_client;
mod errors;
mod file_utils;
mod language_utils;
mod subtitle_converter;
mod url_extractor;

/// CLI Wrapper for VideoQuality to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliVideoQuality {
    Sd,
    Hd,
}

impl From<CliVideoQuality> for VideoQuality {
    fn from(cli_quality: CliVideoQuality) -> Self {
        match cli_quality {
            CliVideoQuality::Sd => VideoQuality::Sd,
            CliVideoQuality::Hd => VideoQuality::Hd,
        }
    }
}

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
    /// Download a session's video and/or subtitle (default command)
    #[command(alias = "dl")]
    Download(DownloadArgs),

    /// Generate shell completions for wwdcdl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct DownloadArgs {
    /// Session id to download
    #[arg(value_name = "SESSION_ID")]
    session_id: String,

    /// Download the session's video
    #[arg(short, long)]
    video: bool,

    /// Download the session's subtitle (.srt)
    #[arg(short, long)]
    subtitle: bool,

    /// Video quality to download
    #[arg(short, long, value_enum)]
    quality: Option<CliVideoQuality>,

    /// Subtitle language code (e.g., 'en', 'cn', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Output directory for downloaded files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// wwdcdl - WWDC session video and subtitle downloader
///
/// Downloads a WWDC session's video file and rebuilds its spoken-subtitle
/// track from the session's segmented captions into a single SRT file.
#[derive(Parser, Debug)]
#[command(name = "wwdcdl")]
#[command(version = "1.0.0")]
#[command(about = "WWDC session video and subtitle downloader")]
#[command(long_about = "wwdcdl downloads a WWDC session's video and reconstructs its subtitle track as SRT.

EXAMPLES:
    wwdcdl -v 10001                     # Download the HD video of session 10001
    wwdcdl -v -s 10001                  # Video first, then the subtitle
    wwdcdl -s -l ja 10001               # Japanese subtitle only
    wwdcdl -v -q sd 10001               # SD video
    wwdcdl -s -o ~/wwdc 10001           # Write into a specific directory
    wwdcdl completions bash > wwdcdl.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session id to download
    #[arg(value_name = "SESSION_ID")]
    session_id: Option<String>,

    /// Download the session's video
    #[arg(short, long)]
    video: bool,

    /// Download the session's subtitle (.srt)
    #[arg(short, long)]
    subtitle: bool,

    /// Video quality to download
    #[arg(short, long, value_enum)]
    quality: Option<CliVideoQuality>,

    /// Subtitle language code (e.g., 'en', 'cn', 'ja')
    #[arg(short, long)]
    language: Option<String>,

    /// Output directory for downloaded files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wwdcdl", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Download(args)) => run_download(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let session_id = cli
                .session_id
                .ok_or_else(|| anyhow!("SESSION_ID is required when no subcommand is specified"))?;

            let download_args = DownloadArgs {
                session_id,
                video: cli.video,
                subtitle: cli.subtitle,
                quality: cli.quality,
                language: cli.language,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_download(download_args).await
        }
    }
}

async fn run_download(options: DownloadArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        apply_log_level(&cmd_log_level.clone().into());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(quality) = &options.quality {
            config.quality = quality.clone().into();
        }

        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        if let Some(output_dir) = &options.output_dir {
            config.output_dir = Some(output_dir.clone());
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(quality) = &options.quality {
            config.quality = quality.clone().into();
        }

        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        if let Some(output_dir) = &options.output_dir {
            config.output_dir = Some(output_dir.clone());
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        apply_log_level(&config.log_level);
    }

    log::info!(
        "Received: session_id = {}, video = {}, subtitle = {}, quality = {}, language = {}",
        options.session_id,
        options.video,
        options.subtitle,
        config.quality,
        config.language
    );

    // Create controller and run the requested downloads
    let controller = Controller::with_config(config)?;
    controller
        .run(DownloadRequest {
            session_id: options.session_id,
            video: options.video,
            subtitle: options.subtitle,
        })
        .await
}

// Helper to translate a config log level into the logger's max level
fn apply_log_level(level: &app_config::LogLevel) {
    let filter = match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    };
    log::set_max_level(filter);
}
