// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use lyrict::app_config::{self, Config};
use lyrict::app_controller::{Controller, RunSummary};
use lyrict::lyrics::{SongTags, TimestampStyle};

/// CLI Wrapper for TimestampStyle to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTimestampStyle {
    /// Keep each timestamp's own precision
    Keep,
    /// Force [mm:ss.xx]
    #[value(alias = "force.xx")]
    Centis,
    /// Force [mm:ss.xxx]
    #[value(alias = "force.xxx")]
    Millis,
}

impl From<CliTimestampStyle> for TimestampStyle {
    fn from(cli_style: CliTimestampStyle) -> Self {
        match cli_style {
            CliTimestampStyle::Keep => TimestampStyle::Keep,
            CliTimestampStyle::Centis => TimestampStyle::Centis,
            CliTimestampStyle::Millis => TimestampStyle::Millis,
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
    /// Find .lrc/.txt lyrics and match them to audio files
    Scan {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Fix the timestamps of .lrc files in place
    Standardize {
        /// .lrc file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Write a .sylt.json tick-list next to each .lrc file
    #[command(name = "to-sylt")]
    ToSylt {
        /// .lrc file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Offset in milliseconds, replaces the files' [offset:] tags
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i64>,
    },

    /// Write an .lrc file for each .sylt.json tick-list
    #[command(name = "from-sylt")]
    FromSylt {
        /// .sylt.json file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Rewrite the ID tag header of a lyrics file from its song's tags
    Tag(TagArgs),

    /// Generate shell completions for lyrict
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TagArgs {
    /// Lyrics file to rewrite
    #[arg(value_name = "FILE")]
    file: PathBuf,

    #[arg(long)]
    artist: Option<String>,

    #[arg(long)]
    album: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    composer: Option<String>,

    #[arg(long)]
    lyricist: Option<String>,

    /// Song duration in seconds
    #[arg(long)]
    length_secs: Option<f64>,
}

impl From<&TagArgs> for SongTags {
    fn from(args: &TagArgs) -> Self {
        SongTags {
            artist: args.artist.clone(),
            album: args.album.clone(),
            title: args.title.clone(),
            composer: args.composer.clone(),
            lyricist: args.lyricist.clone(),
            length_ms: args
                .length_secs
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(|secs| (secs * 1000.0).round() as u64),
        }
    }
}

/// lyrict - LRC lyrics timestamp tool
///
/// Standardizes LRC timestamps and converts lyrics between free-form LRC text
/// and the strict tick-lists used by synchronized-lyrics tags.
#[derive(Parser, Debug)]
#[command(name = "lyrict")]
#[command(version)]
#[command(about = "LRC lyrics timestamp standardizer and tick-list converter")]
#[command(long_about = "lyrict fixes timestamps of .lrc lyrics and converts them to and from tick-lists.

EXAMPLES:
    lyrict scan ~/Music                         # Match lyrics files to songs
    lyrict -l scan ~/Music                      # ... and log the results to disk
    lyrict standardize -t force.xxx ~/Music     # Rewrite every timestamp as [mm:ss.xxx]
    lyrict to-sylt --offset -250 song.lrc       # Write song.sylt.json
    lyrict from-sylt ~/Music                    # Write .lrc files from tick-lists
    lyrict tag song.lrc --artist A --length-secs 215
    lyrict completions bash > lyrict.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in lyrict.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lyrict.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Timestamp style used when standardizing
    #[arg(short, long, global = true, value_enum)]
    timestamps: Option<CliTimestampStyle>,

    /// Do not standardize timestamps before converting
    #[arg(long, global = true)]
    no_standardize: bool,

    /// Audio extensions to match lyrics against
    #[arg(short, long, global = true, value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Only look at the given folder, not its subfolders
    #[arg(short, long, global = true)]
    single_folder: bool,

    /// Overwrite existing output files
    #[arg(short, long, global = true)]
    overwrite: bool,

    /// Log results to disk, twice (-ll) for one file per category
    #[arg(short = 'l', long = "log", global = true, action = clap::ArgAction::Count)]
    log: u8,

    /// Directory for result logs
    #[arg(long, global = true)]
    log_path: Option<PathBuf>,

    /// Show progress bars
    #[arg(short, long, global = true)]
    progress: bool,
}

impl CommandLineOptions {
    // @applies: CLI flags on top of the loaded configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone().into();
        }
        if let Some(style) = self.timestamps {
            config.timestamp_style = style.into();
        }
        if self.no_standardize {
            config.standardize = false;
        }
        if let Some(extensions) = &self.extensions {
            config.extensions = extensions.clone();
        }
        if self.single_folder {
            config.single_folder = true;
        }
        if self.overwrite {
            config.overwrite = true;
        }
        if self.log > 0 {
            config.report.log_to_disk = true;
        }
        if self.log > 1 {
            config.report.separate_logs = true;
        }
        if let Some(log_path) = &self.log_path {
            config.report.log_path = log_path.clone();
        }
        if self.progress {
            config.progress = true;
        }
    }
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
        // The logger itself lets everything through; `log::set_max_level` filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
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

    // @returns: ANSI color for log level
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
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

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lyrict", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it before the config is read
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    let mut config = Config::load_or_create(&cli.config)?;
    cli.apply_to(&mut config);
    log::set_max_level((&config.log_level).into());

    let controller = Controller::with_config(config)?;

    match &cli.command {
        Commands::Scan { dir } => {
            let summary = controller.scan(dir)?;
            info!(
                "Found {} lyrics files ({} .lrc, {} .txt), {} linked songs",
                summary.lyrics.total(),
                summary.lyrics.lrc.len(),
                summary.lyrics.txt.len(),
                summary.lrc_matches.linked_count() + summary.txt_matches.linked_count()
            );
        }
        Commands::Standardize { path } => {
            finish(controller.standardize_path(path).await?)?;
        }
        Commands::ToSylt { path, offset } => {
            finish(controller.export_sylt(path, *offset).await?)?;
        }
        Commands::FromSylt { path } => {
            finish(controller.import_sylt(path).await?)?;
        }
        Commands::Tag(args) => {
            let tags = SongTags::from(args);
            finish(controller.tag_file(&args.file, &tags).await?)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// Per-file failures are already logged; the process still fails if any occurred
fn finish(summary: RunSummary) -> Result<()> {
    for report in &summary.reports {
        if let Some(output) = &report.output {
            log::debug!("{} -> {}: {}", report.path.display(), output.display(), report.outcome);
        }
    }

    if summary.failed() > 0 {
        return Err(anyhow::anyhow!(
            "{} run incomplete: {} file(s) failed",
            summary.mode.name(),
            summary.failed()
        ));
    }
    Ok(())
}
