use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, LyricsFiles, MatchResult, ReportSection};
use crate::language_utils;
use crate::lyrics::{
    Anomaly, SongTags, SyltDocument, TimestampStyle, find_malformed_brackets, lrc_to_synced_entries, rewrite_header,
    standardize_line, standardize_lyrics,
};

// @module: Application controller for lyrics processing

/// Kind of run, used in log messages and result log names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Scan,
    Standardize,
    ToSylt,
    FromSylt,
    Tag,
}

impl RunMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Standardize => "standardize",
            Self::ToSylt => "to_sylt",
            Self::FromSylt => "from_sylt",
            Self::Tag => "tag",
        }
    }
}

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written
    Written,
    /// Conversion produced exactly the input, nothing written
    Unchanged,
    /// Not processed, with the reason
    Skipped(String),
    /// Processing failed, with the error
    Failed(String),
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => write!(f, "written"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(err) => write!(f, "failed ({})", err),
        }
    }
}

// @struct: Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    // @field: Input file
    pub path: PathBuf,

    // @field: File that was (or would have been) written
    pub output: Option<PathBuf>,

    pub outcome: FileOutcome,

    // @field: Non-fatal issues found while converting
    pub anomalies: Vec<Anomaly>,
}

impl FileReport {
    fn new(path: &Path, output: Option<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            path: path.to_path_buf(),
            output,
            outcome,
            anomalies: Vec::new(),
        }
    }

    fn failed(path: PathBuf, err: &anyhow::Error) -> Self {
        Self {
            path,
            output: None,
            outcome: FileOutcome::Failed(format!("{:#}", err)),
            anomalies: Vec::new(),
        }
    }

    fn with_anomalies(mut self, anomalies: Vec<Anomaly>) -> Self {
        self.anomalies = anomalies;
        self
    }
}

// @struct: Results of a batch run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: RunMode,
    // @field: One report per input, ordered by path
    pub reports: Vec<FileReport>,
    pub duration: Duration,
}

impl RunSummary {
    fn empty(mode: RunMode) -> Self {
        Self {
            mode,
            reports: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn written(&self) -> usize {
        self.count(|o| *o == FileOutcome::Written)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| *o == FileOutcome::Unchanged)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn anomaly_count(&self) -> usize {
        self.reports.iter().map(|r| r.anomalies.len()).sum()
    }

    /// Result log sections; anomalies are tab-indented under their file
    pub fn sections(&self) -> Vec<ReportSection> {
        let paths_where = |pred: &dyn Fn(&FileOutcome) -> bool| -> Vec<String> {
            self.reports
                .iter()
                .filter(|r| pred(&r.outcome))
                .map(|r| match &r.outcome {
                    FileOutcome::Skipped(reason) | FileOutcome::Failed(reason) => {
                        format!("{}: {}", r.path.display(), reason)
                    }
                    _ => r.path.display().to_string(),
                })
                .collect()
        };

        let mut anomalies = Vec::new();
        for report in self.reports.iter().filter(|r| !r.anomalies.is_empty()) {
            anomalies.push(report.path.display().to_string());
            anomalies.extend(report.anomalies.iter().map(|a| format!("\t{}", a)));
        }

        vec![
            ReportSection::new("Written", paths_where(&|o| *o == FileOutcome::Written)),
            ReportSection::new("Unchanged", paths_where(&|o| *o == FileOutcome::Unchanged)),
            ReportSection::new("Skipped", paths_where(&|o| matches!(o, FileOutcome::Skipped(_)))),
            ReportSection::new("Failed", paths_where(&|o| matches!(o, FileOutcome::Failed(_)))),
            ReportSection::new("Anomalies", anomalies),
        ]
    }
}

// @struct: Lyrics found by a scan and the audio files they link to
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub lyrics: LyricsFiles,
    pub lrc_matches: MatchResult,
    pub txt_matches: MatchResult,
}

impl ScanSummary {
    pub fn sections(&self) -> Vec<ReportSection> {
        let mut sections = Vec::new();
        for (kind, matches) in [("lrc", &self.lrc_matches), ("txt", &self.txt_matches)] {
            for (ext, songs) in &matches.linked {
                sections.push(ReportSection::new(
                    format!("{} {}", kind, ext),
                    songs.iter().map(|p| p.display().to_string()).collect(),
                ));
            }
            sections.push(ReportSection::new(
                format!("{} unlinked", kind),
                matches.unlinked.iter().map(|p| p.display().to_string()).collect(),
            ));
        }
        sections
    }
}

// Settings a tick-list export job needs, owned so jobs can run on worker threads
#[derive(Debug, Clone)]
struct ExportSettings {
    standardize: bool,
    style: TimestampStyle,
    default_language: String,
    overwrite: bool,
    offset_override: Option<i64>,
}

/// Main application controller for lyrics conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Find lyrics files under `dir` and match them to audio files
    pub fn scan<P: AsRef<Path>>(&self, dir: P) -> Result<ScanSummary> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", dir));
        }

        let lyrics = FileManager::find_lyrics_files(dir, !self.config.single_folder)?;
        if lyrics.is_empty() {
            warn!("No external lyrics (.lrc/.txt) found in {}", dir.display());
        }

        let extensions = self.config.normalized_extensions();
        let summary = ScanSummary {
            lrc_matches: FileManager::find_matches(&lyrics.lrc, &extensions),
            txt_matches: FileManager::find_matches(&lyrics.txt, &extensions),
            lyrics,
        };

        for (kind, matches) in [("lrc", &summary.lrc_matches), ("txt", &summary.txt_matches)] {
            for (ext, songs) in &matches.linked {
                info!("{} files linked to {}: {}", kind, ext, songs.len());
            }
            if !matches.unlinked.is_empty() {
                warn!("{} files without a matching song: {}", kind, matches.unlinked.len());
                for path in &matches.unlinked {
                    debug!("Unlinked: {}", path.display());
                }
            }
        }

        self.write_report(RunMode::Scan, &summary.sections());
        Ok(summary)
    }

    /// Standardize the timestamps of every `.lrc` file at `path`, in place
    pub async fn standardize_path<P: AsRef<Path>>(&self, path: P) -> Result<RunSummary> {
        let inputs = self.collect_inputs(path.as_ref(), |p| FileManager::find_files(p, "lrc", !self.config.single_folder))?;
        let style = self.config.timestamp_style;

        self.run_jobs(RunMode::Standardize, inputs, move |path| Self::standardize_file(&path, style))
            .await
    }

    /// Write a `.sylt.json` tick-list next to every `.lrc` file at `path`
    pub async fn export_sylt<P: AsRef<Path>>(&self, path: P, offset_override: Option<i64>) -> Result<RunSummary> {
        let inputs = self.collect_inputs(path.as_ref(), |p| FileManager::find_files(p, "lrc", !self.config.single_folder))?;
        let settings = ExportSettings {
            standardize: self.config.standardize,
            style: self.config.timestamp_style,
            default_language: self.config.default_language.clone(),
            overwrite: self.config.overwrite,
            offset_override,
        };

        self.run_jobs(RunMode::ToSylt, inputs, move |path| Self::export_file(&path, &settings))
            .await
    }

    /// Write an `.lrc` file for every `.sylt.json` tick-list at `path`
    pub async fn import_sylt<P: AsRef<Path>>(&self, path: P) -> Result<RunSummary> {
        let inputs = self.collect_inputs(path.as_ref(), |p| FileManager::find_sylt_documents(p, !self.config.single_folder))?;
        let overwrite = self.config.overwrite;

        self.run_jobs(RunMode::FromSylt, inputs, move |path| Self::import_file(&path, overwrite))
            .await
    }

    /// Rebuild the ID tag header of one lyrics file from its song's tags
    pub async fn tag_file<P: AsRef<Path>>(&self, path: P, tags: &SongTags) -> Result<RunSummary> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Lyrics file does not exist: {:?}", path));
        }

        let standardize = self.config.standardize;
        let style = self.config.timestamp_style;
        let tags = tags.clone();

        self.run_jobs(RunMode::Tag, vec![path.to_path_buf()], move |path| {
            Self::tag_one(&path, &tags, standardize, style)
        })
        .await
    }

    // A single file is used as is; a directory is searched with `find`
    fn collect_inputs<F>(&self, path: &Path, find: F) -> Result<Vec<PathBuf>>
    where
        F: FnOnce(&Path) -> Result<Vec<PathBuf>>,
    {
        if FileManager::file_exists(path) {
            Ok(vec![path.to_path_buf()])
        } else if FileManager::dir_exists(path) {
            find(path)
        } else {
            Err(AppError::File(format!("Input path does not exist: {:?}", path)).into())
        }
    }

    /// Run `job` over `inputs` on blocking worker threads, `concurrent_files` at a time
    async fn run_jobs<F>(&self, mode: RunMode, inputs: Vec<PathBuf>, job: F) -> Result<RunSummary>
    where
        F: Fn(PathBuf) -> Result<FileReport> + Send + Sync + Clone + 'static,
    {
        if inputs.is_empty() {
            warn!("No input files found for {}", mode.name());
            return Ok(RunSummary::empty(mode));
        }

        let start_time = Instant::now();
        let progress_bar = self.progress_bar(inputs.len() as u64, mode);

        let mut reports: Vec<FileReport> = stream::iter(inputs)
            .map(|path| {
                let job = job.clone();
                let progress_bar = progress_bar.clone();
                async move {
                    let input = path.clone();
                    let report = match tokio::task::spawn_blocking(move || job(input)).await {
                        Ok(Ok(report)) => report,
                        Ok(Err(e)) => FileReport::failed(path, &e),
                        Err(e) => FileReport::failed(path, &anyhow!("Worker task panicked: {}", e)),
                    };
                    progress_bar.inc(1);
                    report
                }
            })
            .buffer_unordered(self.config.concurrent_files)
            .collect()
            .await;

        progress_bar.finish_and_clear();
        reports.sort_by(|a, b| a.path.cmp(&b.path));

        let summary = RunSummary {
            mode,
            reports,
            duration: start_time.elapsed(),
        };
        self.log_summary(&summary);
        self.write_report(mode, &summary.sections());

        Ok(summary)
    }

    fn progress_bar(&self, len: u64, mode: RunMode) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message(mode.name());
        progress_bar
    }

    fn log_summary(&self, summary: &RunSummary) {
        for report in &summary.reports {
            match &report.outcome {
                FileOutcome::Failed(err) => error!("Error processing file {}: {}", report.path.display(), err),
                FileOutcome::Skipped(reason) => debug!("Skipped {}: {}", report.path.display(), reason),
                _ => {}
            }
            for anomaly in &report.anomalies {
                match anomaly {
                    Anomaly::MalformedBracket { .. } => debug!("{}: {}", report.path.display(), anomaly),
                    _ => warn!("{}: {}", report.path.display(), anomaly),
                }
            }
        }

        info!(
            "{} completed in {}: {} written, {} unchanged, {} skipped, {} errors, {} anomalies",
            summary.mode.name(),
            Self::format_duration(summary.duration),
            summary.written(),
            summary.unchanged(),
            summary.skipped(),
            summary.failed(),
            summary.anomaly_count()
        );
    }

    // Result logs are optional, so failing to write them only warns
    fn write_report(&self, mode: RunMode, sections: &[ReportSection]) {
        let report = &self.config.report;
        if !report.log_to_disk {
            return;
        }

        match FileManager::write_report(&report.log_path, mode.name(), report.separate_logs, sections) {
            Ok(paths) => {
                for path in paths {
                    info!("Results written to {}", path.display());
                }
            }
            Err(e) => warn!("Failed to write result log to {}: {:#}", report.log_path.display(), e),
        }
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    fn standardize_file(path: &Path, style: TimestampStyle) -> Result<FileReport> {
        let content = FileManager::read_to_string(path)?;
        let standardized = standardize_lyrics(&content, style);

        let outcome = if standardized.differs_from(&content) {
            FileManager::write_to_file(path, &standardized.text)?;
            FileOutcome::Written
        } else {
            FileOutcome::Unchanged
        };

        Ok(FileReport::new(path, Some(path.to_path_buf()), outcome).with_anomalies(standardized.anomalies))
    }

    fn export_file(path: &Path, settings: &ExportSettings) -> Result<FileReport> {
        let output = FileManager::sylt_path_for(path);
        if FileManager::file_exists(&output) && !settings.overwrite {
            return Ok(FileReport::new(path, Some(output), FileOutcome::Skipped("tick-list exists".to_string())));
        }

        // Ticks and dropped lines come from the source text as written
        let content = FileManager::read_to_string(path)?;
        let mut conversion = lrc_to_synced_entries(&content, settings.offset_override);

        let mut anomalies = Vec::new();
        if settings.standardize {
            anomalies.extend(find_malformed_brackets(&content));
            for entry in &mut conversion.entries {
                entry.text = standardize_line(&entry.text, settings.style).text;
            }
        }
        anomalies.extend(conversion.dropped.into_iter().map(Anomaly::from));

        if conversion.entries.is_empty() {
            return Ok(
                FileReport::new(path, Some(output), FileOutcome::Skipped("no timestamped lines".to_string()))
                    .with_anomalies(anomalies),
            );
        }

        let document = SyltDocument {
            language: language_utils::frame_language(conversion.language.as_deref(), &settings.default_language),
            entries: conversion.entries,
        };
        let json = document.to_json().context("Failed to serialize tick-list")?;
        FileManager::write_to_file(&output, &json)?;

        Ok(FileReport::new(path, Some(output), FileOutcome::Written).with_anomalies(anomalies))
    }

    fn import_file(path: &Path, overwrite: bool) -> Result<FileReport> {
        let output = FileManager::lrc_path_for(path);
        if FileManager::file_exists(&output) && !overwrite {
            return Ok(FileReport::new(path, Some(output), FileOutcome::Skipped("lyrics file exists".to_string())));
        }

        let content = FileManager::read_to_string(path)?;
        let document = SyltDocument::from_json(&content)
            .map_err(AppError::from)
            .with_context(|| format!("Invalid tick-list document: {:?}", path))?;

        let mut lrc = document.to_lrc();
        lrc.push('\n');
        FileManager::write_to_file(&output, &lrc)?;

        Ok(FileReport::new(path, Some(output), FileOutcome::Written))
    }

    fn tag_one(path: &Path, tags: &SongTags, standardize: bool, style: TimestampStyle) -> Result<FileReport> {
        let content = FileManager::read_to_string(path)?;

        let mut anomalies = Vec::new();
        let mut text = content.clone();
        if standardize {
            let standardized = standardize_lyrics(&text, style);
            anomalies.extend(standardized.anomalies);
            text = standardized.text;
        }

        let mut rewritten = rewrite_header(&text, tags);
        rewritten.push('\n');

        let outcome = if rewritten != content {
            FileManager::write_to_file(path, &rewritten)?;
            FileOutcome::Written
        } else {
            FileOutcome::Unchanged
        };

        Ok(FileReport::new(path, Some(path.to_path_buf()), outcome).with_anomalies(anomalies))
    }
}
