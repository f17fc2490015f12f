use anyhow::{Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Suffix of tick-list documents written next to `.lrc` files
pub const SYLT_SUFFIX: &str = ".sylt.json";

// Plain-text lyrics only count when named like a track, e.g. "01 Hello.txt"
static TRACK_TXT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2,3}\s").unwrap());

// @struct: Lyrics files found under a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsFiles {
    pub lrc: Vec<PathBuf>,
    pub txt: Vec<PathBuf>,
}

impl LyricsFiles {
    pub fn is_empty(&self) -> bool {
        self.lrc.is_empty() && self.txt.is_empty()
    }

    pub fn total(&self) -> usize {
        self.lrc.len() + self.txt.len()
    }
}

// @struct: Lyrics files matched to audio files with the same base name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    // @field: Audio extension -> matched audio files
    pub linked: BTreeMap<String, Vec<PathBuf>>,

    // @field: Lyrics files with no audio file next to them
    pub unlinked: Vec<PathBuf>,
}

impl MatchResult {
    pub fn linked_count(&self) -> usize {
        self.linked.values().map(Vec::len).sum()
    }
}

// @struct: One titled block of a result log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }

    // File name used when every section gets its own log
    fn slug(&self) -> String {
        self.title
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Walk `dir` and collect the files whose name satisfies `accept`, sorted
    ///
    /// Without `recursive` only the files directly inside `dir` are looked at.
    pub fn find_by_name<P, F>(dir: P, recursive: bool, accept: F) -> Result<Vec<PathBuf>>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> bool,
    {
        let mut walker = WalkDir::new(dir.as_ref()).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut result = Vec::new();
        for entry in walker {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && accept(&entry.file_name().to_string_lossy()) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let normalized_ext = extension.trim_start_matches('.').to_string();
        Self::find_by_name(dir, recursive, |name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&normalized_ext))
        })
    }

    /// Find tick-list documents (`*.sylt.json`) in a directory
    pub fn find_sylt_documents<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
        Self::find_by_name(dir, recursive, |name| name.to_lowercase().ends_with(SYLT_SUFFIX))
    }

    /// Find `.lrc` files and track-named `.txt` files
    pub fn find_lyrics_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<LyricsFiles> {
        let dir = dir.as_ref();
        let lrc = Self::find_files(dir, "lrc", recursive)?;
        let txt = Self::find_by_name(dir, recursive, |name| {
            name.to_lowercase().ends_with(".txt") && TRACK_TXT_REGEX.is_match(name)
        })?;

        Ok(LyricsFiles { lrc, txt })
    }

    /// Match lyrics files to audio files sharing their base name
    ///
    /// A lyrics file may link to several audio files, one per extension.
    pub fn find_matches(lyrics: &[PathBuf], extensions: &[String]) -> MatchResult {
        let mut result = MatchResult::default();

        for path in lyrics {
            let mut hits = false;
            for ext in extensions {
                let song_path = Self::sibling_path(path, ext);
                if Self::file_exists(&song_path) {
                    result.linked.entry(ext.clone()).or_default().push(song_path);
                    hits = true;
                }
            }
            if !hits {
                result.unlinked.push(path.clone());
            }
        }

        result
    }

    /// Same path with its extension replaced
    pub fn sibling_path<P: AsRef<Path>>(path: P, extension: &str) -> PathBuf {
        path.as_ref().with_extension(extension.trim_start_matches('.'))
    }

    /// `song.lrc` -> `song.sylt.json`
    pub fn sylt_path_for<P: AsRef<Path>>(lrc: P) -> PathBuf {
        let lrc = lrc.as_ref();
        let stem = lrc.file_stem().unwrap_or_default().to_string_lossy();
        lrc.with_file_name(format!("{}{}", stem, SYLT_SUFFIX))
    }

    /// `song.sylt.json` -> `song.lrc`
    pub fn lrc_path_for<P: AsRef<Path>>(sylt: P) -> PathBuf {
        let sylt = sylt.as_ref();
        let name = sylt.file_name().unwrap_or_default().to_string_lossy();
        let base = if name.to_lowercase().ends_with(SYLT_SUFFIX) {
            &name[..name.len() - SYLT_SUFFIX.len()]
        } else {
            sylt.file_stem().and_then(|s| s.to_str()).unwrap_or(name.as_ref())
        };
        sylt.with_file_name(format!("{}.lrc", base))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Write the result log of a run
    ///
    /// All sections go to `lyrict_<mode>_results.log`, or with `separate`
    /// each non-empty section goes to `lyrict_<mode>_<section>.log`.
    /// Returns the files written.
    pub fn write_report<P: AsRef<Path>>(
        log_dir: P,
        mode: &str,
        separate: bool,
        sections: &[ReportSection],
    ) -> Result<Vec<PathBuf>> {
        let log_dir = log_dir.as_ref();
        Self::ensure_dir(log_dir)?;

        if !separate {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut content = format!("lyrict {} results, {}\n\n", mode, timestamp);
            for section in sections {
                content.push_str(&format!("{}:\n", section.title.to_uppercase()));
                for line in &section.lines {
                    content.push_str(line);
                    content.push('\n');
                }
                content.push('\n');
            }

            let path = log_dir.join(format!("lyrict_{}_results.log", mode));
            Self::write_to_file(&path, &content)?;
            return Ok(vec![path]);
        }

        let mut written = Vec::new();
        for section in sections.iter().filter(|s| !s.lines.is_empty()) {
            let path = log_dir.join(format!("lyrict_{}_{}.log", mode, section.slug()));
            let mut content = section.lines.join("\n");
            content.push('\n');
            Self::write_to_file(&path, &content)?;
            written.push(path);
        }
        Ok(written)
    }
}
