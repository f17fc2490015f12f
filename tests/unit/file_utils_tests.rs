/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common;
use lyrict::file_utils::{FileManager, ReportSection};

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a/b/out.lrc");

    FileManager::write_to_file(&target, "[00:01.00]x")?;

    assert_eq!(FileManager::read_to_string(&target)?, "[00:01.00]x");
    Ok(())
}

#[test]
fn test_find_files_withSingleFolder_shouldNotDescend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "top.lrc", "")?;
    common::create_test_file(temp_dir.path(), "TOP2.LRC", "")?;
    common::create_test_file(temp_dir.path(), "sub/nested.lrc", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;

    let recursive = FileManager::find_files(temp_dir.path(), "lrc", true)?;
    let single = FileManager::find_files(temp_dir.path(), ".lrc", false)?;

    assert_eq!(recursive.len(), 3);
    assert_eq!(single.len(), 2);
    assert!(single.iter().all(|p| p.parent() == Some(temp_dir.path())));
    Ok(())
}

#[test]
fn test_find_lyrics_files_withTxtFiles_shouldOnlyAcceptTrackNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "01 Song.lrc", "")?;
    common::create_test_file(temp_dir.path(), "01 Song.txt", "")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "")?;
    common::create_test_file(temp_dir.path(), "1 Short.txt", "")?;

    let found = FileManager::find_lyrics_files(temp_dir.path(), true)?;

    assert_eq!(found.lrc.len(), 1);
    assert_eq!(found.txt, vec![temp_dir.path().join("01 Song.txt")]);
    assert_eq!(found.total(), 2);
    Ok(())
}

#[test]
fn test_find_sylt_documents_withMixedJson_shouldOnlyReturnTickLists() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "song.sylt.json", "{}")?;
    common::create_test_file(temp_dir.path(), "lyrict.json", "{}")?;

    let found = FileManager::find_sylt_documents(temp_dir.path(), true)?;

    assert_eq!(found, vec![temp_dir.path().join("song.sylt.json")]);
    Ok(())
}

#[test]
fn test_find_matches_withAudioSiblings_shouldLinkPerExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let linked = common::create_test_file(temp_dir.path(), "01 Song.lrc", "")?;
    let unlinked = common::create_test_file(temp_dir.path(), "02 Other.lrc", "")?;
    common::create_test_file(temp_dir.path(), "01 Song.flac", "")?;
    common::create_test_file(temp_dir.path(), "01 Song.mp3", "")?;

    let extensions = vec!["flac".to_string(), "mp3".to_string(), "ogg".to_string()];
    let result = FileManager::find_matches(&[linked, unlinked.clone()], &extensions);

    assert_eq!(result.linked["flac"], vec![temp_dir.path().join("01 Song.flac")]);
    assert_eq!(result.linked["mp3"], vec![temp_dir.path().join("01 Song.mp3")]);
    assert!(!result.linked.contains_key("ogg"));
    assert_eq!(result.unlinked, vec![unlinked]);
    assert_eq!(result.linked_count(), 2);
    Ok(())
}

#[test]
fn test_sibling_path_withDottedExtension_shouldReplaceExtension() {
    assert_eq!(FileManager::sibling_path("/m/01 Song.lrc", ".mp3"), PathBuf::from("/m/01 Song.mp3"));
    assert_eq!(FileManager::lrc_path_for(Path::new("/m/a.json")), PathBuf::from("/m/a.lrc"));
}

#[test]
fn test_write_report_withCombinedLog_shouldWriteOneFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sections = vec![
        ReportSection::new("Written", vec!["a.lrc".to_string()]),
        ReportSection::new("Anomalies", vec!["a.lrc".to_string(), "\tline 2: dropped".to_string()]),
    ];

    let written = FileManager::write_report(temp_dir.path(), "to_sylt", false, &sections)?;

    assert_eq!(written, vec![temp_dir.path().join("lyrict_to_sylt_results.log")]);
    let content = fs::read_to_string(&written[0])?;
    assert!(content.contains("WRITTEN:\na.lrc\n"));
    assert!(content.contains("ANOMALIES:\na.lrc\n\tline 2: dropped\n"));
    Ok(())
}

#[test]
fn test_write_report_withSeparateLogs_shouldSkipEmptySections() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sections = vec![
        ReportSection::new("lrc flac", vec!["/m/01 Song.flac".to_string()]),
        ReportSection::new("lrc unlinked", vec![]),
    ];

    let written = FileManager::write_report(temp_dir.path(), "scan", true, &sections)?;

    assert_eq!(written, vec![temp_dir.path().join("lyrict_scan_lrc_flac.log")]);
    assert_eq!(fs::read_to_string(&written[0])?, "/m/01 Song.flac\n");
    Ok(())
}
