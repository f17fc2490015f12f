/*!
 * Tests for offset/language extraction and header rewriting
 */

use lyrict::lyrics::metadata::{LANGUAGE_SCAN_LINES, is_id_tag, is_language_tag, is_offset_tag};
use lyrict::lyrics::{LyricLine, SongTags, find_language, find_offset, rewrite_header};

#[test]
fn test_find_offset_withSignedAndUnsignedValues_shouldParse() {
    assert_eq!(find_offset(["[offset:+250]"]), Some(250));
    assert_eq!(find_offset(["[OFFSET: -1200 ]"]), Some(-1_200));
    assert_eq!(find_offset(["[offset:300]"]), Some(300));
    assert_eq!(find_offset(["[offset:abc]", "[00:01.00]x"]), None);
}

#[test]
fn test_find_language_withinScanWindow_shouldReturnCodeAsWritten() {
    let mut lines = vec!["[00:01.00]x"; LANGUAGE_SCAN_LINES - 1];
    lines.push("[LA:EN]");
    assert_eq!(find_language(&lines), Some("EN".to_string()));
}

#[test]
fn test_find_language_withInvalidValue_shouldSkipIt() {
    assert_eq!(find_language(["[la:english]", "[la:fr]"]), Some("fr".to_string()));
}

#[test]
fn test_tag_predicates_withVariousLines_shouldClassify() {
    assert!(is_offset_tag("[offset:+1]"));
    assert!(!is_offset_tag("[la:en]"));
    assert!(is_language_tag("[la:en]"));
    assert!(!is_language_tag("[ar:Someone]"));
    assert!(is_id_tag("[ar:Someone]"));
    assert!(is_id_tag("[tool:Editor]"));
    assert!(!is_id_tag("[Chorus]"));
    assert!(!is_id_tag("[00:01.00]"));
}

#[test]
fn test_lyric_line_withRepeatedRun_shouldSplitAnchorsFromText() {
    let line = LyricLine::parse("  [00:01.00] [00:02.00]Text <00:03.00>more [00:04.00]");
    assert!(line.is_synced());
    assert!(line.is_repeated());
    assert_eq!(line.leading.len(), 2);
    assert_eq!(line.inline.len(), 2);
    assert_eq!(line.text(), "Text <00:03.00>more [00:04.00]");
}

#[test]
fn test_lyric_line_withAngleFirst_shouldNotBeSynced() {
    let line = LyricLine::parse("<00:01.00>word");
    assert!(!line.is_synced());
    assert_eq!(line.body, "<00:01.00>word");
}

#[test]
fn test_find_offset_withOverflowingValue_shouldStillWinAsFirstTag() {
    let lines = ["[offset:+99999999999999999999]", "[offset:-100]"];
    assert_eq!(find_offset(lines), Some(i64::MAX));
}

#[test]
fn test_rewrite_header_withSongTags_shouldRebuildInFixedOrder() {
    let text = "[ti:Old Title]\n[by:Someone]\n\n[00:01.00]Line\n[ar:Old Artist]\n[00:02.00]Next\n\n";
    let tags = SongTags {
        artist: Some("New Artist".to_string()),
        album: Some("Album".to_string()),
        composer: Some("Composer".to_string()),
        length_ms: Some(215_400),
        ..SongTags::default()
    };

    let rewritten = rewrite_header(text, &tags);
    assert_eq!(
        rewritten,
        "[ar:New Artist]\n[al:Album]\n[ti:Old Title]\n[au:Composer]\n[length:03:35]\n[by:Someone]\n[00:01.00]Line\n[00:02.00]Next"
    );
}

#[test]
fn test_rewrite_header_withFileAuthor_shouldPreferLyricistThenFileThenComposer() {
    let tags = SongTags {
        composer: Some("Composer".to_string()),
        ..SongTags::default()
    };
    assert_eq!(rewrite_header("[au:Writer]\n[00:01.00]a", &tags), "[au:Writer]\n[00:01.00]a");

    let tags = SongTags {
        lyricist: Some("Lyricist".to_string()),
        ..tags
    };
    assert_eq!(rewrite_header("[au:Writer]\n[00:01.00]a", &tags), "[au:Lyricist]\n[00:01.00]a");
}

#[test]
fn test_rewrite_header_withToolTag_shouldWriteItAsCreator() {
    assert_eq!(rewrite_header("[tool:Editor 1.0]\n[00:01.00]a", &SongTags::default()), "[re:Editor 1.0]\n[00:01.00]a");
}
