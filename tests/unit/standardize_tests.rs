/*!
 * Tests for timestamp standardization of free-form lyrics
 */

use lyrict::lyrics::{Anomaly, TimestampStyle, standardize_line, standardize_lyrics};

#[test]
fn test_standardize_line_withHourOverflow_shouldPromote() {
    let line = standardize_line("[62:00.000]Late line", TimestampStyle::Keep);
    assert_eq!(line.text, "[01:02:00.000]Late line");
    assert!(line.precision_losses.is_empty());
}

#[test]
fn test_standardize_line_withoutFraction_shouldStayWithoutFraction() {
    let line = standardize_line("[03:20]Text", TimestampStyle::Keep);
    assert_eq!(line.text, "[03:20]Text");
}

#[test]
fn test_standardize_line_withRepeatedRun_shouldRewriteEveryTimecode() {
    let line = standardize_line("[00:75.00] [01:80.00] Chorus", TimestampStyle::Keep);
    assert_eq!(line.text, "[01:15.00][02:20.00]Chorus");
}

#[test]
fn test_standardize_line_withInlineMarks_shouldKeepAngleBrackets() {
    let line = standardize_line("[00:01.00]Hello <00:62.00> world", TimestampStyle::Keep);
    assert_eq!(line.text, "[00:01.00]Hello <01:02.00> world");
}

#[test]
fn test_standardize_line_withMillisStyle_shouldWidenFractions() {
    let line = standardize_line("[00:01.23]a <00:02.50>b", TimestampStyle::Millis);
    assert_eq!(line.text, "[00:01.230]a <00:02.500>b");
    assert!(line.precision_losses.is_empty());
}

#[test]
fn test_standardize_line_withPlainText_shouldReturnItUnchanged() {
    let line = standardize_line("  just words [Chorus]  ", TimestampStyle::Keep);
    assert_eq!(line.text, "  just words [Chorus]  ");
}

/// Standardizing twice gives the same result as standardizing once
#[test]
fn test_standardize_lyrics_withMessyInput_shouldBeIdempotent() {
    let input = "[ar:Someone]\r\n[00:75.00]  One\r\n\r\n\r\n[62:00.000][00:01]Two <00:90.00>x\n[Chorus]\n";
    for style in [TimestampStyle::Keep, TimestampStyle::Centis, TimestampStyle::Millis] {
        let once = standardize_lyrics(input, style);
        let twice = standardize_lyrics(&once.text, style);
        assert_eq!(once.text, twice.text, "style {:?}", style);
    }
}

#[test]
fn test_standardize_lyrics_withEmptyLineRuns_shouldCollapseThem() {
    let result = standardize_lyrics("[00:01.00]a\n\n\n\n[00:02.00]b\n", TimestampStyle::Keep);
    assert_eq!(result.text, "[00:01.00]a\n\n[00:02.00]b\n");
}

#[test]
fn test_standardize_lyrics_withoutTrailingNewline_shouldNotAddOne() {
    let result = standardize_lyrics("[00:01.00]a", TimestampStyle::Keep);
    assert_eq!(result.text, "[00:01.00]a");
    assert!(!result.differs_from("[00:01.00]a"));
}

#[test]
fn test_standardize_lyrics_withCentisStyle_shouldReportPrecisionLoss() {
    let result = standardize_lyrics("[ti:x]\n[00:01.234]a\n", TimestampStyle::Centis);
    assert_eq!(result.text, "[ti:x]\n[00:01.23]a\n");
    assert_eq!(
        result.anomalies,
        vec![Anomaly::PrecisionLoss {
            line_number: 2,
            original: "[00:01.234]".to_string(),
            rendered: "[00:01.23]".to_string(),
            dropped_ms: 4,
        }]
    );
}

#[test]
fn test_standardize_lyrics_withUnknownBracket_shouldReportAndKeepIt() {
    let result = standardize_lyrics("[00:01.00]a\n[Chorus]\n", TimestampStyle::Keep);
    assert!(result.text.contains("[Chorus]"));
    assert_eq!(
        result.anomalies,
        vec![Anomaly::MalformedBracket {
            line_number: 2,
            content: "Chorus".to_string(),
        }]
    );
}

#[test]
fn test_standardize_lyrics_withIdTags_shouldLeaveThemAlone() {
    let input = "[ar:Artist]\n[offset:+100]\n[la:en]\n";
    let result = standardize_lyrics(input, TimestampStyle::Millis);
    assert_eq!(result.text, input);
    assert!(result.anomalies.is_empty());
}

#[test]
fn test_standardize_lyrics_withTimecodeBeyondHourField_shouldKeepItAndReport() {
    let input = "[99:99:99]  Too late\n<999:99.99>x\n";
    let result = standardize_lyrics(input, TimestampStyle::Keep);
    assert_eq!(result.text, "[99:99:99]Too late\n<999:99.99>x\n");
    assert_eq!(
        result.anomalies,
        vec![
            Anomaly::OutOfRange {
                line_number: 1,
                original: "[99:99:99]".to_string(),
            },
            Anomaly::OutOfRange {
                line_number: 2,
                original: "<999:99.99>".to_string(),
            },
        ]
    );
    assert_eq!(standardize_lyrics(&result.text, TimestampStyle::Keep).text, result.text);
}

#[test]
fn test_find_malformed_brackets_withBlankRuns_shouldUseSourceLineNumbers() {
    let anomalies = lyrict::lyrics::find_malformed_brackets("[00:01.00]a\n\n\n[Chorus]\n[ar:Artist]\n");
    assert_eq!(
        anomalies,
        vec![Anomaly::MalformedBracket {
            line_number: 4,
            content: "Chorus".to_string(),
        }]
    );
}
