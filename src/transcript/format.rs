//! Renders the token stream into a single text blob with inline `[MM:SS]`
//! markers, the anchor points the generation prompt tells the model to pick
//! chapter timestamps from.

use crate::transcript::TranscriptToken;

/// Default spacing between inline markers, in seconds.
pub const DEFAULT_MARKER_INTERVAL: f64 = 10.0;

/// Sentinel below any real timestamp so the first word always gets a marker.
const NO_MARKER_YET: f64 = -999.0;

/// Format the transcript with timestamps at regular intervals.
///
/// A marker is emitted before a word when at least `interval_seconds` have
/// passed since the previous marker. Words are separated by single spaces,
/// except that a word ending in sentence or clause punctuation suppresses the
/// space that would follow it; punctuation tokens attach directly to the
/// preceding text. The result is trimmed, so empty input yields an empty
/// string and the caller must fall back to the plain transcript in that case.
pub fn format_with_markers(tokens: &[TranscriptToken], interval_seconds: f64) -> String {
    let mut result = String::new();
    let mut last_marker_time = NO_MARKER_YET;

    for token in tokens {
        match token {
            TranscriptToken::Word {
                text, start_time, ..
            } => {
                if start_time - last_marker_time >= interval_seconds {
                    if !result.is_empty() && !result.ends_with(char::is_whitespace) {
                        result.push(' ');
                    }
                    result.push_str(&format_marker(*start_time));
                    result.push(' ');
                    last_marker_time = *start_time;
                }

                result.push_str(text);

                if !ends_sentence_or_clause(text) {
                    result.push(' ');
                }
            }
            TranscriptToken::Punctuation { text } => {
                result.push_str(text);
            }
        }
    }

    result.trim().to_string()
}

/// Render a timestamp as `[MM:SS]`.
///
/// Minutes are not wrapped at an hour boundary; a long video legitimately
/// produces markers like `[75:30]`, and no hour field exists in the contract.
pub fn format_marker(seconds: f64) -> String {
    let minute = (seconds / 60.0) as u64;
    let second = (seconds % 60.0) as u64;
    format!("[{:02}:{:02}]", minute, second)
}

fn ends_sentence_or_clause(word: &str) -> bool {
    word.ends_with('.') || word.ends_with('!') || word.ends_with('?') || word.ends_with(',')
}
