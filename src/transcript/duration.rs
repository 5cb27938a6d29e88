//! Approximate video duration from the token stream.

use crate::transcript::TranscriptToken;

/// Estimate the video duration in whole minutes, minimum 1.
///
/// The last word carrying an end time decides; tokens without timing are
/// ignored. With no timed token at all the duration is unknown and reported
/// as 1 minute.
pub fn estimate_minutes(tokens: &[TranscriptToken]) -> u32 {
    let duration_seconds = tokens
        .iter()
        .rev()
        .find_map(|token| match token {
            TranscriptToken::Word {
                end_time: Some(end),
                ..
            } => Some(*end),
            _ => None,
        })
        .unwrap_or(0.0);

    let minutes = (duration_seconds / 60.0).round() as u32;
    minutes.max(1)
}
