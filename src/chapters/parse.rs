//! Parses the model's raw text into a validated chapter list.

use crate::chapters::{Chapter, ChapterList};
use regex::Regex;
use tracing::{debug, warn};

/// Outcome of parsing one raw generation response.
#[derive(Debug, Clone)]
pub struct ParsedChapters {
    pub chapters: ChapterList,
    /// Non-empty lines that did not match the `MM:SS Title` grammar.
    pub skipped_lines: usize,
    /// True when no line matched and the fixed fallback was substituted.
    pub used_fallback: bool,
}

/// Parse raw generation output into chapters.
///
/// Total: any input, including empty or binary garbage, yields a non-empty
/// list. Lines that do not match `MM:SS Title` are skipped; if nothing
/// matches, the whole response is treated as unusable and the fixed
/// two-entry fallback is substituted. The model's emitted order is trusted
/// as playback order and never reordered, though a non-monotonic sequence
/// is reported for operators.
pub fn parse_chapters(raw_text: &str) -> ParsedChapters {
    let line_re = Regex::new(r"^(\d{2}):(\d{2})\s+(\S.*)$").expect("Invalid regex");

    let mut chapters = Vec::new();
    let mut skipped_lines = 0usize;

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line_re.captures(line) {
            Some(cap) => {
                let minutes: u32 = cap[1].parse().unwrap_or(0);
                let seconds: u32 = cap[2].parse().unwrap_or(0);
                let title = cap[3].trim();
                chapters.push(Chapter::new(minutes, seconds, title));
            }
            None => {
                debug!("Skipping malformed chapter line: {:?}", line);
                skipped_lines += 1;
            }
        }
    }

    if chapters.is_empty() {
        warn!(
            "No usable chapter lines in generation output ({} lines skipped), using fallback list",
            skipped_lines
        );
        return ParsedChapters {
            chapters: ChapterList::fallback(),
            skipped_lines,
            used_fallback: true,
        };
    }

    if !is_monotonic(&chapters) {
        warn!("Chapter timestamps are not strictly increasing; keeping emitted order");
    }

    ParsedChapters {
        chapters: ChapterList::new(chapters),
        skipped_lines,
        used_fallback: false,
    }
}

fn is_monotonic(chapters: &[Chapter]) -> bool {
    chapters
        .windows(2)
        .all(|pair| pair[0].total_seconds() < pair[1].total_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::FALLBACK_CHAPTER_TEXT;

    #[test]
    fn test_round_trip_well_formed() {
        let raw = "00:00 Intro\n02:30 Topic Two\n10:05 Wrap Up";
        let parsed = parse_chapters(raw);

        assert!(!parsed.used_fallback);
        assert_eq!(parsed.skipped_lines, 0);

        let chapters = parsed.chapters.chapters();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].timestamp(), "00:00");
        assert_eq!(chapters[0].title(), "Intro");
        assert_eq!(chapters[1].timestamp(), "02:30");
        assert_eq!(chapters[1].title(), "Topic Two");
        assert_eq!(chapters[2].timestamp(), "10:05");
        assert_eq!(chapters[2].title(), "Wrap Up");

        assert_eq!(parsed.chapters.render(), raw);
    }

    #[test]
    fn test_empty_input_falls_back() {
        let parsed = parse_chapters("");
        assert!(parsed.used_fallback);
        assert_eq!(parsed.chapters.render(), FALLBACK_CHAPTER_TEXT);
    }

    #[test]
    fn test_garbage_input_falls_back() {
        let parsed = parse_chapters("Sure! Here are your chapters:\n\nno timestamps here\n\u{0}\u{1}");
        assert!(parsed.used_fallback);
        assert_eq!(parsed.chapters.len(), 2);
    }

    #[test]
    fn test_partial_matches_keep_good_lines() {
        let raw = "Here is the chapter list:\n00:00 Getting Started\n(see above)\n05:10 Deep Dive";
        let parsed = parse_chapters(raw);

        assert!(!parsed.used_fallback);
        assert_eq!(parsed.skipped_lines, 2);
        assert_eq!(parsed.chapters.len(), 2);
        assert_eq!(parsed.chapters.chapters()[1].title(), "Deep Dive");
    }

    #[test]
    fn test_rejects_single_digit_minutes() {
        let parsed = parse_chapters("0:00 Bad\n00:00 Good");
        assert_eq!(parsed.chapters.len(), 1);
        assert_eq!(parsed.chapters.chapters()[0].title(), "Good");
    }

    #[test]
    fn test_rejects_hour_format_lines() {
        let parsed = parse_chapters("00:00:00 Not allowed\n01:00 Allowed");
        assert_eq!(parsed.chapters.len(), 1);
        assert_eq!(parsed.chapters.chapters()[0].timestamp(), "01:00");
    }

    #[test]
    fn test_minutes_past_hour_accepted() {
        let parsed = parse_chapters("75:30 Very Late Topic");
        assert!(!parsed.used_fallback);
        assert_eq!(parsed.chapters.chapters()[0].total_seconds(), 4530);
    }

    #[test]
    fn test_non_monotonic_kept_in_emitted_order() {
        let parsed = parse_chapters("05:00 Second\n01:00 First");
        assert!(!parsed.used_fallback);
        let chapters = parsed.chapters.chapters();
        assert_eq!(chapters[0].timestamp(), "05:00");
        assert_eq!(chapters[1].timestamp(), "01:00");
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        let parsed = parse_chapters("  00:00 Intro  \n\n  02:00 More  ");
        assert_eq!(parsed.chapters.render(), "00:00 Intro\n02:00 More");
    }

    #[test]
    fn test_fallback_text_round_trips() {
        let parsed = parse_chapters(FALLBACK_CHAPTER_TEXT);
        assert!(!parsed.used_fallback);
        assert_eq!(parsed.chapters.render(), FALLBACK_CHAPTER_TEXT);
    }
}
