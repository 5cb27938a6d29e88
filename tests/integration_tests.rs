//! Integration tests for chapterize
//!
//! These tests run the full transcript-to-chapters pipeline against in-memory
//! artifacts and scripted generators, without requiring external API keys.

use async_trait::async_trait;
use chapterize::chapters::parse::parse_chapters;
use chapterize::chapters::prompt::build_chapter_prompt;
use chapterize::chapters::FALLBACK_CHAPTER_TEXT;
use chapterize::error::ChapterizeError;
use chapterize::generate::ChapterGenerator;
use chapterize::pipeline::{generate_chapters, JobConfig};
use chapterize::transcript::duration::estimate_minutes;
use chapterize::transcript::format::format_with_markers;
use chapterize::transcript::TranscriptArtifact;

struct ScriptedGenerator(&'static str);

#[async_trait]
impl ChapterGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> chapterize::Result<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

struct BrokenGenerator;

#[async_trait]
impl ChapterGenerator for BrokenGenerator {
    async fn generate(&self, _prompt: &str) -> chapterize::Result<String> {
        Err(ChapterizeError::Api("provider unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

/// A small but realistic Transcribe-shaped artifact: two sentences roughly
/// twenty seconds apart.
fn sample_artifact() -> TranscriptArtifact {
    TranscriptArtifact::from_json(
        r#"{
            "results": {
                "transcripts": [{"transcript": "Welcome to the show. Today we cover parsing."}],
                "items": [
                    {"type": "pronunciation", "alternatives": [{"content": "Welcome"}], "start_time": "0.1", "end_time": "0.5"},
                    {"type": "pronunciation", "alternatives": [{"content": "to"}], "start_time": "0.6", "end_time": "0.7"},
                    {"type": "pronunciation", "alternatives": [{"content": "the"}], "start_time": "0.8", "end_time": "0.9"},
                    {"type": "pronunciation", "alternatives": [{"content": "show"}], "start_time": "1.0", "end_time": "1.4"},
                    {"type": "punctuation", "alternatives": [{"content": "."}]},
                    {"type": "pronunciation", "alternatives": [{"content": "Today"}], "start_time": "21.0", "end_time": "21.4"},
                    {"type": "pronunciation", "alternatives": [{"content": "we"}], "start_time": "21.5", "end_time": "21.6"},
                    {"type": "pronunciation", "alternatives": [{"content": "cover"}], "start_time": "21.7", "end_time": "22.0"},
                    {"type": "pronunciation", "alternatives": [{"content": "parsing"}], "start_time": "22.1", "end_time": "22.6"},
                    {"type": "punctuation", "alternatives": [{"content": "."}]}
                ]
            }
        }"#,
    )
    .unwrap()
}

// ============================================================================
// Formatter + Duration Integration
// ============================================================================

mod formatting_tests {
    use super::*;

    #[test]
    fn test_artifact_formats_with_markers() {
        let artifact = sample_artifact();
        let formatted = format_with_markers(&artifact.tokens(), 10.0);

        // Punctuation tokens attach directly to the buffer, which already
        // ends in the word's separating space.
        assert_eq!(
            formatted,
            "[00:00] Welcome to the show . [00:21] Today we cover parsing ."
        );
    }

    #[test]
    fn test_interval_respected_across_artifact() {
        let artifact = sample_artifact();
        let formatted = format_with_markers(&artifact.tokens(), 30.0);

        // Second sentence starts only 20s later, under the 30s interval.
        assert_eq!(formatted.matches('[').count(), 1);
    }

    #[test]
    fn test_duration_from_artifact() {
        let artifact = sample_artifact();
        // 22.6s rounds to 0 minutes and clamps to 1.
        assert_eq!(estimate_minutes(&artifact.tokens()), 1);
    }
}

// ============================================================================
// Prompt Integration
// ============================================================================

mod prompt_tests {
    use super::*;

    #[test]
    fn test_prompt_contains_formatted_transcript() {
        let artifact = sample_artifact();
        let formatted = format_with_markers(&artifact.tokens(), 10.0);
        let prompt = build_chapter_prompt(&formatted, 1);

        assert!(prompt.contains("[00:21] Today we cover parsing ."));
        assert!(prompt.contains("approximately 1 minutes long"));
    }
}

// ============================================================================
// End-to-End Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_job_with_well_formed_response() {
        let artifact = sample_artifact();
        let generator = ScriptedGenerator("00:01 Welcome\n00:21 Parsing Basics");

        let result = generate_chapters(&artifact, &generator, &JobConfig::default())
            .await
            .unwrap();

        assert_eq!(result.chapter_text, "00:01 Welcome\n00:21 Parsing Basics");
        assert_eq!(
            result.plain_transcript,
            "Welcome to the show. Today we cover parsing."
        );
        assert!(!result.stats.generation_failed);
        assert!(!result.stats.parse_degraded);

        // The stored chapter text is the same contract the parser accepts.
        let reparsed = parse_chapters(&result.chapter_text);
        assert_eq!(reparsed.chapters, result.chapters);
    }

    #[tokio::test]
    async fn test_full_job_with_chatty_response() {
        let artifact = sample_artifact();
        let generator =
            ScriptedGenerator("Here are the chapters:\n00:01 Welcome\n00:21 Parsing Basics\nEnjoy!");

        let result = generate_chapters(&artifact, &generator, &JobConfig::default())
            .await
            .unwrap();

        assert_eq!(result.chapters.len(), 2);
        assert_eq!(result.stats.skipped_lines, 2);
    }

    #[tokio::test]
    async fn test_full_job_with_broken_provider() {
        let artifact = sample_artifact();

        let result = generate_chapters(&artifact, &BrokenGenerator, &JobConfig::default())
            .await
            .unwrap();

        assert!(result.stats.generation_failed);
        assert_eq!(result.chapter_text, FALLBACK_CHAPTER_TEXT);
        assert_eq!(result.chapters.len(), 2);
    }

    #[tokio::test]
    async fn test_job_without_timed_tokens_uses_plain_transcript() {
        let artifact = TranscriptArtifact::from_json(
            r#"{
                "results": {
                    "transcripts": [{"transcript": "No timing metadata here."}],
                    "items": [
                        {"type": "pronunciation", "alternatives": [{"content": "broken"}]}
                    ]
                }
            }"#,
        )
        .unwrap();
        let generator = ScriptedGenerator("00:00 Everything");

        let result = generate_chapters(&artifact, &generator, &JobConfig::default())
            .await
            .unwrap();

        assert!(result.stats.formatting_degraded);
        assert_eq!(result.generation_input, "No timing metadata here.");
        assert_eq!(result.duration_minutes, 1);
    }

    #[tokio::test]
    async fn test_malformed_artifact_propagates() {
        let result = TranscriptArtifact::from_json(r#"{"status": "COMPLETED"}"#);
        assert!(matches!(result, Err(ChapterizeError::UpstreamShape(_))));
    }

    #[tokio::test]
    async fn test_artifact_loaded_from_file() {
        // Same path the CLI takes: read the transcript JSON from disk first.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_transcript.json");
        std::fs::write(
            &path,
            r#"{
                "results": {
                    "transcripts": [{"transcript": "From disk."}],
                    "items": [
                        {"type": "pronunciation", "alternatives": [{"content": "From"}], "start_time": "0.0", "end_time": "0.3"},
                        {"type": "pronunciation", "alternatives": [{"content": "disk"}], "start_time": "0.4", "end_time": "0.8"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let artifact = TranscriptArtifact::from_json(&json).unwrap();
        let generator = ScriptedGenerator("00:00 On Disk");

        let result = generate_chapters(&artifact, &generator, &JobConfig::default())
            .await
            .unwrap();

        assert_eq!(result.chapter_text, "00:00 On Disk");
        assert_eq!(result.plain_transcript, "From disk.");
    }
}

// ============================================================================
// Parser Totality Tests
// ============================================================================

mod parser_totality_tests {
    use super::*;

    #[test]
    fn test_parser_never_empty() {
        let inputs = [
            "",
            "\n\n\n",
            "plain prose with no chapters",
            "99:99 odd but valid\u{7}",
            "\u{fffd}\u{0}binary-ish",
            "00:00",
        ];

        for input in inputs {
            let parsed = parse_chapters(input);
            assert!(
                !parsed.chapters.is_empty(),
                "empty chapter list for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parser_fallback_is_exact() {
        let parsed = parse_chapters("");
        let chapters = parsed.chapters.chapters();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].timestamp(), "00:00");
        assert_eq!(chapters[0].title(), "Introduction");
        assert_eq!(chapters[1].timestamp(), "01:00");
        assert_eq!(chapters[1].title(), "Main Content");
    }
}
