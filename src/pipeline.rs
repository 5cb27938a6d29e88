use crate::chapters::parse::parse_chapters;
use crate::chapters::prompt::build_chapter_prompt;
use crate::chapters::{ChapterList, FALLBACK_CHAPTER_TEXT};
use crate::error::Result;
use crate::generate::ChapterGenerator;
use crate::transcript::duration::estimate_minutes;
use crate::transcript::format::{format_with_markers, DEFAULT_MARKER_INTERVAL};
use crate::transcript::TranscriptArtifact;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Configuration for one chapter generation job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Target spacing between inline `[MM:SS]` markers, in seconds.
    pub marker_interval_seconds: f64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            marker_interval_seconds: DEFAULT_MARKER_INTERVAL,
        }
    }
}

/// Statistics from one chapter generation job.
///
/// The degradation flags let operators distinguish "generated normally" from
/// "degraded" even though both produce a usable chapter list.
#[derive(Debug, Clone)]
pub struct JobStats {
    /// Total time taken for the job.
    pub total_time: Duration,
    /// Time spent waiting on the generation provider.
    pub generation_time: Duration,
    /// Marker formatting yielded no output; the plain transcript was used.
    pub formatting_degraded: bool,
    /// The generation call failed; the fixed fallback text was used.
    pub generation_failed: bool,
    /// No usable chapter line was parsed; the fallback list was used.
    pub parse_degraded: bool,
    /// Non-empty response lines that did not match the chapter grammar.
    pub skipped_lines: usize,
}

/// Result of one chapter generation job.
#[derive(Debug, Clone)]
pub struct ChapterJobResult {
    /// The ordered chapter list. Never empty.
    pub chapters: ChapterList,
    /// The chapters rendered as `MM:SS Title` lines, the stored contract.
    pub chapter_text: String,
    /// The text that was fed to the generation provider (marker-formatted,
    /// or the plain transcript when formatting degraded).
    pub generation_input: String,
    /// The plain transcript as delivered upstream, stored separately.
    pub plain_transcript: String,
    /// Estimated video duration in whole minutes.
    pub duration_minutes: u32,
    /// Job statistics.
    pub stats: JobStats,
}

/// Run one transcript-to-chapters job.
///
/// Only a malformed transcript artifact aborts the job. Formatting, generation
/// and parsing failures all degrade to usable substitutes, so the pipeline
/// never fails solely because the model misbehaved.
pub async fn generate_chapters(
    artifact: &TranscriptArtifact,
    generator: &dyn ChapterGenerator,
    config: &JobConfig,
) -> Result<ChapterJobResult> {
    let start_time = Instant::now();

    let plain_transcript = artifact.plain_text()?.to_string();
    let tokens = artifact.tokens();

    let duration_minutes = estimate_minutes(&tokens);
    info!("Estimated video duration: {} minutes", duration_minutes);

    let formatted = format_with_markers(&tokens, config.marker_interval_seconds);

    let formatting_degraded = formatted.is_empty();
    let generation_input = if formatting_degraded {
        warn!("Could not create timestamped transcript, falling back to plain transcript text");
        plain_transcript.clone()
    } else {
        formatted
    };

    let sample: String = generation_input.chars().take(200).collect();
    info!(
        "Formatted transcript ready ({} chars), sample: {}",
        generation_input.len(),
        sample
    );

    let prompt = build_chapter_prompt(&generation_input, duration_minutes);

    let generation_start = Instant::now();
    let (raw_output, generation_failed) = match generator.generate(&prompt).await {
        Ok(text) => (text, false),
        Err(e) => {
            warn!(
                "Generation with {} failed, using fallback chapters: {}",
                generator.name(),
                e
            );
            (FALLBACK_CHAPTER_TEXT.to_string(), true)
        }
    };
    let generation_time = generation_start.elapsed();

    let parsed = parse_chapters(&raw_output);
    let parse_degraded = parsed.used_fallback && !generation_failed;
    if parse_degraded {
        warn!("Generation output contained no usable chapter lines");
    }

    let chapter_text = parsed.chapters.render();
    info!(
        "Generated {} chapters in {:.2}s",
        parsed.chapters.len(),
        generation_time.as_secs_f64()
    );

    Ok(ChapterJobResult {
        chapters: parsed.chapters,
        chapter_text,
        generation_input,
        plain_transcript,
        duration_minutes,
        stats: JobStats {
            total_time: start_time.elapsed(),
            generation_time,
            formatting_degraded,
            generation_failed,
            parse_degraded,
            skipped_lines: parsed.skipped_lines,
        },
    })
}

/// Print a summary of the job results.
pub fn print_summary(result: &ChapterJobResult) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                   Chapter Generation Complete                  ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Chapters:   {}", result.chapters.len());
    println!("  Duration:   ~{} minutes", result.duration_minutes);
    println!(
        "  Generation: {:.2}s",
        result.stats.generation_time.as_secs_f64()
    );
    println!(
        "  Total:      {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    if result.stats.formatting_degraded {
        println!();
        println!("  Note: no timestamped transcript; plain text was used");
    }
    if result.stats.generation_failed || result.stats.parse_degraded {
        println!();
        println!("  Note: fallback chapter list was substituted");
    }
    println!();
    for chapter in result.chapters.chapters() {
        println!("  {} {}", chapter.timestamp(), chapter.title());
    }
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
