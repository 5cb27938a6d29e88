use anyhow::{Context, Result};
use chapterize::config::Config;
use chapterize::generate::GeminiGenerator;
use chapterize::pipeline::{generate_chapters, print_summary, JobConfig};
use chapterize::transcript::TranscriptArtifact;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "chapterize")]
#[command(version, about = "Generate video chapters from a transcript")]
#[command(
    long_about = "Generate chapter markers from a timestamped transcription result (AWS Transcribe JSON) using the Google Gemini API."
)]
struct Cli {
    /// Input transcript JSON file
    input: PathBuf,

    /// Output chapters file (defaults to <input stem>_chapters.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Marker interval in seconds for the timestamped transcript
    #[arg(short, long)]
    interval: Option<f64>,

    /// Gemini model name (overrides config and GEMINI_MODEL_NAME)
    #[arg(short, long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut output = input.to_path_buf();
    output.set_file_name(format!("{}_chapters.txt", stem.to_string_lossy()));
    output
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    let output = cli.output.unwrap_or_else(|| derive_output_path(&cli.input));

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(interval) = cli.interval {
        config.marker_interval_seconds = interval;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.validate().context("Configuration validation failed")?;

    info!("Input:    {}", cli.input.display());
    info!("Output:   {}", output.display());
    info!("Model:    {}", config.model);
    info!("Interval: {}s", config.marker_interval_seconds);

    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let artifact =
        TranscriptArtifact::from_json(&json).context("Failed to parse transcript artifact")?;

    let api_key = config.gemini_api_key.clone().unwrap_or_default();
    let generator = GeminiGenerator::new(api_key).with_model(config.model.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Generating chapters...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let job_config = JobConfig {
        marker_interval_seconds: config.marker_interval_seconds,
    };
    let result = generate_chapters(&artifact, &generator, &job_config).await?;

    spinner.finish_with_message(format!("✓ Generated {} chapters", result.chapters.len()));

    std::fs::write(&output, &result.chapter_text)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Chapters saved to {}", output.display());

    print_summary(&result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        let input = PathBuf::from("/path/to/video_transcript.json");
        assert_eq!(
            derive_output_path(&input),
            PathBuf::from("/path/to/video_transcript_chapters.txt")
        );
    }
}
