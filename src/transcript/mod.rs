pub mod duration;
pub mod format;

use crate::error::{ChapterizeError, Result};
use serde::Deserialize;
use tracing::debug;

/// One recognized unit from the transcription provider.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptToken {
    Word {
        text: String,
        start_time: f64,
        end_time: Option<f64>,
    },
    Punctuation {
        text: String,
    },
}

/// The transcription job output as delivered by the provider.
///
/// Field names and nesting follow the AWS Transcribe result JSON: the full
/// plain-text transcript lives under `results.transcripts[0].transcript`, and
/// the word-level token stream under `results.items`, with times encoded as
/// decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptArtifact {
    pub results: TranscriptResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResults {
    pub transcripts: Vec<TranscriptText>,
    pub items: Vec<TranscriptItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptText {
    pub transcript: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<TranscriptAlternative>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptAlternative {
    pub content: Option<String>,
}

impl TranscriptArtifact {
    /// Parse the raw transcription JSON.
    ///
    /// A document without the `results`/`items` structure has no meaningful
    /// fallback and is reported as a shape error rather than recovered.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ChapterizeError::UpstreamShape(format!("invalid transcript JSON: {}", e)))
    }

    /// The provider's full plain-text transcript, used both as the stored
    /// transcript and as the generation input when marker formatting degrades.
    pub fn plain_text(&self) -> Result<&str> {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
            .ok_or_else(|| {
                ChapterizeError::UpstreamShape("results.transcripts is empty".to_string())
            })
    }

    /// Convert raw items into typed tokens.
    ///
    /// Items missing their text or carrying an unparsable start time are
    /// dropped here so the formatter and duration estimator only ever see
    /// well-formed tokens.
    pub fn tokens(&self) -> Vec<TranscriptToken> {
        let mut tokens = Vec::with_capacity(self.results.items.len());
        let mut skipped = 0usize;

        for item in &self.results.items {
            match item.to_token() {
                Some(token) => tokens.push(token),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed transcript items", skipped);
        }

        tokens
    }
}

impl TranscriptItem {
    fn to_token(&self) -> Option<TranscriptToken> {
        let text = self.alternatives.first()?.content.clone()?;

        match self.kind.as_deref() {
            Some("pronunciation") => {
                let start_time = self.start_time.as_deref()?.parse::<f64>().ok()?;
                let end_time = self.end_time.as_deref().and_then(|t| t.parse::<f64>().ok());
                Some(TranscriptToken::Word {
                    text,
                    start_time,
                    end_time,
                })
            }
            Some("punctuation") => Some(TranscriptToken::Punctuation { text }),
            _ => None,
        }
    }
}
