pub mod parse;
pub mod prompt;

/// Fallback chapter text substituted when generation fails or its output
/// contains no usable chapter line. Parses back into two chapters, so every
/// downstream consumer still receives a well-formed list.
pub const FALLBACK_CHAPTER_TEXT: &str = "00:00 Introduction\n01:00 Main Content";

/// One chapter marker: where a logical content segment starts and what to
/// call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    timestamp: String,
    title: String,
    total_seconds: u32,
}

impl Chapter {
    pub fn new(minutes: u32, seconds: u32, title: impl Into<String>) -> Self {
        Self {
            timestamp: format!("{:02}:{:02}", minutes, seconds),
            title: title.into(),
            total_seconds: minutes * 60 + seconds,
        }
    }

    /// The `MM:SS` timestamp exactly as persisted. Minutes may exceed 59.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Derived numeric position, for consumers that need ordering or
    /// comparison without re-parsing the timestamp.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }
}

/// The ordered chapter sequence produced by one job. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterList {
    chapters: Vec<Chapter>,
}

impl ChapterList {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// The fixed two-entry list used whenever no usable chapters exist.
    pub fn fallback() -> Self {
        Self {
            chapters: vec![
                Chapter::new(0, 0, "Introduction"),
                Chapter::new(1, 0, "Main Content"),
            ],
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Render as newline-joined `MM:SS Title` lines. This is the stored
    /// contract and round-trips through [`parse::parse_chapters`].
    pub fn render(&self) -> String {
        self.chapters
            .iter()
            .map(|c| format!("{} {}", c.timestamp, c.title))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
