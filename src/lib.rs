pub mod chapters;
pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod transcript;

pub use config::Config;
pub use error::{ChapterizeError, Result};
pub use pipeline::{generate_chapters, print_summary, ChapterJobResult, JobConfig, JobStats};
