use crate::sinks::pdf::RenderError;

/// Reasons a generation job ends without producing its output file.
///
/// The `Display` text is what callers see after `Error: ` in the job's
/// completion message.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("No questions found in the selected folders.")]
    NoQuestions,

    #[error("Generation was cancelled")]
    Cancelled,

    #[error("{0:#}")]
    Dataset(anyhow::Error),

    #[error("Failed to write temporary HTML document: {0}")]
    TempDocument(#[source] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Unexpected failure: {0}")]
    Panicked(String),
}
