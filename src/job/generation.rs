use super::{CancelFlag, Completion, Event, Reporter, Stage};
use crate::error::JobError;
use crate::sinks::html;
use crate::sinks::pdf::DocumentRenderer;
use crate::source::{self, LoadStep, DEFAULT_DATASET_FILE};
use derive_builder::Builder;
use log::{debug, info, warn};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One run of the pipeline: the given folders, in order, into one PDF.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct GenerationJob {
    #[builder(setter(each(name = "folder", into)), default)]
    folders: Vec<PathBuf>,
    output: PathBuf,
    #[builder(default = "DEFAULT_DATASET_FILE.to_string()")]
    dataset_file: String,
}

impl GenerationJob {
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn dataset_file(&self) -> &str {
        &self.dataset_file
    }

    /// Short human-readable name for the job: its folder names.
    pub fn label(&self) -> String {
        self.folders
            .iter()
            .map(|folder| {
                folder
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| folder.display().to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Run the job to completion on the current thread.
    ///
    /// Never panics and never returns early: whatever happens, the temporary
    /// document is gone when this returns and the last event sent to `reporter`
    /// is the [`Event::Completed`] matching the return value.
    pub fn run(
        &self,
        renderer: &dyn DocumentRenderer,
        reporter: &dyn Reporter,
        cancel: &CancelFlag,
    ) -> Completion {
        info!(
            "Generating {} from {} folder(s)",
            self.output.display(),
            self.folders.len()
        );

        let output_existed = self.output.exists();
        let mut stage = Stage::Idle;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.execute(&mut stage, renderer, reporter, cancel)
        }))
        .unwrap_or_else(|payload| Err(JobError::Panicked(panic_message(payload.as_ref()))));

        if let Err(e) = &result {
            warn!("Generating {} failed while {stage}: {e}", self.output.display());
        }
        if stage != Stage::CleaningUp {
            enter(&mut stage, Stage::CleaningUp);
        }

        let completion = match result {
            Ok(()) => {
                enter(&mut stage, Stage::Succeeded);
                Completion::Succeeded {
                    output: self.output.clone(),
                }
            }
            Err(e) => {
                if !output_existed {
                    self.remove_partial_output();
                }
                enter(&mut stage, Stage::Failed);
                Completion::Failed {
                    reason: e.to_string(),
                }
            }
        };

        info!("{completion}");
        reporter.report(Event::Completed(completion.clone()));
        completion
    }

    fn execute(
        &self,
        stage: &mut Stage,
        renderer: &dyn DocumentRenderer,
        reporter: &dyn Reporter,
        cancel: &CancelFlag,
    ) -> Result<(), JobError> {
        let progress = |at: Stage, message: String| {
            reporter.report(Event::Progress { stage: at, message })
        };

        checkpoint(cancel)?;
        enter(stage, Stage::Loading);
        progress(Stage::Loading, "Starting PDF generation process...".to_string());

        let records = source::load_all(&self.folders, &self.dataset_file, |step| match step {
            LoadStep::Reading(path) => {
                progress(Stage::Loading, format!("Reading {}...", path.display()))
            }
            LoadStep::Missing(folder) => {
                warn!("{} not found in {}", self.dataset_file, folder.display());
                reporter.report(Event::Warning {
                    message: format!(
                        "Warning: {} not found in {}",
                        self.dataset_file,
                        folder.display()
                    ),
                });
            }
        })
        .map_err(JobError::Dataset)?;

        if records.is_empty() {
            return Err(JobError::NoQuestions);
        }
        checkpoint(cancel)?;

        enter(stage, Stage::Rendering);
        progress(Stage::Rendering, "Generating HTML content...".to_string());
        let document = write_temporary(&html::render_document(&records)?)?;
        progress(Stage::Rendering, "Generated temporary HTML file.".to_string());

        let outcome = self.delegate(stage, document.path(), renderer, reporter, cancel);

        enter(stage, Stage::CleaningUp);
        let path = document.path().to_path_buf();
        if let Err(e) = document.close() {
            warn!("Failed to remove temporary document {}: {e}", path.display());
        }

        outcome
    }

    fn delegate(
        &self,
        stage: &mut Stage,
        document: &Path,
        renderer: &dyn DocumentRenderer,
        reporter: &dyn Reporter,
        cancel: &CancelFlag,
    ) -> Result<(), JobError> {
        checkpoint(cancel)?;
        enter(stage, Stage::Delegating);
        reporter.report(Event::Progress {
            stage: Stage::Delegating,
            message: "Calling the PDF renderer...".to_string(),
        });

        renderer.render(document, &self.output)?;

        reporter.report(Event::Progress {
            stage: Stage::Delegating,
            message: format!("PDF generation complete: {}", self.output.display()),
        });
        Ok(())
    }
}

impl GenerationJob {
    /// Remove whatever a failed or panicking renderer left at the output path.
    fn remove_partial_output(&self) {
        if !self.output.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.output) {
            warn!("Failed to remove partial output {}: {e}", self.output.display());
        }
    }
}

fn enter(stage: &mut Stage, next: Stage) {
    debug!("Job stage: {stage} -> {next}");
    *stage = next;
}

fn checkpoint(cancel: &CancelFlag) -> Result<(), JobError> {
    if cancel.is_cancelled() {
        Err(JobError::Cancelled)
    } else {
        Ok(())
    }
}

fn write_temporary(html: &str) -> Result<NamedTempFile, JobError> {
    let mut document = tempfile::Builder::new()
        .prefix("qbank-")
        .suffix(".html")
        .tempfile()
        .map_err(JobError::TempDocument)?;
    document
        .write_all(html.as_bytes())
        .and_then(|()| document.flush())
        .map_err(JobError::TempDocument)?;
    Ok(document)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "job panicked".to_string()
    }
}
