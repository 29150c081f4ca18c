use super::{CancelFlag, Completion, Event, GenerationJob, GenerationJobBuilder, Reporter};
use crate::error::JobError;
use crate::file_ordering;
use crate::sinks::pdf::DocumentRenderer;
use anyhow::{Context, Result};
use log::info;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Several independent generation jobs run one after the other.
///
/// A failing job doesn't stop the batch; cancelling it skips every job that
/// hasn't started yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchJob {
    jobs: Vec<GenerationJob>,
}

impl BatchJob {
    pub fn new(jobs: Vec<GenerationJob>) -> BatchJob {
        BatchJob { jobs }
    }

    /// One job per module folder under `root`, in natural order, each writing
    /// `<output_dir>/<folder name>.pdf`.
    pub fn discover(root: &Path, output_dir: &Path, dataset_file: &str) -> Result<BatchJob> {
        let mut jobs = Vec::new();
        for folder in file_ordering::discover_modules(root)? {
            let Some(name) = folder.file_name().map(|name| name.to_string_lossy().to_string())
            else {
                continue;
            };
            let job = GenerationJobBuilder::default()
                .output(output_dir.join(format!("{name}.pdf")))
                .folder(folder)
                .dataset_file(dataset_file)
                .build()
                .with_context(|| format!("Failed to set up the job for {name}"))?;
            jobs.push(job);
        }
        Ok(BatchJob { jobs })
    }

    pub fn jobs(&self) -> &[GenerationJob] {
        &self.jobs
    }

    /// Run every job on the current thread, then report [`Event::BatchCompleted`].
    pub fn run(
        &self,
        renderer: &dyn DocumentRenderer,
        reporter: &dyn Reporter,
        cancel: &CancelFlag,
    ) -> BatchReport {
        let mut results = Vec::with_capacity(self.jobs.len());
        for (i, job) in self.jobs.iter().enumerate() {
            let completion = if cancel.is_cancelled() {
                None
            } else {
                info!("Batch job {}/{}: {}", i + 1, self.jobs.len(), job.label());
                Some(job.run(renderer, reporter, cancel))
            };
            results.push(JobResult {
                label: job.label(),
                output: job.output().to_path_buf(),
                completion,
            });
        }

        let report = BatchReport { results };
        info!("{}", report.headline());
        reporter.report(Event::BatchCompleted(report.clone()));
        report
    }
}

/// Outcome of one job in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub label: String,
    pub output: PathBuf,
    /// `None` if the batch was cancelled before this job started
    pub completion: Option<Completion>,
}

impl JobResult {
    /// Jobs interrupted by cancellation count as skipped, not failed.
    pub fn is_skipped(&self) -> bool {
        match &self.completion {
            None => true,
            Some(Completion::Failed { reason }) => *reason == JobError::Cancelled.to_string(),
            Some(Completion::Succeeded { .. }) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub results: Vec<JobResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.completion, Some(Completion::Succeeded { .. })))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded() - self.skipped()
    }

    pub fn headline(&self) -> String {
        let mut headline = format!(
            "Batch complete: {} succeeded, {} failed",
            self.succeeded(),
            self.failed()
        );
        if self.skipped() > 0 {
            let _ = write!(headline, ", {} skipped", self.skipped());
        }
        headline.push('.');
        headline
    }

    /// Headline followed by one line per job.
    pub fn summary(&self) -> String {
        let mut summary = self.headline();
        for result in &self.results {
            let status = match &result.completion {
                Some(completion) if !result.is_skipped() => completion.to_string(),
                _ => "Skipped".to_string(),
            };
            let _ = write!(summary, "\n  {}: {status}", result.label);
        }
        summary
    }
}
