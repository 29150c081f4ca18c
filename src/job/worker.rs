use super::{BatchJob, BatchReport, CancelFlag, Completion, Event, GenerationJob, Reporter};
use crate::sinks::pdf::DocumentRenderer;
use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A job running on its own thread.
///
/// Events arrive on [`Worker::events`] in the order the job produced them. The
/// channel closes once the job is done, so draining it is enough to wait for
/// the last event.
pub struct Worker<T> {
    events: Receiver<Event>,
    cancel: CancelFlag,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Worker<T> {
    /// Spawn `work` on a new thread, handing it the reporting end of the event
    /// channel and the cancel flag this worker controls.
    pub fn start<F>(work: F) -> std::io::Result<Worker<T>>
    where
        F: FnOnce(&dyn Reporter, &CancelFlag) -> T + Send + 'static,
    {
        let (tx, events) = mpsc::channel::<Event>();
        let cancel = CancelFlag::default();
        let flag = cancel.clone();
        let handle = thread::Builder::new()
            .name("qbank-worker".to_string())
            .spawn(move || work(&tx, &flag))?;

        Ok(Worker {
            events,
            cancel,
            handle,
        })
    }

    /// Events sent by the job so far; iterating blocks until the next one.
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Ask the job to stop at its next stage boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the thread to finish and take its result.
    pub fn wait(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| anyhow!("Worker thread panicked"))
    }
}

impl Worker<Completion> {
    pub fn job(job: GenerationJob, renderer: Arc<dyn DocumentRenderer>) -> std::io::Result<Self> {
        Worker::start(move |reporter, cancel| job.run(renderer.as_ref(), reporter, cancel))
    }
}

impl Worker<BatchReport> {
    pub fn batch(batch: BatchJob, renderer: Arc<dyn DocumentRenderer>) -> std::io::Result<Self> {
        Worker::start(move |reporter, cancel| batch.run(renderer.as_ref(), reporter, cancel))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::job::GenerationJobBuilder;
    use crate::sinks::pdf::RenderError;
    use crate::source::DEFAULT_DATASET_FILE;
    use std::path::Path;
    use std::sync::Barrier;

    struct CopyRenderer;

    impl DocumentRenderer for CopyRenderer {
        fn render(&self, document: &Path, output: &Path) -> Result<(), RenderError> {
            std::fs::copy(document, output).expect("can copy document");
            Ok(())
        }
    }

    /// Blocks inside the renderer until the test lets it go.
    struct GatedRenderer(Arc<Barrier>);

    impl DocumentRenderer for GatedRenderer {
        fn render(&self, document: &Path, output: &Path) -> Result<(), RenderError> {
            self.0.wait();
            self.0.wait();
            std::fs::copy(document, output).expect("can copy document");
            Ok(())
        }
    }

    fn module(root: &Path, name: &str) -> std::path::PathBuf {
        let folder = root.join(name);
        std::fs::create_dir_all(&folder).expect("can create folder");
        std::fs::write(
            folder.join(DEFAULT_DATASET_FILE),
            r#"[{"question_number": 1, "text": "Which?"}]"#,
        )
        .expect("can write dataset");
        folder
    }

    #[test]
    fn job_events_arrive_then_channel_closes() {
        let root = tempfile::tempdir().expect("can create temp dir");
        let folder = module(root.path(), "output_1");
        let output = root.path().join("bank.pdf");

        let job = GenerationJobBuilder::default()
            .folder(folder)
            .output(&output)
            .build()
            .expect("can build job");
        let worker = Worker::job(job, Arc::new(CopyRenderer)).expect("can start worker");
        let events: Vec<Event> = worker.events().iter().collect();
        let completion = worker.wait().expect("worker finishes");

        assert!(completion.is_success());
        assert_eq!(events.last(), Some(&Event::Completed(completion)));
        assert!(output.exists());
    }

    #[test]
    fn batch_worker_ends_with_report() {
        let root = tempfile::tempdir().expect("can create temp dir");
        let bank = root.path().join("bank");
        module(&bank, "output_1");
        module(&bank, "output_2");
        let out = root.path().join("pdfs");
        std::fs::create_dir_all(&out).expect("can create output folder");

        let batch =
            BatchJob::discover(&bank, &out, DEFAULT_DATASET_FILE).expect("can discover batch");
        let worker = Worker::batch(batch, Arc::new(CopyRenderer)).expect("can start worker");
        let events: Vec<Event> = worker.events().iter().collect();
        let report = worker.wait().expect("worker finishes");

        assert_eq!(report.succeeded(), 2);
        assert_eq!(events.last(), Some(&Event::BatchCompleted(report)));
    }

    #[test]
    fn cancel_reaches_the_running_batch() {
        let root = tempfile::tempdir().expect("can create temp dir");
        let bank = root.path().join("bank");
        module(&bank, "output_1");
        module(&bank, "output_2");
        let out = root.path().join("pdfs");
        std::fs::create_dir_all(&out).expect("can create output folder");

        let gate = Arc::new(Barrier::new(2));
        let batch =
            BatchJob::discover(&bank, &out, DEFAULT_DATASET_FILE).expect("can discover batch");
        let worker = Worker::batch(batch, Arc::new(GatedRenderer(Arc::clone(&gate))))
            .expect("can start worker");

        // first job is now inside the renderer
        gate.wait();
        worker.cancel();
        gate.wait();

        let report = worker.wait().expect("worker finishes");
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.skipped(), 1);
    }
}
