//! Generation jobs and their lifecycle.
//!
//! A [`GenerationJob`] merges a list of folders into one PDF:
//!
//! ```text
//! Idle → Loading → Rendering → Delegating → Cleaning up → Succeeded | Failed
//! ```
//!
//! Progress is pushed to a [`Reporter`] as [`Event`]s in stage order, and every
//! job ends with exactly one [`Event::Completed`]. A [`BatchJob`] runs several
//! independent jobs back to back; a [`Worker`] runs either on its own thread
//! and hands the events back over a channel.

mod batch;
mod generation;
mod worker;

pub use batch::{BatchJob, BatchReport, JobResult};
pub use generation::{GenerationJob, GenerationJobBuilder, GenerationJobBuilderError};
pub use worker::Worker;

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Lifecycle stages of a job, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    Loading,
    Rendering,
    Delegating,
    CleaningUp,
    Succeeded,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::Rendering => "rendering",
            Stage::Delegating => "delegating",
            Stage::CleaningUp => "cleaning up",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How a single job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Succeeded { output: PathBuf },
    Failed { reason: String },
}

impl Completion {
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Succeeded { .. })
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Succeeded { output } => {
                write!(f, "Success! PDF saved to {}", output.display())
            }
            Completion::Failed { reason } => write!(f, "Error: {reason}"),
        }
    }
}

/// Notifications sent from a running job to whoever started it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Progress { stage: Stage, message: String },
    /// Something was skipped but the job carries on.
    Warning { message: String },
    /// Always the last event of a job.
    Completed(Completion),
    /// Always the last event of a batch.
    BatchCompleted(BatchReport),
}

/// Receives job events as they happen.
pub trait Reporter {
    fn report(&self, event: Event);
}

impl Reporter for Sender<Event> {
    fn report(&self, event: Event) {
        // nobody listening any more; the job still runs to completion
        let _ = self.send(event);
    }
}

/// Cooperative cancellation, checked by jobs between stages.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
