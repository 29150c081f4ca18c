//! Merge folders of exported question-bank datasets into one printable PDF.
//!
//! Each module folder holds a `questions.json` file and the images it refers
//! to. The folders are read in order, every question is rendered to HTML with
//! its media inlined, and the resulting self-contained document is handed to an
//! external HTML-to-PDF renderer. Jobs run on a [`job::Worker`] thread and
//! report their progress as a stream of [`job::Event`]s.

pub mod config;
pub mod error;
pub mod file_ordering;
pub mod job;
pub mod markdown;
pub mod media;
pub mod question;
pub mod sinks;
pub mod source;

pub use config::{JsonProfileStore, NamedConfiguration, ProfileStore, Profiles, Settings};
pub use error::JobError;
pub use job::{
    BatchJob, BatchReport, CancelFlag, Completion, Event, GenerationJob, GenerationJobBuilder,
    Reporter, Stage, Worker,
};
pub use question::QuestionRecord;
pub use sinks::{DocumentRenderer, ExternalRenderer, RenderError};
