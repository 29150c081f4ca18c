//! Loading question datasets from their folders.
//!
//! Each module folder holds one dataset file (`questions.json` by default) plus
//! the images it references. Folders are read in the order the caller gives them
//! and every record is tagged with the folder it came from so its media can be
//! resolved later and module boundaries can be detected when rendering.

mod dataset;
pub use dataset::*;

use crate::question::QuestionRecord;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Dataset file name looked for in each folder unless configured otherwise.
pub const DEFAULT_DATASET_FILE: &str = "questions.json";

/// A question together with the absolute folder its media paths are relative to.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecord {
    pub base_path: Arc<Path>,
    pub record: QuestionRecord,
}

/// Notifications emitted while folders are being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep<'a> {
    /// About to read this dataset file.
    Reading(&'a Path),
    /// This folder has no dataset file and contributes no questions.
    Missing(&'a Path),
}

/// Load and tag the datasets of every folder, preserving folder order and the
/// order of records within each dataset.
///
/// A folder without a dataset file is reported through `on_step` and skipped.
/// A dataset file that exists but can't be read or parsed is an error.
pub fn load_all<F>(
    folders: &[PathBuf],
    dataset_file: &str,
    mut on_step: F,
) -> Result<Vec<SourcedRecord>>
where
    F: FnMut(LoadStep<'_>),
{
    let mut records = Vec::new();
    for folder in folders {
        let path = folder.join(dataset_file);
        on_step(LoadStep::Reading(&path));

        match Dataset::load(&path)? {
            Some(dataset) => {
                let base_path: Arc<Path> = Arc::from(folder.as_path());
                records.extend(dataset.records.into_iter().map(|record| SourcedRecord {
                    base_path: Arc::clone(&base_path),
                    record,
                }));
            }
            None => on_step(LoadStep::Missing(folder)),
        }
    }
    Ok(records)
}
