//! Settings file and saved named configurations.
//!
//! `qbank-book.toml` holds the renderer settings shared by every run. Named
//! configurations remember a root folder and an output folder for batch runs
//! and are kept in a separate JSON file behind the [`ProfileStore`] trait.

use crate::sinks::pdf::ExternalRenderer;
use crate::source::DEFAULT_DATASET_FILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "qbank-book.toml";
pub const DEFAULT_PROFILES_FILE: &str = "qbank-profiles.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the dataset file looked for in each module folder
    pub dataset_file: String,
    pub renderer: ExternalRenderer,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dataset_file: DEFAULT_DATASET_FILE.to_string(),
            renderer: ExternalRenderer::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults if there is no such file.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// A saved pair of folders for batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedConfiguration {
    pub root_folder: PathBuf,
    pub output_folder: PathBuf,
}

pub type Profiles = BTreeMap<String, NamedConfiguration>;

/// Persistence for named configurations; the whole map is read and written at once.
pub trait ProfileStore {
    fn load(&self) -> Result<Profiles>;
    fn save(&self, profiles: &Profiles) -> Result<()>;
}

/// Profiles stored as a pretty-printed JSON object keyed by name.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> JsonProfileStore {
        JsonProfileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self) -> Result<Profiles> {
        if !self.path.exists() {
            return Ok(Profiles::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to load {} contents", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, profiles: &Profiles) -> Result<()> {
        let contents = serde_json::to_string_pretty(profiles)
            .with_context(|| "Failed to serialize saved configurations")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
