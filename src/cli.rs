use clap::{Args, Parser, Subcommand};
use qbank_book::config::{DEFAULT_CONFIG_FILE, DEFAULT_PROFILES_FILE};
use std::path::PathBuf;

/// Overrides for the external PDF renderer configured in the settings file
#[derive(Args, Debug, Default)]
pub struct RendererArgs {
    /// Program that converts the HTML document to PDF
    #[clap(long, env = "QBANK_RENDERER")]
    pub renderer: Option<PathBuf>,

    /// Leading argument for the renderer program (repeatable); replaces the configured arguments
    #[clap(long = "renderer-arg", allow_hyphen_values = true)]
    pub renderer_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Lists the saved configurations
    List,
    /// Saves (or replaces) a named configuration
    Save {
        name: String,
        /// Folder containing one sub-folder per module
        #[clap(long)]
        root: PathBuf,
        /// Folder the PDFs are written to
        #[clap(long)]
        output: PathBuf,
    },
    /// Removes a named configuration
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merges the given module folders, in order, into one PDF
    Render {
        #[clap(required = true)]
        folders: Vec<PathBuf>,
        /// Where to write the PDF
        #[clap(short, long)]
        output: PathBuf,
        #[clap(flatten)]
        renderer: RendererArgs,
    },
    /// Writes the merged HTML document without converting it to PDF
    Html {
        #[clap(required = true)]
        folders: Vec<PathBuf>,
        /// Where to write the HTML document
        #[clap(short, long)]
        output: PathBuf,
    },
    /// Renders every module folder under a root folder to its own PDF
    Batch {
        /// Folder containing one sub-folder per module
        #[clap(required_unless_present = "profile", conflicts_with = "profile")]
        root: Option<PathBuf>,
        /// Folder the PDFs are written to
        #[clap(short = 'd', long, required_unless_present = "profile", conflicts_with = "profile")]
        output_dir: Option<PathBuf>,
        /// Use the root and output folders of a saved configuration
        #[clap(short, long)]
        profile: Option<String>,
        #[clap(flatten)]
        renderer: RendererArgs,
    },
    /// Manages saved configurations
    #[clap(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Settings file
    #[clap(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Saved configurations file
    #[clap(long, global = true, default_value = DEFAULT_PROFILES_FILE)]
    pub profiles: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}
