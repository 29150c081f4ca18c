use anyhow::{anyhow, bail, Context, Result};
use cli::{Cli, Commands, ProfileCommands, RendererArgs};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qbank_book::config::{JsonProfileStore, NamedConfiguration, ProfileStore, Settings};
use qbank_book::job::{BatchJob, Completion, Event, GenerationJobBuilder, Worker};
use qbank_book::sinks::{html, ExternalRenderer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

mod cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e:#}", style("Error").red());
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    use clap::Parser;
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)?;
    let profiles = JsonProfileStore::new(&cli.profiles);

    match cli.command {
        Commands::Render {
            folders,
            output,
            renderer,
        } => {
            check_folders(&folders)?;
            let renderer = renderer_for(&settings, renderer);
            let job = GenerationJobBuilder::default()
                .folders(folders)
                .output(output)
                .dataset_file(&settings.dataset_file)
                .build()?;

            let worker = Worker::job(job, Arc::new(renderer))
                .with_context(|| "Failed to start the generation worker")?;
            let progress = spinner()?;
            follow(&worker, &progress);
            progress.finish_and_clear();

            let completion = worker.wait()?;
            print_completion(&completion);
            Ok(exit_code(completion.is_success()))
        }
        Commands::Html { folders, output } => {
            check_folders(&folders)?;
            let document = html::assemble(&folders, &settings.dataset_file)?;
            std::fs::write(&output, document)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("HTML document saved to {}", describe_file(&output));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Batch {
            root,
            output_dir,
            profile,
            renderer,
        } => {
            let (root, output_dir) = match profile {
                Some(name) => {
                    let saved = profiles.load()?;
                    let NamedConfiguration {
                        root_folder,
                        output_folder,
                    } = saved
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| anyhow!("No saved configuration named `{name}`"))?;
                    (root_folder, output_folder)
                }
                None => (
                    root.ok_or_else(|| anyhow!("A root folder is required"))?,
                    output_dir.ok_or_else(|| anyhow!("An output folder is required"))?,
                ),
            };

            check_folders(std::slice::from_ref(&root))?;
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;

            let batch = BatchJob::discover(&root, &output_dir, &settings.dataset_file)?;
            if batch.jobs().is_empty() {
                bail!("No module folders found in {}", root.display());
            }
            println!(
                "Rendering {} module(s) from {}...",
                batch.jobs().len(),
                root.display()
            );

            let renderer = renderer_for(&settings, renderer);
            let worker = Worker::batch(batch, Arc::new(renderer))
                .with_context(|| "Failed to start the batch worker")?;
            let progress = spinner()?;
            follow(&worker, &progress);
            progress.finish_and_clear();

            let report = worker.wait()?;
            println!("{}", report.summary());
            Ok(exit_code(report.failed() == 0 && report.skipped() == 0))
        }
        Commands::Profile(command) => {
            run_profile_command(&profiles, command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_profile_command(store: &JsonProfileStore, command: ProfileCommands) -> Result<()> {
    let mut profiles = store.load()?;
    match command {
        ProfileCommands::List => {
            if profiles.is_empty() {
                println!("No saved configurations.");
            }
            for (name, profile) in &profiles {
                println!(
                    "{}: {} -> {}",
                    style(name).bold(),
                    profile.root_folder.display(),
                    profile.output_folder.display()
                );
            }
        }
        ProfileCommands::Save { name, root, output } => {
            profiles.insert(
                name.clone(),
                NamedConfiguration {
                    root_folder: root,
                    output_folder: output,
                },
            );
            store.save(&profiles)?;
            println!("Saved configuration `{name}` to {}", store.path().display());
        }
        ProfileCommands::Remove { name } => {
            if profiles.remove(&name).is_none() {
                bail!("No saved configuration named `{name}`");
            }
            store.save(&profiles)?;
            println!("Removed configuration `{name}`");
        }
    }
    Ok(())
}

/// Folders are picked by the user, so make sure they are real before starting a job.
fn check_folders(folders: &[PathBuf]) -> Result<()> {
    for folder in folders {
        if !folder.is_dir() {
            bail!("Folder does not exist: {}", folder.display());
        }
    }
    Ok(())
}

fn renderer_for(settings: &Settings, args: RendererArgs) -> ExternalRenderer {
    let mut renderer = settings.renderer.clone();
    if let Some(program) = args.renderer {
        renderer.program = program;
        renderer.args.clear();
    }
    if !args.renderer_args.is_empty() {
        renderer.args = args.renderer_args;
    }
    renderer
}

fn spinner() -> Result<ProgressBar> {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .with_context(|| "Failed to parse progress style")?,
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}

/// Mirror a worker's events on the terminal until its channel closes.
fn follow<T: Send + 'static>(worker: &Worker<T>, progress: &ProgressBar) {
    for event in worker.events() {
        match event {
            Event::Progress { message, .. } => progress.set_message(message),
            Event::Warning { message } => progress.println(style(message).yellow().to_string()),
            Event::Completed(completion) => {
                let mark = if completion.is_success() {
                    style("✔").green()
                } else {
                    style("✘").red()
                };
                progress.println(format!("{mark} {completion}"));
            }
            Event::BatchCompleted(_) => {}
        }
    }
}

fn print_completion(completion: &Completion) {
    match completion {
        Completion::Succeeded { output } => {
            println!("\n  PDF: {}", describe_file(output));
        }
        Completion::Failed { .. } => {}
    }
}

fn describe_file(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            let size = byte_unit::Byte::from_u64(metadata.len())
                .get_appropriate_unit(byte_unit::UnitType::Binary);
            format!("{} ({size:.1})", path.display())
        }
        Err(_) => path.display().to_string(),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
