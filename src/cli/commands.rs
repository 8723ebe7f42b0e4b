use crate::core::aggregator::aggregate;
use crate::core::collector::collect_files;
use crate::core::selector::select_files;
use crate::core::tree::render_tree;
use crate::domain::models::{ExcludeList, RunConfig};
use crate::infra::file_system::read_file_text;
use crate::infra::logger::setup_logger;
use crate::infra::output::write_clipboard;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info, warn};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "treeclip")]
#[command(about = "Print a directory tree and copy selected file contents to the clipboard", long_about = None)]
pub struct Cli {
    /// Interactively select files and copy their contents to the clipboard
    #[arg(short = 'c', long = "copy")]
    pub copy: bool,

    /// Comma-separated names that replace the default exclusion list
    /// (node_modules, .git, .idea)
    #[arg(short = 'e', long = "exclude")]
    pub exclude: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Drops unrecognized arguments before clap sees them, so they are ignored
/// without aborting the run and without hiding the recognized flags around
/// them. `-e`/`--exclude` consumes the immediately following argument as
/// its value; a trailing one with no value is dropped, leaving the default
/// exclusions in effect.
fn recognized_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut filtered = Vec::new();

    if let Some(bin) = args.next() {
        filtered.push(bin);
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--copy" | "--verbose" | "-h" | "--help" => filtered.push(arg),
            "-e" | "--exclude" => {
                if let Some(value) = args.next() {
                    filtered.push(arg);
                    filtered.push(value);
                }
            }
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                filtered.push(arg)
            }
            _ => {}
        }
    }

    filtered
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_from(recognized_args(std::env::args()));

    setup_logger(cli.verbose)?;

    let excludes = match &cli.exclude {
        Some(list) => {
            debug!("Replacing default exclusions with: {}", list);
            ExcludeList::from_csv(list)
        }
        None => ExcludeList::default(),
    };

    let config = RunConfig {
        root: std::env::current_dir()?,
        excludes,
        copy: cli.copy,
    };

    execute(&config)
}

fn execute(config: &RunConfig) -> anyhow::Result<()> {
    info!("Rendering tree at {}", config.root.display());
    let lines = render_tree(&config.root, &config.excludes)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", config.root.display())?;
    for line in &lines {
        writeln!(stdout, "{}", line)?;
    }

    if !config.copy {
        return Ok(());
    }

    interactive_copy(config)
}

fn interactive_copy(config: &RunConfig) -> anyhow::Result<()> {
    info!("Collecting candidate files");
    let candidates = collect_files(&config.root, &config.excludes)?;

    let selected = select_files(&config.root, candidates)?;
    if selected.is_empty() {
        warn!("Empty selection, nothing copied");
        print_colored("⚠️ No files selected.", Color::Yellow)?;
        return Ok(());
    }

    info!("Aggregating {} selected files", selected.len());
    let payload = aggregate(&selected, |path| read_file_text(path))?;

    if !payload.skipped.is_empty() {
        print_colored(
            &format!("⚠️ Skipped {} non-text file(s).", payload.skipped.len()),
            Color::Yellow,
        )?;
    }

    if payload.file_count == 0 {
        warn!("Every selected file was skipped, nothing copied");
        print_colored("⚠️ Nothing to copy.", Color::Yellow)?;
        return Ok(());
    }

    write_clipboard(&payload.text)?;
    print_colored(
        &format!(
            "✅ Content of {} file(s) copied to clipboard!",
            payload.file_count
        ),
        Color::Green,
    )?;

    Ok(())
}

fn print_colored(message: &str, color: Color) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(color))?;
    writeln!(stdout, "{}", message)?;
    stdout.execute(ResetColor)?;
    Ok(())
}
