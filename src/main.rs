use clap::Parser;
use notenav::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notenav", about = "Browse and search a folder of markdown notes")]
struct Args {
    /// Config file (default: ~/.notenav/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repository that holds the notes
    #[arg(short, long)]
    repo: Option<PathBuf>,

    /// Notes folder, relative to the repository
    #[arg(short, long)]
    notes_root: Option<String>,

    /// Maximum number of search results
    #[arg(long)]
    search_limit: Option<usize>,

    /// Don't run `git` to show repository status
    #[arg(long)]
    no_git: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to notenav.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("notenav.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config(args.config.as_deref()).map_err(io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            repo_path: args.repo,
            notes_root: args.notes_root,
            search_limit: args.search_limit,
            no_git: args.no_git,
        },
    );

    if !resolved.notes_root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "notes_root not found: {}\nCheck ~/.notenav/config.toml or pass --repo/--notes-root",
                resolved.notes_root.display()
            ),
        ));
    }

    log::info!("notenav starting up at {}", resolved.notes_root.display());

    notenav::tui::run(resolved)
}
