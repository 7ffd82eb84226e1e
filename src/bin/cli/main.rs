mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acf-import", about = "Import ACF field groups from WordPress exports", version)]
struct Cli {
    /// Config file (default: <config dir>/acf-importer/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store directory, overrides the config file
    #[arg(long, global = true, env = "ACF_IMPORT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Import a field group export (use "-" to read from stdin)
    Import {
        file: PathBuf,
        /// Target site (default from config)
        #[arg(long, conflicts_with = "all_sites")]
        site: Option<u64>,
        /// Create a new post even if one with the same title exists
        #[arg(long)]
        allow_duplicates: bool,
        /// Import into every active site
        #[arg(long)]
        all_sites: bool,
    },

    /// Show what an export contains without importing it
    Preview {
        file: PathBuf,
    },

    /// Show an imported field group and its meta
    Show {
        /// Exact post title
        title: String,
        #[arg(long)]
        site: Option<u64>,
    },

    /// Manage the sites of the store
    #[command(subcommand)]
    Sites(SitesCommand),
}

#[derive(Subcommand)]
enum SitesCommand {
    /// List sites
    List,
    /// Register a new site
    Add {
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Import { file, site, allow_duplicates, all_sites } => {
            commands::import::run(
                &app,
                &file,
                site,
                allow_duplicates,
                all_sites,
                &cli.format,
                use_color,
            )?;
        }
        Command::Preview { file } => {
            commands::preview::run(&app, &file, &cli.format, use_color)?;
        }
        Command::Show { title, site } => {
            commands::show::run(&app, &title, site, &cli.format, use_color)?;
        }
        Command::Sites(SitesCommand::List) => {
            commands::sites::run_list(&app, &cli.format)?;
        }
        Command::Sites(SitesCommand::Add { name }) => {
            commands::sites::run_add(&app, &name, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
