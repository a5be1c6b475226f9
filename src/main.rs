use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lastfm_sitedata::{cli, config, error, site::SiteData};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Directory holding the per-feed cache files
    #[clap(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Cache lifetime in minutes
    #[clap(long, global = true)]
    ttl: Option<u32>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the most recent scrobbles
    Recent(ShowOptions),

    /// Show the paginated listening history
    History(HistoryOptions),

    /// Show top albums of the last month
    Albums(ShowOptions),

    /// Write every feed's view into a site data directory
    Export(ExportOptions),

    /// Inspect cache files without network access
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Print the template view as JSON instead of a table
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Print the template view as JSON instead of a table
    #[clap(long)]
    json: bool,

    /// Number of 200-track pages to walk
    #[clap(long)]
    pages: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Output directory, e.g. the site generator's data directory
    #[clap(long)]
    out: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env();

    let cli = Cli::parse();

    let mut settings = config::Config::from_env();
    if let Some(dir) = cli.cache_dir {
        settings.cache_dir = dir;
    }
    if let Some(ttl) = cli.ttl.filter(|t| *t > 0) {
        settings.ttl_minutes = ttl;
    }
    if let Command::History(HistoryOptions {
        pages: Some(pages), ..
    }) = &cli.command
    {
        settings.history_pages = (*pages).max(1);
    }

    match cli.command {
        Command::Status => cli::status(&settings).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        command => {
            let site = match SiteData::from_config(settings) {
                Ok(site) => site,
                Err(e) => error!("Cannot create HTTP client: {}", e),
            };

            match command {
                Command::Recent(opt) => cli::recent(&site, opt.json).await,
                Command::History(opt) => cli::history(&site, opt.json).await,
                Command::Albums(opt) => cli::albums(&site, opt.json).await,
                Command::Export(opt) => {
                    if let Err(e) = cli::export(&site, &opt.out).await {
                        error!("Export to {} failed: {}", opt.out.display(), e);
                    }
                }
                Command::Status | Command::Completions(_) => {}
            }
        }
    }
}
