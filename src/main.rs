use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use toptracks::{
    cli::{self, PlaylistOptions, TopOptions},
    config, error,
    management::DEFAULT_EXPORT_FILE,
    types::TimeRange,
    utils, warning,
};

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
    /// Defaults to printing your top 5 tracks
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show your top tracks
    Top(TopArgs),

    /// Create a playlist from your top tracks
    Playlist(PlaylistArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopArgs {
    /// Number of tracks to fetch (1-50)
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    /// short_term, medium_term or long_term; overrides SPOTIFY_TIMEFRAME
    #[clap(long, value_parser = utils::parse_time_range)]
    time_range: Option<TimeRange>,

    /// Only print the track lines, without links
    #[clap(long)]
    no_urls: bool,

    /// Write the raw API response to a JSON file
    #[clap(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    save: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistArgs {
    #[clap(long, default_value = cli::DEFAULT_PLAYLIST_NAME)]
    name: String,

    #[clap(long)]
    description: Option<String>,

    /// Number of top tracks to add (1-50)
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    #[clap(long, value_parser = utils::parse_time_range)]
    time_range: Option<TimeRange>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let result = match cli.command {
        None => cli::top(&config, TopOptions::default()).await,
        Some(Command::Auth) => cli::auth(&config).await,
        Some(Command::Top(args)) => {
            cli::top(
                &config,
                TopOptions {
                    limit: args.limit,
                    time_range: args.time_range,
                    with_urls: !args.no_urls,
                    save: args.save,
                },
            )
            .await
        }
        Some(Command::Playlist(args)) => {
            cli::playlist(
                &config,
                PlaylistOptions {
                    name: args.name,
                    description: args
                        .description
                        .or_else(|| PlaylistOptions::default().description),
                    limit: args.limit,
                    time_range: args.time_range,
                },
            )
            .await
        }
        Some(Command::Completions(_)) => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
