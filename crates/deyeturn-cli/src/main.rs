use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, history, prefs, progress, watch, watchlist, Context};
use deyeturn_catalog::ListKind;
use deyeturn_core::Subtitle;
use deyeturn_models::{MovieId, Quality};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "deyeturn")]
#[command(about = "deyeturn - your movie preferences, watchlist and watch progress")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Profile directory holding config, credentials and stored records
    #[arg(long, global = true, value_name = "DIR")]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change user preferences
    Prefs {
        #[command(subcommand)]
        cmd: PrefsCommands,
    },
    /// Manage the watchlist ("My List")
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Recently watched movies, most recent first
    History {
        #[command(subcommand)]
        cmd: HistoryCommands,
    },
    /// Per-movie playback progress (continue watching)
    Progress {
        #[command(subcommand)]
        cmd: ProgressCommands,
    },
    /// Query the movie catalog
    #[command(long_about = "Query the movie metadata API. Requires an API read token, either in DEYETURN_TMDB_TOKEN or stored with 'deyeturn config token'.")]
    Browse {
        #[command(subcommand)]
        cmd: BrowseCommands,
    },
    /// Simulate a playback session, saving progress as it plays
    #[command(long_about = "Run a headless playback session for a movie. Saved progress is resumed unless the movie was nearly finished, and progress is written on the configured save interval while playing.")]
    Watch {
        /// Movie id
        id: MovieId,

        /// Seconds of playback to simulate
        #[arg(long, default_value_t = 30)]
        seconds: u64,

        /// Runtime of the movie in minutes
        #[arg(long, default_value_t = 120)]
        runtime: u32,

        /// Real milliseconds to wait per simulated second (0 runs instantly)
        #[arg(long, default_value_t = 0)]
        tick_ms: u64,

        /// Subtitle track (off, en, es, fr, de, it, pt, ja, ko, zh)
        #[arg(long)]
        subtitle: Option<Subtitle>,

        /// Record the session in watch history under this title
        #[arg(long)]
        title: Option<String>,

        /// Start playback even when auto-play is turned off
        #[arg(long, action = ArgAction::SetTrue)]
        play: bool,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Clear stored records
    #[command(long_about = "Remove stored records from the profile. Use --preferences, --history, --watchlist or --progress to pick records, or --all to clear everything.")]
    Clear {
        /// Clear all stored records
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Reset preferences to defaults
        #[arg(long, action = ArgAction::SetTrue)]
        preferences: bool,

        /// Clear watch history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Clear continue-watching progress
        #[arg(long, action = ArgAction::SetTrue)]
        progress: bool,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences
    Show,
    /// Change one or more preferences
    Set {
        #[arg(long)]
        dark_mode: Option<bool>,

        #[arg(long)]
        auto_play: Option<bool>,

        /// Preferred quality (auto, 1080p, 720p, 480p, 360p)
        #[arg(long)]
        quality: Option<Quality>,

        #[arg(long)]
        notifications: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List watchlist movie ids in insertion order
    List,
    /// Add a movie (no-op if already present)
    Add { id: MovieId },
    /// Remove a movie
    Remove { id: MovieId },
    /// Check whether a movie is on the watchlist
    Contains { id: MovieId },
    /// Add the movie if absent, remove it if present
    Toggle { id: MovieId },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List watch history
    List,
    /// Record that a movie was watched
    Record {
        #[arg(long)]
        movie_id: MovieId,

        #[arg(long)]
        title: String,

        /// Poster or backdrop path
        #[arg(long, default_value = "")]
        thumbnail: String,

        /// Played fraction, 0.0 to 1.0
        #[arg(long, default_value_t = 0.0)]
        progress: f64,
    },
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Saved progress for a movie (0 if never watched)
    Get { id: MovieId },
    /// Save progress for a movie
    Set {
        id: MovieId,
        /// Played fraction, 0.0 to 1.0
        progress: f64,
    },
    /// List continue-watching entries, most recently updated first
    List,
}

#[derive(Subcommand)]
pub enum BrowseCommands {
    /// Canned lists (popular, top-rated, now-playing, upcoming, trending, trending-day)
    /// or curated collections (award-winning, classics, high-rated, recent-releases, blockbusters)
    List {
        kind: ListKind,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search movies by title
    Search {
        query: String,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Filtered discovery
    Discover {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Genre ids or names, comma separated (e.g. action,28)
        #[arg(long, value_delimiter = ',')]
        genre: Vec<String>,

        /// Exact release year
        #[arg(long)]
        year: Option<u32>,

        /// Sort order (e.g. popularity.desc, vote_average.desc)
        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long)]
        min_rating: Option<f64>,

        #[arg(long)]
        max_rating: Option<f64>,

        /// Earliest release year
        #[arg(long)]
        from_year: Option<u32>,

        /// Latest release year
        #[arg(long)]
        to_year: Option<u32>,
    },
    /// Details for one movie, with trailer and your saved state
    Movie {
        id: MovieId,

        /// Include similar movies and recommendations
        #[arg(long, action = ArgAction::SetTrue)]
        related: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show configuration, paths and token status
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the metadata API read token in the credentials file
    Token { token: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let ctx = Context::load(cli.profile)?;

    logging::init_logging(cli.verbose, cli.quiet, &ctx.config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Prefs { cmd } => prefs::run_prefs(cmd, &ctx, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(cmd, &ctx, &output).await,
        Commands::History { cmd } => history::run_history(cmd, &ctx, &output).await,
        Commands::Progress { cmd } => progress::run_progress(cmd, &ctx, &output).await,
        Commands::Browse { cmd } => browse::run_browse(cmd, &ctx, &output).await,
        Commands::Watch { id, seconds, runtime, tick_ms, subtitle, title, play } => {
            let options = watch::WatchOptions { seconds, runtime, tick_ms, subtitle, title, play };
            watch::run_watch(id, options, &ctx, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &ctx, &output).await,
        Commands::Clear { all, preferences, history, watchlist, progress } => {
            clear::run_clear(all, preferences, history, watchlist, progress, &ctx, &output).await
        }
    }
}
