use clap::Parser;
use scrobble_links::config::{API_KEY_VAR, COUNTRY_VAR, USER_VAR};
use scrobble_links::{Config, SongLinkClientImpl, SongResolver, TrackSelection};

/// Print streaming links and cover art for your latest Last.fm scrobble
#[derive(Parser)]
#[command(
    name = "scrobble-links",
    about = "Print streaming links and cover art for your latest Last.fm scrobble",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long)]
    verbose: bool,

    /// Ignore the track currently playing and use the last finished scrobble
    #[arg(long)]
    skip_now_playing: bool,

    /// Country code for song.link and Apple Music lookups (defaults to US)
    #[arg(long, value_name = "CC")]
    country: Option<String>,

    /// Print the record on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // A missing .env file is fine, the variables may come from the shell
    let _ = dotenvy::dotenv();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables (or put them in .env):");
            eprintln!("  {API_KEY_VAR}=your_lastfm_api_key");
            eprintln!("  {USER_VAR}=your_lastfm_username");
            eprintln!();
            eprintln!("Optionally:");
            eprintln!("  {COUNTRY_VAR}=us");
            std::process::exit(1);
        }
    };

    let selection = if args.skip_now_playing {
        TrackSelection::SkipNowPlaying
    } else {
        config.selection
    };
    let country = args.country.or_else(|| config.country.clone());
    let config = config
        .with_selection(selection)
        .with_country(country.as_deref());

    log::debug!("Resolving latest scrobble for {}", config.user);

    let http_client = http_client::native::NativeClient::new();
    let resolver = SongResolver::new(SongLinkClientImpl::new(Box::new(http_client), config));

    match resolver.resolve().await {
        Ok(Some(song)) => {
            let output = if args.compact {
                serde_json::to_string(&song)?
            } else {
                serde_json::to_string_pretty(&song)?
            };
            println!("{output}");
        }
        Ok(None) => eprintln!("no track scrobbled yet"),
        Err(e) => {
            eprintln!("❌ Failed to resolve song: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
