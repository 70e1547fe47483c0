//! `genius` - fetch lyrics for a list of songs and count the words in them.
//!
//! Usage: genius --song "Eminem - Stan" --song "Outkast - Hey Ya!" [--word love] [--json]
//!        genius --songs songs.json

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use genius::config::Config;
use genius::lyrics::{load_songs, FetchDispatcher, LyricsClient, SongIdentity};
use genius::words::WordClassifier;

/// Fetch lyrics for songs and count the words in them
#[derive(Debug, Parser)]
#[command(name = "genius", version, about)]
struct Cli {
    /// A song as "Artist - Title"; repeat for more songs
    #[arg(long = "song", value_name = "ARTIST - TITLE")]
    songs: Vec<String>,

    /// JSON file holding an array of {"artist", "title", "id"?} objects
    #[arg(long = "songs", value_name = "FILE")]
    songs_file: Option<PathBuf>,

    /// Extra word to count as its own category; repeat for more
    #[arg(long = "word", value_name = "WORD")]
    words: Vec<String>,

    /// Print the counts as JSON instead of `category:count` lines
    #[arg(long)]
    json: bool,
}

fn collect_songs(cli: &Cli) -> anyhow::Result<Vec<SongIdentity>> {
    let mut songs = match &cli.songs_file {
        Some(path) => load_songs(path)?,
        None => Vec::new(),
    };

    let offset = songs.len() as u64;
    for (text, position) in cli.songs.iter().zip(1u64..) {
        songs.push(SongIdentity::parse(text, offset + position)?);
    }

    if songs.is_empty() {
        bail!("no songs given; use --song \"Artist - Title\" or --songs <file>");
    }
    Ok(songs)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!("{} v{} using {}", config.app_name(), config.app_version(), config.lyrics_api_url);
    let songs = collect_songs(&cli)?;

    let client = LyricsClient::new(&config)?;
    let dispatcher = FetchDispatcher::from_config(client, &config);
    let lyrics = dispatcher
        .fetch_all(&songs)
        .await
        .context("fetching lyrics")?;

    let counts = WordClassifier::default().with_words(&cli.words).classify(&lyrics);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", counts.render());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
