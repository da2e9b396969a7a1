//! Nebula - command-line playback front end
use clap::{Parser, Subcommand};
use nebula_cli::{format_tracks, App, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nebula")]
#[command(about = "Nebula streaming music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "NEBULA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Free-text query
        query: String,
    },
    /// Play a track
    Play {
        /// Track id
        id: String,
        /// Ordered track ids to use as the queue
        #[arg(long, num_args = 1..)]
        context: Vec<String>,
    },
    /// List liked tracks
    Liked,
    /// Toggle the liked flag of a track
    Like {
        /// Track id
        id: String,
    },
    /// Show recently played tracks
    Recent,
    /// Show the play queue
    Queue,
    /// Empty the play queue
    ClearQueue,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nebula=info,nebula_cli=info,nebula_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let app = App::new(&config).await?;

    match cli.command {
        Commands::Search { query } => {
            println!("{}", format_tracks(&app.search(&query).await?));
        }
        Commands::Play { id, context } => {
            let track = app.play(&id, &context).await?;
            println!("Now playing: {} - {}", track.title, track.artist);
            if let Some(url) = app.sink().loaded() {
                println!("Stream: {url}");
            }
            println!("\nUp next:\n{}", format_tracks(&app.controller().state().await.queue));
        }
        Commands::Liked => {
            println!("{}", format_tracks(&app.liked().await?));
        }
        Commands::Like { id } => {
            let liked = app.like(&id).await?;
            println!("{id}: {}", if liked { "liked" } else { "unliked" });
        }
        Commands::Recent => {
            println!("{}", format_tracks(&app.recent().await));
        }
        Commands::Queue => {
            println!("{}", format_tracks(&app.queue().await));
        }
        Commands::ClearQueue => {
            app.clear_queue().await;
            println!("Queue cleared");
        }
    }

    Ok(())
}
