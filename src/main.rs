use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kodi_remote::{KodiClient, KodiConfig};
use log::LevelFilter;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "kodi-remote")]
#[command(version, about = "Browse a Kodi movie library and start playback over JSON-RPC", long_about = None)]
struct Cli {
  /// Kodi host name or address
  #[arg(long, global = true)]
  host: Option<String>,

  /// Kodi web server port
  #[arg(short, long, global = true)]
  port: Option<u16>,

  /// Per-request timeout in seconds
  #[arg(short, long, value_name = "SECS", global = true)]
  timeout: Option<u64>,

  /// Config file (JSON); defaults to the platform config directory
  #[arg(short, long, value_name = "PATH", global = true)]
  config: Option<PathBuf>,

  /// More log output (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List every movie in the library
  Movies,
  /// Show details for one movie
  Movie { movie_id: i64 },
  /// List the server's playlists
  Playlists,
  /// List the items queued on a playlist
  Items { playlist_id: i64 },
  /// List the active players
  Players,
  /// Clear the video playlist, queue a movie and play it
  Play { movie_id: i64 },
}

impl Command {
  fn name(&self) -> &'static str {
    match self {
      Command::Movies => "movies",
      Command::Movie { .. } => "movie",
      Command::Playlists => "playlists",
      Command::Items { .. } => "items",
      Command::Players => "players",
      Command::Play { .. } => "play",
    }
  }
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  // RUST_LOG, when set, wins over -v.
  env_logger::Builder::new()
    .filter_level(level)
    .parse_default_env()
    .init();
}

fn resolve_config(cli: &Cli) -> Result<KodiConfig, kodi_remote::KodiError> {
  let mut config = match &cli.config {
    Some(path) => KodiConfig::load(path)?,
    None => KodiConfig::load_or_default(KodiConfig::default_path().as_deref())?,
  };

  if let Some(host) = &cli.host {
    config.host = host.clone();
  }
  if let Some(port) = cli.port {
    config.port = port;
  }
  if let Some(timeout) = cli.timeout {
    config.timeout_secs = timeout;
  }
  Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
  let config = resolve_config(cli)?;
  let client = KodiClient::new(config)?;
  log::info!("Using Kodi at {}", client.endpoint());

  match &cli.command {
    Command::Movies => print_json(&client.get_movie_library().await?),
    Command::Movie { movie_id } => print_json(&client.get_movie_details(*movie_id).await?),
    Command::Playlists => print_json(&client.get_playlists().await?),
    Command::Items { playlist_id } => print_json(&client.get_playlist_items(*playlist_id).await?),
    Command::Players => print_json(&client.get_active_players().await?),
    Command::Play { movie_id } => {
      client.start_movie(*movie_id).await?;
      println!("Started movie {}", movie_id);
      Ok(())
    }
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(&cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{} failed: {}", cli.command.name(), e);
      ExitCode::FAILURE
    }
  }
}
