pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "muji")]
#[command(about = "Song recommendations from weather, place and mood, with an emotion journal")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults use OPENWEATHER_API_KEY / OPENAI_API_KEY)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Recommend three songs for the current weather and mood
    Recommend(RecommendArgs),

    /// Emotion journal entries
    #[command(subcommand)]
    Emotion(EmotionCommand),

    /// Stored user profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Record a played song
    Listen {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        emotion: String,
    },

    /// Show a saved playlist
    Playlist { name: String },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Human readable place name used in the prompt
    #[arg(long)]
    pub location: String,

    #[arg(long)]
    pub emotion: String,

    /// Falls back to the stored profile
    #[arg(long)]
    pub age: Option<u32>,

    /// Falls back to the stored profile
    #[arg(long)]
    pub genre: Option<String>,

    /// Save the recommended songs into this playlist
    #[arg(long)]
    pub playlist: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum EmotionCommand {
    Add {
        #[arg(long)]
        emotion: String,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value = "")]
        address: String,
    },
    List,
    Stats,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long = "genre")]
        genres: Vec<String>,
    },
    Show,
    Delete,
}
