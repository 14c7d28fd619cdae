pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{HttpRecommendationClient, HttpWeatherClient};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    context::ContextAssembler, engine::RecommendationEngine, events::JournalEvent,
    journal::EmotionJournal, parser::ResponseParser,
};
pub use utils::error::{MujiError, Result};
