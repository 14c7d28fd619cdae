pub mod context;
pub mod engine;
pub mod events;
pub mod journal;
pub mod parser;

pub use crate::domain::model::{Recommendation, RecommendationRequest, RecommendedSong};
pub use crate::domain::ports::{ConfigProvider, RecommendationClient, Storage, WeatherProvider};
pub use crate::utils::error::Result;
