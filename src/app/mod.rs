// Adapters for the remote weather and recommendation endpoints.

pub mod chat_client;
pub(crate) mod http;
pub mod weather_client;

pub use chat_client::HttpRecommendationClient;
pub use weather_client::HttpWeatherClient;
