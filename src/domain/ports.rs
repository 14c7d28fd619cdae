use crate::domain::model::{Coordinates, WeatherSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn weather_endpoint(&self) -> &str;
    fn weather_api_key(&self) -> &str;
    fn weather_language(&self) -> &str;
    fn weather_timeout_seconds(&self) -> Option<u64>;
    fn recommendation_endpoint(&self) -> &str;
    fn recommendation_api_key(&self) -> &str;
    fn recommendation_model(&self) -> &str;
    fn system_prompt(&self) -> Option<&str>;
    fn recommendation_timeout_seconds(&self) -> Option<u64>;
    fn journal_path(&self) -> &str;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather(&self, coordinates: Coordinates) -> Result<WeatherSummary>;
}

/// 每次呼叫最多發出一個請求，回傳端點的原始文字
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    async fn recommend(&self, prompt: &str) -> Result<String>;
}
