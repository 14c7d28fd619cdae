use crate::core::context::ContextAssembler;
use crate::core::parser::ResponseParser;
use crate::domain::model::{ListenerContext, Recommendation, RecommendationRequest};
use crate::domain::ports::{RecommendationClient, WeatherProvider};
use crate::utils::error::Result;

/// 天氣 → 提示詞 → 推薦 → 解析
///
/// 每個階段都完成後才回傳結果；呼叫端取消 future 時不會留下任何中間狀態。
pub struct RecommendationEngine<W: WeatherProvider, R: RecommendationClient> {
    weather: W,
    client: R,
}

impl<W: WeatherProvider, R: RecommendationClient> RecommendationEngine<W, R> {
    pub fn new(weather: W, client: R) -> Self {
        Self { weather, client }
    }

    pub fn weather(&self) -> &W {
        &self.weather
    }

    pub fn client(&self) -> &R {
        &self.client
    }

    pub async fn run(&self, context: &ListenerContext) -> Result<Recommendation> {
        tracing::info!(
            "🌦️ Fetching weather for {} ({}, {})",
            context.location,
            context.coordinates.latitude,
            context.coordinates.longitude
        );

        // 天氣失敗就中止，不用預設值代替
        let summary = self.weather.fetch_weather(context.coordinates).await?;
        tracing::info!(
            "🌡️ Weather: {} / feels like {}℃",
            summary.description,
            summary.celsius_label()
        );

        let request = context.clone().into_request(&summary);
        self.recommend_for(&request).await
    }

    pub async fn recommend_for(&self, request: &RecommendationRequest) -> Result<Recommendation> {
        let prompt = ContextAssembler::assemble(request);
        tracing::debug!("Assembled prompt: {}", prompt);

        tracing::info!("🎧 Requesting recommendations...");
        let text = self.client.recommend(&prompt).await?;
        tracing::debug!("Raw recommendation response ({} bytes)", text.len());

        let songs = ResponseParser::parse_all(&text);
        if songs.is_empty() {
            tracing::warn!("📭 Recommendation response contained no songs");
        } else {
            tracing::info!("✅ Parsed {} recommended songs", songs.len());
        }

        Ok(Recommendation {
            request: request.clone(),
            prompt,
            songs,
        })
    }
}
