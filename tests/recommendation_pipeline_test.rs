use httpmock::prelude::*;
use muji::domain::model::{Coordinates, ListenerContext, RecommendationRequest};
use muji::domain::ports::ConfigProvider;
use muji::utils::validation::Validate;
use muji::{
    ContextAssembler, HttpRecommendationClient, HttpWeatherClient, MujiError,
    RecommendationEngine, TomlConfig,
};

fn config_for(server: &MockServer) -> TomlConfig {
    let toml_content = format!(
        r#"
[weather]
endpoint = "{}"
api_key = "weather-key"

[recommendation]
endpoint = "{}"
api_key = "sk-test"
model = "gpt-3.5-turbo"
"#,
        server.url("/data/3.0/onecall"),
        server.url("/v1/chat/completions")
    );

    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    config.validate().unwrap();
    config
}

fn engine_for(
    config: &TomlConfig,
) -> RecommendationEngine<HttpWeatherClient, HttpRecommendationClient> {
    RecommendationEngine::new(
        HttpWeatherClient::from_config(config).unwrap(),
        HttpRecommendationClient::from_config(config).unwrap(),
    )
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
}

fn seoul_context() -> ListenerContext {
    ListenerContext {
        coordinates: Coordinates::new(37.56, 126.97),
        location: "서울".to_string(),
        emotion: "😄".to_string(),
        age: 25,
        genre: "jazz".to_string(),
    }
}

#[tokio::test]
async fn test_end_to_end_request_yields_three_songs() {
    let server = MockServer::start();
    let config = config_for(&server);

    let request = RecommendationRequest {
        location: "Seoul".to_string(),
        weather_description: "rain, 12.30℃".to_string(),
        emotion: "joy".to_string(),
        age: 25,
        genre: "jazz".to_string(),
    };
    let prompt = ContextAssembler::assemble(&request);

    let llm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .body_contains("Seoul")
            .body_contains("jazz");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion("A - One\nB - Two\nC - Three"));
    });

    let engine = engine_for(&config);
    let recommendation = engine.recommend_for(&request).await.unwrap();

    llm_mock.assert();
    assert_eq!(recommendation.prompt, prompt);
    let lines: Vec<_> = recommendation
        .songs
        .iter()
        .map(|song| song.display_line.as_str())
        .collect();
    assert_eq!(lines, vec!["A - One", "B - Two", "C - Three"]);
}

#[tokio::test]
async fn test_full_run_uses_weather_in_prompt() {
    let server = MockServer::start();
    let config = config_for(&server);

    let weather_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/3.0/onecall")
            .query_param("lat", "37.56")
            .query_param("lon", "126.97")
            .query_param("lang", "kr")
            .query_param("appid", "weather-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "current": {"feels_like": 285.45, "weather": [{"description": "비"}]}
            }));
    });

    let llm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("12.30");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion("  IU - Rain Drop  \n\nZion.T - Snow\n"));
    });

    let engine = engine_for(&config);
    let recommendation = engine.run(&seoul_context()).await.unwrap();

    weather_mock.assert();
    llm_mock.assert();
    assert_eq!(
        recommendation.request.weather_description,
        "현재 날씨는 '비', 체감 온도는 12.30℃."
    );
    assert_eq!(recommendation.songs.len(), 2);
    assert_eq!(recommendation.songs[0].display_line, "IU - Rain Drop");
    assert_eq!(
        recommendation.songs[1].artist_and_title(),
        Some(("Zion.T", "Snow"))
    );
}

#[tokio::test]
async fn test_recommendation_transport_failure_is_single_attempt() {
    let server = MockServer::start();
    let config = config_for(&server);

    let llm_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("internal error");
    });

    let engine = engine_for(&config);
    let request = RecommendationRequest {
        location: "Seoul".to_string(),
        weather_description: "rain, 12.30℃".to_string(),
        emotion: "joy".to_string(),
        age: 25,
        genre: "jazz".to_string(),
    };

    let err = engine.recommend_for(&request).await.unwrap_err();

    llm_mock.assert_hits(1);
    assert!(matches!(err, MujiError::TransportError { .. }));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_weather_decoding_failure_skips_recommendation() {
    let server = MockServer::start();
    let config = config_for(&server);

    let weather_mock = server.mock(|when, then| {
        when.method(GET).path("/data/3.0/onecall");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"current\": ");
    });
    let llm_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion("A - One"));
    });

    let engine = engine_for(&config);
    let err = engine.run(&seoul_context()).await.unwrap_err();

    weather_mock.assert_hits(1);
    llm_mock.assert_hits(0);
    assert!(matches!(err, MujiError::DecodingError { ref service, .. } if service == "weather"));
}

#[tokio::test]
async fn test_empty_completion_is_empty_recommendation() {
    let server = MockServer::start();
    let config = config_for(&server);

    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(completion(""));
    });

    let engine = engine_for(&config);
    let request = RecommendationRequest {
        location: "Busan".to_string(),
        weather_description: "clear".to_string(),
        emotion: "calm".to_string(),
        age: 0,
        genre: "ambient".to_string(),
    };

    let recommendation = engine.recommend_for(&request).await.unwrap();
    assert!(recommendation.is_empty());
}

#[test]
fn test_missing_credential_fails_before_any_request() {
    let toml_content = r#"
[weather]
api_key = "weather-key"

[recommendation]
api_key = "${MUJI_PIPELINE_TEST_UNSET_KEY}"
"#;

    let config = TomlConfig::from_toml_str(toml_content).unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, MujiError::MissingConfigError { .. }));
    assert!(!err.is_recoverable());

    let err = HttpRecommendationClient::from_config(&config).unwrap_err();
    assert!(matches!(err, MujiError::MissingConfigError { .. }));
    assert_eq!(config.recommendation_api_key(), "${MUJI_PIPELINE_TEST_UNSET_KEY}");
}
