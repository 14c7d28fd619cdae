use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MujiError, Result};
use crate::utils::validation::{
    validate_credential, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/3.0/onecall";
pub const DEFAULT_RECOMMENDATION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// 沒有指定設定檔時使用，金鑰一律由環境變數提供
pub const DEFAULT_CONFIG: &str = r#"
[weather]
api_key = "${OPENWEATHER_API_KEY}"

[recommendation]
api_key = "${OPENAI_API_KEY}"

[journal]
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub weather: WeatherConfig,
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_recommendation_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub system_prompt: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_journal_path")]
    pub path: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
        }
    }
}

fn default_weather_endpoint() -> String {
    DEFAULT_WEATHER_ENDPOINT.to_string()
}

fn default_recommendation_endpoint() -> String {
    DEFAULT_RECOMMENDATION_ENDPOINT.to_string()
}

fn default_language() -> String {
    "kr".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_journal_path() -> String {
    "./muji-data".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MujiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 有路徑就讀檔，否則使用內建預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_toml_str(DEFAULT_CONFIG),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MujiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})；未設定的變數保留原樣，交給驗證處理
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MujiError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性；金鑰缺少時在這裡就失敗，不等到第一次請求
    pub fn validate_config(&self) -> Result<()> {
        validate_url("weather.endpoint", &self.weather.endpoint)?;
        validate_credential("weather.api_key", &self.weather.api_key)?;
        validate_non_empty_string("weather.language", &self.weather.language)?;
        if let Some(timeout) = self.weather.timeout_seconds {
            validate_positive_number("weather.timeout_seconds", timeout, 1)?;
        }

        validate_url("recommendation.endpoint", &self.recommendation.endpoint)?;
        validate_credential("recommendation.api_key", &self.recommendation.api_key)?;
        validate_non_empty_string("recommendation.model", &self.recommendation.model)?;
        if let Some(timeout) = self.recommendation.timeout_seconds {
            validate_positive_number("recommendation.timeout_seconds", timeout, 1)?;
        }

        validate_path("journal.path", &self.journal.path)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn weather_endpoint(&self) -> &str {
        &self.weather.endpoint
    }

    fn weather_api_key(&self) -> &str {
        &self.weather.api_key
    }

    fn weather_language(&self) -> &str {
        &self.weather.language
    }

    fn weather_timeout_seconds(&self) -> Option<u64> {
        self.weather.timeout_seconds
    }

    fn recommendation_endpoint(&self) -> &str {
        &self.recommendation.endpoint
    }

    fn recommendation_api_key(&self) -> &str {
        &self.recommendation.api_key
    }

    fn recommendation_model(&self) -> &str {
        &self.recommendation.model
    }

    fn system_prompt(&self) -> Option<&str> {
        self.recommendation.system_prompt.as_deref()
    }

    fn recommendation_timeout_seconds(&self) -> Option<u64> {
        self.recommendation.timeout_seconds
    }

    fn journal_path(&self) -> &str {
        &self.journal.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
