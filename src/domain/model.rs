use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 溫度 (K) 轉攝氏
pub const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub description: String,
    pub feels_like_celsius: f64,
}

impl WeatherSummary {
    pub fn from_kelvin(description: impl Into<String>, feels_like_kelvin: f64) -> Self {
        Self {
            description: description.into(),
            feels_like_celsius: feels_like_celsius(feels_like_kelvin),
        }
    }

    /// 固定兩位小數，例如 `26.85`
    pub fn celsius_label(&self) -> String {
        format!("{:.2}", self.feels_like_celsius)
    }

    /// 提示詞中使用的天氣描述
    pub fn to_prompt_fragment(&self) -> String {
        format!(
            "현재 날씨는 '{}', 체감 온도는 {}℃.",
            self.description,
            self.celsius_label()
        )
    }
}

pub fn feels_like_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// 單次推薦請求，所有欄位皆為已驗證的原始值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub location: String,
    pub weather_description: String,
    pub emotion: String,
    pub age: u32,
    pub genre: String,
}

/// 呼叫端在尚未取得天氣時提供的上下文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerContext {
    pub coordinates: Coordinates,
    pub location: String,
    pub emotion: String,
    pub age: u32,
    pub genre: String,
}

impl ListenerContext {
    pub fn into_request(self, weather: &WeatherSummary) -> RecommendationRequest {
        RecommendationRequest {
            location: self.location,
            weather_description: weather.to_prompt_fragment(),
            emotion: self.emotion,
            age: self.age,
            genre: self.genre,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSong {
    pub display_line: String,
}

impl RecommendedSong {
    pub fn new(display_line: impl Into<String>) -> Self {
        Self {
            display_line: display_line.into(),
        }
    }

    /// 以第一個 `" - "` 拆成 (歌手, 歌名)；格式不符時回傳 `None`
    pub fn artist_and_title(&self) -> Option<(&str, &str)> {
        self.display_line
            .split_once(" - ")
            .map(|(artist, title)| (artist.trim(), title.trim()))
    }
}

impl std::fmt::Display for RecommendedSong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_line)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub request: RecommendationRequest,
    pub prompt: String,
    pub songs: Vec<RecommendedSong>,
}

impl Recommendation {
    /// 回應沒有任何可用的行；由呼叫端決定如何呈現
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl UserProfile {
    pub fn genre_label(&self) -> String {
        self.genres.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmotion {
    pub emotion: String,
    pub comment: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub emotion: String,
    pub comment: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub recorded_at: DateTime<Utc>,
}

impl EmotionEntry {
    pub fn record(new: NewEmotion, recorded_at: DateTime<Utc>) -> Self {
        Self {
            emotion: new.emotion,
            comment: new.comment,
            latitude: new.latitude,
            longitude: new.longitude,
            address: new.address,
            recorded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningRecord {
    pub artist_name: String,
    pub title: String,
    pub emotion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub playlist_name: String,
    pub artist_name: String,
    pub title: String,
}

impl PlaylistEntry {
    pub fn from_song(playlist_name: &str, song: &RecommendedSong) -> Self {
        let (artist_name, title) = match song.artist_and_title() {
            Some((artist, title)) => (artist.to_string(), title.to_string()),
            None => (String::new(), song.display_line.clone()),
        };

        Self {
            playlist_name: playlist_name.to_string(),
            artist_name,
            title,
        }
    }
}

/// `journal.json` 的完整內容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSnapshot {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub emotions: Vec<EmotionEntry>,
    #[serde(default)]
    pub listening: Vec<ListeningRecord>,
    #[serde(default)]
    pub playlists: Vec<PlaylistEntry>,
}
