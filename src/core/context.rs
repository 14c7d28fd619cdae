use crate::domain::model::RecommendationRequest;

/// 提示詞要求的推薦數量
pub const RECOMMENDATION_COUNT: usize = 3;

/// 固定的指示語：只輸出「歌手 - 歌名」
pub const INSTRUCTION_SUFFIX: &str =
    " 지금 상황에 어울리는 노래 3개 추천해줘(다른 글씨는 빼고 가수 - 노래명 형식으로 출력해줘)";

/// 將位置、天氣、情緒、年齡與偏好曲風組成單一提示詞
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn assemble(request: &RecommendationRequest) -> String {
        let mut prompt = format!(
            "현재 위치는 '{}'. {} 지금 기분은 '{}', 나이는 {}살, 좋아하는 음악 장르는 '{}'.",
            request.location.trim(),
            request.weather_description.trim(),
            request.emotion.trim(),
            request.age,
            request.genre.trim(),
        );
        prompt.push_str(INSTRUCTION_SUFFIX);
        prompt
    }
}
