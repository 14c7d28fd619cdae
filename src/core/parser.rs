use crate::domain::model::RecommendedSong;

/// 將端點回傳的自由文字拆成推薦歌曲
///
/// 逐行切分並修剪空白，丟棄空行，保留原始順序。不檢查數量，也不檢查
/// 每一行是否真的是「歌手 - 歌名」格式；`display_line` 應視為純顯示文字。
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// 回傳的迭代器可 `clone()` 重新走訪，結果相同
    pub fn parse(text: &str) -> impl Iterator<Item = RecommendedSong> + Clone + '_ {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecommendedSong::new)
    }

    pub fn parse_all(text: &str) -> Vec<RecommendedSong> {
        Self::parse(text).collect()
    }
}
