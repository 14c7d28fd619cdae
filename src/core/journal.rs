use crate::core::events::{EventBus, JournalEvent};
use crate::domain::model::{
    EmotionEntry, JournalSnapshot, ListeningRecord, NewEmotion, PlaylistEntry, RecommendedSong,
    UserProfile,
};
use crate::domain::ports::Storage;
use crate::utils::error::{MujiError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::broadcast;

pub const JOURNAL_FILE: &str = "journal.json";

/// 情緒日誌、使用者資料、聆聽紀錄與播放清單
///
/// 每次變更都會先寫入 storage，成功後才更新記憶體內容並發送事件。
pub struct EmotionJournal<S: Storage> {
    storage: S,
    snapshot: JournalSnapshot,
    events: EventBus,
}

impl<S: Storage> EmotionJournal<S> {
    pub async fn load(storage: S) -> Result<Self> {
        let snapshot = match storage.read_file(JOURNAL_FILE).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(MujiError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No {} yet, starting an empty journal", JOURNAL_FILE);
                JournalSnapshot::default()
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            "Loaded journal: {} emotions, {} listening records, {} playlist entries",
            snapshot.emotions.len(),
            snapshot.listening.len(),
            snapshot.playlists.len()
        );

        Ok(Self {
            storage,
            snapshot,
            events: EventBus::new(),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JournalEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.snapshot
    }

    pub fn emotions(&self) -> &[EmotionEntry] {
        &self.snapshot.emotions
    }

    pub async fn add_emotion(&mut self, new: NewEmotion) -> Result<EmotionEntry> {
        self.add_emotion_at(new, Utc::now()).await
    }

    pub async fn add_emotion_at(
        &mut self,
        new: NewEmotion,
        recorded_at: DateTime<Utc>,
    ) -> Result<EmotionEntry> {
        if new.emotion.trim().is_empty() {
            return Err(MujiError::ValidationError {
                message: "emotion cannot be empty".to_string(),
            });
        }

        let entry = EmotionEntry::record(new, recorded_at);
        let mut next = self.snapshot.clone();
        next.emotions.push(entry.clone());
        self.commit(next).await?;

        tracing::info!("📍 Recorded emotion {} at {}", entry.emotion, entry.address);
        self.events.publish(JournalEvent::EmotionAdded(entry.clone()));
        Ok(entry)
    }

    /// 每種情緒出現的次數
    pub fn statistics(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::new();
        for entry in &self.snapshot.emotions {
            *stats.entry(entry.emotion.clone()).or_insert(0) += 1;
        }
        stats
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.snapshot.profile.as_ref()
    }

    /// 沒有資料就建立，有就覆寫
    pub async fn update_profile(&mut self, profile: UserProfile) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.profile = Some(profile.clone());
        self.commit(next).await?;

        tracing::info!("👤 Profile saved for {}", profile.name);
        self.events.publish(JournalEvent::ProfileUpdated(profile));
        Ok(())
    }

    /// 回傳是否真的刪除了資料
    pub async fn delete_profile(&mut self) -> Result<bool> {
        if self.snapshot.profile.is_none() {
            return Ok(false);
        }

        let mut next = self.snapshot.clone();
        next.profile = None;
        self.commit(next).await?;

        tracing::info!("👤 Profile deleted");
        self.events.publish(JournalEvent::ProfileDeleted);
        Ok(true)
    }

    pub fn listening_history(&self) -> &[ListeningRecord] {
        &self.snapshot.listening
    }

    pub async fn record_listening(&mut self, record: ListeningRecord) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.listening.push(record.clone());
        self.commit(next).await?;

        tracing::debug!("Recorded listening: {} - {}", record.artist_name, record.title);
        self.events.publish(JournalEvent::ListeningRecorded(record));
        Ok(())
    }

    pub fn playlist(&self, playlist_name: &str) -> Vec<&PlaylistEntry> {
        self.snapshot
            .playlists
            .iter()
            .filter(|entry| entry.playlist_name == playlist_name)
            .collect()
    }

    pub async fn add_to_playlist(
        &mut self,
        playlist_name: &str,
        songs: &[RecommendedSong],
    ) -> Result<usize> {
        if playlist_name.trim().is_empty() {
            return Err(MujiError::ValidationError {
                message: "playlist name cannot be empty".to_string(),
            });
        }

        let mut next = self.snapshot.clone();
        next.playlists.extend(
            songs
                .iter()
                .map(|song| PlaylistEntry::from_song(playlist_name, song)),
        );
        self.commit(next).await?;

        let size = self.playlist(playlist_name).len();
        tracing::info!("🎶 Playlist '{}' now has {} songs", playlist_name, size);
        self.events.publish(JournalEvent::PlaylistUpdated {
            playlist_name: playlist_name.to_string(),
            size,
        });
        Ok(size)
    }

    async fn commit(&mut self, next: JournalSnapshot) -> Result<()> {
        let data = serde_json::to_vec_pretty(&next)?;
        self.storage.write_file(JOURNAL_FILE, &data).await?;
        self.snapshot = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail_writes: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                MujiError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes {
                return Err(MujiError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn emotion(emoji: &str) -> NewEmotion {
        NewEmotion {
            emotion: emoji.to_string(),
            comment: "산책".to_string(),
            latitude: 37.56,
            longitude: 126.97,
            address: "서울 중구".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        assert!(journal.emotions().is_empty());
        assert!(journal.profile().is_none());
    }

    #[tokio::test]
    async fn test_add_emotion_persists_and_publishes() {
        let storage = MockStorage::new();
        let mut journal = EmotionJournal::load(storage.clone()).await.unwrap();
        let mut events = journal.subscribe();
        let at = Utc.with_ymd_and_hms(2025, 3, 19, 9, 30, 0).unwrap();

        let entry = journal.add_emotion_at(emotion("😄"), at).await.unwrap();

        assert_eq!(entry.recorded_at, at);
        assert_eq!(journal.emotions().len(), 1);
        assert_eq!(events.recv().await.unwrap(), JournalEvent::EmotionAdded(entry));

        let saved = storage.get_file(JOURNAL_FILE).await.unwrap();
        let snapshot: JournalSnapshot = serde_json::from_slice(&saved).unwrap();
        assert_eq!(snapshot.emotions.len(), 1);
        assert_eq!(snapshot.emotions[0].address, "서울 중구");
    }

    #[tokio::test]
    async fn test_reload_keeps_entries() {
        let storage = MockStorage::new();
        {
            let mut journal = EmotionJournal::load(storage.clone()).await.unwrap();
            journal.add_emotion(emotion("😭")).await.unwrap();
        }

        let journal = EmotionJournal::load(storage).await.unwrap();
        assert_eq!(journal.emotions()[0].emotion, "😭");
    }

    #[tokio::test]
    async fn test_statistics_counts_each_emotion() {
        let mut journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        for emoji in ["😄", "😭", "😄", "😡", "😄"] {
            journal.add_emotion(emotion(emoji)).await.unwrap();
        }

        let stats = journal.statistics();
        assert_eq!(stats.get("😄"), Some(&3));
        assert_eq!(stats.get("😭"), Some(&1));
        assert_eq!(stats.get("😡"), Some(&1));
        assert_eq!(stats.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_emotion_is_rejected() {
        let mut journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        let err = journal.add_emotion(emotion("  ")).await.unwrap_err();
        assert!(matches!(err, MujiError::ValidationError { .. }));
        assert!(journal.emotions().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_untouched() {
        let mut journal = EmotionJournal::load(MockStorage::failing()).await.unwrap();
        let mut events = journal.subscribe();

        let err = journal.add_emotion(emotion("😄")).await.unwrap_err();

        assert!(matches!(err, MujiError::IoError(_)));
        assert!(journal.emotions().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_profile_create_update_delete() {
        let mut journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        let mut events = journal.subscribe();

        let profile = UserProfile {
            name: "수원".to_string(),
            age: 24,
            genres: vec!["jazz".to_string()],
        };
        journal.update_profile(profile.clone()).await.unwrap();
        assert_eq!(journal.profile(), Some(&profile));

        let updated = UserProfile { age: 25, ..profile };
        journal.update_profile(updated.clone()).await.unwrap();
        assert_eq!(journal.profile().map(|p| p.age), Some(25));

        assert!(journal.delete_profile().await.unwrap());
        assert!(!journal.delete_profile().await.unwrap());
        assert!(journal.profile().is_none());

        assert!(matches!(events.recv().await.unwrap(), JournalEvent::ProfileUpdated(_)));
        assert_eq!(events.recv().await.unwrap(), JournalEvent::ProfileUpdated(updated));
        assert_eq!(events.recv().await.unwrap(), JournalEvent::ProfileDeleted);
    }

    #[tokio::test]
    async fn test_playlist_collects_recommended_songs() {
        let mut journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        let songs = vec![
            RecommendedSong::new("IU - Rain Drop"),
            RecommendedSong::new("Zion.T - Snow"),
        ];

        let size = journal.add_to_playlist("비 오는 날", &songs).await.unwrap();
        assert_eq!(size, 2);

        journal
            .add_to_playlist("다른 목록", &[RecommendedSong::new("Epik High - Fly")])
            .await
            .unwrap();

        let rainy = journal.playlist("비 오는 날");
        assert_eq!(rainy.len(), 2);
        assert_eq!(rainy[0].artist_name, "IU");
        assert_eq!(rainy[1].title, "Snow");
    }

    #[tokio::test]
    async fn test_record_listening() {
        let mut journal = EmotionJournal::load(MockStorage::new()).await.unwrap();
        let record = ListeningRecord {
            artist_name: "IU".to_string(),
            title: "Rain Drop".to_string(),
            emotion: "😭".to_string(),
        };

        journal.record_listening(record.clone()).await.unwrap();
        assert_eq!(journal.listening_history(), &[record]);
    }
}
