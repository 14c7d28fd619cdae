use crate::domain::model::{EmotionEntry, ListeningRecord, UserProfile};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// 日誌變動時發送的事件
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    EmotionAdded(EmotionEntry),
    ProfileUpdated(UserProfile),
    ProfileDeleted,
    ListeningRecorded(ListeningRecord),
    PlaylistUpdated { playlist_name: String, size: usize },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<JournalEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JournalEvent> {
        self.sender.subscribe()
    }

    /// 沒有訂閱者時直接丟棄
    pub fn publish(&self, event: JournalEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No journal subscribers, event dropped");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
