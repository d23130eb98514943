//! 메모리 이력 저장소.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use survey_core::error::CoreError;
use survey_core::models::survey::SeenEvent;
use survey_core::ports::seen_store::SeenRecordStore;

/// 메모리 이력 저장소 (추가 횟수도 함께 센다)
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    events: RwLock<BTreeSet<SeenEvent>>,
    add_calls: RwLock<Vec<SeenEvent>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이력이 미리 채워진 저장소
    pub fn with_events(events: impl IntoIterator<Item = SeenEvent>) -> Self {
        Self {
            events: RwLock::new(events.into_iter().collect()),
            add_calls: RwLock::new(Vec::new()),
        }
    }

    /// `add` 호출 기록 (중복 포함, 호출 순)
    pub fn add_calls(&self) -> Vec<SeenEvent> {
        self.add_calls.read().clone()
    }
}

#[async_trait]
impl SeenRecordStore for MemorySeenStore {
    async fn contains(&self, event: SeenEvent) -> Result<bool, CoreError> {
        Ok(self.events.read().contains(&event))
    }

    async fn add(&self, event: SeenEvent) -> Result<(), CoreError> {
        self.add_calls.write().push(event);
        self.events.write().insert(event);
        Ok(())
    }
}
