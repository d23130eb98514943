//! JSON 파일 이력 저장소.
//!
//! 구조: `["FeatureSurveyVpn", "VpnRecommenderIgnore"]`
//! 모르는 식별자도 보존한다 (다른 기능이 같은 파일을 공유할 수 있음).
//! 메모리 캐시는 파일 쓰기가 성공한 뒤에만 바뀐다.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use survey_core::error::CoreError;
use survey_core::models::survey::SeenEvent;
use survey_core::ports::seen_store::SeenRecordStore;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// JSON 파일 이력 저장소
///
/// 메모리 캐시를 두고, 새 식별자가 추가될 때마다 파일 전체를 다시 쓴다.
#[derive(Debug)]
pub struct JsonFileSeenStore {
    path: PathBuf,
    ids: Mutex<BTreeSet<String>>,
}

impl JsonFileSeenStore {
    /// 파일을 열어 저장소 생성 (파일이 없으면 빈 저장소)
    pub async fn open(path: PathBuf) -> Result<Self, CoreError> {
        let ids = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeSet::new(),
            Ok(content) => {
                let ids: Vec<String> = serde_json::from_str(&content).map_err(|e| {
                    CoreError::Storage(format!("이력 파일 파싱 실패: {}: {e}", path.display()))
                })?;
                let foreign = ids
                    .iter()
                    .filter(|id| SeenEvent::from_id(id).is_none())
                    .count();
                if foreign > 0 {
                    debug!("설문 외 식별자 {foreign}개 보존");
                }
                ids.into_iter().collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("이력 파일 없음, 빈 저장소로 시작: {}", path.display());
                BTreeSet::new()
            }
            Err(e) => return Err(CoreError::Io(e)),
        };

        info!("이력 저장소 열기: {} ({}개)", path.display(), ids.len());

        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }

    /// 저장 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 저장된 식별자 전체 (정렬됨)
    pub async fn entries(&self) -> Vec<String> {
        self.ids.lock().await.iter().cloned().collect()
    }

    /// 이력 전체 삭제 (CLI `--reset` 용)
    pub async fn clear(&self) -> Result<(), CoreError> {
        let mut ids = self.ids.lock().await;
        self.persist(&BTreeSet::new()).await?;
        ids.clear();
        info!("이력 초기화: {}", self.path.display());
        Ok(())
    }

    async fn persist(&self, ids: &BTreeSet<String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    CoreError::Storage(format!("이력 디렉토리 생성 실패: {}: {e}", parent.display()))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&ids.iter().collect::<Vec<_>>())?;
        fs::write(&self.path, content).await.map_err(|e| {
            CoreError::Storage(format!("이력 파일 저장 실패: {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl SeenRecordStore for JsonFileSeenStore {
    async fn contains(&self, event: SeenEvent) -> Result<bool, CoreError> {
        Ok(self.ids.lock().await.contains(event.id()))
    }

    async fn add(&self, event: SeenEvent) -> Result<(), CoreError> {
        let mut ids = self.ids.lock().await;
        if ids.contains(event.id()) {
            return Ok(());
        }

        let mut next = ids.clone();
        next.insert(event.id().to_string());
        self.persist(&next).await?;
        *ids = next;
        debug!("이력 추가: {event}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSeenStore::open(dir.path().join("seen.json"))
            .await
            .unwrap();
        assert!(!store
            .contains(SeenEvent::FeatureSurveyWifiFinding)
            .await
            .unwrap());
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn add_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("seen.json");

        let store = JsonFileSeenStore::open(path.clone()).await.unwrap();
        store.add(SeenEvent::FeatureSurveyVpn).await.unwrap();
        store.add(SeenEvent::FeatureSurveyVpn).await.unwrap();
        assert!(path.exists());

        let reopened = JsonFileSeenStore::open(path).await.unwrap();
        assert!(reopened.contains(SeenEvent::FeatureSurveyVpn).await.unwrap());
        assert_eq!(reopened.entries().await, vec!["FeatureSurveyVpn"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, r#"["ShowMyShotOnBoardingDialog"]"#).unwrap();

        let store = JsonFileSeenStore::open(path.clone()).await.unwrap();
        store.add(SeenEvent::VpnRecommenderIgnore).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("ShowMyShotOnBoardingDialog"));
        assert!(content.contains("VpnRecommenderIgnore"));
    }

    #[tokio::test]
    async fn corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, "{ oops").unwrap();

        let result = JsonFileSeenStore::open(path).await;
        assert!(matches!(result, Err(CoreError::Storage(_))));
    }

    #[tokio::test]
    async fn failed_write_leaves_event_unseen() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let path = data_dir.join("seen.json");
        let store = JsonFileSeenStore::open(path.clone()).await.unwrap();

        // 디렉토리 자리에 일반 파일이 있으면 쓰기 실패
        std::fs::write(&data_dir, "not a directory").unwrap();

        let result = store.add(SeenEvent::FeatureSurveyVpn).await;
        assert!(matches!(result, Err(CoreError::Storage(_))));
        assert!(!store.contains(SeenEvent::FeatureSurveyVpn).await.unwrap());
        assert!(store.entries().await.is_empty());

        // 재시도도 실제로 쓰기를 시도한다
        assert!(store.add(SeenEvent::FeatureSurveyVpn).await.is_err());

        std::fs::remove_file(&data_dir).unwrap();
        store.add(SeenEvent::FeatureSurveyVpn).await.unwrap();
        assert!(path.exists());

        let reopened = JsonFileSeenStore::open(path).await.unwrap();
        assert!(reopened.contains(SeenEvent::FeatureSurveyVpn).await.unwrap());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");

        let store = JsonFileSeenStore::open(path.clone()).await.unwrap();
        store.add(SeenEvent::FeatureSurveyWifiFinding).await.unwrap();
        store.clear().await.unwrap();

        let reopened = JsonFileSeenStore::open(path).await.unwrap();
        assert!(reopened.entries().await.is_empty());
    }
}
