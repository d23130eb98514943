//! 완료 이력 저장소 포트.
//!
//! 구현: `survey-storage` crate (메모리, JSON 파일)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::survey::SeenEvent;

/// 설문 완료 이력 저장소
///
/// 컨트롤러는 조회와 추가만 한다. 삭제는 저장소 소유자의 책임.
#[async_trait]
pub trait SeenRecordStore: Send + Sync {
    /// 이력 존재 여부
    async fn contains(&self, event: SeenEvent) -> Result<bool, CoreError>;

    /// 이력 추가 (이미 있으면 무시)
    async fn add(&self, event: SeenEvent) -> Result<(), CoreError>;
}
