//! 외부 앱 실행 포트.
//!
//! 구현: `survey-app` crate (스토어 URI 출력)

use async_trait::async_trait;

use crate::error::CoreError;

/// 외부 앱 스토어 실행 인터페이스
#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// 패키지의 스토어 페이지 열기 (결과 확인 없음)
    async fn open_store_listing(&self, package_id: &str) -> Result<(), CoreError>;
}
