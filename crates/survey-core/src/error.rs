//! 설문 코어 에러 타입.
//!
//! 어댑터 crate는 포트 구현에서 이 타입을 그대로 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 저장소, 외부 앱 실행 등 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 이벤트 이력 저장소 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 외부 앱(스토어) 실행 실패
    #[error("외부 앱 실행 실패: {0}")]
    Launch(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
