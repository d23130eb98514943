//! 텔레메트리 포트.
//!
//! 구현: `survey-prompt` crate (tracing 로그, 메모리 기록)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::telemetry::TelemetryEvent;

/// 텔레메트리 이벤트 수집기 (fire-and-forget)
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// 이벤트 기록
    async fn record(&self, event: &TelemetryEvent) -> Result<(), CoreError>;
}
