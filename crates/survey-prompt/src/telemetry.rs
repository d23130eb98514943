//! 텔레메트리 싱크 구현.
//!
//! 로그 출력, 메모리 기록, 비활성화 세 가지.

use async_trait::async_trait;
use parking_lot::Mutex;
use survey_core::error::CoreError;
use survey_core::models::telemetry::TelemetryEvent;
use survey_core::ports::telemetry::TelemetrySink;
use tracing::info;

/// tracing 로그로 이벤트를 남기는 싱크
#[derive(Debug, Default)]
pub struct TracingTelemetrySink;

#[async_trait]
impl TelemetrySink for TracingTelemetrySink {
    async fn record(&self, event: &TelemetryEvent) -> Result<(), CoreError> {
        info!(
            event = %event.name(),
            at = %event.timestamp.to_rfc3339(),
            "텔레메트리 이벤트"
        );
        Ok(())
    }
}

/// 이벤트를 순서대로 메모리에 보관하는 싱크
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 이벤트 이름 (발생 순)
    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(TelemetryEvent::name).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[async_trait]
impl TelemetrySink for RecordingTelemetrySink {
    async fn record(&self, event: &TelemetryEvent) -> Result<(), CoreError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// 텔레메트리 비활성화 시 사용
#[derive(Debug, Default)]
pub struct NoopTelemetrySink;

#[async_trait]
impl TelemetrySink for NoopTelemetrySink {
    async fn record(&self, _event: &TelemetryEvent) -> Result<(), CoreError> {
        Ok(())
    }
}
