//! 텔레메트리 모델.
//!
//! 설문 카드에서 발생하는 사용자 행동 이벤트.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 설문 행동 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyAction {
    /// 트리거를 눌러 카드가 열림
    Shown,
    /// "예" 응답
    PositiveFeedback,
    /// "아니오" 응답
    NegativeFeedback,
    /// 응답 전 바깥 영역 탭으로 닫음 (최초)
    FirstDismiss,
}

impl SurveyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SurveyAction::Shown => "shown",
            SurveyAction::PositiveFeedback => "positive_feedback",
            SurveyAction::NegativeFeedback => "negative_feedback",
            SurveyAction::FirstDismiss => "first_dismiss",
        }
    }
}

/// 단일 텔레메트리 이벤트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// 이벤트 대상 (예: "wifi_finder_survey")
    pub object: String,
    /// 행동
    pub action: SurveyAction,
    /// 발생 시각
    pub timestamp: DateTime<Utc>,
}

impl TelemetryEvent {
    /// 현재 시각으로 이벤트 생성
    pub fn new(object: impl Into<String>, action: SurveyAction) -> Self {
        Self {
            object: object.into(),
            action,
            timestamp: Utc::now(),
        }
    }

    /// 이벤트 이름 (`<object>.<action>`)
    pub fn name(&self) -> String {
        format!("{}.{}", self.object, self.action.as_str())
    }
}
