//! # survey-prompt
//!
//! 홈 화면 인라인 설문 카드.
//! 트리거 탭으로 카드를 띄우고, 예/아니오/바깥 탭 응답을 텔레메트리와
//! 완료 이력으로 보낸 뒤 스스로 닫힌다.

pub mod controller;
pub mod presenter;
pub mod profile;
pub mod telemetry;

pub use controller::{
    trigger_visible_on_start, ControllerOptions, SurveyPorts, SurveyPromptController,
};
