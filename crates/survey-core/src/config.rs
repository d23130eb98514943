//! 애플리케이션 설정 구조체.
//!
//! 원격 설정으로 내려오는 설문 선택값, 이력 저장 경로, 텔레메트리 설정을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::survey::SurveyKind;

/// 제휴 VPN 앱 기본 패키지 ID
pub const DEFAULT_VPN_RECOMMENDER_PACKAGE: &str = "com.expressvpn.vpn";

/// 감사 메시지 표시 후 자동 닫힘까지 기본 지연 (밀리초)
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 5_000;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 설문 설정
    #[serde(default)]
    pub survey: SurveyConfig,
    /// 이력 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 텔레메트리 설정
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

// ============================================================
// 설문 설정
// ============================================================

/// 설문 설정 — 원격 설정 키 `feature_survey`, `vpn_recommender_package`, `vpn_recommender_url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// 원격 설정 설문 선택값 (0 = 없음, 1 = Wi-Fi, 2 = VPN, 3 = VPN 추천)
    #[serde(default)]
    pub feature_survey: i64,
    /// VPN 추천 수락 시 열 스토어 패키지
    #[serde(default = "default_vpn_recommender_package")]
    pub vpn_recommender_package: String,
    /// 스토어 앱이 없을 때 열 웹 주소 (None이면 스토어 웹 페이지)
    #[serde(default)]
    pub vpn_recommender_url: Option<String>,
    /// 자동 닫힘 지연 (밀리초)
    #[serde(default = "default_dismiss_delay_ms")]
    pub dismiss_delay_ms: u64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            feature_survey: 0,
            vpn_recommender_package: default_vpn_recommender_package(),
            vpn_recommender_url: None,
            dismiss_delay_ms: default_dismiss_delay_ms(),
        }
    }
}

impl SurveyConfig {
    /// 선택된 설문 종류 (없으면 None)
    pub fn kind(&self) -> Option<SurveyKind> {
        SurveyKind::from_remote_value(self.feature_survey)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.vpn_recommender_package.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "survey.vpn_recommender_package".to_string(),
                message: "패키지 ID가 비어 있습니다".to_string(),
            });
        }
        if let Some(url) = &self.vpn_recommender_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(CoreError::Validation {
                    field: "survey.vpn_recommender_url".to_string(),
                    message: format!("http(s) 주소가 아닙니다: {url}"),
                });
            }
        }
        if self.dismiss_delay_ms == 0 {
            return Err(CoreError::Validation {
                field: "survey.dismiss_delay_ms".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 이력 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 완료 이력 파일 경로 (None이면 데이터 디렉토리의 `seen_events.json`)
    #[serde(default)]
    pub seen_record_file: Option<PathBuf>,
}

// ============================================================
// 텔레메트리 설정
// ============================================================

/// 텔레메트리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// 텔레메트리 전체 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 이벤트를 로그로 출력
    #[serde(default = "default_true")]
    pub log_events: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_events: true,
        }
    }
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            survey: SurveyConfig::default(),
            storage: StorageConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    /// 자동 닫힘 지연을 Duration으로 반환
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.survey.dismiss_delay_ms)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_vpn_recommender_package() -> String {
    DEFAULT_VPN_RECOMMENDER_PACKAGE.to_string()
}

fn default_dismiss_delay_ms() -> u64 {
    DEFAULT_DISMISS_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default_config();
        assert_eq!(config.survey.feature_survey, 0);
        assert_eq!(config.survey.kind(), None);
        assert_eq!(config.survey.vpn_recommender_package, "com.expressvpn.vpn");
        assert_eq!(config.dismiss_delay(), Duration::from_millis(5_000));
        assert!(config.telemetry.enabled);
        assert!(config.storage.seen_record_file.is_none());
        assert!(config.survey.vpn_recommender_url.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "survey": { "feature_survey": 2 } }"#).unwrap();
        assert_eq!(config.survey.kind(), Some(SurveyKind::Vpn));
        assert_eq!(config.survey.dismiss_delay_ms, 5_000);
        assert!(config.telemetry.log_events);
    }

    #[test]
    fn validate_rejects_empty_package() {
        let mut survey = SurveyConfig::default();
        assert!(survey.validate().is_ok());

        survey.vpn_recommender_package = "  ".to_string();
        assert!(matches!(
            survey.validate(),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn validate_checks_recommender_url() {
        let mut survey = SurveyConfig {
            vpn_recommender_url: Some("https://example.com/vpn".to_string()),
            ..SurveyConfig::default()
        };
        assert!(survey.validate().is_ok());

        survey.vpn_recommender_url = Some("market://details?id=x".to_string());
        assert!(matches!(
            survey.validate(),
            Err(CoreError::Validation { field, .. }) if field == "survey.vpn_recommender_url"
        ));
    }

    #[test]
    fn validate_rejects_zero_delay() {
        let survey = SurveyConfig {
            dismiss_delay_ms: 0,
            ..SurveyConfig::default()
        };
        assert!(survey.validate().is_err());
    }
}
