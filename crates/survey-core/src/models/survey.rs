//! 설문 모델.
//!
//! 원격 설정으로 선택되는 설문 종류, 카드 상태, 완료 이력 키.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 설문 종류 (원격 설정 `feature_survey` 값으로 선택)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyKind {
    /// 무료 Wi-Fi 찾기 기능 수요 조사
    WifiFinding,
    /// VPN 기능 수요 조사
    Vpn,
    /// 제휴 VPN 앱 추천
    VpnRecommender,
}

impl SurveyKind {
    /// 전체 종류 (테스트/CLI 도움말용)
    pub const ALL: [SurveyKind; 3] = [
        SurveyKind::WifiFinding,
        SurveyKind::Vpn,
        SurveyKind::VpnRecommender,
    ];

    /// 원격 설정 정수값 → 설문 종류
    ///
    /// 0은 "설문 없음", 알 수 없는 값도 설문 없음으로 취급한다.
    pub fn from_remote_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(SurveyKind::WifiFinding),
            2 => Some(SurveyKind::Vpn),
            3 => Some(SurveyKind::VpnRecommender),
            _ => None,
        }
    }

    /// 설문 종류 → 원격 설정 정수값
    pub fn remote_value(self) -> i64 {
        match self {
            SurveyKind::WifiFinding => 1,
            SurveyKind::Vpn => 2,
            SurveyKind::VpnRecommender => 3,
        }
    }

    /// CLI/로그용 짧은 이름
    pub fn as_str(self) -> &'static str {
        match self {
            SurveyKind::WifiFinding => "wifi-finding",
            SurveyKind::Vpn => "vpn",
            SurveyKind::VpnRecommender => "vpn-recommender",
        }
    }
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "wifi-finding" | "wifi" => Ok(SurveyKind::WifiFinding),
            "vpn" => Ok(SurveyKind::Vpn),
            "vpn-recommender" | "recommender" => Ok(SurveyKind::VpnRecommender),
            other => Err(CoreError::Validation {
                field: "kind".to_string(),
                message: format!("알 수 없는 설문 종류: {other}"),
            }),
        }
    }
}

/// 설문 카드 상태
///
/// 카드 하나의 상태는 앞으로만 진행한다.
/// Collapsed → Active → (Responded →) Dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromptState {
    /// 아직 카드가 생성되지 않음
    Collapsed,
    /// 카드 표시 중, 응답 대기
    Active,
    /// 감사 메시지 표시 중, 자동 닫힘 대기
    Responded,
    /// 컨테이너에서 제거됨
    Dismissed,
}

impl PromptState {
    /// 카드가 컨테이너에 붙어 있는 상태인지
    pub fn is_live(self) -> bool {
        matches!(self, PromptState::Active | PromptState::Responded)
    }
}

/// 완료 이력 키 (설정 저장소에 영구 기록)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeenEvent {
    /// Wi-Fi 찾기 설문 응답 완료
    FeatureSurveyWifiFinding,
    /// VPN 설문 응답 완료
    FeatureSurveyVpn,
    /// VPN 추천 거절
    VpnRecommenderIgnore,
}

impl SeenEvent {
    /// 저장소에 기록되는 식별자
    pub fn id(self) -> &'static str {
        match self {
            SeenEvent::FeatureSurveyWifiFinding => "FeatureSurveyWifiFinding",
            SeenEvent::FeatureSurveyVpn => "FeatureSurveyVpn",
            SeenEvent::VpnRecommenderIgnore => "VpnRecommenderIgnore",
        }
    }

    /// 식별자 → 키 (알 수 없는 식별자는 None)
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "FeatureSurveyWifiFinding" => Some(SeenEvent::FeatureSurveyWifiFinding),
            "FeatureSurveyVpn" => Some(SeenEvent::FeatureSurveyVpn),
            "VpnRecommenderIgnore" => Some(SeenEvent::VpnRecommenderIgnore),
            _ => None,
        }
    }
}

impl fmt::Display for SeenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_value_mapping() {
        assert_eq!(SurveyKind::from_remote_value(0), None);
        assert_eq!(
            SurveyKind::from_remote_value(1),
            Some(SurveyKind::WifiFinding)
        );
        assert_eq!(SurveyKind::from_remote_value(2), Some(SurveyKind::Vpn));
        assert_eq!(
            SurveyKind::from_remote_value(3),
            Some(SurveyKind::VpnRecommender)
        );
        assert_eq!(SurveyKind::from_remote_value(42), None);
        assert_eq!(SurveyKind::from_remote_value(-1), None);

        for kind in SurveyKind::ALL {
            assert_eq!(SurveyKind::from_remote_value(kind.remote_value()), Some(kind));
        }
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("wifi".parse::<SurveyKind>().unwrap(), SurveyKind::WifiFinding);
        assert_eq!(
            "VPN_RECOMMENDER".parse::<SurveyKind>().unwrap(),
            SurveyKind::VpnRecommender
        );
        assert!("bluetooth".parse::<SurveyKind>().is_err());
    }

    #[test]
    fn live_states() {
        assert!(!PromptState::Collapsed.is_live());
        assert!(PromptState::Active.is_live());
        assert!(PromptState::Responded.is_live());
        assert!(!PromptState::Dismissed.is_live());
    }

    #[test]
    fn seen_event_ids() {
        assert_eq!(SeenEvent::FeatureSurveyWifiFinding.id(), "FeatureSurveyWifiFinding");
        assert_eq!(
            SeenEvent::from_id("VpnRecommenderIgnore"),
            Some(SeenEvent::VpnRecommenderIgnore)
        );
        assert_eq!(SeenEvent::from_id("ShowMyShotOnBoardingDialog"), None);
    }
}
