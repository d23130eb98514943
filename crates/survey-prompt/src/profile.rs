//! 설문 종류별 프로필 테이블.
//!
//! 종류마다 문구, 텔레메트리 대상, 이력 키, 응답 방식을 한 곳에 모은다.

use survey_core::models::survey::{SeenEvent, SurveyKind};

/// 응답 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// 예/아니오 모두 감사 메시지 → 자동 닫힘. `seen`을 기록한다.
    InlineFeedback { seen: SeenEvent },
    /// 예 → 스토어 이동, 아니오 → `decline` 기록 후 트리거 숨김
    ExternalLaunch { decline: SeenEvent },
}

/// 설문 종류별 정적 프로필
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyProfile {
    pub kind: SurveyKind,
    /// 카드 본문 문구
    pub prompt_copy: &'static str,
    /// 제휴 앱 로고 표시 여부
    pub show_logo: bool,
    /// 텔레메트리 대상 이름 (None이면 계측 없음)
    pub telemetry_object: Option<&'static str>,
    pub response_mode: ResponseMode,
}

impl SurveyProfile {
    /// 설문을 다시 띄우지 않게 하는 완료 이력 키
    pub fn completion_record(&self) -> SeenEvent {
        match self.response_mode {
            ResponseMode::InlineFeedback { seen } => seen,
            ResponseMode::ExternalLaunch { decline } => decline,
        }
    }
}

const WIFI_FINDING: SurveyProfile = SurveyProfile {
    kind: SurveyKind::WifiFinding,
    prompt_copy: "Would you like a feature that finds free Wi-Fi hotspots nearby?",
    show_logo: false,
    telemetry_object: Some("wifi_finder_survey"),
    response_mode: ResponseMode::InlineFeedback {
        seen: SeenEvent::FeatureSurveyWifiFinding,
    },
};

const VPN: SurveyProfile = SurveyProfile {
    kind: SurveyKind::Vpn,
    prompt_copy: "Would you like a built-in VPN to keep your browsing private?",
    show_logo: false,
    telemetry_object: Some("vpn_survey"),
    response_mode: ResponseMode::InlineFeedback {
        seen: SeenEvent::FeatureSurveyVpn,
    },
};

// TODO: 추천 카드의 표시/닫힘 이벤트 이름이 확정되면 telemetry_object 채우기
const VPN_RECOMMENDER: SurveyProfile = SurveyProfile {
    kind: SurveyKind::VpnRecommender,
    prompt_copy: "Browse privately with a free VPN",
    show_logo: true,
    telemetry_object: None,
    response_mode: ResponseMode::ExternalLaunch {
        decline: SeenEvent::VpnRecommenderIgnore,
    },
};

/// 종류 → 프로필
pub fn profile_for(kind: SurveyKind) -> &'static SurveyProfile {
    match kind {
        SurveyKind::WifiFinding => &WIFI_FINDING,
        SurveyKind::Vpn => &VPN,
        SurveyKind::VpnRecommender => &VPN_RECOMMENDER,
    }
}
