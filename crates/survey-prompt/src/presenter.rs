//! 설문 카드 프레젠터.
//!
//! SurveyProfile → 카드 표시 데이터 변환.

use survey_core::ports::host::PromptCard;

use crate::profile::SurveyProfile;

/// 감사 메시지에 붙는 이모지 (U+1F600)
pub const FEEDBACK_EMOJI: &str = "\u{1F600}";

/// 질문 카드 (예/아니오 버튼 포함)
pub fn present_prompt(profile: &SurveyProfile) -> PromptCard {
    PromptCard {
        text: profile.prompt_copy.to_string(),
        logo_visible: profile.show_logo,
        buttons_visible: true,
        body_clickable: false,
    }
}

/// 응답 후 감사 카드 (버튼 숨김)
pub fn present_thanks(profile: &SurveyProfile) -> PromptCard {
    PromptCard {
        text: thank_you_text(),
        logo_visible: profile.show_logo,
        buttons_visible: false,
        body_clickable: false,
    }
}

pub fn thank_you_text() -> String {
    format!("Thanks for your feedback! {FEEDBACK_EMOJI}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_for;
    use survey_core::models::survey::SurveyKind;

    #[test]
    fn prompt_card_shows_buttons_and_ignores_body_taps() {
        let card = present_prompt(profile_for(SurveyKind::WifiFinding));
        assert!(card.buttons_visible);
        assert!(!card.body_clickable);
        assert!(!card.logo_visible);
        assert!(card.text.contains("Wi-Fi"));
    }

    #[test]
    fn recommender_card_shows_logo() {
        let card = present_prompt(profile_for(SurveyKind::VpnRecommender));
        assert!(card.logo_visible);
    }

    #[test]
    fn thanks_card_hides_buttons() {
        let card = present_thanks(profile_for(SurveyKind::Vpn));
        assert!(!card.buttons_visible);
        assert!(card.text.ends_with(FEEDBACK_EMOJI));
        assert_eq!(card.text, "Thanks for your feedback! 😀");
    }
}
