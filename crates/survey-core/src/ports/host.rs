//! 호스트 컨테이너 포트.
//!
//! 구현: `survey-app` crate (터미널 렌더러)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 컨테이너에 삽입된 카드 식별자 (컨트롤러가 발급)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// 트리거 가시성
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Gone,
}

/// 카드에 바인딩되는 표시 데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCard {
    /// 본문 텍스트
    pub text: String,
    /// 제휴 앱 로고 표시 여부
    pub logo_visible: bool,
    /// 예/아니오 버튼 표시 여부
    pub buttons_visible: bool,
    /// 카드 본문 탭 반응 여부 (false면 탭 무시)
    pub body_clickable: bool,
}

/// 카드를 담는 부모 컨테이너
pub trait HostContainer: Send + Sync {
    /// 카드 삽입
    fn insert_child(&self, id: CardId, card: &PromptCard);

    /// 삽입된 카드의 표시 데이터 교체
    fn bind_child(&self, id: CardId, card: &PromptCard);

    /// 카드 제거
    fn remove_child(&self, id: CardId);

    /// 카드를 여는 트리거의 가시성 변경 (트리거는 카드와 별개로 항상 존재)
    fn set_trigger_visibility(&self, visibility: Visibility);
}
