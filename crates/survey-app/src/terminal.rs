//! 터미널 어댑터.
//!
//! 홈 화면 컨테이너를 텍스트로 그리고, 스토어 이동은 URI 출력으로 대신한다.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use survey_core::error::CoreError;
use survey_core::models::survey::SurveyKind;
use survey_core::ports::host::{CardId, HostContainer, PromptCard, Visibility};
use survey_core::ports::launcher::AppLauncher;
use tracing::debug;

/// 종류별 트리거 라벨
pub fn trigger_label(kind: SurveyKind) -> &'static str {
    match kind {
        SurveyKind::WifiFinding => "[ Free Wi-Fi? ]",
        SurveyKind::Vpn => "[ Private browsing with VPN? ]",
        SurveyKind::VpnRecommender => "[ VPN ]",
    }
}

#[derive(Debug)]
struct HostView {
    trigger_visible: bool,
    cards: BTreeMap<CardId, PromptCard>,
}

/// 텍스트 홈 화면 컨테이너
pub struct TerminalHost {
    kind: SurveyKind,
    echo: bool,
    view: Mutex<HostView>,
}

impl TerminalHost {
    /// `echo`가 true면 변경될 때마다 화면을 stdout에 다시 그린다
    pub fn new(kind: SurveyKind, echo: bool) -> Self {
        Self {
            kind,
            echo,
            view: Mutex::new(HostView {
                trigger_visible: true,
                cards: BTreeMap::new(),
            }),
        }
    }

    /// 현재 화면
    pub fn render(&self) -> String {
        let view = self.view.lock();
        let mut out = String::new();

        if view.trigger_visible {
            out.push_str(trigger_label(self.kind));
        } else {
            out.push_str("(survey hidden)");
        }

        for (id, card) in &view.cards {
            out.push_str(&format!("\n  +-- {id} ---------------------------\n"));
            if card.logo_visible {
                out.push_str("  | <logo>\n");
            }
            out.push_str(&format!("  | {}\n", card.text));
            if card.buttons_visible {
                out.push_str("  |      [yes]   [no]\n");
            }
            out.push_str("  +---------------------------------------");
        }
        out
    }

    fn refresh(&self) {
        if self.echo {
            println!("{}\n", self.render());
        }
    }
}

impl HostContainer for TerminalHost {
    fn insert_child(&self, id: CardId, card: &PromptCard) {
        self.view
            .lock()
            .cards
            .insert(id, card.clone());
        debug!("카드 삽입: {id}");
        self.refresh();
    }

    fn bind_child(&self, id: CardId, card: &PromptCard) {
        if let Some(entry) = self.view.lock().cards.get_mut(&id) {
            *entry = card.clone();
        }
        self.refresh();
    }

    fn remove_child(&self, id: CardId) {
        // 이미 떨어진 카드는 조용히 무시
        let removed = self.view.lock().cards.remove(&id).is_some();
        debug!("카드 제거: {id} (존재: {removed})");
        self.refresh();
    }

    fn set_trigger_visibility(&self, visibility: Visibility) {
        self.view.lock().trigger_visible = visibility == Visibility::Visible;
        self.refresh();
    }
}

/// 스토어 URI (앱 스킴, 웹 대체 주소)
///
/// `web_fallback`이 있으면 스토어 웹 페이지 대신 그 주소를 쓴다.
pub fn store_uris(package_id: &str, web_fallback: Option<&str>) -> (String, String) {
    let web = match web_fallback {
        Some(url) => url.to_string(),
        None => format!("https://play.google.com/store/apps/details?id={package_id}"),
    };
    (format!("market://details?id={package_id}"), web)
}

/// 스토어 이동을 URI 출력으로 대신하는 실행기
#[derive(Debug, Default)]
pub struct PrintingLauncher {
    web_fallback: Option<String>,
}

impl PrintingLauncher {
    pub fn new(web_fallback: Option<String>) -> Self {
        Self { web_fallback }
    }
}

#[async_trait]
impl AppLauncher for PrintingLauncher {
    async fn open_store_listing(&self, package_id: &str) -> Result<(), CoreError> {
        if package_id.trim().is_empty() {
            return Err(CoreError::Launch("패키지 ID가 비어 있습니다".to_string()));
        }
        let (market, web) = store_uris(package_id, self.web_fallback.as_deref());
        println!("-> open {market}");
        println!("   (fallback {web})");
        Ok(())
    }
}
