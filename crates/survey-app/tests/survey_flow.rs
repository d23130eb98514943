//! 설문 흐름 통합 테스트.
//!
//! 컨트롤러 + JSON 이력 저장소 + 텔레메트리 cross-crate 연동.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use survey_core::config::AppConfig;
use survey_core::error::CoreError;
use survey_core::models::survey::{PromptState, SeenEvent, SurveyKind};
use survey_core::ports::host::{CardId, HostContainer, PromptCard, Visibility};
use survey_core::ports::launcher::AppLauncher;
use survey_core::ports::seen_store::SeenRecordStore;
use survey_prompt::telemetry::RecordingTelemetrySink;
use survey_prompt::{ControllerOptions, SurveyPorts, SurveyPromptController};
use survey_storage::JsonFileSeenStore;
use tempfile::TempDir;

#[derive(Default)]
struct Screen {
    cards: Mutex<Vec<CardId>>,
    inserted: Mutex<u32>,
    trigger_visible: Mutex<bool>,
}

impl Screen {
    fn new() -> Self {
        Self {
            trigger_visible: Mutex::new(true),
            ..Default::default()
        }
    }
}

impl HostContainer for Screen {
    fn insert_child(&self, id: CardId, _card: &PromptCard) {
        self.cards.lock().push(id);
        *self.inserted.lock() += 1;
    }
    fn bind_child(&self, _id: CardId, _card: &PromptCard) {}
    fn remove_child(&self, id: CardId) {
        self.cards.lock().retain(|c| *c != id);
    }
    fn set_trigger_visibility(&self, visibility: Visibility) {
        *self.trigger_visible.lock() = visibility == Visibility::Visible;
    }
}

#[derive(Default)]
struct Launches(Mutex<Vec<String>>);

#[async_trait]
impl AppLauncher for Launches {
    async fn open_store_listing(&self, package_id: &str) -> Result<(), CoreError> {
        self.0.lock().push(package_id.to_string());
        Ok(())
    }
}

struct Harness {
    screen: Arc<Screen>,
    telemetry: Arc<RecordingTelemetrySink>,
    store: Arc<JsonFileSeenStore>,
    launches: Arc<Launches>,
    controller: SurveyPromptController,
}

async fn harness(dir: &TempDir, kind: SurveyKind, config: &AppConfig) -> Harness {
    let screen = Arc::new(Screen::new());
    let telemetry = Arc::new(RecordingTelemetrySink::new());
    let store = Arc::new(
        JsonFileSeenStore::open(dir.path().join("seen_events.json"))
            .await
            .unwrap(),
    );
    let launches = Arc::new(Launches::default());
    let ports = SurveyPorts {
        host: screen.clone(),
        telemetry: telemetry.clone(),
        seen_store: store.clone(),
        launcher: launches.clone(),
    };
    let controller =
        SurveyPromptController::attach(kind, ports, ControllerOptions::from(config)).await;
    Harness {
        screen,
        telemetry,
        store,
        launches,
        controller,
    }
}

#[tokio::test(start_paused = true)]
async fn wifi_positive_then_timer_completes_survey() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::default_config();
    let h = harness(&dir, SurveyKind::WifiFinding, &config).await;

    h.controller.activate().await;
    h.controller.respond_positive().await;
    tokio::time::sleep(Duration::from_millis(5_000) + Duration::from_millis(1)).await;

    assert_eq!(h.controller.state().await, PromptState::Dismissed);
    assert!(h
        .store
        .contains(SeenEvent::FeatureSurveyWifiFinding)
        .await
        .unwrap());
    assert_eq!(
        h.telemetry.names(),
        vec![
            "wifi_finder_survey.shown",
            "wifi_finder_survey.positive_feedback"
        ]
    );
    assert!(!*h.screen.trigger_visible.lock());
    assert!(h.screen.cards.lock().is_empty());
}

#[tokio::test]
async fn recommender_accept_dismisses_without_timer() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default_config();
    config.survey.vpn_recommender_package = "com.example.securevpn".to_string();
    let h = harness(&dir, SurveyKind::VpnRecommender, &config).await;

    h.controller.activate().await;
    h.controller.respond_positive().await;

    assert_eq!(h.controller.state().await, PromptState::Dismissed);
    assert_eq!(
        h.launches.0.lock().clone(),
        vec!["com.example.securevpn".to_string()]
    );
    assert!(h.store.entries().await.is_empty());
    assert!(h.screen.cards.lock().is_empty());
}

#[tokio::test]
async fn completed_survey_stays_hidden_after_restart() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::default_config();

    {
        let h = harness(&dir, SurveyKind::VpnRecommender, &config).await;
        h.controller.activate().await;
        h.controller.respond_negative().await;
        assert!(!*h.screen.trigger_visible.lock());
    }

    // 앱 재시작: 같은 이력 파일
    let h = harness(&dir, SurveyKind::VpnRecommender, &config).await;
    assert!(!h.controller.trigger_visible().await);
    assert!(!h.controller.activate().await);
    assert_eq!(*h.screen.inserted.lock(), 0);

    // 다른 설문은 영향 없음
    let other = harness(&dir, SurveyKind::Vpn, &config).await;
    assert!(other.controller.activate().await);
}

#[tokio::test]
async fn first_dismiss_then_reopen_and_answer() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::default_config();
    let h = harness(&dir, SurveyKind::Vpn, &config).await;

    h.controller.activate().await;
    h.controller.dismiss_by_outside_tap().await;
    assert!(*h.screen.trigger_visible.lock());

    assert!(h.controller.activate().await);
    h.controller.respond_negative().await;
    assert_eq!(h.controller.state().await, PromptState::Responded);
    assert_eq!(*h.screen.inserted.lock(), 2);

    // 응답 후 바깥 탭: 이력이 있으므로 트리거 숨김
    h.controller.dismiss_by_outside_tap().await;
    assert!(!*h.screen.trigger_visible.lock());
    assert_eq!(
        h.telemetry.names(),
        vec![
            "vpn_survey.shown",
            "vpn_survey.first_dismiss",
            "vpn_survey.shown",
            "vpn_survey.negative_feedback"
        ]
    );
}
