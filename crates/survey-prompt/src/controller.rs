//! 설문 카드 컨트롤러.
//!
//! 트리거 탭 → 카드 삽입, 예/아니오/바깥 탭 응답 라우팅, 응답 후 자동 닫힘.
//!
//! 모든 조작은 상태 잠금을 쥔 채 끝까지 진행된다. 이벤트는 한 번에 하나씩만
//! 처리되고, 자동 닫힘 타이머도 같은 잠금을 거친다.
//! 타이머는 취소하지 않는다. 발화 시점에 카드 세대와 상태를 확인해서
//! 이미 닫힌 카드라면 아무것도 하지 않는다.

use std::sync::Arc;
use std::time::Duration;

use survey_core::config::{AppConfig, DEFAULT_DISMISS_DELAY_MS, DEFAULT_VPN_RECOMMENDER_PACKAGE};
use survey_core::models::survey::{PromptState, SeenEvent, SurveyKind};
use survey_core::models::telemetry::{SurveyAction, TelemetryEvent};
use survey_core::ports::host::{CardId, HostContainer, Visibility};
use survey_core::ports::launcher::AppLauncher;
use survey_core::ports::seen_store::SeenRecordStore;
use survey_core::ports::telemetry::TelemetrySink;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::presenter;
use crate::profile::{profile_for, ResponseMode, SurveyProfile};

/// 컨트롤러가 사용하는 외부 협력자 묶음
#[derive(Clone)]
pub struct SurveyPorts {
    pub host: Arc<dyn HostContainer>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub seen_store: Arc<dyn SeenRecordStore>,
    pub launcher: Arc<dyn AppLauncher>,
}

/// 컨트롤러 옵션
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// 감사 메시지 표시 후 자동 닫힘 지연
    pub dismiss_delay: Duration,
    /// VPN 추천 수락 시 열 스토어 패키지
    pub recommender_package: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            dismiss_delay: Duration::from_millis(DEFAULT_DISMISS_DELAY_MS),
            recommender_package: DEFAULT_VPN_RECOMMENDER_PACKAGE.to_string(),
        }
    }
}

impl From<&AppConfig> for ControllerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            dismiss_delay: config.dismiss_delay(),
            recommender_package: config.survey.vpn_recommender_package.clone(),
        }
    }
}

/// 현재 카드 슬롯
#[derive(Debug)]
struct PromptSlot {
    state: PromptState,
    card: Option<CardId>,
    /// 카드를 새로 만들 때마다 증가
    generation: u64,
    trigger_visible: bool,
}

struct Inner {
    profile: &'static SurveyProfile,
    options: ControllerOptions,
    ports: SurveyPorts,
    slot: Mutex<PromptSlot>,
}

/// 설문 카드 컨트롤러
///
/// 복제 비용이 싼 핸들이다. 복제본은 같은 카드 슬롯을 공유한다.
#[derive(Clone)]
pub struct SurveyPromptController {
    inner: Arc<Inner>,
}

impl SurveyPromptController {
    /// 새 컨트롤러 생성 (트리거는 보이는 상태로 시작)
    pub fn new(kind: SurveyKind, ports: SurveyPorts, options: ControllerOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                profile: profile_for(kind),
                options,
                ports,
                slot: Mutex::new(PromptSlot {
                    state: PromptState::Collapsed,
                    card: None,
                    generation: 0,
                    trigger_visible: true,
                }),
            }),
        }
    }

    /// 완료 이력에 따라 트리거 초기 가시성을 정해서 컨트롤러 생성
    pub async fn attach(kind: SurveyKind, ports: SurveyPorts, options: ControllerOptions) -> Self {
        let visible = trigger_visible_on_start(kind, ports.seen_store.as_ref()).await;
        let controller = Self::new(kind, ports, options);
        if !visible {
            let mut slot = controller.inner.slot.lock().await;
            controller.hide_trigger(&mut slot);
            info!("설문 이미 완료됨, 트리거 숨김: {kind}");
        }
        controller
    }

    pub fn kind(&self) -> SurveyKind {
        self.inner.profile.kind
    }

    /// 현재 카드 상태
    pub async fn state(&self) -> PromptState {
        self.inner.slot.lock().await.state
    }

    pub async fn trigger_visible(&self) -> bool {
        self.inner.slot.lock().await.trigger_visible
    }

    /// 컨테이너에 붙어 있는 카드
    pub async fn current_card(&self) -> Option<CardId> {
        self.inner.slot.lock().await.card
    }

    /// 트리거 탭 → 카드 삽입
    ///
    /// 카드가 이미 떠 있거나 트리거가 숨겨졌으면 아무것도 하지 않는다.
    /// 새 카드를 삽입했으면 true.
    pub async fn activate(&self) -> bool {
        let mut slot = self.inner.slot.lock().await;

        if !slot.trigger_visible {
            debug!("트리거 숨김 상태, 활성화 무시");
            return false;
        }
        if slot.state.is_live() {
            debug!("카드 이미 표시 중 ({:?}), 활성화 무시", slot.state);
            return false;
        }

        let profile = self.inner.profile;
        slot.generation += 1;
        let id = CardId(slot.generation);
        self.inner
            .ports
            .host
            .insert_child(id, &presenter::present_prompt(profile));
        slot.card = Some(id);
        slot.state = PromptState::Active;
        info!("설문 카드 표시: {} ({id})", profile.kind);

        self.emit(SurveyAction::Shown).await;
        true
    }

    /// "예" 버튼
    pub async fn respond_positive(&self) {
        let mut slot = self.inner.slot.lock().await;
        let Some(id) = Self::active_card(&slot) else {
            debug!("응답 무시 (예): 상태 {:?}", slot.state);
            return;
        };

        match self.inner.profile.response_mode {
            ResponseMode::ExternalLaunch { .. } => {
                self.remove_card(&mut slot, id);
                let package = &self.inner.options.recommender_package;
                info!("추천 앱 스토어 이동: {package}");
                if let Err(e) = self.inner.ports.launcher.open_store_listing(package).await {
                    warn!("스토어 실행 실패: {e}");
                }
            }
            ResponseMode::InlineFeedback { seen } => {
                self.show_thanks(&mut slot, id, seen, SurveyAction::PositiveFeedback)
                    .await;
            }
        }
    }

    /// "아니오" 버튼
    pub async fn respond_negative(&self) {
        let mut slot = self.inner.slot.lock().await;
        let Some(id) = Self::active_card(&slot) else {
            debug!("응답 무시 (아니오): 상태 {:?}", slot.state);
            return;
        };

        match self.inner.profile.response_mode {
            ResponseMode::ExternalLaunch { decline } => {
                self.record_seen(decline).await;
                self.remove_card(&mut slot, id);
                self.hide_trigger(&mut slot);
                info!("추천 거절, 트리거 숨김");
            }
            ResponseMode::InlineFeedback { seen } => {
                self.show_thanks(&mut slot, id, seen, SurveyAction::NegativeFeedback)
                    .await;
            }
        }
    }

    /// 카드 바깥 영역 탭 → 닫기
    ///
    /// 이미 응답한 설문이면 트리거도 숨기고, 처음이면 트리거를 남겨 다시 열 수 있게 한다.
    pub async fn dismiss_by_outside_tap(&self) {
        let mut slot = self.inner.slot.lock().await;
        let Some(id) = slot.card.filter(|_| slot.state.is_live()) else {
            debug!("닫기 무시: 상태 {:?}", slot.state);
            return;
        };

        self.remove_card(&mut slot, id);

        // 추천 카드는 닫힘 계측/이력 확인 없음
        let ResponseMode::InlineFeedback { seen } = self.inner.profile.response_mode else {
            return;
        };

        let already_seen = match self.inner.ports.seen_store.contains(seen).await {
            Ok(found) => found,
            Err(e) => {
                warn!("이력 조회 실패, 미응답으로 처리: {e}");
                false
            }
        };

        if already_seen {
            self.hide_trigger(&mut slot);
            debug!("응답 완료된 설문 닫힘, 트리거 숨김");
        } else {
            self.emit(SurveyAction::FirstDismiss).await;
            debug!("최초 닫힘, 트리거 유지");
        }
    }

    fn active_card(slot: &PromptSlot) -> Option<CardId> {
        match slot.state {
            PromptState::Active => slot.card,
            _ => None,
        }
    }

    /// 감사 메시지 표시 → 이력 기록 → 계측 → 자동 닫힘 예약
    async fn show_thanks(
        &self,
        slot: &mut PromptSlot,
        id: CardId,
        seen: SeenEvent,
        action: SurveyAction,
    ) {
        self.inner
            .ports
            .host
            .bind_child(id, &presenter::present_thanks(self.inner.profile));
        slot.state = PromptState::Responded;
        info!("설문 응답: {} → {}", self.inner.profile.kind, action.as_str());

        self.record_seen(seen).await;
        self.emit(action).await;
        self.schedule_auto_dismiss(slot.generation);
    }

    fn schedule_auto_dismiss(&self, generation: u64) {
        let delay = self.inner.options.dismiss_delay;
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("자동 닫힘 예약 실패 (tokio 런타임 없음): {e}");
                return;
            }
        };

        let deadline = tokio::time::Instant::now() + delay;
        let controller = self.clone();
        handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            controller.on_auto_dismiss(generation).await;
        });
        debug!("자동 닫힘 예약: {}ms 후", delay.as_millis());
    }

    async fn on_auto_dismiss(&self, generation: u64) {
        let mut slot = self.inner.slot.lock().await;
        if slot.generation != generation || slot.state != PromptState::Responded {
            debug!(
                "자동 닫힘 무시: 세대 {generation}/{}, 상태 {:?}",
                slot.generation, slot.state
            );
            return;
        }
        let Some(id) = slot.card else {
            return;
        };

        self.remove_card(&mut slot, id);
        self.hide_trigger(&mut slot);
        info!("설문 카드 자동 닫힘: {id}");
    }

    fn remove_card(&self, slot: &mut PromptSlot, id: CardId) {
        self.inner.ports.host.remove_child(id);
        slot.card = None;
        slot.state = PromptState::Dismissed;
    }

    fn hide_trigger(&self, slot: &mut PromptSlot) {
        self.inner.ports.host.set_trigger_visibility(Visibility::Gone);
        slot.trigger_visible = false;
    }

    async fn record_seen(&self, event: SeenEvent) {
        if let Err(e) = self.inner.ports.seen_store.add(event).await {
            warn!("이력 기록 실패 ({event}): {e}");
        }
    }

    async fn emit(&self, action: SurveyAction) {
        let Some(object) = self.inner.profile.telemetry_object else {
            return;
        };
        let event = TelemetryEvent::new(object, action);
        if let Err(e) = self.inner.ports.telemetry.record(&event).await {
            warn!("텔레메트리 기록 실패 ({}): {e}", event.name());
        }
    }
}

/// 시작 시 트리거 표시 여부
///
/// 해당 설문의 완료 이력이 있으면 숨긴다. 조회 실패 시에는 보여준다.
pub async fn trigger_visible_on_start(kind: SurveyKind, store: &dyn SeenRecordStore) -> bool {
    let record = profile_for(kind).completion_record();
    match store.contains(record).await {
        Ok(seen) => !seen,
        Err(e) => {
            warn!("이력 조회 실패 ({record}): {e}");
            true
        }
    }
}
