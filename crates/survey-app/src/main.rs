//! # survey-app
//!
//! 설문 카드 터미널 호스트 진입점.
//! 설정 로드, DI 와이어링, 표준 입력 명령 루프.

mod commands;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use survey_core::config::AppConfig;
use survey_core::config_manager::ConfigManager;
use survey_core::models::survey::{PromptState, SurveyKind};
use survey_core::ports::telemetry::TelemetrySink;
use survey_prompt::telemetry::{NoopTelemetrySink, TracingTelemetrySink};
use survey_prompt::{ControllerOptions, SurveyPorts, SurveyPromptController};
use survey_storage::JsonFileSeenStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};
use crate::terminal::{PrintingLauncher, TerminalHost};

/// 홈 화면 인라인 설문 카드 시뮬레이터
#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설문 종류 (wifi-finding, vpn, vpn-recommender). 원격 설정값보다 우선
    #[arg(long, short = 'k')]
    kind: Option<SurveyKind>,

    /// 원격 설정 `feature_survey` 값 (0 = 없음, 1 = Wi-Fi, 2 = VPN, 3 = VPN 추천)
    #[arg(long)]
    remote_value: Option<i64>,

    /// VPN 추천 수락 시 열 스토어 패키지
    #[arg(long)]
    package: Option<String>,

    /// 스토어 앱이 없을 때 열 웹 주소
    #[arg(long)]
    recommender_url: Option<String>,

    /// 자동 닫힘 지연 (밀리초)
    #[arg(long)]
    dismiss_delay_ms: Option<u64>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 이력 저장 디렉토리 (기본: 플랫폼 데이터 디렉토리)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 시작 전에 완료 이력 삭제
    #[arg(long)]
    reset: bool,
}

/// 이력 파일 경로 결정 (CLI 인자 → 설정 → 플랫폼 데이터 디렉토리)
fn resolve_seen_path(data_dir: Option<&PathBuf>, config: &AppConfig) -> PathBuf {
    const FILE_NAME: &str = "seen_events.json";

    data_dir
        .map(|d| d.join(FILE_NAME))
        .or_else(|| config.storage.seen_record_file.clone())
        .or_else(|| ConfigManager::data_dir().ok().map(|d| d.join(FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(".").join(FILE_NAME))
}

/// 설정 로드 후 CLI 인자로 오버라이드
fn load_config(args: &Args) -> Result<AppConfig> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본값 사용: {e}");
            AppConfig::default_config()
        }
    };

    if let Some(value) = args.remote_value {
        config.survey.feature_survey = value;
    }
    if let Some(kind) = args.kind {
        config.survey.feature_survey = kind.remote_value();
    }
    if let Some(package) = &args.package {
        config.survey.vpn_recommender_package = package.clone();
    }
    if let Some(url) = &args.recommender_url {
        config.survey.vpn_recommender_url = Some(url.clone());
    }
    if let Some(delay) = args.dismiss_delay_ms {
        config.survey.dismiss_delay_ms = delay;
    }

    config
        .survey
        .validate()
        .context("설문 설정 검증 실패")?;
    Ok(config)
}

/// 텔레메트리가 꺼져 있으면 `sink` 대신 아무것도 하지 않는 싱크
fn telemetry_sink(config: &AppConfig, sink: Arc<dyn TelemetrySink>) -> Arc<dyn TelemetrySink> {
    if config.telemetry.enabled && config.telemetry.log_events {
        sink
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "survey={},survey_app={},survey_core={},survey_prompt={},survey_storage={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;

    let Some(kind) = config.survey.kind() else {
        info!(
            "설문 비활성화 (feature_survey = {})",
            config.survey.feature_survey
        );
        println!("no survey configured (feature_survey = {})", config.survey.feature_survey);
        return Ok(());
    };

    let seen_path = resolve_seen_path(args.data_dir.as_ref(), &config);
    let seen_store = Arc::new(
        JsonFileSeenStore::open(seen_path.clone())
            .await
            .with_context(|| format!("이력 저장소 열기 실패: {}", seen_path.display()))?,
    );
    if args.reset {
        seen_store.clear().await.context("이력 초기화 실패")?;
    }

    // ── 어댑터 생성 (DI 와이어링) ──
    let host = Arc::new(TerminalHost::new(kind, true));
    let ports = SurveyPorts {
        host: host.clone(),
        telemetry: telemetry_sink(&config, Arc::new(TracingTelemetrySink)),
        seen_store,
        launcher: Arc::new(PrintingLauncher::new(
            config.survey.vpn_recommender_url.clone(),
        )),
    };
    let options = ControllerOptions::from(&config);
    let dismiss_delay = options.dismiss_delay;
    let controller = SurveyPromptController::attach(kind, ports, options).await;

    info!("설문 시작: {kind}");
    println!("{}\n", host.render());
    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}\n{HELP}");
                continue;
            }
        };

        match command {
            Command::Tap => {
                if !controller.activate().await {
                    println!("(nothing to open)");
                }
            }
            Command::Yes => controller.respond_positive().await,
            Command::No => controller.respond_negative().await,
            Command::Outside => controller.dismiss_by_outside_tap().await,
            Command::Status => {
                println!(
                    "state={:?} trigger_visible={}",
                    controller.state().await,
                    controller.trigger_visible().await
                );
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    // 감사 메시지가 떠 있으면 자동 닫힘까지 기다린다
    if controller.state().await == PromptState::Responded {
        info!("자동 닫힘 대기: {}ms", dismiss_delay.as_millis());
        tokio::time::sleep(dismiss_delay + std::time::Duration::from_millis(50)).await;
    }

    info!("종료: 상태 {:?}", controller.state().await);
    Ok(())
}
