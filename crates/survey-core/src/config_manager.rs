//! 설정 파일 관리.
//!
//! 설정(`config.json`)과 완료 이력의 기본 위치는 모두 `directories::ProjectDirs`
//! 한 곳에서 결정한다. 설정 디렉토리와 데이터 디렉토리가 같은 프로젝트 식별자를 쓴다.

use crate::config::AppConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 프로젝트 식별자 (qualifier, organization, application)
pub const PROJECT_ID: (&str, &str, &str) = ("org", "home-survey", "survey");

const CONFIG_FILE_NAME: &str = "config.json";

/// 설정 관리자
///
/// 메모리의 설정은 파일 저장이 성공한 뒤에만 바뀐다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
    path: PathBuf,
}

impl ConfigManager {
    /// 플랫폼 설정 디렉토리의 `config.json` 사용
    pub fn new() -> Result<Self, CoreError> {
        Self::with_path(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// 지정된 파일 사용. 파일이 없으면 기본 설정으로 만든다.
    pub fn with_path(path: PathBuf) -> Result<Self, CoreError> {
        let config = match read_config(&path)? {
            Some(config) => config,
            None => {
                let config = AppConfig::default_config();
                write_config(&path, &config)?;
                info!("기본 설정 파일 생성: {}", path.display());
                config
            }
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            path,
        })
    }

    /// 현재 설정 (복제본)
    pub fn get(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// 설정 전체 교체
    pub fn update(&self, new_config: AppConfig) -> Result<(), CoreError> {
        let mut current = self.config.write();
        write_config(&self.path, &new_config)?;
        *current = new_config;
        debug!("설정 저장: {}", self.path.display());
        Ok(())
    }

    /// 일부 필드만 변경
    ///
    /// 쓰기 잠금을 쥔 채 읽고 고쳐 저장하므로 동시 변경이 서로 덮어쓰지 않는다.
    pub fn update_with<F>(&self, updater: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut current = self.config.write();
        let mut next = current.clone();
        updater(&mut next);
        write_config(&self.path, &next)?;
        *current = next.clone();
        debug!("설정 저장: {}", self.path.display());
        Ok(next)
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// 파일에서 다시 읽기. 파일이 사라졌으면 에러.
    pub fn reload(&self) -> Result<(), CoreError> {
        let config = read_config(&self.path)?.ok_or_else(|| {
            CoreError::Config(format!("설정 파일 없음: {}", self.path.display()))
        })?;
        *self.config.write() = config;
        info!("설정 다시 로드: {}", self.path.display());
        Ok(())
    }

    /// 플랫폼 설정 디렉토리 (Linux: `$XDG_CONFIG_HOME/survey`)
    pub fn config_dir() -> Result<PathBuf, CoreError> {
        Ok(project_dirs()?.config_dir().to_path_buf())
    }

    /// 플랫폼 데이터 디렉토리 (Linux: `$XDG_DATA_HOME/survey`)
    pub fn data_dir() -> Result<PathBuf, CoreError> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Result<ProjectDirs, CoreError> {
    let (qualifier, organization, application) = PROJECT_ID;
    ProjectDirs::from(qualifier, organization, application)
        .ok_or_else(|| CoreError::Config("홈 디렉토리를 찾을 수 없습니다".to_string()))
}

/// 파일이 없으면 `Ok(None)`
fn read_config(path: &Path) -> Result<Option<AppConfig>, CoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CoreError::Config(format!(
                "설정 파일 읽기 실패: {}: {e}",
                path.display()
            )))
        }
    };

    let config = serde_json::from_str(&content).map_err(|e| {
        CoreError::Config(format!("설정 파일 파싱 실패: {}: {e}", path.display()))
    })?;
    debug!("설정 파일 로드: {}", path.display());
    Ok(Some(config))
}

/// 임시 파일에 쓴 뒤 이름을 바꿔 교체한다 (중간에 끊겨도 기존 파일 유지)
fn write_config(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CoreError::Config(format!("설정 디렉토리 생성 실패: {}: {e}", parent.display()))
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| CoreError::Config(format!("설정 파일 저장 실패: {}: {e}", path.display())))
}
