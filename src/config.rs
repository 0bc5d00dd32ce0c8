use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::form::FormState;

/// 기본 설정 파일 경로(실행 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 프로그램 시작 시 폼에 채울 입력값. 폼과 같이 원시 문자열로 보관한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialInputs {
    pub room_area_m2: String,
    pub room_height_m: String,
    pub heating_load_kw: String,
    pub cooling_load_kw: String,
    pub room_temperature_c: String,
}

impl Default for InitialInputs {
    fn default() -> Self {
        Self {
            room_area_m2: "20".into(),
            room_height_m: "2.5".into(),
            heating_load_kw: "2".into(),
            cooling_load_kw: "0".into(),
            room_temperature_c: "21".into(),
        }
    }
}

impl InitialInputs {
    /// 초기값이 채워진 폼을 만든다. 범위/슬라이더는 최초 계산에서 정해진다.
    pub fn to_form(&self) -> FormState {
        FormState {
            room_area: self.room_area_m2.clone(),
            room_height: self.room_height_m.clone(),
            heating_load_kw: self.heating_load_kw.clone(),
            cooling_load_kw: self.cooling_load_kw.clone(),
            room_temperature: self.room_temperature_c.clone(),
            ..FormState::default()
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// auto / de-de / en-us / ko-kr
    pub language: String,
    /// 언어팩(TOML) 디렉터리
    pub language_pack_dir: Option<String>,
    /// tracing 최대 레벨 (error/warn/info/debug/trace)
    pub log_level: String,
    pub window_alpha: f32,
    pub always_on_top: bool,
    /// GUI에서 쓸 사용자 폰트(.ttf/.otf). 한글 표시용.
    pub font_path: Option<String>,
    pub initial_inputs: InitialInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            log_level: "warn".into(),
            window_alpha: 1.0,
            always_on_top: false,
            font_path: None,
            initial_inputs: InitialInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file I/O failed: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse failed: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialization failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 설정된 로그 레벨. 해석할 수 없으면 WARN.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config =
            toml::from_str("language = \"en\"\n[initial_inputs]\nroom_area_m2 = \"35\"\n").unwrap();
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.initial_inputs.room_area_m2, "35");
        assert_eq!(cfg.initial_inputs.room_temperature_c, "21");
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn unknown_log_level_falls_back_to_warn() {
        let cfg = Config {
            log_level: "chatty".into(),
            ..Config::default()
        };
        assert_eq!(cfg.tracing_level(), tracing::Level::WARN);
        let cfg = Config {
            log_level: "debug".into(),
            ..Config::default()
        };
        assert_eq!(cfg.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn initial_inputs_fill_form() {
        let form = InitialInputs::default().to_form();
        assert_eq!(form.room_area, "20");
        assert_eq!(form.room_height, "2.5");
        assert_eq!(form.volume_flow_max, "1000");
    }
}
