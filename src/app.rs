use std::path::Path;

use crate::config::Config;
use crate::form::FormState;
use crate::i18n::{self, Translator};
use crate::session::{self, FormEvent};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 설정 변경은 `config_path`에 저장한다. 설정의 초기 입력값으로 폼을 채우고 최초 계산 결과를 보여준 뒤 메뉴를 돈다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut form: FormState = config.initial_inputs.to_form();
    let outcome = session::handle_event(&mut form, FormEvent::PageLoaded);
    ui_cli::print_outcome(tr, &outcome);
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::RoomData => {
                let outcome = ui_cli::handle_room_data(tr, &mut form)?;
                ui_cli::print_outcome(tr, &outcome);
            }
            MenuChoice::FlowRange => {
                let outcome = ui_cli::handle_flow_range(tr, &mut form)?;
                ui_cli::print_outcome(tr, &outcome);
            }
            MenuChoice::VolumeFlow => {
                let outcome = ui_cli::handle_volume_flow(tr, &mut form)?;
                ui_cli::print_outcome(tr, &outcome);
            }
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let resolved = i18n::resolve_language(&config.language, None);
                    *tr = Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
                    config.save_to(config_path)?;
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
