use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::form::{parse_number, Field, FormBinding, FormState};
use crate::i18n::{keys, Translator};
use crate::render;
use crate::session::{self, FormEvent, SizingOutcome};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RoomData,
    FlowRange,
    VolumeFlow,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_ROOM,
        keys::MAIN_MENU_RANGE,
        keys::MAIN_MENU_FLOW,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::RoomData),
            "2" => return Ok(MenuChoice::FlowRange),
            "3" => return Ok(MenuChoice::VolumeFlow),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 면적/높이/부하/실온을 입력받는다. 범위는 새로 계산된다.
pub fn handle_room_data(tr: &Translator, form: &mut FormState) -> Result<SizingOutcome, AppError> {
    println!("{}", tr.t(keys::ROOM_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_NOTE));
    for (field, label) in [
        (Field::RoomArea, keys::FIELD_ROOM_AREA),
        (Field::RoomHeight, keys::FIELD_ROOM_HEIGHT),
        (Field::HeatingLoad, keys::FIELD_HEATING_LOAD),
        (Field::CoolingLoad, keys::FIELD_COOLING_LOAD),
        (Field::RoomTemperature, keys::FIELD_ROOM_TEMPERATURE),
    ] {
        prompt_field(tr, form, field, label)?;
    }
    Ok(session::handle_event(form, FormEvent::RoomInputChanged))
}

/// min/max 입력 칸을 수정한다. 사용자 값은 유지하고 뒤집힌 범위만 보정한다.
pub fn handle_flow_range(tr: &Translator, form: &mut FormState) -> Result<SizingOutcome, AppError> {
    println!("{}", tr.t(keys::RANGE_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_NOTE));
    prompt_field(tr, form, Field::VolumeFlowMin, keys::FIELD_FLOW_MIN)?;
    prompt_field(tr, form, Field::VolumeFlowMax, keys::FIELD_FLOW_MAX)?;
    Ok(session::handle_event(form, FormEvent::RangeBoundsChanged))
}

/// 슬라이더에 해당하는 유량을 입력받는다. 범위 밖 값은 범위 안으로 제한된다.
pub fn handle_volume_flow(
    tr: &Translator,
    form: &mut FormState,
) -> Result<SizingOutcome, AppError> {
    println!("{}", tr.t(keys::FLOW_HEADING));
    println!(
        "{} {}",
        tr.t(keys::RESULT_RANGE),
        render::format_range(&form.slider_range())
    );
    let prompt = format!("{} ({:.0}): ", tr.t(keys::FIELD_FLOW), form.slider_value());
    let input = read_line(&prompt)?;
    let flow = parse_number(&input).unwrap_or_else(|| form.slider_value());
    Ok(session::move_slider(form, flow))
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(false);
    }
    let lang = match sel.trim() {
        "1" => "auto",
        "2" => "de-de",
        "3" => "en-us",
        "4" => "ko-kr",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

/// 계산 결과를 출력한다.
pub fn print_outcome(tr: &Translator, outcome: &SizingOutcome) {
    println!("{}", tr.t(keys::RESULT_HEADING));
    for line in render::render(outcome, tr).to_lines(tr) {
        println!("{line}");
    }
}

/// 칸 하나를 입력받는다. 엔터만 누르면 기존 값을 유지한다.
fn prompt_field(
    tr: &Translator,
    form: &mut FormState,
    field: Field,
    label_key: &str,
) -> Result<(), AppError> {
    let prompt = format!("{} ({}): ", tr.t(label_key), form.raw(field));
    let input = read_line(&prompt)?;
    let input = input.trim();
    if !input.is_empty() {
        form.set_raw(field, input.to_string());
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}
