use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::warn;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ROOM: &str = "main_menu.room";
    pub const MAIN_MENU_RANGE: &str = "main_menu.range";
    pub const MAIN_MENU_FLOW: &str = "main_menu.flow";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const ROOM_HEADING: &str = "room.heading";
    pub const RANGE_HEADING: &str = "range.heading";
    pub const FLOW_HEADING: &str = "flow.heading";
    pub const PROMPT_KEEP_NOTE: &str = "prompt.keep_note";

    pub const FIELD_ROOM_AREA: &str = "field.room_area";
    pub const FIELD_ROOM_HEIGHT: &str = "field.room_height";
    pub const FIELD_HEATING_LOAD: &str = "field.heating_load";
    pub const FIELD_COOLING_LOAD: &str = "field.cooling_load";
    pub const FIELD_ROOM_TEMPERATURE: &str = "field.room_temperature";
    pub const FIELD_FLOW_MIN: &str = "field.flow_min";
    pub const FIELD_FLOW_MAX: &str = "field.flow_max";
    pub const FIELD_FLOW: &str = "field.flow";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_RECOMMENDED_FLOW: &str = "result.recommended_flow";
    pub const RESULT_VOLUME_FLOW: &str = "result.volume_flow";
    pub const RESULT_RANGE: &str = "result.range";
    pub const RESULT_SUPPLY_HEATING: &str = "result.supply_heating";
    pub const RESULT_SUPPLY_COOLING: &str = "result.supply_cooling";
    pub const RESULT_AIR_CHANGE: &str = "result.air_change";
    pub const RESULT_RANGE_REPAIRED: &str = "result.range_repaired";

    pub const HINT_HEATING_CRITICAL: &str = "hint.heating_critical";
    pub const HINT_HEATING_WARNING: &str = "hint.heating_warning";
    pub const HINT_COOLING_CRITICAL: &str = "hint.cooling_critical";
    pub const HINT_COOLING_WARNING: &str = "hint.cooling_warning";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_INPUTS_HEADING: &str = "gui.inputs.heading";
    pub const GUI_SETTINGS_TITLE: &str = "gui.settings.title";
    pub const GUI_SETTINGS_LANGUAGE: &str = "gui.settings.language";
    pub const GUI_SETTINGS_LANGUAGE_AUTO: &str = "gui.settings.language_auto";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SETTINGS_ALWAYS_ON_TOP: &str = "gui.settings.always_on_top";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings.save";
    pub const GUI_FORMULA_BUTTON: &str = "gui.formula.button";
    pub const GUI_FORMULA_BODY: &str = "gui.formula.body";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    De,
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::De
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(de/en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 de로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 `locales/`를 보고, 그래도 없으면 내장 문자열만 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩이 우선하고, 영어/한국어에 없는 키는 독일어로 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::De => de(key),
            Language::En => en(key).unwrap_or_else(|| de(key)),
            Language::Ko => ko(key).unwrap_or_else(|| de(key)),
        }
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{name}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "de-de".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("de") => Some("de-de".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "de" => Some("de-de".into()),
        "en" => Some("en-us".into()),
        "ko" => Some("ko-kr".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            warn!(path = %path.display(), "language pack ignored: not a TOML string table");
        }
        map
    };

    // 1) full code (e.g., de-de)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., de)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn de(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Fehler",
        APP_EXIT => "Programm wird beendet.",
        APP_TITLE => "Lüftungs-Auslegungshelfer",
        MAIN_MENU_TITLE => "\n=== Lüftungs-Auslegungshelfer ===",
        MAIN_MENU_ROOM => "1) Raumdaten eingeben",
        MAIN_MENU_RANGE => "2) Volumenstrom-Grenzen (Min/Max)",
        MAIN_MENU_FLOW => "3) Volumenstrom einstellen",
        MAIN_MENU_SETTINGS => "4) Einstellungen",
        MAIN_MENU_EXIT => "0) Beenden",
        PROMPT_MENU_SELECT => "Auswahl: ",
        INVALID_SELECTION_RETRY => "Ungültige Eingabe. Bitte erneut wählen.",
        ROOM_HEADING => "\n-- Raumdaten --",
        RANGE_HEADING => "\n-- Volumenstrom-Grenzen --",
        FLOW_HEADING => "\n-- Volumenstrom --",
        PROMPT_KEEP_NOTE => "Hinweis: Enter übernimmt den Wert in Klammern.",
        FIELD_ROOM_AREA => "Raumfläche [m²]",
        FIELD_ROOM_HEIGHT => "Raumhöhe [m]",
        FIELD_HEATING_LOAD => "Heizlast [kW]",
        FIELD_COOLING_LOAD => "Kühllast [kW]",
        FIELD_ROOM_TEMPERATURE => "Raumtemperatur [°C]",
        FIELD_FLOW_MIN => "Volumenstrom min [m³/h]",
        FIELD_FLOW_MAX => "Volumenstrom max [m³/h]",
        FIELD_FLOW => "Volumenstrom [m³/h]",
        RESULT_HEADING => "\n-- Ergebnis --",
        RESULT_RECOMMENDED_FLOW => "Empfohlener Volumenstrom (hygienisch):",
        RESULT_VOLUME_FLOW => "Gewählter Volumenstrom:",
        RESULT_RANGE => "Reglerbereich:",
        RESULT_SUPPLY_HEATING => "Zulufttemperatur Heizen:",
        RESULT_SUPPLY_COOLING => "Zulufttemperatur Kühlen:",
        RESULT_AIR_CHANGE => "Das entspricht einer Luftwechselrate von {rate} 1/h.",
        RESULT_RANGE_REPAIRED => "Minimum war nicht kleiner als Maximum; Reglerminimum auf {min} m³/h gesetzt.",
        HINT_HEATING_CRITICAL => "KRITISCH: Sehr hohe Übertemperatur!",
        HINT_HEATING_WARNING => "HINWEIS: Hohe Übertemperatur.",
        HINT_COOLING_CRITICAL => "KRITISCH: Sehr hohe Spreizung! Zugluftgefahr!",
        HINT_COOLING_WARNING => "HINWEIS: Spreizung > 8K, Zugluft beachten.",
        SETTINGS_HEADING => "\n-- Einstellungen --",
        SETTINGS_CURRENT_LANGUAGE => "Aktuelle Sprache:",
        SETTINGS_OPTIONS => "1) Automatisch  2) Deutsch  3) English  4) 한국어",
        SETTINGS_PROMPT_CHANGE => "Nummer zum Ändern (Enter = abbrechen): ",
        SETTINGS_INVALID => "Ungültige Eingabe; Sprache unverändert.",
        SETTINGS_SAVED => "Sprache geändert:",
        GUI_INPUTS_HEADING => "Raum und Lasten",
        GUI_SETTINGS_TITLE => "Einstellungen",
        GUI_SETTINGS_LANGUAGE => "Sprache",
        GUI_SETTINGS_LANGUAGE_AUTO => "System",
        GUI_SETTINGS_ALPHA => "Fenstertransparenz",
        GUI_SETTINGS_ALWAYS_ON_TOP => "Immer im Vordergrund",
        GUI_SETTINGS_SAVE => "Einstellungen speichern",
        GUI_FORMULA_BUTTON => "Formeln",
        GUI_FORMULA_BODY => "V_hyg = 2 · A · h\nV_last = max(Q_H, Q_K, 1 W) / (0,34 · 8 K)\nΔT = Q / (V · 0,34)\nT_zu,H = T_raum + ΔT   T_zu,K = T_raum − ΔT\nLuftwechsel n = V / (A · h)",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Ventilation Sizing Helper",
        MAIN_MENU_TITLE => "\n=== Ventilation Sizing Helper ===",
        MAIN_MENU_ROOM => "1) Enter room data",
        MAIN_MENU_RANGE => "2) Volume flow limits (min/max)",
        MAIN_MENU_FLOW => "3) Adjust volume flow",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ROOM_HEADING => "\n-- Room data --",
        RANGE_HEADING => "\n-- Volume flow limits --",
        FLOW_HEADING => "\n-- Volume flow --",
        PROMPT_KEEP_NOTE => "Note: press enter to keep the value in brackets.",
        FIELD_ROOM_AREA => "Room area [m²]",
        FIELD_ROOM_HEIGHT => "Room height [m]",
        FIELD_HEATING_LOAD => "Heating load [kW]",
        FIELD_COOLING_LOAD => "Cooling load [kW]",
        FIELD_ROOM_TEMPERATURE => "Room temperature [°C]",
        FIELD_FLOW_MIN => "Volume flow min [m³/h]",
        FIELD_FLOW_MAX => "Volume flow max [m³/h]",
        FIELD_FLOW => "Volume flow [m³/h]",
        RESULT_HEADING => "\n-- Result --",
        RESULT_RECOMMENDED_FLOW => "Recommended volume flow (hygienic):",
        RESULT_VOLUME_FLOW => "Selected volume flow:",
        RESULT_RANGE => "Slider range:",
        RESULT_SUPPLY_HEATING => "Supply air temperature, heating:",
        RESULT_SUPPLY_COOLING => "Supply air temperature, cooling:",
        RESULT_AIR_CHANGE => "This corresponds to an air change rate of {rate} 1/h.",
        RESULT_RANGE_REPAIRED => "Minimum was not below maximum; slider minimum set to {min} m³/h.",
        HINT_HEATING_CRITICAL => "CRITICAL: Very high over-temperature!",
        HINT_HEATING_WARNING => "NOTE: High over-temperature.",
        HINT_COOLING_CRITICAL => "CRITICAL: Very high spread! Draft risk!",
        HINT_COOLING_WARNING => "NOTE: Spread > 8K, watch for drafts.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Automatic  2) Deutsch  3) English  4) 한국어",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        GUI_INPUTS_HEADING => "Room and loads",
        GUI_SETTINGS_TITLE => "Settings",
        GUI_SETTINGS_LANGUAGE => "Language",
        GUI_SETTINGS_LANGUAGE_AUTO => "System",
        GUI_SETTINGS_ALPHA => "Window transparency",
        GUI_SETTINGS_ALWAYS_ON_TOP => "Always on top",
        GUI_SETTINGS_SAVE => "Save settings",
        GUI_FORMULA_BUTTON => "Formulas",
        GUI_FORMULA_BODY => "V_hyg = 2 · A · h\nV_load = max(Q_h, Q_c, 1 W) / (0.34 · 8 K)\nΔT = Q / (V · 0.34)\nT_sup,h = T_room + ΔT   T_sup,c = T_room − ΔT\nAir change n = V / (A · h)",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "환기 풍량 산정 도우미",
        MAIN_MENU_TITLE => "\n=== 환기 풍량 산정 도우미 ===",
        MAIN_MENU_ROOM => "1) 실 정보 입력",
        MAIN_MENU_RANGE => "2) 풍량 범위 (최소/최대)",
        MAIN_MENU_FLOW => "3) 풍량 조정",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ROOM_HEADING => "\n-- 실 정보 --",
        RANGE_HEADING => "\n-- 풍량 범위 --",
        FLOW_HEADING => "\n-- 풍량 --",
        PROMPT_KEEP_NOTE => "참고: 엔터를 누르면 괄호 안의 값을 유지합니다.",
        FIELD_ROOM_AREA => "바닥 면적 [m²]",
        FIELD_ROOM_HEIGHT => "천장 높이 [m]",
        FIELD_HEATING_LOAD => "난방 부하 [kW]",
        FIELD_COOLING_LOAD => "냉방 부하 [kW]",
        FIELD_ROOM_TEMPERATURE => "실내 온도 [°C]",
        FIELD_FLOW_MIN => "최소 풍량 [m³/h]",
        FIELD_FLOW_MAX => "최대 풍량 [m³/h]",
        FIELD_FLOW => "풍량 [m³/h]",
        RESULT_HEADING => "\n-- 결과 --",
        RESULT_RECOMMENDED_FLOW => "추천 풍량(위생 기준):",
        RESULT_VOLUME_FLOW => "선택 풍량:",
        RESULT_RANGE => "슬라이더 범위:",
        RESULT_SUPPLY_HEATING => "난방 급기 온도:",
        RESULT_SUPPLY_COOLING => "냉방 급기 온도:",
        RESULT_AIR_CHANGE => "환기 횟수 {rate} 1/h 에 해당합니다.",
        RESULT_RANGE_REPAIRED => "최소값이 최대값보다 작지 않아 슬라이더 최소값을 {min} m³/h 로 조정했습니다.",
        HINT_HEATING_CRITICAL => "위험: 급기 과온도가 매우 높습니다!",
        HINT_HEATING_WARNING => "주의: 급기 과온도가 높습니다.",
        HINT_COOLING_CRITICAL => "위험: 온도차가 매우 큽니다! 드래프트 위험!",
        HINT_COOLING_WARNING => "주의: 온도차 > 8K, 드래프트에 유의하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) Deutsch  3) English  4) 한국어",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        GUI_INPUTS_HEADING => "실 정보 및 부하",
        GUI_SETTINGS_TITLE => "설정",
        GUI_SETTINGS_LANGUAGE => "언어",
        GUI_SETTINGS_LANGUAGE_AUTO => "시스템",
        GUI_SETTINGS_ALPHA => "창 투명도",
        GUI_SETTINGS_ALWAYS_ON_TOP => "항상 위",
        GUI_SETTINGS_SAVE => "설정 저장",
        GUI_FORMULA_BUTTON => "계산식",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_german() {
        let tr = Translator::new("fr-fr");
        assert_eq!(tr.language(), Language::De);
        assert_eq!(tr.t(keys::HINT_HEATING_WARNING), "HINWEIS: Hohe Übertemperatur.");
    }

    #[test]
    fn korean_missing_key_uses_german() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t(keys::GUI_FORMULA_BODY), de(keys::GUI_FORMULA_BODY));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("en", Some("de")), "en-us");
        assert_eq!(resolve_language("auto", Some("ko")), "ko-kr");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[hint]\nheating_warning = \"Warm!\"\n").unwrap();
        assert_eq!(map.get(keys::HINT_HEATING_WARNING).map(String::as_str), Some("Warm!"));
    }

    #[test]
    fn template_fill() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::RESULT_AIR_CHANGE, &[("rate", "6.0".into())]);
        assert_eq!(s, "This corresponds to an air change rate of 6.0 1/h.");
    }
}
