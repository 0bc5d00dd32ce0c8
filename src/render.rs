//! 계산 결과를 화면 표시용 문자열로 바꾼다.

use crate::i18n::{keys, Translator};
use crate::session::SizingOutcome;
use crate::ventilation::{ComfortHint, FlowRange, SupplyAir};

/// 값이 없을 때 표시하는 온도 자리표시자.
pub const TEMPERATURE_PLACEHOLDER: &str = "-- °C";

/// 표시 가능한 경고 문구.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintView {
    pub severity: ComfortHint,
    pub message: String,
}

/// 한 번의 재계산에 대한 표시 내용.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingView {
    /// 형상이 유효하지 않으면 None
    pub recommended_flow: Option<String>,
    pub volume_flow: String,
    pub range: String,
    pub supply_heating: String,
    pub supply_cooling: String,
    /// 실 체적이 0이면 숨김
    pub air_change: Option<String>,
    pub heating_hint: Option<HintView>,
    pub cooling_hint: Option<HintView>,
    /// 범위 보정 안내
    pub range_notice: Option<String>,
}

pub fn format_flow(flow_m3_per_h: f64) -> String {
    format!("{flow_m3_per_h:.0} m³/h")
}

pub fn format_range(range: &FlowRange) -> String {
    format!("{:.0} – {:.0} m³/h", range.min_m3_per_h, range.max_m3_per_h)
}

pub fn format_supply_temperature(supply: Option<&SupplyAir>) -> String {
    match supply {
        Some(s) => format!("{:.1} °C", s.supply_temp_c),
        None => TEMPERATURE_PLACEHOLDER.to_string(),
    }
}

fn hint_view(
    tr: &Translator,
    hint: ComfortHint,
    critical_key: &str,
    warning_key: &str,
) -> Option<HintView> {
    let key = match hint {
        ComfortHint::Critical => critical_key,
        ComfortHint::Warning => warning_key,
        ComfortHint::None => return None,
    };
    Some(HintView {
        severity: hint,
        message: tr.t(key).to_string(),
    })
}

/// 결과를 번역된 표시 문자열로 만든다.
pub fn render(outcome: &SizingOutcome, tr: &Translator) -> SizingView {
    let heating_hint = outcome.supply.heating.and_then(|s| {
        hint_view(
            tr,
            s.hint,
            keys::HINT_HEATING_CRITICAL,
            keys::HINT_HEATING_WARNING,
        )
    });
    let cooling_hint = outcome.supply.cooling.and_then(|s| {
        hint_view(
            tr,
            s.hint,
            keys::HINT_COOLING_CRITICAL,
            keys::HINT_COOLING_WARNING,
        )
    });
    SizingView {
        recommended_flow: outcome
            .recommendation
            .map(|r| format_flow(r.hygienic_flow_m3_per_h)),
        volume_flow: format!("{:.0}", outcome.flow_m3_per_h),
        range: format_range(&outcome.range),
        supply_heating: format_supply_temperature(outcome.supply.heating.as_ref()),
        supply_cooling: format_supply_temperature(outcome.supply.cooling.as_ref()),
        air_change: outcome
            .air_change_rate_per_h
            .map(|n| tr.fill(keys::RESULT_AIR_CHANGE, &[("rate", format!("{n:.1}"))])),
        heating_hint,
        cooling_hint,
        range_notice: outcome.range_repaired.then(|| {
            tr.fill(
                keys::RESULT_RANGE_REPAIRED,
                &[("min", format!("{:.0}", outcome.range.min_m3_per_h))],
            )
        }),
    }
}

impl SizingView {
    /// CLI 출력용 여러 줄 문자열.
    pub fn to_lines(&self, tr: &Translator) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(rec) = &self.recommended_flow {
            lines.push(format!("{} {rec}", tr.t(keys::RESULT_RECOMMENDED_FLOW)));
        }
        lines.push(format!(
            "{} {} m³/h  ({} {})",
            tr.t(keys::RESULT_VOLUME_FLOW),
            self.volume_flow,
            tr.t(keys::RESULT_RANGE),
            self.range
        ));
        if let Some(notice) = &self.range_notice {
            lines.push(notice.clone());
        }
        if let Some(ach) = &self.air_change {
            lines.push(ach.clone());
        }
        lines.push(format!(
            "{} {}",
            tr.t(keys::RESULT_SUPPLY_HEATING),
            self.supply_heating
        ));
        if let Some(h) = &self.heating_hint {
            lines.push(format!("  {}", h.message));
        }
        lines.push(format!(
            "{} {}",
            tr.t(keys::RESULT_SUPPLY_COOLING),
            self.supply_cooling
        ));
        if let Some(h) = &self.cooling_hint {
            lines.push(format!("  {}", h.message));
        }
        lines
    }
}
