//! 입력 이벤트에 따른 재계산 흐름.
//!
//! 이벤트 종류가 범위를 새로 잡을지(Reset), 사용자 범위를 보정만 할지(Repair),
//! 표시만 갱신할지를 결정한다. 계산 자체는 `recompute`에서 순수 함수로 처리한다.

use tracing::debug;

use crate::form::{format_bound, Field, FormBinding};
use crate::ventilation::{
    air_change_rate_per_h, recommend_flow, resolve_range, supply_temperatures, FlowRange,
    FlowRecommendation, RangeMode, RoomGeometry, SupplyTemperatures, ThermalLoad,
};

/// 폼에서 발생하는 입력 이벤트.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// 최초 표시
    PageLoaded,
    /// 면적/높이/부하/실온 변경
    RoomInputChanged,
    /// min/max 입력 칸 변경
    RangeBoundsChanged,
    /// 슬라이더 이동
    SliderMoved,
}

impl FormEvent {
    /// 이벤트가 요구하는 범위 처리 방식. 슬라이더 이동은 범위를 건드리지 않는다.
    pub fn range_mode(&self) -> Option<RangeMode> {
        match self {
            FormEvent::PageLoaded | FormEvent::RoomInputChanged => Some(RangeMode::Reset),
            FormEvent::RangeBoundsChanged => Some(RangeMode::Repair),
            FormEvent::SliderMoved => None,
        }
    }
}

/// 재계산에 필요한 입력 전체.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInputs {
    pub geometry: RoomGeometry,
    pub load: ThermalLoad,
    pub room_temp_c: f64,
    /// min/max 입력 칸의 값
    pub entered_range: FlowRange,
    /// 현재 슬라이더 범위
    pub slider_range: FlowRange,
    /// 현재 슬라이더 유량 [m³/h]
    pub flow_m3_per_h: f64,
}

impl SizingInputs {
    pub fn from_form<F: FormBinding + ?Sized>(form: &F) -> Self {
        Self {
            geometry: form.geometry(),
            load: form.load(),
            room_temp_c: form.room_temperature_c(),
            entered_range: form.entered_range(),
            slider_range: form.slider_range(),
            flow_m3_per_h: form.slider_value(),
        }
    }
}

/// 한 번의 재계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingOutcome {
    /// 형상이 유효할 때만 존재
    pub recommendation: Option<FlowRecommendation>,
    pub range: FlowRange,
    /// 범위를 새로 잡았거나 보정했을 때의 방식. 그대로 두었으면 None.
    pub applied_mode: Option<RangeMode>,
    pub range_repaired: bool,
    pub flow_m3_per_h: f64,
    pub supply: SupplyTemperatures,
    pub air_change_rate_per_h: Option<f64>,
}

/// 입력과 범위 처리 방식으로 전체 결과를 계산한다.
///
/// 형상이 유효하지 않으면 범위와 유량은 현재 값을 유지한다.
pub fn recompute(inputs: &SizingInputs, mode: Option<RangeMode>) -> SizingOutcome {
    let volume = inputs.geometry.volume_m3();
    let recommendation = recommend_flow(&inputs.geometry, &inputs.load);

    let (range, flow, applied_mode, repaired) = match (mode, recommendation.as_ref()) {
        (Some(mode), Some(rec)) => {
            let out = resolve_range(
                mode,
                rec,
                volume,
                inputs.entered_range,
                inputs.flow_m3_per_h,
            );
            (out.range, out.flow_m3_per_h, Some(mode), out.repaired)
        }
        _ => (inputs.slider_range, inputs.flow_m3_per_h, None, false),
    };
    debug!(
        ?mode,
        ?applied_mode,
        flow,
        min = range.min_m3_per_h,
        max = range.max_m3_per_h,
        "recompute"
    );

    SizingOutcome {
        recommendation,
        range,
        applied_mode,
        range_repaired: repaired,
        flow_m3_per_h: flow,
        supply: supply_temperatures(flow, inputs.room_temp_c, &inputs.load),
        air_change_rate_per_h: air_change_rate_per_h(flow, volume),
    }
}

/// 폼 이벤트를 처리한다. 입력을 읽어 재계산하고 슬라이더 상태를 되돌려 쓴다.
///
/// 범위를 새로 잡은 경우에만 min/max 입력 칸을 덮어쓴다. 사용자가 직접 입력한
/// 값은 보정되더라도 칸 내용은 그대로 두고 슬라이더 범위에만 반영한다.
pub fn handle_event<F: FormBinding + ?Sized>(form: &mut F, event: FormEvent) -> SizingOutcome {
    let inputs = SizingInputs::from_form(form);
    let outcome = recompute(&inputs, event.range_mode());
    if let Some(mode) = outcome.applied_mode {
        form.set_slider_range(outcome.range);
        if mode == RangeMode::Reset {
            form.set_raw(Field::VolumeFlowMin, format_bound(outcome.range.min_m3_per_h));
            form.set_raw(Field::VolumeFlowMax, format_bound(outcome.range.max_m3_per_h));
        }
    }
    form.set_slider_value(outcome.flow_m3_per_h);
    outcome
}

/// 슬라이더를 옮긴다. 값은 현재 슬라이더 범위 안으로 제한되고 표시만 다시 계산한다.
pub fn move_slider<F: FormBinding + ?Sized>(form: &mut F, flow_m3_per_h: f64) -> SizingOutcome {
    let range = form.slider_range();
    form.set_slider_value(range.clamp(flow_m3_per_h));
    handle_event(form, FormEvent::SliderMoved)
}

/// 한 번에 적용할 사용자 조작. 주어진 항목만 재생한다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjustments {
    pub min_m3_per_h: Option<f64>,
    pub max_m3_per_h: Option<f64>,
    pub flow_m3_per_h: Option<f64>,
}

/// 최초 계산 → 범위 입력 → 슬라이더 이동 순서로 이벤트를 재생한다.
///
/// min/max 중 하나만 주어지면 다른 칸은 최초 계산이 채운 값을 쓴다.
pub fn replay<F: FormBinding + ?Sized>(form: &mut F, adjustments: &Adjustments) -> SizingOutcome {
    let mut outcome = handle_event(form, FormEvent::PageLoaded);
    if adjustments.min_m3_per_h.is_some() || adjustments.max_m3_per_h.is_some() {
        if let Some(min) = adjustments.min_m3_per_h {
            form.set_raw(Field::VolumeFlowMin, min.to_string());
        }
        if let Some(max) = adjustments.max_m3_per_h {
            form.set_raw(Field::VolumeFlowMax, max.to_string());
        }
        outcome = handle_event(form, FormEvent::RangeBoundsChanged);
    }
    if let Some(flow) = adjustments.flow_m3_per_h {
        outcome = move_slider(form, flow);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    fn office() -> FormState {
        FormState {
            room_area: "20".into(),
            room_height: "2.5".into(),
            heating_load_kw: "2".into(),
            cooling_load_kw: "0".into(),
            room_temperature: "21".into(),
            ..FormState::default()
        }
    }

    #[test]
    fn event_modes() {
        assert_eq!(FormEvent::PageLoaded.range_mode(), Some(RangeMode::Reset));
        assert_eq!(FormEvent::RoomInputChanged.range_mode(), Some(RangeMode::Reset));
        assert_eq!(FormEvent::RangeBoundsChanged.range_mode(), Some(RangeMode::Repair));
        assert_eq!(FormEvent::SliderMoved.range_mode(), None);
    }

    #[test]
    fn page_load_fills_range_fields() {
        let mut form = office();
        let out = handle_event(&mut form, FormEvent::PageLoaded);
        assert_eq!(form.volume_flow_min, "50");
        assert_eq!(form.volume_flow_max, "1200");
        assert_eq!(form.slider, 100.0);
        assert_eq!(out.applied_mode, Some(RangeMode::Reset));
    }

    #[test]
    fn repaired_bounds_leave_fields_untouched() {
        let mut form = office();
        handle_event(&mut form, FormEvent::PageLoaded);
        form.volume_flow_min = "500".into();
        form.volume_flow_max = "400".into();
        let out = handle_event(&mut form, FormEvent::RangeBoundsChanged);
        assert!(out.range_repaired);
        assert_eq!(form.slider_range, FlowRange::new(320.0, 400.0));
        assert_eq!(form.volume_flow_min, "500");
        assert_eq!(form.slider, 320.0);
    }

    #[test]
    fn invalid_geometry_keeps_slider_state() {
        let mut form = office();
        handle_event(&mut form, FormEvent::PageLoaded);
        form.room_height.clear();
        form.volume_flow_min = "0".into();
        let out = handle_event(&mut form, FormEvent::RoomInputChanged);
        assert!(out.recommendation.is_none());
        assert_eq!(out.applied_mode, None);
        assert_eq!(form.slider_range, FlowRange::new(50.0, 1200.0));
        assert_eq!(form.slider, 100.0);
        assert!(out.air_change_rate_per_h.is_none());
    }

    #[test]
    fn slider_is_clamped_and_range_untouched() {
        let mut form = office();
        handle_event(&mut form, FormEvent::PageLoaded);
        let out = move_slider(&mut form, 5000.0);
        assert_eq!(out.flow_m3_per_h, 1200.0);
        assert_eq!(out.applied_mode, None);
        assert_eq!(form.volume_flow_max, "1200");
    }

    #[test]
    fn zero_max_falls_back_to_default_upper_bound() {
        let mut form = office();
        handle_event(&mut form, FormEvent::PageLoaded);
        form.volume_flow_max = "0".into();
        let out = handle_event(&mut form, FormEvent::RangeBoundsChanged);
        assert_eq!(out.range, FlowRange::new(50.0, 1000.0));
        assert!(!out.range_repaired);
        assert_eq!(out.flow_m3_per_h, 100.0);
        assert!(out.supply.heating.is_some());
    }

    #[test]
    fn replay_without_adjustments_is_page_load() {
        let mut form = office();
        let out = replay(&mut form, &Adjustments::default());
        assert_eq!(out.applied_mode, Some(RangeMode::Reset));
        assert_eq!(out.range, FlowRange::new(50.0, 1200.0));
        assert_eq!(out.flow_m3_per_h, 100.0);
    }

    #[test]
    fn replay_with_only_max_keeps_proposed_min() {
        let mut form = office();
        let out = replay(
            &mut form,
            &Adjustments {
                max_m3_per_h: Some(400.0),
                ..Adjustments::default()
            },
        );
        assert_eq!(out.applied_mode, Some(RangeMode::Repair));
        assert_eq!(out.range, FlowRange::new(50.0, 400.0));
        assert_eq!(out.flow_m3_per_h, 100.0);
        assert_eq!(form.volume_flow_min, "50");
    }

    #[test]
    fn replay_applies_bounds_before_flow() {
        let mut form = office();
        let out = replay(
            &mut form,
            &Adjustments {
                min_m3_per_h: Some(500.0),
                max_m3_per_h: Some(400.0),
                flow_m3_per_h: Some(1000.0),
            },
        );
        // 뒤집힌 범위가 먼저 보정되고 유량은 보정된 범위로 제한된다.
        assert_eq!(out.range, FlowRange::new(320.0, 400.0));
        assert_eq!(out.flow_m3_per_h, 400.0);
        assert_eq!(out.applied_mode, None);
    }
}
