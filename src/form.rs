//! 입력 폼 바인딩. 계산 로직은 이 트레이트를 통해서만 입력을 읽고 결과를 쓴다.

use crate::ventilation::range_policy::FALLBACK_UPPER_BOUND_M3_PER_H;
use crate::ventilation::{FlowRange, RoomGeometry, ThermalLoad, DEFAULT_ROOM_TEMPERATURE_C};

/// 폼의 입력 칸.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RoomArea,
    RoomHeight,
    /// 난방 부하 [kW]
    HeatingLoad,
    /// 냉방 부하 [kW]
    CoolingLoad,
    RoomTemperature,
    VolumeFlowMin,
    VolumeFlowMax,
}

impl Field {
    /// 값이 비었거나 숫자가 아닐 때 쓰는 기본값.
    pub fn fallback(&self) -> f64 {
        match self {
            Field::RoomTemperature => DEFAULT_ROOM_TEMPERATURE_C,
            Field::VolumeFlowMax => FALLBACK_UPPER_BOUND_M3_PER_H,
            _ => 0.0,
        }
    }

    /// 0을 빈 칸과 같이 취급하는 칸. 최대 유량 0은 슬라이더를 0 폭으로 만든다.
    fn zero_means_unset(&self) -> bool {
        matches!(self, Field::RoomTemperature | Field::VolumeFlowMax)
    }
}

/// 입력 문자열을 숫자로 해석한다. 소수점 쉼표(2,5)도 허용한다.
///
/// 비었거나 유한한 숫자가 아니면 None.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 폼과 계산 로직 사이의 경계.
///
/// 읽기는 원시 문자열, 쓰기는 계산된 범위/유량만 다룬다.
pub trait FormBinding {
    /// 입력 칸의 원시 문자열
    fn raw(&self, field: Field) -> &str;
    /// 입력 칸 값을 덮어쓴다(범위 재설정 시 min/max 칸).
    fn set_raw(&mut self, field: Field, value: String);
    /// 현재 슬라이더 유량 [m³/h]
    fn slider_value(&self) -> f64;
    fn set_slider_value(&mut self, flow_m3_per_h: f64);
    /// 현재 슬라이더 범위
    fn slider_range(&self) -> FlowRange;
    fn set_slider_range(&mut self, range: FlowRange);

    /// 숫자 값. 해석할 수 없으면 칸별 기본값.
    fn number(&self, field: Field) -> f64 {
        parse_number(self.raw(field))
            .filter(|v| !(field.zero_means_unset() && *v == 0.0))
            .unwrap_or_else(|| field.fallback())
    }

    fn geometry(&self) -> RoomGeometry {
        RoomGeometry::new(self.number(Field::RoomArea), self.number(Field::RoomHeight))
    }

    fn load(&self) -> ThermalLoad {
        ThermalLoad::from_kilowatts(
            self.number(Field::HeatingLoad),
            self.number(Field::CoolingLoad),
        )
    }

    fn room_temperature_c(&self) -> f64 {
        self.number(Field::RoomTemperature)
    }

    /// min/max 입력 칸에 적힌 범위(보정 전)
    fn entered_range(&self) -> FlowRange {
        FlowRange::new(
            self.number(Field::VolumeFlowMin),
            self.number(Field::VolumeFlowMax),
        )
    }
}

/// 메모리 상의 폼. CLI, GUI, 테스트가 공용으로 쓴다.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub room_area: String,
    pub room_height: String,
    pub heating_load_kw: String,
    pub cooling_load_kw: String,
    pub room_temperature: String,
    pub volume_flow_min: String,
    pub volume_flow_max: String,
    pub slider: f64,
    pub slider_range: FlowRange,
}

impl Default for FormState {
    fn default() -> Self {
        let range = FlowRange::default();
        Self {
            room_area: String::new(),
            room_height: String::new(),
            heating_load_kw: String::new(),
            cooling_load_kw: String::new(),
            room_temperature: String::new(),
            volume_flow_min: format_bound(range.min_m3_per_h),
            volume_flow_max: format_bound(range.max_m3_per_h),
            slider: 0.0,
            slider_range: range,
        }
    }
}

impl FormState {
    /// 필드의 가변 참조. GUI 텍스트 입력에 바로 연결한다.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::RoomArea => &mut self.room_area,
            Field::RoomHeight => &mut self.room_height,
            Field::HeatingLoad => &mut self.heating_load_kw,
            Field::CoolingLoad => &mut self.cooling_load_kw,
            Field::RoomTemperature => &mut self.room_temperature,
            Field::VolumeFlowMin => &mut self.volume_flow_min,
            Field::VolumeFlowMax => &mut self.volume_flow_max,
        }
    }
}

impl FormBinding for FormState {
    fn raw(&self, field: Field) -> &str {
        match field {
            Field::RoomArea => &self.room_area,
            Field::RoomHeight => &self.room_height,
            Field::HeatingLoad => &self.heating_load_kw,
            Field::CoolingLoad => &self.cooling_load_kw,
            Field::RoomTemperature => &self.room_temperature,
            Field::VolumeFlowMin => &self.volume_flow_min,
            Field::VolumeFlowMax => &self.volume_flow_max,
        }
    }

    fn set_raw(&mut self, field: Field, value: String) {
        *self.field_mut(field) = value;
    }

    fn slider_value(&self) -> f64 {
        self.slider
    }

    fn set_slider_value(&mut self, flow_m3_per_h: f64) {
        self.slider = flow_m3_per_h;
    }

    fn slider_range(&self) -> FlowRange {
        self.slider_range
    }

    fn set_slider_range(&mut self, range: FlowRange) {
        self.slider_range = range;
    }
}

/// 범위 경계를 입력 칸 문자열로 쓴다(정수 m³/h).
pub fn format_bound(value_m3_per_h: f64) -> String {
    format!("{value_m3_per_h:.0}")
}
