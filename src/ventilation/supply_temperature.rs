use crate::air::properties::temperature_spread_k;

use super::flow_recommender::ThermalLoad;

/// 실온 입력이 없을 때 쓰는 기본값 [°C].
pub const DEFAULT_ROOM_TEMPERATURE_C: f64 = 21.0;

/// 난방 급기 과온도 경고 기준 [K]
pub const HEATING_WARNING_SPREAD_K: f64 = 15.0;
/// 난방 급기 과온도 위험 기준 [K]
pub const HEATING_CRITICAL_SPREAD_K: f64 = 20.0;
/// 냉방 급기 온도차 경고 기준 [K] (드래프트 주의)
pub const COOLING_WARNING_SPREAD_K: f64 = 8.0;
/// 냉방 급기 온도차 위험 기준 [K]
pub const COOLING_CRITICAL_SPREAD_K: f64 = 10.0;

/// 쾌적성 경고 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ComfortHint {
    #[default]
    None,
    Warning,
    Critical,
}

impl ComfortHint {
    fn classify(spread_k: f64, warning_k: f64, critical_k: f64) -> Self {
        if spread_k > critical_k {
            ComfortHint::Critical
        } else if spread_k > warning_k {
            ComfortHint::Warning
        } else {
            ComfortHint::None
        }
    }

    /// 난방 급기 과온도 분류
    pub fn for_heating(spread_k: f64) -> Self {
        Self::classify(spread_k, HEATING_WARNING_SPREAD_K, HEATING_CRITICAL_SPREAD_K)
    }

    /// 냉방 급기 온도차 분류
    pub fn for_cooling(spread_k: f64) -> Self {
        Self::classify(spread_k, COOLING_WARNING_SPREAD_K, COOLING_CRITICAL_SPREAD_K)
    }
}

/// 한 운전 모드의 급기 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyAir {
    /// 실온과 급기의 온도차 [K], 항상 양수
    pub spread_k: f64,
    /// 급기 온도 [°C]
    pub supply_temp_c: f64,
    pub hint: ComfortHint,
}

/// 난방/냉방 급기 온도. 부하나 유량이 0이면 해당 모드는 None.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupplyTemperatures {
    pub heating: Option<SupplyAir>,
    pub cooling: Option<SupplyAir>,
}

/// 선택 유량에서 난방/냉방 급기 온도와 경고 수준을 계산한다.
///
/// - 난방: T_zu = T_raum + P / (V·cp)
/// - 냉방: T_zu = T_raum - P / (V·cp)
pub fn supply_temperatures(
    flow_m3_per_h: f64,
    room_temp_c: f64,
    load: &ThermalLoad,
) -> SupplyTemperatures {
    if flow_m3_per_h == 0.0 {
        return SupplyTemperatures::default();
    }
    let heating = positive_load(load.heating_w)
        .and_then(|p| temperature_spread_k(p, flow_m3_per_h))
        .map(|dt| SupplyAir {
            spread_k: dt,
            supply_temp_c: room_temp_c + dt,
            hint: ComfortHint::for_heating(dt),
        });
    let cooling = positive_load(load.cooling_w)
        .and_then(|p| temperature_spread_k(p, flow_m3_per_h))
        .map(|dt| SupplyAir {
            spread_k: dt,
            supply_temp_c: room_temp_c - dt,
            hint: ComfortHint::for_cooling(dt),
        });
    SupplyTemperatures { heating, cooling }
}

fn positive_load(power_w: f64) -> Option<f64> {
    (power_w > 0.0).then_some(power_w)
}
