use crate::air::properties::flow_for_spread_m3_per_h;

/// 위생 기준 시간당 환기 횟수 [1/h].
pub const HYGIENIC_AIR_CHANGES_PER_H: f64 = 2.0;

/// 부하 기준 유량 추정에 사용하는 보수적인 급기 온도차 [K].
pub const DESIGN_SPREAD_K: f64 = 8.0;

/// 실 형상 입력.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoomGeometry {
    /// 바닥 면적 [m²]
    pub area_m2: f64,
    /// 천장 높이 [m]
    pub height_m: f64,
}

impl RoomGeometry {
    pub fn new(area_m2: f64, height_m: f64) -> Self {
        Self { area_m2, height_m }
    }

    /// 실 체적 [m³]
    pub fn volume_m3(&self) -> f64 {
        self.area_m2 * self.height_m
    }

    /// 면적과 높이가 모두 양수일 때만 추천 계산을 수행한다.
    pub fn is_sizable(&self) -> bool {
        self.area_m2 > 0.0 && self.height_m > 0.0
    }
}

/// 난방/냉방 부하 [W].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThermalLoad {
    pub heating_w: f64,
    pub cooling_w: f64,
}

impl ThermalLoad {
    pub fn new(heating_w: f64, cooling_w: f64) -> Self {
        Self {
            heating_w,
            cooling_w,
        }
    }

    /// kW 단위 입력을 W로 환산한다.
    pub fn from_kilowatts(heating_kw: f64, cooling_kw: f64) -> Self {
        Self::new(heating_kw * 1000.0, cooling_kw * 1000.0)
    }

    /// 둘 중 큰 부하. 두 부하가 모두 0이어도 1 W 이상을 돌려준다.
    pub fn design_load_w(&self) -> f64 {
        self.heating_w.max(self.cooling_w).max(1.0)
    }
}

/// 유량 추천 결과 [m³/h].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRecommendation {
    /// 2회/h 환기 기준 위생 유량
    pub hygienic_flow_m3_per_h: f64,
    /// 큰 부하를 8 K 온도차로 처리하는 데 필요한 유량
    pub load_based_flow_m3_per_h: f64,
}

/// 실 형상과 부하로 위생 유량과 부하 기준 유량을 구한다.
///
/// 면적이나 높이가 0 이하이면 추천하지 않는다(None).
pub fn recommend_flow(geometry: &RoomGeometry, load: &ThermalLoad) -> Option<FlowRecommendation> {
    if !geometry.is_sizable() {
        return None;
    }
    let hygienic = geometry.volume_m3() * HYGIENIC_AIR_CHANGES_PER_H;
    let load_based = flow_for_spread_m3_per_h(load.design_load_w(), DESIGN_SPREAD_K);
    Some(FlowRecommendation {
        hygienic_flow_m3_per_h: hygienic,
        load_based_flow_m3_per_h: load_based,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_based_flow_uses_larger_load() {
        let rec = recommend_flow(
            &RoomGeometry::new(20.0, 2.5),
            &ThermalLoad::from_kilowatts(1.0, 3.0),
        )
        .unwrap();
        assert!((rec.load_based_flow_m3_per_h - 3000.0 / (0.34 * 8.0)).abs() < 1e-9);
    }

    #[test]
    fn flat_room_is_not_sized() {
        assert!(recommend_flow(&RoomGeometry::new(20.0, 0.0), &ThermalLoad::default()).is_none());
    }
}
