/// 공기의 체적 비열 근사값 [Wh/(m³·K)].
///
/// 밀도 약 1.2 kg/m³, 비열 약 1.0 kJ/(kg·K)를 하나로 묶은 값이다.
/// 습도와 온도에 따른 변화는 고려하지 않는다.
pub const VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K: f64 = 0.34;

/// 주어진 열량을 주어진 유량으로 옮길 때 필요한 온도차 [K].
///
/// 유량이 0 이하이면 정의되지 않으므로 None.
pub fn temperature_spread_k(power_w: f64, flow_m3_per_h: f64) -> Option<f64> {
    if flow_m3_per_h <= 0.0 {
        return None;
    }
    Some(power_w / (flow_m3_per_h * VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K))
}

/// 주어진 열량을 주어진 온도차로 옮길 때 필요한 유량 [m³/h].
pub fn flow_for_spread_m3_per_h(power_w: f64, delta_t_k: f64) -> f64 {
    power_w / (VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K * delta_t_k)
}
