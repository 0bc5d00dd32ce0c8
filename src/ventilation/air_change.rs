/// 시간당 환기 횟수 [1/h]. 실 체적이 0 이하이면 표시하지 않는다.
pub fn air_change_rate_per_h(flow_m3_per_h: f64, room_volume_m3: f64) -> Option<f64> {
    (room_volume_m3 > 0.0).then(|| flow_m3_per_h / room_volume_m3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_flow_over_volume() {
        assert_eq!(air_change_rate_per_h(300.0, 50.0), Some(6.0));
        assert_eq!(air_change_rate_per_h(300.0, 0.0), None);
    }
}
