use tracing::debug;

use super::flow_recommender::FlowRecommendation;

/// 실험실 수준의 높은 환기 횟수 [1/h]. 최대값 산정에만 쓴다.
pub const LAB_AIR_CHANGES_PER_H: f64 = 8.0;
/// 최대값 산정 시 여유율
pub const MAX_HEADROOM: f64 = 1.5;
/// 최대값 하한 [m³/h]
pub const MIN_UPPER_BOUND_M3_PER_H: f64 = 500.0;
/// 사용자가 최대값을 비우면 쓰는 값 [m³/h]
pub const FALLBACK_UPPER_BOUND_M3_PER_H: f64 = 1000.0;

/// 슬라이더 유량 범위 [m³/h]. 정책을 통과한 값은 항상 min <= max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRange {
    pub min_m3_per_h: f64,
    pub max_m3_per_h: f64,
}

impl Default for FlowRange {
    fn default() -> Self {
        Self {
            min_m3_per_h: 0.0,
            max_m3_per_h: FALLBACK_UPPER_BOUND_M3_PER_H,
        }
    }
}

impl FlowRange {
    pub fn new(min_m3_per_h: f64, max_m3_per_h: f64) -> Self {
        Self {
            min_m3_per_h,
            max_m3_per_h,
        }
    }

    /// 유량을 범위 안으로 제한한다.
    pub fn clamp(&self, flow_m3_per_h: f64) -> f64 {
        flow_m3_per_h
            .max(self.min_m3_per_h)
            .min(self.max_m3_per_h)
    }

    pub fn contains(&self, flow_m3_per_h: f64) -> bool {
        flow_m3_per_h >= self.min_m3_per_h && flow_m3_per_h <= self.max_m3_per_h
    }
}

/// 범위를 다시 계산할지, 사용자가 입력한 범위를 보정만 할지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// 추천 유량으로부터 범위와 기본 유량을 새로 정한다.
    Reset,
    /// 사용자가 입력한 min/max를 유지하되 뒤집힌 범위만 고친다.
    Repair,
}

/// 범위 정책 적용 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOutcome {
    pub range: FlowRange,
    /// 범위 안으로 제한된 현재 유량 [m³/h]
    pub flow_m3_per_h: f64,
    /// min >= max 보정이 일어났는지
    pub repaired: bool,
}

/// 추천 유량에서 슬라이더 범위를 제안한다.
///
/// - min: 위생 유량의 절반을 10 단위로 내림
/// - max: 위생/부하/8회 환기 유량 중 최대값의 150 %를 100 단위로 올림, 최소 500
pub fn proposed_range(recommendation: &FlowRecommendation, room_volume_m3: f64) -> FlowRange {
    let hygienic = recommendation.hygienic_flow_m3_per_h;
    let calculated_min = (hygienic / 2.0 / 10.0).floor() * 10.0;
    let largest = hygienic
        .max(recommendation.load_based_flow_m3_per_h)
        .max(room_volume_m3 * LAB_AIR_CHANGES_PER_H);
    let calculated_max = (largest * MAX_HEADROOM / 100.0).ceil() * 100.0;
    FlowRange::new(
        calculated_min.max(0.0),
        calculated_max.max(MIN_UPPER_BOUND_M3_PER_H),
    )
}

/// min >= max 인 범위를 고친다. min을 max의 80 %(10 단위 내림)로 내린다.
///
/// 반환값의 bool은 보정 여부.
pub fn repair_range(range: FlowRange) -> (FlowRange, bool) {
    if range.min_m3_per_h < range.max_m3_per_h {
        return (range, false);
    }
    let min = (range.max_m3_per_h * 0.8 / 10.0).floor() * 10.0;
    debug!(
        from_min = range.min_m3_per_h,
        to_min = min,
        max = range.max_m3_per_h,
        "inverted flow range repaired"
    );
    (FlowRange::new(min, range.max_m3_per_h), true)
}

/// 범위 정책을 적용하고 현재 유량을 범위 안으로 제한한다.
///
/// `user_range`는 입력 칸의 현재 값이다. 음수 경계는 0으로 올린다.
pub fn resolve_range(
    mode: RangeMode,
    recommendation: &FlowRecommendation,
    room_volume_m3: f64,
    user_range: FlowRange,
    current_flow_m3_per_h: f64,
) -> RangeOutcome {
    let (candidate, flow) = match mode {
        RangeMode::Reset => (
            proposed_range(recommendation, room_volume_m3),
            recommendation.hygienic_flow_m3_per_h.round(),
        ),
        RangeMode::Repair => (
            FlowRange::new(
                user_range.min_m3_per_h.max(0.0),
                user_range.max_m3_per_h.max(0.0),
            ),
            current_flow_m3_per_h,
        ),
    };
    let (range, repaired) = repair_range(candidate);
    RangeOutcome {
        range,
        flow_m3_per_h: range.clamp(flow),
        repaired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(hygienic: f64, load_based: f64) -> FlowRecommendation {
        FlowRecommendation {
            hygienic_flow_m3_per_h: hygienic,
            load_based_flow_m3_per_h: load_based,
        }
    }

    #[test]
    fn proposed_range_for_small_office() {
        // 50 m³: 부하 기준 735가 8회 환기 400보다 커서 735 x 1.5 = 1103 -> 1200
        let range = proposed_range(&rec(100.0, 2000.0 / 2.72), 50.0);
        assert_eq!(range.min_m3_per_h, 50.0);
        assert_eq!(range.max_m3_per_h, 1200.0);
    }

    #[test]
    fn upper_bound_never_below_500() {
        let range = proposed_range(&rec(10.0, 1.0 / 2.72), 5.0);
        assert_eq!(range.min_m3_per_h, 0.0);
        assert_eq!(range.max_m3_per_h, 500.0);
    }

    #[test]
    fn repair_leaves_valid_range_alone() {
        let (range, repaired) = repair_range(FlowRange::new(100.0, 400.0));
        assert!(!repaired);
        assert_eq!(range, FlowRange::new(100.0, 400.0));
    }

    #[test]
    fn equal_bounds_are_repaired() {
        let (range, repaired) = repair_range(FlowRange::new(250.0, 250.0));
        assert!(repaired);
        assert_eq!(range.min_m3_per_h, 200.0);
    }

    #[test]
    fn reset_starts_at_rounded_hygienic_flow() {
        let out = resolve_range(
            RangeMode::Reset,
            &rec(123.4, 100.0),
            61.7,
            FlowRange::default(),
            0.0,
        );
        assert_eq!(out.flow_m3_per_h, 123.0);
        assert!(out.range.contains(out.flow_m3_per_h));
    }

    #[test]
    fn repair_keeps_user_bounds_and_clamps_flow() {
        let out = resolve_range(
            RangeMode::Repair,
            &rec(100.0, 100.0),
            50.0,
            FlowRange::new(200.0, 300.0),
            900.0,
        );
        assert_eq!(out.range, FlowRange::new(200.0, 300.0));
        assert_eq!(out.flow_m3_per_h, 300.0);
    }

    #[test]
    fn negative_bounds_are_floored_at_zero() {
        let out = resolve_range(
            RangeMode::Repair,
            &rec(100.0, 100.0),
            50.0,
            FlowRange::new(-50.0, -10.0),
            20.0,
        );
        assert_eq!(out.range, FlowRange::new(0.0, 0.0));
        assert_eq!(out.flow_m3_per_h, 0.0);
    }
}
