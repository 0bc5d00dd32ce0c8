//! 환기 유량 산정 모듈.
//! 유량 추천, 슬라이더 범위 정책, 급기 온도/경고, 환기 횟수 계산으로 구성한다.

pub mod air_change;
pub mod flow_recommender;
pub mod range_policy;
pub mod supply_temperature;

pub use air_change::air_change_rate_per_h;
pub use flow_recommender::{recommend_flow, FlowRecommendation, RoomGeometry, ThermalLoad};
pub use range_policy::{resolve_range, FlowRange, RangeMode, RangeOutcome};
pub use supply_temperature::{
    supply_temperatures, ComfortHint, SupplyAir, SupplyTemperatures, DEFAULT_ROOM_TEMPERATURE_C,
};
