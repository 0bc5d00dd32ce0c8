//! 공기 물성 근사. 모든 열 계산은 단일 체적 비열 상수를 사용한다.

pub mod properties;

pub use properties::VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K;
