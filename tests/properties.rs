//! 산정 법칙에 대한 속성 테스트.
use hvac_sizing_toolbox::{
    session::{recompute, SizingInputs},
    ventilation::{
        range_policy::{repair_range, resolve_range},
        recommend_flow, supply_temperatures, FlowRange, RangeMode, RoomGeometry, ThermalLoad,
    },
};
use proptest::prelude::*;

fn inputs(area: f64, height: f64, heating_kw: f64, min: f64, max: f64, flow: f64) -> SizingInputs {
    SizingInputs {
        geometry: RoomGeometry::new(area, height),
        load: ThermalLoad::from_kilowatts(heating_kw, 0.0),
        room_temp_c: 21.0,
        entered_range: FlowRange::new(min, max),
        slider_range: FlowRange::new(0.0, 1000.0),
        flow_m3_per_h: flow,
    }
}

proptest! {
    #[test]
    fn hygienic_flow_is_exact(area in 0.1_f64..500.0, height in 0.1_f64..10.0) {
        let geometry = RoomGeometry::new(area, height);
        let rec = recommend_flow(&geometry, &ThermalLoad::default()).unwrap();
        prop_assert_eq!(rec.hygienic_flow_m3_per_h, area * height * 2.0);
    }

    #[test]
    fn repaired_range_is_ordered(min in 0.0_f64..5000.0, max in 0.0_f64..5000.0) {
        let (range, repaired) = repair_range(FlowRange::new(min, max));
        prop_assert!(range.min_m3_per_h <= range.max_m3_per_h);
        if repaired && max > 0.0 {
            prop_assert!(range.min_m3_per_h < range.max_m3_per_h);
        }
    }

    #[test]
    fn flow_is_clamped_after_any_range_change(
        area in 0.1_f64..300.0,
        height in 0.1_f64..6.0,
        heating_kw in 0.0_f64..50.0,
        min in -100.0_f64..3000.0,
        max in -100.0_f64..3000.0,
        flow in -100.0_f64..5000.0,
        reset in any::<bool>(),
    ) {
        let geometry = RoomGeometry::new(area, height);
        let load = ThermalLoad::from_kilowatts(heating_kw, 0.0);
        let rec = recommend_flow(&geometry, &load).unwrap();
        let mode = if reset { RangeMode::Reset } else { RangeMode::Repair };
        let out = resolve_range(mode, &rec, geometry.volume_m3(), FlowRange::new(min, max), flow);
        prop_assert!(out.range.min_m3_per_h <= out.range.max_m3_per_h);
        prop_assert!(out.range.contains(out.flow_m3_per_h));
    }

    #[test]
    fn heating_supply_rises_with_load(
        flow in 1.0_f64..5000.0,
        p in 1.0_f64..50_000.0,
        extra in 1.0_f64..10_000.0,
    ) {
        let low = supply_temperatures(flow, 21.0, &ThermalLoad::new(p, 0.0));
        let high = supply_temperatures(flow, 21.0, &ThermalLoad::new(p + extra, 0.0));
        let (low, high) = (low.heating.unwrap(), high.heating.unwrap());
        prop_assert!(high.supply_temp_c > low.supply_temp_c);
    }

    #[test]
    fn repair_recompute_is_idempotent(
        area in 0.0_f64..200.0,
        height in 0.0_f64..5.0,
        heating_kw in 0.0_f64..20.0,
        min in 0.0_f64..2000.0,
        max in 0.0_f64..2000.0,
        flow in 0.0_f64..2000.0,
    ) {
        let i = inputs(area, height, heating_kw, min, max, flow);
        let first = recompute(&i, Some(RangeMode::Repair));
        let again = SizingInputs {
            entered_range: first.range,
            slider_range: first.range,
            flow_m3_per_h: first.flow_m3_per_h,
            ..i
        };
        let second = recompute(&again, Some(RangeMode::Repair));
        prop_assert_eq!(first.range, second.range);
        prop_assert_eq!(first.flow_m3_per_h, second.flow_m3_per_h);
    }
}
