//! 풍량 산정 시나리오 회귀 테스트.
use hvac_sizing_toolbox::{
    air::VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K,
    form::FormState,
    session::{self, FormEvent},
    ventilation::{
        range_policy::{repair_range, resolve_range},
        recommend_flow, supply_temperatures, ComfortHint, FlowRange, RangeMode, RoomGeometry,
        ThermalLoad,
    },
};

#[test]
fn hygienic_flow_is_two_air_changes() {
    let rec = recommend_flow(&RoomGeometry::new(20.0, 2.5), &ThermalLoad::default()).unwrap();
    assert_eq!(rec.hygienic_flow_m3_per_h, 100.0);
}

#[test]
fn zero_loads_use_one_watt_floor() {
    let rec = recommend_flow(&RoomGeometry::new(10.0, 3.0), &ThermalLoad::default()).unwrap();
    let expected = 1.0 / (VOLUMETRIC_HEAT_CAPACITY_WH_PER_M3K * 8.0);
    assert!((rec.load_based_flow_m3_per_h - expected).abs() < 1e-12);
}

#[test]
fn office_heating_at_300_m3h_is_warning() {
    // 20 m² x 2.5 m, 2 kW 난방, 21 °C
    let res = supply_temperatures(300.0, 21.0, &ThermalLoad::from_kilowatts(2.0, 0.0));
    let heating = res.heating.expect("heating supply");
    assert!((heating.spread_k - 19.6).abs() < 0.01, "dT={}", heating.spread_k);
    assert!((heating.supply_temp_c - 40.6).abs() < 0.01);
    assert_eq!(heating.hint, ComfortHint::Warning);
    assert!(res.cooling.is_none());
}

#[test]
fn high_heating_spread_is_critical() {
    let res = supply_temperatures(100.0, 21.0, &ThermalLoad::from_kilowatts(2.0, 0.0));
    assert_eq!(res.heating.unwrap().hint, ComfortHint::Critical);
}

#[test]
fn cooling_draft_warning_and_critical() {
    let load = ThermalLoad::from_kilowatts(0.0, 1.0);
    // 1000 / (340 * 0.34) = 8.65 K
    let warn = supply_temperatures(340.0, 24.0, &load).cooling.unwrap();
    assert_eq!(warn.hint, ComfortHint::Warning);
    assert!(warn.supply_temp_c < 24.0);
    // 1000 / (200 * 0.34) = 14.7 K
    let crit = supply_temperatures(200.0, 24.0, &load).cooling.unwrap();
    assert_eq!(crit.hint, ComfortHint::Critical);
}

#[test]
fn zero_flow_has_no_temperatures_or_hints() {
    let res = supply_temperatures(0.0, 21.0, &ThermalLoad::from_kilowatts(5.0, 5.0));
    assert!(res.heating.is_none());
    assert!(res.cooling.is_none());
}

#[test]
fn inverted_user_range_is_repaired_to_80_percent() {
    let (range, repaired) = repair_range(FlowRange::new(500.0, 400.0));
    assert!(repaired);
    assert_eq!(range.min_m3_per_h, 320.0);
    assert_eq!(range.max_m3_per_h, 400.0);
}

#[test]
fn repair_mode_does_not_recompute_from_loads() {
    let rec = recommend_flow(
        &RoomGeometry::new(100.0, 3.0),
        &ThermalLoad::from_kilowatts(20.0, 0.0),
    )
    .unwrap();
    let out = resolve_range(
        RangeMode::Repair,
        &rec,
        300.0,
        FlowRange::new(150.0, 900.0),
        600.0,
    );
    assert_eq!(out.range, FlowRange::new(150.0, 900.0));
    assert_eq!(out.flow_m3_per_h, 600.0);
    assert!(!out.repaired);
}

#[test]
fn form_session_follows_event_sequence() {
    let mut form = FormState {
        room_area: "20".into(),
        room_height: "2,5".into(),
        heating_load_kw: "2".into(),
        cooling_load_kw: "".into(),
        room_temperature: "".into(),
        ..FormState::default()
    };
    let loaded = session::handle_event(&mut form, FormEvent::PageLoaded);
    assert_eq!(loaded.flow_m3_per_h, 100.0);
    assert_eq!(form.volume_flow_min, "50");

    form.volume_flow_min = "500".into();
    form.volume_flow_max = "400".into();
    let repaired = session::handle_event(&mut form, FormEvent::RangeBoundsChanged);
    assert_eq!(repaired.range, FlowRange::new(320.0, 400.0));
    assert!(repaired.range.contains(repaired.flow_m3_per_h));

    let moved = session::move_slider(&mut form, 10.0);
    assert_eq!(moved.flow_m3_per_h, 320.0);
    assert_eq!(moved.range, FlowRange::new(320.0, 400.0));

    // 형상 변경은 범위를 다시 계산하고 입력 칸을 덮어쓴다.
    form.room_area = "40".into();
    let reset = session::handle_event(&mut form, FormEvent::RoomInputChanged);
    assert_eq!(reset.applied_mode, Some(RangeMode::Reset));
    assert_eq!(form.volume_flow_min, "100");
    assert_eq!(reset.flow_m3_per_h, 200.0);
}

#[test]
fn hints_at_exact_thresholds_stay_on_lower_level() {
    // 250 m³/h x 0.34 = 85 W/K
    let at_limits = supply_temperatures(250.0, 21.0, &ThermalLoad::new(1700.0, 850.0));
    let heating = at_limits.heating.unwrap();
    let cooling = at_limits.cooling.unwrap();
    assert_eq!(heating.spread_k, 20.0);
    assert_eq!(heating.hint, ComfortHint::Warning);
    assert_eq!(cooling.spread_k, 10.0);
    assert_eq!(cooling.hint, ComfortHint::Warning);

    let at_warning = supply_temperatures(250.0, 21.0, &ThermalLoad::new(1275.0, 680.0));
    assert_eq!(at_warning.heating.unwrap().hint, ComfortHint::None);
    assert_eq!(at_warning.cooling.unwrap().hint, ComfortHint::None);
}
