mod common;

use common::{reference_vehicle, reference_vehicle_with};
use enersim::config::StudyConfig;
use enersim::range::estimate::{CdSource, find_cd};
use enersim::range::report::compute_all_ranges_with_soc;
use enersim::range::{
    BatteryChemistry, ScenarioName, VehicleParams, compute_all_ranges, compute_card_ranges,
};

#[test]
fn every_scenario_is_reported_once() {
    let report = compute_all_ranges(&reference_vehicle());
    let keys: Vec<&str> = report.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "wltp_combined",
            "real_combined_mild",
            "real_combined_cold",
            "city_mild",
            "city_cold",
            "highway_mild",
            "highway_cold",
            "autobahn_130",
            "autobahn_150",
        ]
    );
}

#[test]
fn card_matches_reference_sedan() {
    let card = compute_card_ranges(&reference_vehicle());
    assert_eq!(card.real_range, 1056.0);
    assert_eq!(card.winter_range, 697.0);
    assert_eq!(card.autobahn_range, 1425.0);
    assert_eq!(card.city_range, 1236.0);
    assert_eq!(card.highway_range, 1335.0);
    assert_eq!(card.consumption_highway, 50.0);
    assert_eq!(card.consumption_city, 57.3);
}

#[test]
fn lfp_loses_range_only_in_the_cold() {
    let nmc = compute_all_ranges(&reference_vehicle_with(BatteryChemistry::Nmc));
    let lfp = compute_all_ranges(&reference_vehicle_with(BatteryChemistry::Lfp));

    for name in ScenarioName::ALL {
        let (n, l) = (nmc.get(name), lfp.get(name));
        let (Some(n), Some(l)) = (n, l) else {
            panic!("{name} missing");
        };
        assert_eq!(n.consumption_wh_km, l.consumption_wh_km, "{name}");
        if name.is_cold() {
            assert!(l.range_km < n.range_km, "{name}: {} vs {}", l.range_km, n.range_km);
        } else {
            assert_eq!(l.range_km, n.range_km, "{name}");
        }
    }
}

#[test]
fn heat_pump_cuts_cold_city_consumption() {
    let with_hp = compute_all_ranges(&reference_vehicle());
    let without_hp = compute_all_ranges(&VehicleParams {
        has_heat_pump: false,
        ..reference_vehicle()
    });

    let c = |r: &enersim::range::RangeReport, n| r.get(n).map_or(0.0, |x| x.consumption_wh_km);
    assert_eq!(c(&with_hp, ScenarioName::CityCold), 123.4);
    assert!(c(&without_hp, ScenarioName::CityCold) > 170.0);
    // mild scenarios do not use the heater
    assert_eq!(
        c(&with_hp, ScenarioName::CityMild),
        c(&without_hp, ScenarioName::CityMild)
    );
}

#[test]
fn uncalibrated_scenarios_keep_raw_range() {
    let report = compute_all_ranges(&reference_vehicle());
    for name in [
        ScenarioName::WltpCombined,
        ScenarioName::Autobahn130,
        ScenarioName::Autobahn150,
    ] {
        let Some(r) = report.get(name) else {
            panic!("{name} missing");
        };
        assert_eq!(r.range_km, r.range_calibrated_km, "{name}");
    }
}

#[test]
fn smaller_soc_window_shrinks_every_range() {
    let full = compute_all_ranges(&reference_vehicle());
    let narrow = compute_all_ranges_with_soc(&reference_vehicle(), 0.80);
    for (name, r) in narrow.iter() {
        let Some(f) = full.get(name) else {
            panic!("{name} missing");
        };
        assert!(r.range_km < f.range_km, "{name}");
    }
}

#[test]
fn estimated_vehicle_from_preset_resolves() {
    let study = StudyConfig::lfp_compact();
    let Some(vehicle) = study.vehicle else {
        panic!("lfp_compact has a vehicle");
    };
    let Ok(resolved) = vehicle.resolve() else {
        panic!("dimensions present, frontal area can be estimated");
    };
    assert!(resolved.frontal_area_estimated);
    assert!(resolved.crr_estimated);
    assert!(resolved.cd_source.is_some());

    let report = compute_all_ranges_with_soc(&resolved.params, resolved.usable_soc_pct);
    assert_eq!(report.len(), 9);
}

#[test]
fn published_cd_lookup_beats_body_style() {
    let hit = find_cd("tesla model-3 long range", Some("SUV"));
    assert_eq!(hit.cd, 0.23);
    assert_eq!(hit.source, CdSource::Published);

    let fallback = find_cd("Unknown Prototype", None);
    assert_eq!(fallback.source, CdSource::Default);
    assert_eq!(fallback.cd, 0.28);
}
