//! Liquid level and impeller submergence across a vessel's volume range.

use mx_core::units::{in_liters, liters};
use mx_correlations::DishType;
use mx_system::{
    Impeller, OperatingEnvelope, Reactor, ReactorConstants, ReactorGeometry, Scale, SystemError,
};

fn two_stage_vessel() -> Reactor {
    let geometry = ReactorGeometry::new(
        1.0,
        1.5,
        DishType::Elliptical2To1,
        vec![
            Impeller::new(0.4, 0.3, 0.08, 1.3),
            Impeller::new(0.4, 0.9, 0.08, 1.3),
        ],
    )
    .expect("geometry");
    Reactor {
        id: "PV2".into(),
        owner: "Site B".into(),
        name: "1 m3 pilot".into(),
        scale: Some(Scale::Pilot),
        geometry,
        envelope: OperatingEnvelope::new(20.0, 150.0, 300.0, 1200.0).expect("envelope"),
        constants: ReactorConstants::default(),
    }
}

#[test]
fn submerged_count_never_drops_as_the_vessel_fills() {
    let r = two_stage_vessel();
    let mut last = 0;
    for v in [300.0, 500.0, 700.0, 900.0, 1100.0] {
        let fill = r.fill(liters(v)).expect("fill");
        assert!(fill.submerged_impellers >= last);
        last = fill.submerged_impellers;
    }
    assert_eq!(last, 2);
}

#[test]
fn upper_submergence_grows_with_volume() {
    let r = two_stage_vessel();
    let low = r.fill(liters(900.0)).expect("fill");
    let high = r.fill(liters(1100.0)).expect("fill");
    let s_low = r.geometry.upper_submergence(&low).expect("sub");
    let s_high = r.geometry.upper_submergence(&high).expect("sub");
    assert!(s_high.value > s_low.value);
}

#[test]
fn volume_inside_the_dish_is_rejected() {
    let r = two_stage_vessel();
    let dish_l = in_liters(r.geometry.dish_volume());
    assert!(matches!(
        r.fill(liters(dish_l * 0.5)),
        Err(SystemError::NonPhysical { .. })
    ));
}

#[test]
fn overfill_still_evaluates() {
    let r = two_stage_vessel();
    let fill = r.fill(liters(1500.0)).expect("overfilled vessel still has a level");
    assert!(r.envelope.exceeds_capacity(fill.volume));
}
