//! End-to-end sweeps on a pilot vessel built from public constructors.

use mx_analysis::{
    Mechanism, SuspensionQuality, SweepSettings, da_mass_transfer, scale_sweep, sensitivity_grid,
};
use mx_correlations::DishType;
use mx_system::{
    ComponentInput, Impeller, Mixture, OperatingEnvelope, ReactionRate, Reactor,
    ReactorConstants, ReactorGeometry, Scale,
};

fn pilot() -> Reactor {
    let geometry = ReactorGeometry::new(
        0.6,
        0.8,
        DishType::Elliptical2To1,
        vec![Impeller::new(0.25, 0.05, 0.05, 1.5)],
    )
    .expect("geometry");
    Reactor {
        id: "PR1".into(),
        owner: "Pilot plant".into(),
        name: "100 L pilot".into(),
        scale: Some(Scale::Pilot),
        geometry,
        envelope: OperatingEnvelope::new(10.0, 100.0, 60.0, 150.0).expect("envelope"),
        constants: ReactorConstants::default(),
    }
}

fn mixture() -> Mixture {
    Mixture::from_components(vec![
        ComponentInput::liquid("toluene", 80.0, 867.0, 0.59),
        ComponentInput::liquid("water", 20.0, 998.0, 1.0),
    ])
    .expect("mixture")
}

#[test]
fn volume_grid_is_inclusive_and_even() {
    let mut reactor = pilot();
    reactor.envelope = OperatingEnvelope::new(10.0, 100.0, 10.0, 100.0).expect("envelope");
    // Pilot dish holds ~28 L, so shrink the vessel's dish for this grid.
    reactor.geometry = ReactorGeometry::new(
        0.2,
        4.0,
        DishType::Elliptical2To1,
        vec![Impeller::new(0.08, 0.02, 0.02, 1.5)],
    )
    .expect("geometry");
    let res = scale_sweep(
        &[&reactor],
        mixture().properties(),
        &ReactionRate::new(0.01, 1.0, -50.0),
        &SweepSettings::default(),
    )
    .expect("sweep");
    let mut volumes: Vec<f64> = res.rows.iter().map(|r| r.volume_l).collect();
    volumes.sort_by(f64::total_cmp);
    volumes.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    let expected = [10.0, 28.0, 46.0, 64.0, 82.0, 100.0];
    assert_eq!(volumes.len(), expected.len());
    for (v, e) in volumes.iter().zip(expected) {
        assert!((v - e).abs() < 1e-9, "{v} != {e}");
    }
}

#[test]
fn sensitivity_grid_flags_fast_reaction() {
    let reactor = pilot();
    let mix = mixture();
    let fast = ReactionRate::new(50.0, 1.0, -50.0);
    let res = sensitivity_grid(&reactor, mix.properties(), &fast, &SweepSettings::default())
        .expect("grid");
    assert_eq!(res.len(), 42);
    assert!(res.any_limited(Mechanism::MassTransfer));
    let limited = res.limited(Mechanism::MassTransfer);
    assert!(limited.iter().all(|r| r.da.mass_transfer > 1.0));
}

#[test]
fn kla_sentinel_is_infinite() {
    let da = da_mass_transfer(0.3, 0.0);
    assert_eq!(da, f64::INFINITY);
    assert!(!da.is_nan());
}

#[test]
fn suspension_labels() {
    assert_eq!(SuspensionQuality::from_ratio(1.2).to_string(), "Suspended");
    assert_eq!(SuspensionQuality::from_ratio(1.0).to_string(), "Just Suspended");
    assert_eq!(SuspensionQuality::from_ratio(0.85).to_string(), "Maybe Suspended");
    assert_eq!(SuspensionQuality::from_ratio(0.5).to_string(), "Not Suspended");
}
