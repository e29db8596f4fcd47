//! Vessels and fluids shared by the unit tests.

use mx_correlations::{DishType, GassingSystem};
use mx_system::{
    ComponentInput, Impeller, Mixture, OperatingEnvelope, PhysicalProperties, Reactor,
    ReactorConstants, ReactorGeometry, Scale,
};

/// 0.15 m jacketed lab vessel, two 50 mm impellers; the upper one is dry
/// below roughly 2.7 L.
pub fn lab_reactor() -> Reactor {
    let geometry = ReactorGeometry::new(
        0.15,
        0.3,
        DishType::Hemispherical,
        vec![
            Impeller::new(0.05, 0.03, 0.01, 5.0),
            Impeller::new(0.05, 0.10, 0.01, 5.0),
        ],
    )
    .expect("lab geometry");
    Reactor {
        id: "LR1".into(),
        owner: "Lab".into(),
        name: "Lab reactor".into(),
        scale: Some(Scale::Lab),
        geometry,
        envelope: OperatingEnvelope::new(100.0, 600.0, 2.0, 4.0).expect("lab envelope"),
        constants: ReactorConstants {
            zwietering_s: Some(6.0),
            gmb_z: Some(1.0),
            gassing_system: GassingSystem::Vortexing,
        },
    }
}

/// 2 m commercial vessel with a single 0.7 m impeller.
pub fn plant_reactor() -> Reactor {
    let geometry = ReactorGeometry::new(
        2.0,
        2.5,
        DishType::Elliptical2To1,
        vec![Impeller::new(0.7, 0.2, 0.15, 1.3)],
    )
    .expect("plant geometry");
    Reactor {
        id: "CR1".into(),
        owner: "Plant".into(),
        name: "Commercial reactor".into(),
        scale: Some(Scale::Commercial),
        geometry,
        envelope: OperatingEnvelope::new(30.0, 120.0, 2000.0, 8000.0).expect("plant envelope"),
        constants: ReactorConstants::default(),
    }
}

pub fn water_mixture() -> Mixture {
    Mixture::from_components(vec![ComponentInput::liquid("water", 4.0, 1000.0, 1.0)])
        .expect("water")
}

pub fn water() -> PhysicalProperties {
    *water_mixture().properties()
}

pub fn slurry() -> Mixture {
    Mixture::from_components(vec![
        ComponentInput::liquid("water", 4.0, 1000.0, 1.0),
        ComponentInput::solid("sand", 0.4, 2500.0, 150.0),
    ])
    .expect("slurry")
}
