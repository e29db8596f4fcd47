//! Mixture definition and the ideal mixing rule.
//!
//! Each component is entered with whatever the user knows; two of
//! volume/mass/density are enough to complete the third. The mixture density
//! is total mass over total volume, every other intensive property is a
//! mass-fraction weighted average over the components that define it.

use crate::error::{SystemError, SystemResult};
use mx_core::units::{
    Density, DynVisc, KinVisc, Length, Mass, Volume, cp, kg, kg_per_m3, liters, liters_to_m3,
    m2_per_s, um,
};
use mx_core::{Tolerances, ensure_positive, nearly_equal};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "Solid"),
            Self::Liquid => write!(f, "Liquid"),
            Self::Gas => write!(f, "Gas"),
        }
    }
}

/// One row of the system inputs table, exactly as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInput {
    pub name: String,
    pub phase: Phase,
    #[serde(default)]
    pub volume_l: Option<f64>,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    #[serde(default)]
    pub dynamic_viscosity_cp: Option<f64>,
    #[serde(default)]
    pub kinematic_viscosity_m2_s: Option<f64>,
    #[serde(default)]
    pub surface_tension_n_m: Option<f64>,
    #[serde(default)]
    pub particle_size_um: Option<f64>,
}

impl ComponentInput {
    /// Liquid with the usual handful of properties filled in.
    pub fn liquid(name: &str, volume_l: f64, density: f64, mu_cp: f64) -> Self {
        Self {
            name: name.to_string(),
            phase: Phase::Liquid,
            volume_l: Some(volume_l),
            mass_kg: None,
            density_kg_m3: Some(density),
            dynamic_viscosity_cp: Some(mu_cp),
            kinematic_viscosity_m2_s: None,
            surface_tension_n_m: None,
            particle_size_um: None,
        }
    }

    /// Solid charged by mass.
    pub fn solid(name: &str, mass_kg: f64, density: f64, particle_size_um: f64) -> Self {
        Self {
            name: name.to_string(),
            phase: Phase::Solid,
            volume_l: None,
            mass_kg: Some(mass_kg),
            density_kg_m3: Some(density),
            dynamic_viscosity_cp: None,
            kinematic_viscosity_m2_s: None,
            surface_tension_n_m: None,
            particle_size_um: Some(particle_size_um),
        }
    }

    /// Fill in the missing one of volume/mass/density.
    fn complete(&self) -> SystemResult<(f64, f64, f64)> {
        let missing =
            |field: &str| SystemError::missing(format!("{} of component '{}'", field, self.name));
        match (self.volume_l, self.mass_kg, self.density_kg_m3) {
            (Some(v), Some(m), Some(rho)) => Ok((v, m, rho)),
            (Some(v), None, Some(rho)) => Ok((v, liters_to_m3(v) * rho, rho)),
            (None, Some(m), Some(rho)) => Ok((m / rho * 1e3, m, rho)),
            (Some(v), Some(m), None) => Ok((v, m, m / liters_to_m3(v))),
            (None, _, None) | (_, None, None) => Err(missing("two of volume/mass/density")),
            (None, None, Some(_)) => Err(missing("volume or mass")),
        }
    }
}

/// Immutable snapshot of the properties of a phase or of the whole mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalProperties {
    pub density: Density,
    pub dynamic_viscosity: DynVisc,
    pub kinematic_viscosity: KinVisc,
    /// Surface tension [N/m]; uom has no dedicated quantity for it.
    pub surface_tension: Option<f64>,
    pub particle_diameter: Option<Length>,
    pub mass: Mass,
    pub volume: Volume,
}

/// The (first) solid component together with its loading in the mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidPhase {
    pub density: Density,
    pub particle_diameter: Option<Length>,
    pub mass: Mass,
    pub volume: Volume,
    /// `m_solid / m_mixture · 100` [%]
    pub loading_pct: f64,
    /// `V_solid / V_mixture · 100` [%]
    pub volume_fraction_pct: f64,
}

/// A component after volume/mass/density completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponent {
    pub input: ComponentInput,
    pub volume_l: f64,
    pub mass_kg: f64,
    pub density_kg_m3: f64,
    pub mass_fraction: f64,
    pub volume_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<ResolvedComponent>,
    properties: PhysicalProperties,
    solid: Option<SolidPhase>,
}

impl Mixture {
    /// Apply the mixing rule to a set of components.
    ///
    /// # Errors
    /// - no components
    /// - a component with fewer than two of volume/mass/density
    /// - non-positive totals
    /// - no component defines a dynamic viscosity
    pub fn from_components(inputs: Vec<ComponentInput>) -> SystemResult<Self> {
        if inputs.is_empty() {
            return Err(SystemError::missing("mixture components"));
        }

        let mut completed = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (v, m, rho) = input.complete()?;
            completed.push((input, v, m, rho));
        }

        let total_mass: f64 = completed.iter().map(|(_, _, m, _)| m).sum();
        let total_volume: f64 = completed.iter().map(|(_, v, _, _)| v).sum();
        ensure_positive(total_mass, "total mixture mass")?;
        ensure_positive(total_volume, "total mixture volume")?;

        let components: Vec<ResolvedComponent> = completed
            .into_iter()
            .map(|(input, v, m, rho)| ResolvedComponent {
                input,
                volume_l: v,
                mass_kg: m,
                density_kg_m3: rho,
                mass_fraction: m / total_mass,
                volume_fraction: v / total_volume,
            })
            .collect();

        let density = total_mass / liters_to_m3(total_volume);

        let mu_cp = weighted_average(&components, |c| c.dynamic_viscosity_cp)
            .ok_or_else(|| SystemError::missing("dynamic viscosity"))?;
        ensure_positive(mu_cp, "mixture dynamic viscosity")?;
        // Derive nu from mu/rho when nobody entered it.
        let nu = weighted_average(&components, |c| c.kinematic_viscosity_m2_s)
            .unwrap_or(mu_cp / 1e3 / density);

        let properties = PhysicalProperties {
            density: kg_per_m3(density),
            dynamic_viscosity: cp(mu_cp),
            kinematic_viscosity: m2_per_s(nu),
            surface_tension: weighted_average(&components, |c| c.surface_tension_n_m),
            particle_diameter: weighted_average(&components, |c| c.particle_size_um).map(um),
            mass: kg(total_mass),
            volume: liters(total_volume),
        };

        let solid = components
            .iter()
            .find(|c| c.input.phase == Phase::Solid)
            .map(|c| SolidPhase {
                density: kg_per_m3(c.density_kg_m3),
                particle_diameter: c.input.particle_size_um.map(um),
                mass: kg(c.mass_kg),
                volume: liters(c.volume_l),
                loading_pct: c.mass_kg / total_mass * 100.0,
                volume_fraction_pct: c.volume_l / total_volume * 100.0,
            });

        let mixture = Self {
            components,
            properties,
            solid,
        };
        mixture.check_fractions()?;
        Ok(mixture)
    }

    fn check_fractions(&self) -> SystemResult<()> {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        let mass: f64 = self.components.iter().map(|c| c.mass_fraction).sum();
        let volume: f64 = self.components.iter().map(|c| c.volume_fraction).sum();
        if !nearly_equal(mass, 1.0, tol) || !nearly_equal(volume, 1.0, tol) {
            return Err(SystemError::InvalidArg {
                what: "component fractions do not sum to one",
            });
        }
        Ok(())
    }

    pub fn components(&self) -> &[ResolvedComponent] {
        &self.components
    }

    pub fn properties(&self) -> &PhysicalProperties {
        &self.properties
    }

    pub fn solid(&self) -> Option<&SolidPhase> {
        self.solid.as_ref()
    }

    pub fn total_volume(&self) -> Volume {
        self.properties.volume
    }

    pub fn total_mass(&self) -> Mass {
        self.properties.mass
    }

    pub fn phases(&self) -> Vec<Phase> {
        let mut phases: Vec<Phase> = Vec::new();
        for c in &self.components {
            if !phases.contains(&c.input.phase) {
                phases.push(c.input.phase);
            }
        }
        phases
    }
}

fn weighted_average(
    components: &[ResolvedComponent],
    value: impl Fn(&ComponentInput) -> Option<f64>,
) -> Option<f64> {
    let (sum, weight) = components
        .iter()
        .filter_map(|c| value(&c.input).map(|v| (v * c.mass_fraction, c.mass_fraction)))
        .fold((0.0, 0.0), |(s, w), (vs, vw)| (s + vs, w + vw));
    if weight > 0.0 { Some(sum / weight) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::units::{in_cp, in_liters};

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        }
    }

    #[test]
    fn single_liquid_passes_through() {
        let mix = Mixture::from_components(vec![ComponentInput::liquid("H2O", 65.0, 1000.0, 1.0)])
            .expect("valid mixture");
        let p = mix.properties();
        assert!(nearly_equal(p.density.value, 1000.0, tol()));
        assert!(nearly_equal(p.mass.value, 65.0, tol()));
        assert!(nearly_equal(in_cp(p.dynamic_viscosity), 1.0, tol()));
        assert!(nearly_equal(p.kinematic_viscosity.value, 1e-6, tol()));
        assert!(mix.solid().is_none());
    }

    #[test]
    fn viscosity_is_mass_weighted() {
        let mix = Mixture::from_components(vec![
            ComponentInput::liquid("A", 1.0, 1000.0, 1.0),
            ComponentInput::liquid("B", 1.0, 1000.0, 3.0),
        ])
        .expect("valid mixture");
        assert!(nearly_equal(in_cp(mix.properties().dynamic_viscosity), 2.0, tol()));
    }

    #[test]
    fn density_is_total_mass_over_total_volume() {
        let mix = Mixture::from_components(vec![
            ComponentInput::liquid("water", 1.0, 1000.0, 1.0),
            ComponentInput::liquid("dcm", 1.0, 1330.0, 0.43),
        ])
        .expect("valid mixture");
        assert!(nearly_equal(mix.properties().density.value, 1165.0, tol()));
        assert!(nearly_equal(in_liters(mix.properties().volume), 2.0, tol()));
    }

    #[test]
    fn solid_loading_and_volume_fraction() {
        let mix = Mixture::from_components(vec![
            ComponentInput::liquid("water", 9.0, 1000.0, 1.0),
            ComponentInput::solid("sand", 1.0, 2500.0, 150.0),
        ])
        .expect("valid mixture");
        let s = mix.solid().expect("solid phase present");
        assert!(nearly_equal(s.loading_pct, 10.0, tol()));
        // 1 kg / 2500 kg/m3 = 0.4 L of 9.4 L
        assert!(nearly_equal(s.volume_fraction_pct, 0.4 / 9.4 * 100.0, tol()));
        assert!(nearly_equal(
            s.particle_diameter.expect("particle size").value,
            150e-6,
            tol()
        ));
        assert_eq!(mix.phases(), vec![Phase::Liquid, Phase::Solid]);
    }

    #[test]
    fn fractions_sum_to_one() {
        let mix = Mixture::from_components(vec![
            ComponentInput::liquid("a", 3.0, 800.0, 0.6),
            ComponentInput::liquid("b", 5.0, 1100.0, 2.0),
            ComponentInput::solid("c", 0.2, 1800.0, 40.0),
        ])
        .expect("valid mixture");
        let mf: f64 = mix.components().iter().map(|c| c.mass_fraction).sum();
        let vf: f64 = mix.components().iter().map(|c| c.volume_fraction).sum();
        assert!(nearly_equal(mf, 1.0, tol()));
        assert!(nearly_equal(vf, 1.0, tol()));
    }

    #[test]
    fn density_completed_from_mass_and_volume() {
        let mut c = ComponentInput::liquid("x", 2.0, 0.0, 1.0);
        c.density_kg_m3 = None;
        c.mass_kg = Some(1.8);
        let mix = Mixture::from_components(vec![c]).expect("valid mixture");
        assert!(nearly_equal(mix.components()[0].density_kg_m3, 900.0, tol()));
    }

    #[test]
    fn missing_two_of_three_is_reported() {
        let mut c = ComponentInput::liquid("x", 2.0, 1000.0, 1.0);
        c.density_kg_m3 = None;
        let err = Mixture::from_components(vec![c]).unwrap_err();
        assert!(matches!(err, SystemError::MissingInput { .. }));
    }

    #[test]
    fn missing_viscosity_is_reported() {
        let err = Mixture::from_components(vec![ComponentInput::solid("s", 1.0, 2000.0, 10.0)])
            .unwrap_err();
        assert_eq!(err, SystemError::missing("dynamic viscosity"));
    }

    #[test]
    fn empty_mixture_is_reported() {
        assert!(matches!(
            Mixture::from_components(vec![]),
            Err(SystemError::MissingInput { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mass_fractions_always_sum_to_one(
            vols in prop::collection::vec(0.01_f64..100.0, 1..6),
            rho in 600.0_f64..2000.0,
        ) {
            let inputs: Vec<ComponentInput> = vols
                .iter()
                .enumerate()
                .map(|(i, v)| ComponentInput::liquid(&format!("c{i}"), *v, rho + i as f64, 1.0))
                .collect();
            let mix = Mixture::from_components(inputs).expect("valid mixture");
            let sum: f64 = mix.components().iter().map(|c| c.mass_fraction).sum();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(sum, 1.0, tol));
        }
    }
}
