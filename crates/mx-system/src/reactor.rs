//! Reactor vessels: geometry, impellers, operating envelope.

use crate::error::{SystemError, SystemResult};
use mx_core::units::{
    Agitation, Area, Length, Volume, in_liters, in_rpm, liters, m, m2, m3, rpm,
};
use mx_core::ensure_positive;
use mx_correlations::{DishType, GassingSystem, dish_volume};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Where a vessel sits in the scale-up chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Lab,
    Pilot,
    Commercial,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lab => write!(f, "lab"),
            Self::Pilot => write!(f, "pilot"),
            Self::Commercial => write!(f, "commercial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impeller {
    pub diameter: Length,
    /// Height of the impeller centre above the vessel bottom.
    pub clearance: Length,
    /// Blade height.
    pub height: Length,
    /// Power number Np [-]
    pub power_number: f64,
}

impl Impeller {
    pub fn new(diameter_m: f64, clearance_m: f64, height_m: f64, power_number: f64) -> Self {
        Self {
            diameter: m(diameter_m),
            clearance: m(clearance_m),
            height: m(height_m),
            power_number,
        }
    }

    /// Liquid must reach past the middle of the blade to count as submerged.
    pub fn is_submerged(&self, liquid_height: Length) -> bool {
        self.clearance.value + self.height.value / 2.0 < liquid_height.value
    }
}

/// Static vessel description.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorGeometry {
    pub internal_diameter: Length,
    /// Tangent-to-tangent height of the cylindrical shell.
    pub tan_tan_height: Length,
    pub bottom_dish: DishType,
    pub top_dish: Option<DishType>,
    pub impellers: Vec<Impeller>,
}

/// Liquid level derived from geometry and a liquid volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub volume: Volume,
    pub height: Length,
    /// Number of impellers below the liquid surface; 0 means dry impellers.
    pub submerged_impellers: usize,
}

impl Fill {
    pub fn is_dry(&self) -> bool {
        self.submerged_impellers == 0
    }
}

impl ReactorGeometry {
    /// # Errors
    /// Non-positive diameter or shell height, or no impellers.
    pub fn new(
        internal_diameter_m: f64,
        tan_tan_height_m: f64,
        bottom_dish: DishType,
        impellers: Vec<Impeller>,
    ) -> SystemResult<Self> {
        ensure_positive(internal_diameter_m, "internal diameter")?;
        ensure_positive(tan_tan_height_m, "tan-tan height")?;
        if impellers.is_empty() {
            return Err(SystemError::missing("impellers"));
        }
        for imp in &impellers {
            ensure_positive(imp.diameter.value, "impeller diameter")?;
            ensure_positive(imp.power_number, "impeller power number")?;
        }
        Ok(Self {
            internal_diameter: m(internal_diameter_m),
            tan_tan_height: m(tan_tan_height_m),
            bottom_dish,
            top_dish: None,
            impellers,
        })
    }

    pub fn with_top_dish(mut self, dish: DishType) -> Self {
        self.top_dish = Some(dish);
        self
    }

    pub fn dish_volume(&self) -> Volume {
        m3(dish_volume(&self.bottom_dish, self.internal_diameter.value))
    }

    pub fn cross_section(&self) -> Area {
        m2(PI * (self.internal_diameter.value / 2.0).powi(2))
    }

    /// Total vessel volume: bottom dish, shell, and top dish when present.
    pub fn capacity(&self) -> Volume {
        let d = self.internal_diameter.value;
        let top = self.top_dish.map_or(0.0, |dish| dish_volume(&dish, d));
        m3(self.dish_volume().value + self.cross_section().value * self.tan_tan_height.value + top)
    }

    /// Whether `volume` rises above the bottom dish tangent line.
    pub fn fills_dish(&self, volume: Volume) -> bool {
        volume.value > self.dish_volume().value
    }

    /// Liquid height above the dish tangent line for `volume`.
    ///
    /// Always recomputed from the current geometry; nothing caches it.
    ///
    /// # Errors
    /// The liquid does not fill the bottom dish.
    pub fn liquid_height(&self, volume: Volume) -> SystemResult<Length> {
        let h = (volume.value - self.dish_volume().value) / self.cross_section().value;
        if !self.fills_dish(volume) {
            return Err(SystemError::NonPhysical {
                what: "liquid volume does not fill the bottom dish",
                value: in_liters(volume),
            });
        }
        Ok(m(h))
    }

    pub fn fill(&self, volume: Volume) -> SystemResult<Fill> {
        let height = self.liquid_height(volume)?;
        let submerged_impellers = self
            .impellers
            .iter()
            .filter(|imp| imp.is_submerged(height))
            .count();
        Ok(Fill {
            volume,
            height,
            submerged_impellers,
        })
    }

    /// Largest impeller; the characteristic diameter for Re and Njs.
    pub fn main_impeller(&self) -> SystemResult<&Impeller> {
        self.impellers
            .iter()
            .max_by(|a, b| a.diameter.value.total_cmp(&b.diameter.value))
            .ok_or_else(|| SystemError::missing("impellers"))
    }

    /// Highest impeller on the shaft; the one that draws down headspace gas.
    pub fn upper_impeller(&self) -> SystemResult<&Impeller> {
        self.impellers
            .iter()
            .max_by(|a, b| a.clearance.value.total_cmp(&b.clearance.value))
            .ok_or_else(|| SystemError::missing("impellers"))
    }

    /// Depth of the upper impeller below the liquid surface.
    pub fn upper_submergence(&self, fill: &Fill) -> SystemResult<Length> {
        let upper = self.upper_impeller()?;
        Ok(m((fill.height.value - upper.clearance.value).max(0.0)))
    }
}

/// Agitation and volume limits of a vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingEnvelope {
    pub agitation_min: Agitation,
    pub agitation_max: Agitation,
    pub volume_min: Volume,
    pub volume_max: Volume,
}

impl OperatingEnvelope {
    /// # Errors
    /// Negative limits or a minimum above the maximum.
    pub fn new(n_min_rpm: f64, n_max_rpm: f64, v_min_l: f64, v_max_l: f64) -> SystemResult<Self> {
        if !(n_min_rpm >= 0.0 && n_min_rpm <= n_max_rpm) {
            return Err(SystemError::InvalidArg {
                what: "agitation range must satisfy 0 <= min <= max",
            });
        }
        if !(v_min_l > 0.0 && v_min_l <= v_max_l) {
            return Err(SystemError::InvalidArg {
                what: "volume range must satisfy 0 < min <= max",
            });
        }
        Ok(Self {
            agitation_min: rpm(n_min_rpm),
            agitation_max: rpm(n_max_rpm),
            volume_min: liters(v_min_l),
            volume_max: liters(v_max_l),
        })
    }

    pub fn mid_agitation(&self) -> Agitation {
        rpm((in_rpm(self.agitation_min) + in_rpm(self.agitation_max)) / 2.0)
    }

    pub fn mid_volume(&self) -> Volume {
        liters((in_liters(self.volume_min) + in_liters(self.volume_max)) / 2.0)
    }

    pub fn exceeds_capacity(&self, volume: Volume) -> bool {
        volume.value > self.volume_max.value
    }
}

/// Vessel-specific constants for the suspension and drawdown correlations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReactorConstants {
    /// Zwietering `S`
    pub zwietering_s: Option<f64>,
    /// Grenville-Mak-Brown `z`
    pub gmb_z: Option<f64>,
    pub gassing_system: GassingSystem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reactor {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub scale: Option<Scale>,
    pub geometry: ReactorGeometry,
    pub envelope: OperatingEnvelope,
    pub constants: ReactorConstants,
}

impl Reactor {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.owner, self.name)
    }

    /// Liquid level for `volume`, warning when it overfills the vessel.
    pub fn fill(&self, volume: Volume) -> SystemResult<Fill> {
        if self.envelope.exceeds_capacity(volume) {
            tracing::warn!(
                reactor = %self.id,
                volume_l = in_liters(volume),
                max_l = in_liters(self.envelope.volume_max),
                "liquid volume exceeds maximum vessel capacity"
            );
        }
        let capacity = self.geometry.capacity();
        if volume.value > capacity.value {
            tracing::warn!(
                reactor = %self.id,
                volume_l = in_liters(volume),
                capacity_l = in_liters(capacity),
                "liquid volume exceeds the vessel's geometric volume"
            );
        }
        let fill = self.geometry.fill(volume)?;
        if fill.is_dry() {
            tracing::warn!(reactor = %self.id, "no impeller is submerged");
        }
        Ok(fill)
    }
}
