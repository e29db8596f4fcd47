use mx_core::units::{Agitation, Mass, Volume, in_liters, in_rpm, kg, liters, liters_to_m3, rpm};

/// Agitation speed and liquid volume; the coordinate of every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub agitation: Agitation,
    pub volume: Volume,
}

impl OperatingPoint {
    pub fn new(n_rpm: f64, v_l: f64) -> Self {
        Self {
            agitation: rpm(n_rpm),
            volume: liters(v_l),
        }
    }

    pub fn n_rpm(&self) -> f64 {
        in_rpm(self.agitation)
    }

    pub fn v_l(&self) -> f64 {
        in_liters(self.volume)
    }

    /// Liquid mass at this volume for a density in kg/m³.
    pub fn mass(&self, density_kg_m3: f64) -> Mass {
        kg(liters_to_m3(self.v_l()) * density_kg_m3)
    }
}
