//! Vessel head (dish) geometry.

use crate::error::{CorrelationError, CorrelationResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Wall dimensions a torispherical head needs for its shape constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorisphericalDims {
    /// Wall thickness [mm]
    pub wall_thickness_mm: f64,
    /// Vessel outside diameter [m]
    pub outside_diameter: f64,
    /// Knuckle radius [m], only used by the ASME head
    #[serde(default)]
    pub knuckle_radius: f64,
}

/// Bottom or top head of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DishType {
    Hemispherical,
    #[serde(rename = "ASME 2:1 Elliptical")]
    Elliptical2To1,
    #[serde(rename = "ASME Torispherical")]
    AsmeTorispherical(TorisphericalDims),
    #[serde(rename = "DIN Torispherical")]
    DinTorispherical(TorisphericalDims),
}

impl DishType {
    /// Parse a head from its catalogue name.
    ///
    /// Torispherical heads need `dims`; a missing value is an error rather
    /// than a silently wrong volume.
    pub fn parse(name: &str, dims: Option<TorisphericalDims>) -> CorrelationResult<Self> {
        let need_dims = || {
            dims.ok_or(CorrelationError::InvalidArg {
                what: "torispherical head requires wall dimensions",
            })
        };
        match name.trim() {
            "Hemispherical" => Ok(Self::Hemispherical),
            "ASME 2:1 Elliptical" => Ok(Self::Elliptical2To1),
            "ASME Torispherical" | "Torispherical" => Ok(Self::AsmeTorispherical(need_dims()?)),
            "DIN Torispherical" => Ok(Self::DinTorispherical(need_dims()?)),
            other => Err(CorrelationError::UnknownDishType(other.to_string())),
        }
    }

    /// Shape constant `C` in `V = C · π · Di³ / 12`.
    pub fn shape_constant(&self, internal_diameter: f64) -> f64 {
        match self {
            Self::Hemispherical => 1.0,
            Self::Elliptical2To1 => 0.5,
            Self::AsmeTorispherical(dims) => {
                let t = dims.wall_thickness_mm / 1e3;
                let d_o = dims.outside_diameter;
                let r_k = dims.knuckle_radius;
                0.30939 + 1.7197 * (r_k - 0.06 * d_o) / internal_diameter - 0.16116 * t / d_o
                    + 0.98997 * (t / d_o).powi(2)
            }
            Self::DinTorispherical(dims) => {
                let t = dims.wall_thickness_mm / 1e3;
                0.37802 + 0.05073 * (t / dims.outside_diameter) + 1.3762
            }
        }
    }
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hemispherical => write!(f, "Hemispherical"),
            Self::Elliptical2To1 => write!(f, "ASME 2:1 Elliptical"),
            Self::AsmeTorispherical(_) => write!(f, "ASME Torispherical"),
            Self::DinTorispherical(_) => write!(f, "DIN Torispherical"),
        }
    }
}

/// Liquid volume held by a full bottom head [m³].
pub fn dish_volume(dish: &DishType, internal_diameter: f64) -> f64 {
    internal_diameter.powi(3) * dish.shape_constant(internal_diameter) * PI / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::{Tolerances, nearly_equal};

    #[test]
    fn hemisphere_is_half_a_sphere() {
        let d = 1.2;
        let half_sphere = 4.0 / 3.0 * PI * (d / 2.0_f64).powi(3) / 2.0;
        assert!(nearly_equal(
            dish_volume(&DishType::Hemispherical, d),
            half_sphere,
            Tolerances::default()
        ));
    }

    #[test]
    fn elliptical_holds_half_of_hemisphere() {
        let hemi = dish_volume(&DishType::Hemispherical, 2.0);
        let ell = dish_volume(&DishType::Elliptical2To1, 2.0);
        assert!(nearly_equal(ell * 2.0, hemi, Tolerances::default()));
    }

    #[test]
    fn asme_torispherical_shape_constant() {
        let dims = TorisphericalDims {
            wall_thickness_mm: 10.0,
            outside_diameter: 2.02,
            knuckle_radius: 0.2,
        };
        let c = DishType::AsmeTorispherical(dims).shape_constant(2.0);
        let t_do = 0.01 / 2.02;
        let expected =
            0.30939 + 1.7197 * (0.2 - 0.06 * 2.02) / 2.0 - 0.16116 * t_do + 0.98997 * t_do * t_do;
        assert!(nearly_equal(c, expected, Tolerances::default()));
    }

    #[test]
    fn parse_known_names() {
        assert_eq!(
            DishType::parse("ASME 2:1 Elliptical", None),
            Ok(DishType::Elliptical2To1)
        );
        assert_eq!(
            DishType::parse("Hemispherical", None),
            Ok(DishType::Hemispherical)
        );
    }

    #[test]
    fn parse_torispherical_without_dims_fails() {
        assert!(matches!(
            DishType::parse("DIN Torispherical", None),
            Err(CorrelationError::InvalidArg { .. })
        ));
    }

    #[test]
    fn parse_unknown_dish_fails() {
        assert_eq!(
            DishType::parse("Conical", None),
            Err(CorrelationError::UnknownDishType("Conical".into()))
        );
    }
}
