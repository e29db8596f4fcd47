//! Case-file schema and its conversion into typed system records.

use crate::error::{AppError, AppResult};
use mx_analysis::{SummaryOptions, SweepSettings};
use mx_bourne::BourneConfig;
use mx_core::units::{in_liters, in_rpm};
use mx_correlations::{DishType, GassingSystem};
use mx_system::{
    ComponentInput, Impeller, Mixture, OperatingEnvelope, OperatingPoint, ReactionRate, Reactor,
    ReactorConstants, ReactorGeometry, Scale,
};
use serde::{Deserialize, Serialize};

/// Everything one analysis session works on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reactors: Vec<ReactorDef>,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<ReactionRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_point: Option<OperatingDef>,
    #[serde(default)]
    pub sweep: SweepSettings,
    #[serde(default)]
    pub bourne: BourneConfig,
    #[serde(default)]
    pub summary: SummaryDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorDef {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    pub internal_diameter_m: f64,
    pub tan_tan_height_m: f64,
    pub bottom_dish: DishType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_dish: Option<DishType>,
    pub impellers: Vec<ImpellerDef>,
    pub agitation_rpm: RangeDef,
    pub volume_l: RangeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zwietering_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmb_z: Option<f64>,
    #[serde(default)]
    pub gassing_system: GassingSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpellerDef {
    pub diameter_m: f64,
    pub clearance_m: f64,
    pub height_m: f64,
    pub power_number: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDef {
    pub min: f64,
    pub max: f64,
}

/// Current operating point; absent fields default to the envelope midpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatingDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agitation_rpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_l: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryDef {
    /// Report the headspace gas-drawdown estimate.
    pub gas_drawdown: bool,
}

impl ReactorDef {
    pub fn to_reactor(&self) -> AppResult<Reactor> {
        let impellers = self
            .impellers
            .iter()
            .map(|i| Impeller::new(i.diameter_m, i.clearance_m, i.height_m, i.power_number))
            .collect();
        let mut geometry = ReactorGeometry::new(
            self.internal_diameter_m,
            self.tan_tan_height_m,
            self.bottom_dish,
            impellers,
        )?;
        if let Some(top) = self.top_dish {
            geometry = geometry.with_top_dish(top);
        }
        let envelope = OperatingEnvelope::new(
            self.agitation_rpm.min,
            self.agitation_rpm.max,
            self.volume_l.min,
            self.volume_l.max,
        )?;
        Ok(Reactor {
            id: self.id.clone(),
            owner: self.owner.clone(),
            name: if self.name.is_empty() {
                self.id.clone()
            } else {
                self.name.clone()
            },
            scale: self.scale,
            geometry,
            envelope,
            constants: ReactorConstants {
                zwietering_s: self.zwietering_s,
                gmb_z: self.gmb_z,
                gassing_system: self.gassing_system,
            },
        })
    }
}

impl CaseFile {
    pub fn reactor_def(&self, id: &str) -> AppResult<&ReactorDef> {
        self.reactors
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::ReactorNotFound(id.to_string()))
    }

    pub fn reactor(&self, id: &str) -> AppResult<Reactor> {
        self.reactor_def(id)?.to_reactor()
    }

    /// Reactor named by the operating point, else the first one listed.
    pub fn default_reactor_id(&self) -> AppResult<&str> {
        if let Some(id) = self.operating_point.as_ref().and_then(|op| op.reactor.as_deref()) {
            return Ok(id);
        }
        self.reactors
            .first()
            .map(|r| r.id.as_str())
            .ok_or_else(|| AppError::MissingInput("reactors".to_string()))
    }

    pub fn mixture(&self) -> AppResult<Mixture> {
        Ok(Mixture::from_components(self.components.clone())?)
    }

    /// The case operating point on `reactor`.
    ///
    /// Agitation defaults to the envelope midpoint. Volume defaults to the
    /// mixture volume, or to the envelope midpoint without a mixture.
    /// Values pinned to another reactor are ignored.
    pub fn operating_point(&self, reactor: &Reactor) -> OperatingPoint {
        let env = &reactor.envelope;
        let def = self
            .operating_point
            .clone()
            .filter(|op| op.reactor.as_ref().is_none_or(|id| *id == reactor.id))
            .unwrap_or_default();
        let n = def.agitation_rpm.unwrap_or_else(|| in_rpm(env.mid_agitation()));
        let v = def
            .volume_l
            .or_else(|| self.mixture().ok().map(|m| in_liters(m.total_volume())))
            .unwrap_or_else(|| in_liters(env.mid_volume()));
        if v < in_liters(env.volume_min) || v > in_liters(env.volume_max) {
            tracing::warn!(
                reactor = %reactor.id,
                volume_l = v,
                min_l = in_liters(env.volume_min),
                max_l = in_liters(env.volume_max),
                "operating volume outside the vessel's volume range"
            );
        }
        OperatingPoint::new(n, v)
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            power_basis: self.sweep.power_basis,
            kla: self.sweep.kla,
            gas_drawdown: self.summary.gas_drawdown,
        }
    }
}
