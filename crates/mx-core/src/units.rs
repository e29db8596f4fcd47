// mx-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DiffusionCoefficient as UomDiffusionCoefficient,
    DynamicViscosity as UomDynamicViscosity, Frequency as UomFrequency, Length as UomLength,
    Mass as UomMass,
    MassDensity as UomMassDensity, Power as UomPower, Ratio as UomRatio, Time as UomTime,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
/// Kinematic viscosity; uom shares the m²/s dimension under this name.
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Time = UomTime;
pub type Volume = UomVolume;
/// Impeller rotation rate, stored as revolutions per second.
pub type Agitation = UomFrequency;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn um(v: f64) -> Length {
    m(v * 1e-6)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

/// Centipoise (identical to mPa·s).
#[inline]
pub fn cp(v: f64) -> DynVisc {
    pa_s(cp_to_pa_s(v))
}

#[inline]
pub fn m2_per_s(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn rpm(v: f64) -> Agitation {
    use uom::si::frequency::hertz;
    Agitation::new::<hertz>(rpm_to_rps(v))
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

// Readers in the engineering units the correlations are written in.

#[inline]
pub fn in_rpm(n: Agitation) -> f64 {
    use uom::si::frequency::hertz;
    rps_to_rpm(n.get::<hertz>())
}

#[inline]
pub fn in_liters(v: Volume) -> f64 {
    use uom::si::volume::liter;
    v.get::<liter>()
}

#[inline]
pub fn in_cp(mu: DynVisc) -> f64 {
    use uom::si::dynamic_viscosity::pascal_second;
    pa_s_to_cp(mu.get::<pascal_second>())
}

// Plain scalar conversions. The correlation library takes raw f64 in the
// units each function documents; these keep the call sites honest.

#[inline]
pub fn rpm_to_rps(n_rpm: f64) -> f64 {
    n_rpm / 60.0
}

#[inline]
pub fn rps_to_rpm(n_rps: f64) -> f64 {
    n_rps * 60.0
}

#[inline]
pub fn liters_to_m3(v_l: f64) -> f64 {
    v_l / 1e3
}

#[inline]
pub fn m3_to_liters(v_m3: f64) -> f64 {
    v_m3 * 1e3
}

#[inline]
pub fn cp_to_pa_s(mu_cp: f64) -> f64 {
    mu_cp / 1e3
}

#[inline]
pub fn pa_s_to_cp(mu_pa_s: f64) -> f64 {
    mu_pa_s * 1e3
}

#[inline]
pub fn um_to_m(d_um: f64) -> f64 {
    d_um / 1e6
}

pub mod constants {
    /// Gravitational acceleration used by the suspension and drawdown correlations.
    pub const G_MPS2: f64 = 9.81;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _d = um(150.0);
        let _a = m2(0.5);
        let _v = liters(100.0);
        let _m = kg(3.0);
        let _rho = kg_per_m3(1000.0);
        let _mu = cp(1.0);
        let _nu = m2_per_s(1e-6);
        let _p = w(12.0);
        let _t = s(0.1);
        let _r = unitless(0.5);
    }

    #[test]
    fn engineering_units_roundtrip_through_si() {
        let n = rpm(300.0);
        assert!((n.value - 5.0).abs() < 1e-12, "stored as rev/s");
        assert!((in_rpm(n) - 300.0).abs() < 1e-9);

        let v = liters(250.0);
        assert!((v.value - 0.25).abs() < 1e-12, "stored as m3");
        assert!((in_liters(v) - 250.0).abs() < 1e-9);

        let mu = cp(2.0);
        assert!((mu.value - 2.0e-3).abs() < 1e-15, "stored as Pa.s");
        assert!((in_cp(mu) - 2.0).abs() < 1e-12);

        assert!((um(100.0).value - 1e-4).abs() < 1e-15);
    }

    #[test]
    fn scalar_conversions_are_inverse() {
        assert!((rps_to_rpm(rpm_to_rps(120.0)) - 120.0).abs() < 1e-12);
        assert!((m3_to_liters(liters_to_m3(10.0)) - 10.0).abs() < 1e-12);
        assert!((pa_s_to_cp(cp_to_pa_s(5.0)) - 5.0).abs() < 1e-12);
        assert!((um_to_m(1e6) - 1.0).abs() < 1e-12);
    }
}
