//! The correlations mix rpm, cP, litres and SI. These checks pin down that the
//! conversions in mx-core agree with what each correlation expects.

use mx_core::units::{
    cp, in_cp, in_liters, in_rpm, kg_per_m3, liters, liters_to_m3, m, pa_s_to_cp, rpm,
};
use mx_core::{Tolerances, nearly_equal};
use mx_correlations::{
    FlowRegime, kla_gas_drawdown, micromixing_rate, mixing_time_regime, mixing_time_simple,
    power_input, reynolds,
};

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-12,
        rel: 1e-9,
    }
}

#[test]
fn reynolds_from_typed_quantities_matches_raw_inputs() {
    let rho = kg_per_m3(998.0);
    let d = m(0.15);
    let n = rpm(450.0);
    let mu = cp(0.89);

    let typed = reynolds(rho.value, d.value, in_rpm(n), in_cp(mu));
    // Same thing computed in SI directly: rho * N[rps] * d^2 / mu[Pa.s]
    let si = rho.value * n.value * d.value.powi(2) / mu.value;
    assert!(nearly_equal(typed, si, tol()));
}

#[test]
fn passing_pa_s_where_cp_is_expected_is_off_by_a_thousand() {
    let mu_pa_s = 1e-3;
    let right = reynolds(1000.0, 0.1, 300.0, pa_s_to_cp(mu_pa_s));
    let wrong = reynolds(1000.0, 0.1, 300.0, mu_pa_s);
    assert!(nearly_equal(wrong / right, 1000.0, tol()));
}

#[test]
fn power_uses_rpm_not_rps() {
    let n = rpm(120.0);
    let p = power_input(5.0, 1000.0, in_rpm(n), 0.5);
    let p_si = 5.0 * 1000.0 * n.value.powi(3) * 0.5_f64.powi(5);
    assert!(nearly_equal(p, p_si, tol()));
}

#[test]
fn simple_mixing_time_takes_litres() {
    let v = liters(500.0);
    let tm = mixing_time_simple(0.7, in_liters(v), 60.0, 1.0);
    assert!(nearly_equal(tm, 0.7 * v.value, tol()));
}

#[test]
fn regime_mixing_time_takes_cubic_metres_and_kw_per_m3() {
    let v_l = 1000.0;
    let p_w = 2000.0;
    let eps_kw_m3 = p_w / 1e3 / liters_to_m3(v_l);
    let tm = mixing_time_regime(1.0, 1.0, 0.5, liters_to_m3(v_l), eps_kw_m3, 1e-3, 1000.0, FlowRegime::Turbulent)
        .expect("turbulent branch is defined");
    let expected = 5.4 * 2f64.powf(-1.0 / 3.0) * 2f64.powf(1.0 / 3.0);
    assert!(nearly_equal(tm, expected, tol()));
}

#[test]
fn micromixing_uses_power_per_mass() {
    // 10 W into 10 kg of water is 1 W/kg
    let eps = 10.0 / 10.0;
    let rate = micromixing_rate(eps, 1e-6);
    assert!(nearly_equal(rate, 0.05776 * 1000.0, tol()));
}

#[test]
fn kla_specific_power_is_per_kilogram() {
    let mass = 1000.0 * liters_to_m3(50.0);
    let a = kla_gas_drawdown(0.07, 0.53, 50.0, mass);
    assert!(nearly_equal(a, 0.07, tol()));
}
