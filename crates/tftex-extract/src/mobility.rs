//! Mobility extraction.
//!
//! All mobilities are reported in cm^2/V.s, the conventional unit for
//! thin-film devices; intermediate fits run in SI and convert at the
//! boundary. The Y-function linearization `ID/sqrt(gm)` vs gate overdrive
//! cancels first-order mobility degradation, so its slope yields the
//! low-field mobility and feeds the degradation-factor fit.

use serde::{Deserialize, Serialize};
use tftex_core::{DeviceGeometry, TransferPoint};

use crate::regression::{fit_through_origin, unit_slope_intercept};
use crate::transconductance::TransconductanceCurve;

/// m^2/V.s to cm^2/V.s.
const SI_TO_CM2: f64 = 1e4;

/// VG matching tolerance between sweep points and gm points (V).
const Y_GM_MATCH_TOL: f64 = 0.05;

/// Currents below this floor carry no mobility information (A).
const ID_FLOOR: f64 = 1e-12;

/// Transconductances below this floor are noise (S).
const GM_FLOOR: f64 = 1e-12;

/// Result of the Y-function fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YFunctionFit {
    /// Low-field mobility (cm^2/V.s).
    pub mu0: f64,
    /// Fitted Y = A*X slope (sqrt(A.V)/V).
    pub slope: f64,
    /// Fit quality.
    pub r_squared: f64,
    /// Number of points used.
    pub points_used: usize,
}

/// Field-effect mobility from the transconductance maximum of a linear
/// transfer sweep: `mu_FE = (L / (W * Cox * VDS)) * gm_max`, in cm^2/V.s.
///
/// Returns 0 when gm_max, the geometry, or the drain bias is missing or
/// non-positive.
pub fn field_effect_mobility(gm_max: f64, geometry: &DeviceGeometry, vds: f64) -> f64 {
    let cox = geometry.cox();
    if gm_max <= 0.0 || cox <= 0.0 || geometry.w <= 0.0 || geometry.l <= 0.0 || vds == 0.0 {
        return 0.0;
    }
    (geometry.l / (geometry.w * cox * vds.abs())) * gm_max * SI_TO_CM2
}

/// Low-field mobility via the Y-function method.
///
/// For every point above threshold with usable current and a matching gm
/// sample, `Y = ID/sqrt(gm)` is fit against the gate overdrive through
/// the origin; the slope gives `mu0 = A^2 * L / (Cox * VD * W)`.
///
/// Returns `None` when no point qualifies or the fit degenerates.
pub fn y_function_mobility(
    points: &[TransferPoint],
    gm: &TransconductanceCurve,
    vth: f64,
    geometry: &DeviceGeometry,
    vd: f64,
) -> Option<YFunctionFit> {
    let cox = geometry.cox();
    if cox <= 0.0 || geometry.w <= 0.0 || vd == 0.0 {
        return None;
    }

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for p in points {
        if p.vg <= vth || p.id <= ID_FLOOR {
            continue;
        }
        let Some(gm_val) = gm.gm_near(p.vg, Y_GM_MATCH_TOL).filter(|&g| g > GM_FLOOR) else {
            continue;
        };
        xs.push(p.vg - vth);
        ys.push(p.id / gm_val.sqrt());
    }

    let fit = fit_through_origin(&xs, &ys)?;
    let mu0_si = fit.slope.powi(2) * geometry.l / (cox * vd.abs() * geometry.w);

    Some(YFunctionFit {
        mu0: mu0_si * SI_TO_CM2,
        slope: fit.slope,
        r_squared: fit.r_squared,
        points_used: fit.n,
    })
}

/// Mobility degradation factor theta (1/V).
///
/// Points well above threshold are fit as `Ycal = theta + Xcal` with the
/// slope pinned to one, where `Xcal = 1/(VG - Vth)` and
/// `Ycal = mu0 * W * Cox * VD / (ID * L)`; theta is the intercept.
/// `mu0` is taken in cm^2/V.s and converted back to SI internally.
///
/// Returns `None` when no point lies in the fit region.
pub fn mobility_degradation(
    points: &[TransferPoint],
    vth: f64,
    mu0: f64,
    geometry: &DeviceGeometry,
    vd: f64,
) -> Option<f64> {
    let cox = geometry.cox();
    if cox <= 0.0 || geometry.l <= 0.0 || mu0 <= 0.0 || vd == 0.0 {
        return None;
    }
    let mu0_si = mu0 / SI_TO_CM2;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for p in points {
        if p.vg <= vth + 1.0 || p.id <= ID_FLOOR {
            continue;
        }
        xs.push(1.0 / (p.vg - vth));
        ys.push(mu0_si * geometry.w * cox * vd.abs() / (p.id * geometry.l));
    }

    unit_slope_intercept(&xs, &ys)
}

/// Effective mobility `mu_eff = mu0 / (1 + theta * (VG - Vth))` at a
/// representative gate voltage, in cm^2/V.s. Returns 0 at or below
/// threshold or when the degradation denominator collapses.
pub fn effective_mobility(mu0: f64, theta: f64, vg: f64, vth: f64) -> f64 {
    if vg <= vth || mu0 <= 0.0 {
        return 0.0;
    }
    let denom = 1.0 + theta * (vg - vth);
    if denom <= 0.0 {
        return 0.0;
    }
    mu0 / denom
}
