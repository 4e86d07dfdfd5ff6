//! Subthreshold swing and interface-trap density.

use serde::{Deserialize, Serialize};
use tftex_core::physics::{Q_ELECTRON, T_NOMINAL, thermal_voltage};
use tftex_core::{DeviceGeometry, TransferPoint};

use crate::regression::fit_line;

/// Decade factor of the SS thermal limit (ln 10, rounded as used in
/// instrument software).
const DECADE_FACTOR: f64 = 2.3;

/// Minimum number of in-window points for a meaningful SS fit.
const MIN_POINTS: usize = 5;

/// Subthreshold analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubthresholdResult {
    /// Subthreshold swing (V/decade). 0 when the window held fewer than
    /// five points or the fit degenerated.
    pub ss: f64,
    /// Number of points inside the log-current window.
    pub points_used: usize,
    /// Fit quality, when a fit ran.
    pub r_squared: Option<f64>,
}

/// Compute the subthreshold swing over a `log10|ID|` window.
///
/// Points whose log current falls strictly inside `window` are regressed
/// as `log10|ID| = slope*VG + intercept`; `SS = |1/slope|`. Fewer than
/// five usable points, or a flat fit, yield `ss = 0` without raising.
pub fn subthreshold_analysis(points: &[TransferPoint], window: (f64, f64)) -> SubthresholdResult {
    let (lo, hi) = window;
    let (vgs, logs): (Vec<f64>, Vec<f64>) = points
        .iter()
        .filter(|p| p.id.abs() > 0.0)
        .map(|p| (p.vg, p.id.abs().log10()))
        .filter(|&(_, log_id)| log_id > lo && log_id < hi)
        .unzip();

    if vgs.len() < MIN_POINTS {
        return SubthresholdResult {
            ss: 0.0,
            points_used: vgs.len(),
            r_squared: None,
        };
    }

    match fit_line(&vgs, &logs) {
        Some(fit) if fit.slope != 0.0 => SubthresholdResult {
            ss: (1.0 / fit.slope).abs(),
            points_used: fit.n,
            r_squared: Some(fit.r_squared),
        },
        _ => SubthresholdResult {
            ss: 0.0,
            points_used: vgs.len(),
            r_squared: None,
        },
    }
}

/// Interface-trap density from the subthreshold swing (cm^-2 eV^-1):
/// `Dit = (Cox/q) * (SS / (2.3 kT/q) - 1)`, clamped to zero.
///
/// A swing at or below the thermal limit would come out negative, which
/// is physically invalid; such results are floored at 0.
pub fn interface_trap_density(ss: f64, geometry: &DeviceGeometry) -> f64 {
    let cox_cm2 = geometry.cox_per_cm2();
    if ss <= 0.0 || cox_cm2 <= 0.0 {
        return 0.0;
    }
    let thermal_swing = DECADE_FACTOR * thermal_voltage(T_NOMINAL);
    let dit = (cox_cm2 / Q_ELECTRON) * (ss / thermal_swing - 1.0);
    dit.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Log-linear subthreshold curve with the given swing (V/decade).
    fn subthreshold_sweep(ss: f64) -> Vec<TransferPoint> {
        (0..=100)
            .map(|i| {
                let vg = i as f64 * 0.05;
                // log10 ID = -11 + vg/ss: spans the (-10, -6) window
                let id = 10f64.powf(-11.0 + vg / ss);
                TransferPoint::new(vg, id)
            })
            .collect()
    }

    #[test]
    fn test_ss_recovered() {
        let sweep = subthreshold_sweep(0.5);
        let result = subthreshold_analysis(&sweep, (-10.0, -6.0));

        assert!((result.ss - 0.5).abs() < 1e-6, "ss = {}", result.ss);
        assert!(result.points_used >= MIN_POINTS);
        assert!(result.r_squared.unwrap() > 0.999);
    }

    #[test]
    fn test_ss_insufficient_points() {
        // Only 3 points fall inside the window
        let sweep: Vec<TransferPoint> = [1e-9, 1e-8, 1e-7]
            .iter()
            .enumerate()
            .map(|(i, &id)| TransferPoint::new(i as f64, id))
            .collect();

        let result = subthreshold_analysis(&sweep, (-10.0, -6.0));
        assert_eq!(result.ss, 0.0);
        assert_eq!(result.points_used, 3);
        assert!(result.r_squared.is_none());
    }

    #[test]
    fn test_ss_empty_sweep() {
        let result = subthreshold_analysis(&[], (-10.0, -6.0));
        assert_eq!(result.ss, 0.0);
        assert_eq!(result.points_used, 0);
    }

    #[test]
    fn test_dit_positive_for_degraded_swing() {
        let geometry = DeviceGeometry::new(1e-3, 100e-6, 100e-9);
        // 0.5 V/dec is far above the ~60 mV/dec thermal limit
        let dit = interface_trap_density(0.5, &geometry);
        assert!(dit > 0.0);
        // Order of magnitude: Cox/q ~ 2.2e11, factor ~ 7.4
        assert!(dit > 1e11 && dit < 1e13, "dit = {dit}");
    }

    #[test]
    fn test_dit_clamped_at_thermal_limit() {
        let geometry = DeviceGeometry::new(1e-3, 100e-6, 100e-9);
        // Below the thermal limit the raw expression is negative
        assert_eq!(interface_trap_density(0.03, &geometry), 0.0);
        // Zero swing (degenerate SS) contributes nothing
        assert_eq!(interface_trap_density(0.0, &geometry), 0.0);
    }
}
