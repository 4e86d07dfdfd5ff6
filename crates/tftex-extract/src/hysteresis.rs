//! Hysteresis threshold shift.
//!
//! Forward and backward segments arrive pre-split from the data model.
//! Each segment's threshold comes from a square-root-current linear
//! extrapolation restricted to the middle of the segment, away from the
//! noisy turn-on and compliance edges.

use serde::{Deserialize, Serialize};
use tftex_core::TransferPoint;

use crate::regression::fit_line;

/// Fraction of the segment skipped at the low end.
const WINDOW_LO: f64 = 0.3;

/// Fraction of the segment kept up to at the high end.
const WINDOW_HI: f64 = 0.7;

/// Threshold shift between forward and backward gate sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisResult {
    /// |Vth_forward - Vth_backward| (V).
    pub delta_vth: f64,
    /// Forward-segment threshold (V).
    pub vth_forward: f64,
    /// Backward-segment threshold (V).
    pub vth_backward: f64,
    /// False when either segment's extrapolation degenerated; the delta
    /// must not be trusted in that case.
    pub reliable: bool,
}

/// Compute the hysteresis threshold shift. `None` when either segment is
/// empty, since an empty segment contributes no parameter at all.
pub fn hysteresis_shift(
    forward: &[TransferPoint],
    backward: &[TransferPoint],
) -> Option<HysteresisResult> {
    if forward.is_empty() || backward.is_empty() {
        return None;
    }

    let (vth_forward, fwd_ok) = segment_vth(forward);
    let (vth_backward, bwd_ok) = segment_vth(backward);

    Some(HysteresisResult {
        delta_vth: (vth_forward - vth_backward).abs(),
        vth_forward,
        vth_backward,
        reliable: fwd_ok && bwd_ok,
    })
}

/// Linear extrapolation of `sqrt(ID)` vs VG over the middle 30-70% of a
/// segment: `Vth = -intercept/slope`. A degenerate fit yields (0, false).
fn segment_vth(points: &[TransferPoint]) -> (f64, bool) {
    let n = points.len();
    let start = (n as f64 * WINDOW_LO).floor() as usize;
    let end = ((n as f64 * WINDOW_HI).ceil() as usize).min(n);
    let window = &points[start..end];

    let vgs: Vec<f64> = window.iter().map(|p| p.vg).collect();
    let roots: Vec<f64> = window.iter().map(|p| p.id.max(0.0).sqrt()).collect();

    match fit_line(&vgs, &roots) {
        Some(fit) if fit.slope != 0.0 => (-fit.intercept / fit.slope, true),
        _ => (0.0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Saturation-law segment: sqrt(ID) linear in VG above `vth`.
    fn segment(vth: f64, ascending: bool) -> Vec<TransferPoint> {
        let k = 1e-6;
        let mut points: Vec<TransferPoint> = (0..=100)
            .map(|i| {
                let vg = i as f64 * 0.2;
                let id = if vg > vth { k * (vg - vth).powi(2) } else { 0.0 };
                TransferPoint::new(vg, id)
            })
            .collect();
        if !ascending {
            points.reverse();
        }
        points
    }

    #[test]
    fn test_identical_segments_zero_delta() {
        let forward = segment(2.0, true);
        let backward = segment(2.0, false);

        let result = hysteresis_shift(&forward, &backward).unwrap();
        assert!(result.reliable);
        assert!(
            result.delta_vth.abs() < 0.2,
            "delta = {} expected ~0",
            result.delta_vth
        );
    }

    #[test]
    fn test_shifted_segments() {
        let forward = segment(2.0, true);
        let backward = segment(3.0, false);

        let result = hysteresis_shift(&forward, &backward).unwrap();
        assert!(result.reliable);
        assert!(
            (result.delta_vth - 1.0).abs() < 0.3,
            "delta = {}",
            result.delta_vth
        );
    }

    #[test]
    fn test_flat_segment_unreliable() {
        let forward = segment(2.0, true);
        let backward: Vec<TransferPoint> =
            (0..=100).map(|i| TransferPoint::new(i as f64 * 0.2, 0.0)).collect();

        let result = hysteresis_shift(&forward, &backward).unwrap();
        assert!(!result.reliable);
        assert_eq!(result.vth_backward, 0.0);
    }

    #[test]
    fn test_empty_segment_no_result() {
        let forward = segment(2.0, true);
        assert!(hysteresis_shift(&forward, &[]).is_none());
        assert!(hysteresis_shift(&[], &forward).is_none());
    }
}
