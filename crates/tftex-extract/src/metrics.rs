//! On/off performance metrics.

use serde::{Deserialize, Serialize};
use tftex_core::{DeviceGeometry, OutputPoint};

use crate::regression::fit_line;

/// Floor for the off-current and the on/off-ratio denominator (A).
const IOFF_FLOOR: f64 = 1e-12;

/// Maximum number of fitted points in the on-resistance regression.
const RON_MAX_POINTS: usize = 5;

/// Minimum number of fitted points in the on-resistance regression.
const RON_MIN_POINTS: usize = 3;

/// On/off current metrics of a transfer sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OnOffMetrics {
    /// Maximum drain current (A).
    pub ion: f64,
    /// Minimum strictly-positive drain current, floored at 1e-12 (A).
    pub ioff: f64,
    /// Ion / max(Ioff, 1e-12).
    pub ratio: f64,
}

/// Compute Ion, Ioff and their ratio. `None` for an empty sweep.
pub fn on_off_metrics(ids: &[f64]) -> Option<OnOffMetrics> {
    if ids.is_empty() {
        return None;
    }

    let ion = ids.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let ioff = ids
        .iter()
        .copied()
        .filter(|&id| id > 0.0)
        .fold(f64::INFINITY, f64::min);
    let ioff = if ioff.is_finite() { ioff } else { IOFF_FLOOR };

    Some(OnOffMetrics {
        ion,
        ioff,
        ratio: ion / ioff.max(IOFF_FLOOR),
    })
}

/// On-resistance from the linear region of an output sweep (ohm).
///
/// Takes the highest gate-voltage sub-curve, skips its very first point,
/// regresses ID on VD over the next three to five points, and inverts the
/// slope. Left unset for a flat or negative slope or too few points.
pub fn on_resistance(points: &[OutputPoint]) -> Option<f64> {
    let top_index = points.iter().map(|p| p.vg_index).max()?;
    let curve: Vec<&OutputPoint> = points.iter().filter(|p| p.vg_index == top_index).collect();

    if curve.len() < RON_MIN_POINTS + 1 {
        return None;
    }
    let window = &curve[1..curve.len().min(RON_MAX_POINTS + 1)];

    let vds: Vec<f64> = window.iter().map(|p| p.vd).collect();
    let ids: Vec<f64> = window.iter().map(|p| p.id).collect();

    let fit = fit_line(&vds, &ids)?;
    if fit.slope > 0.0 {
        Some(1.0 / fit.slope)
    } else {
        None
    }
}

/// Saturation drain current: max(ID) of a saturation transfer sweep (A).
pub fn saturation_current(ids: &[f64]) -> Option<f64> {
    ids.iter().copied().reduce(f64::max)
}

/// Saturation current normalized by channel width (A/mm).
///
/// Returns 0 for a non-positive width.
pub fn normalized_saturation_current(id_sat: f64, geometry: &DeviceGeometry) -> f64 {
    let width_mm = geometry.width_mm();
    if width_mm > 0.0 { id_sat / width_mm } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_off_metrics_exact() {
        let ids = [1e-12, 5e-11, 1e-6, 2e-5, 0.0, -1e-13];
        let metrics = on_off_metrics(&ids).unwrap();

        assert_eq!(metrics.ion, 2e-5);
        assert_eq!(metrics.ioff, 1e-12);
        assert_eq!(metrics.ratio, 2e-5 / 1e-12);
    }

    #[test]
    fn test_on_off_no_positive_current() {
        let ids = [0.0, -1e-9, 0.0];
        let metrics = on_off_metrics(&ids).unwrap();

        assert_eq!(metrics.ioff, IOFF_FLOOR);
        assert_eq!(metrics.ratio, 0.0 / IOFF_FLOOR);
    }

    #[test]
    fn test_on_off_empty() {
        assert!(on_off_metrics(&[]).is_none());
    }

    #[test]
    fn test_on_resistance_linear_curve() {
        // Top sub-curve: ID = VD / 1k; lower curve should be ignored
        let mut points = Vec::new();
        for i in 0..10 {
            let vd = i as f64 * 0.1;
            points.push(OutputPoint {
                vd,
                id: vd / 5000.0,
                vg_index: 0,
            });
            points.push(OutputPoint {
                vd,
                id: vd / 1000.0,
                vg_index: 1,
            });
        }

        let ron = on_resistance(&points).unwrap();
        assert!((ron - 1000.0).abs() < 1e-6, "ron = {ron}");
    }

    #[test]
    fn test_on_resistance_flat_curve_unset() {
        let points: Vec<OutputPoint> = (0..8)
            .map(|i| OutputPoint {
                vd: i as f64 * 0.1,
                id: 1e-6,
                vg_index: 0,
            })
            .collect();

        assert!(on_resistance(&points).is_none());
    }

    #[test]
    fn test_on_resistance_too_few_points() {
        let points: Vec<OutputPoint> = (0..3)
            .map(|i| OutputPoint {
                vd: i as f64 * 0.1,
                id: i as f64 * 1e-6,
                vg_index: 0,
            })
            .collect();

        assert!(on_resistance(&points).is_none());
        assert!(on_resistance(&[]).is_none());
    }

    #[test]
    fn test_saturation_current() {
        assert_eq!(saturation_current(&[1e-6, 5e-5, 2e-5]), Some(5e-5));
        assert!(saturation_current(&[]).is_none());
    }

    #[test]
    fn test_normalized_saturation_current() {
        let geometry = DeviceGeometry::new(2e-3, 10e-6, 100e-9);
        // 2 mm width: 1e-4 A -> 5e-5 A/mm
        assert!((normalized_saturation_current(1e-4, &geometry) - 5e-5).abs() < 1e-18);

        let flat = DeviceGeometry::new(0.0, 10e-6, 100e-9);
        assert_eq!(normalized_saturation_current(1e-4, &flat), 0.0);
    }
}
