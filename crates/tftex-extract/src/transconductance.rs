//! Transconductance estimation.
//!
//! Instrument-measured gm columns are trusted when present; otherwise gm
//! is derived by central difference over the interior points of the
//! transfer sweep.

use serde::{Deserialize, Serialize};
use tftex_core::{MeasurementSweep, TransferPoint};

use crate::error::{Error, Result};

/// One point of a transconductance curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GmPoint {
    /// Gate voltage (V).
    pub vg: f64,
    /// Transconductance (S).
    pub gm: f64,
}

/// A gm-vs-VG curve derived from one transfer sweep.
///
/// Never persisted; always recomputed from its source sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransconductanceCurve {
    /// Curve points, in sweep order.
    pub points: Vec<GmPoint>,
}

impl TransconductanceCurve {
    /// Build the gm curve for a transfer sweep.
    ///
    /// A measured gm column with at least one positive value is passed
    /// through directly. Otherwise each interior point gets
    /// `gm_i = |ID_{i+1} - ID_{i-1}| / (VG_{i+1} - VG_{i-1})`, with the
    /// gate voltage rounded to one decimal for later point matching;
    /// zero-`dVG` points are skipped.
    pub fn from_sweep(points: &[TransferPoint]) -> Self {
        let has_measured = points.iter().any(|p| p.gm.is_some_and(|gm| gm > 0.0));
        if has_measured {
            return Self {
                points: points
                    .iter()
                    .filter_map(|p| p.gm.map(|gm| GmPoint { vg: p.vg, gm }))
                    .collect(),
            };
        }

        let mut curve = Vec::new();
        for i in 1..points.len().saturating_sub(1) {
            let dvg = points[i + 1].vg - points[i - 1].vg;
            if dvg == 0.0 {
                continue;
            }
            let gm = ((points[i + 1].id - points[i - 1].id) / dvg).abs();
            curve.push(GmPoint {
                vg: round_decivolt(points[i].vg),
                gm,
            });
        }

        Self { points: curve }
    }

    /// Build the gm curve for a transfer-family sweep record.
    ///
    /// Rejects output sweeps, which have no gm; hysteresis records use
    /// their forward segment.
    pub fn try_from_measurement(sweep: &MeasurementSweep) -> Result<Self> {
        if let Some(points) = sweep.transfer_points() {
            return Ok(Self::from_sweep(points));
        }
        if let Some((forward, _)) = sweep.hysteresis_segments() {
            return Ok(Self::from_sweep(forward));
        }
        Err(Error::KindMismatch {
            expected: "transfer",
            actual: sweep.kind.as_str(),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point of maximum transconductance.
    pub fn peak(&self) -> Option<GmPoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.gm.total_cmp(&b.gm))
    }

    /// gm at the point closest to `vg`, if one lies within `tol` volts.
    pub fn gm_near(&self, vg: f64, tol: f64) -> Option<f64> {
        self.points
            .iter()
            .filter(|p| (p.vg - vg).abs() <= tol)
            .min_by(|a, b| (a.vg - vg).abs().total_cmp(&(b.vg - vg).abs()))
            .map(|p| p.gm)
    }
}

fn round_decivolt(vg: f64) -> f64 {
    (vg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_sweep(n: usize) -> Vec<TransferPoint> {
        // ID = 2e-6 * VG, VG = 0, 0.1, 0.2, ...
        (0..n)
            .map(|i| {
                let vg = i as f64 * 0.1;
                TransferPoint::new(vg, 2e-6 * vg)
            })
            .collect()
    }

    #[test]
    fn test_central_difference_length_and_sign() {
        let sweep = ramp_sweep(21);
        let curve = TransconductanceCurve::from_sweep(&sweep);

        // Interior points only
        assert_eq!(curve.len(), sweep.len() - 2);
        for p in &curve.points {
            assert!(p.gm >= 0.0);
            assert!((p.gm - 2e-6).abs() < 1e-12);
        }
    }

    #[test]
    fn test_measured_gm_pass_through() {
        let mut sweep = ramp_sweep(5);
        for (i, p) in sweep.iter_mut().enumerate() {
            p.gm = Some(1e-6 * (i + 1) as f64);
        }

        let curve = TransconductanceCurve::from_sweep(&sweep);
        assert_eq!(curve.len(), 5);
        let peak = curve.peak().unwrap();
        assert!((peak.gm - 5e-6).abs() < 1e-18);
    }

    #[test]
    fn test_all_nonpositive_measured_gm_falls_back() {
        let mut sweep = ramp_sweep(5);
        for p in sweep.iter_mut() {
            p.gm = Some(0.0);
        }

        let curve = TransconductanceCurve::from_sweep(&sweep);
        // Computed by central difference, not passed through
        assert_eq!(curve.len(), 3);
        assert!(curve.points[0].gm > 0.0);
    }

    #[test]
    fn test_zero_dvg_skipped() {
        let sweep = vec![
            TransferPoint::new(0.0, 1e-9),
            TransferPoint::new(0.0, 2e-9),
            TransferPoint::new(0.0, 3e-9),
            TransferPoint::new(1.0, 4e-9),
        ];
        let curve = TransconductanceCurve::from_sweep(&sweep);
        // The i=1 interior point has dVG = 0 and is dropped
        assert_eq!(curve.len(), 1);
    }

    #[test]
    fn test_vg_rounded_to_one_decimal() {
        let sweep = vec![
            TransferPoint::new(0.0, 0.0),
            TransferPoint::new(0.1499, 1e-7),
            TransferPoint::new(0.3, 2e-7),
        ];
        let curve = TransconductanceCurve::from_sweep(&sweep);
        assert!((curve.points[0].vg - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_gm_near_tolerance() {
        let sweep = ramp_sweep(21);
        let curve = TransconductanceCurve::from_sweep(&sweep);

        assert!(curve.gm_near(1.0, 0.05).is_some());
        assert!(curve.gm_near(1.02, 0.05).is_some());
        assert!(curve.gm_near(10.0, 0.05).is_none());
    }

    #[test]
    fn test_empty_sweep() {
        let curve = TransconductanceCurve::from_sweep(&[]);
        assert!(curve.is_empty());
        assert!(curve.peak().is_none());
    }

    #[test]
    fn test_output_sweep_rejected() {
        use tftex_core::{SweepData, SweepKind};

        let sweep = MeasurementSweep {
            sample: "S1".to_string(),
            kind: SweepKind::Output,
            data: SweepData::Output(vec![]),
            drain_bias: None,
            geometry: None,
        };

        assert!(matches!(
            TransconductanceCurve::try_from_measurement(&sweep),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_transfer_measurement_accepted() {
        use tftex_core::{SweepData, SweepKind};

        let sweep = MeasurementSweep {
            sample: "S1".to_string(),
            kind: SweepKind::Linear,
            data: SweepData::Transfer(ramp_sweep(21)),
            drain_bias: Some(0.1),
            geometry: None,
        };

        let curve = TransconductanceCurve::try_from_measurement(&sweep).unwrap();
        assert_eq!(curve.len(), 19);
    }
}
