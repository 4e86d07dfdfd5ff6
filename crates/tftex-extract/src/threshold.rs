//! Threshold-voltage extraction strategies.
//!
//! Four interchangeable algorithms share the [`ThresholdExtractor`]
//! contract, so a caller can request any one without re-deriving the gm
//! curve, and a fifth method can be added without touching call sites.
//!
//! Accuracy ranking in practice: constant-current is the robust default,
//! linear extrapolation at gm_max and the subthreshold fit are close
//! behind, and log-space extrapolation is the most noise-sensitive.

use serde::{Deserialize, Serialize};
use tftex_core::TransferPoint;

use crate::transconductance::TransconductanceCurve;

/// VG matching tolerance between a sweep point and the gm peak (V).
const GM_MATCH_TOL: f64 = 0.1;

/// Strategy selector for threshold extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VthMethod {
    /// Linear extrapolation at the gm maximum.
    LinearExtrapolation,
    /// Constant-current crossing (robust default).
    #[default]
    ConstantCurrent,
    /// Least-squares fit of the subthreshold log-current slope.
    SubthresholdFit,
    /// gm-maximum extrapolation on the log-transformed current.
    LogExtrapolation,
}

/// Tunable constants of the threshold strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VthConfig {
    /// Target current of the constant-current method (A).
    pub i_target: f64,
    /// `log10|ID|` window of the subthreshold fit.
    pub subthreshold_window: (f64, f64),
    /// Target `log10|ID|` at which the subthreshold fit is inverted.
    pub log_target: f64,
}

impl Default for VthConfig {
    fn default() -> Self {
        Self {
            i_target: 1e-7,
            subthreshold_window: (-10.0, -6.0),
            log_target: -7.0,
        }
    }
}

impl VthMethod {
    /// Materialize the strategy for this method.
    pub fn extractor(&self, config: &VthConfig) -> Box<dyn ThresholdExtractor> {
        match self {
            VthMethod::LinearExtrapolation => Box::new(GmMaxExtrapolation),
            VthMethod::ConstantCurrent => Box::new(ConstantCurrent {
                target: config.i_target,
            }),
            VthMethod::SubthresholdFit => Box::new(SubthresholdFit {
                window: config.subthreshold_window,
                target_log: config.log_target,
            }),
            VthMethod::LogExtrapolation => Box::new(LogSpaceExtrapolation),
        }
    }
}

/// Method-specific diagnostics attached to a threshold result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDiagnostics {
    /// Regression fit quality, when the method fits a line.
    pub r_squared: Option<f64>,
    /// Number of sweep points the method actually used.
    pub points_used: usize,
    /// False when the method degraded to its 0 V fallback.
    pub reliable: bool,
}

/// Extracted threshold voltage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Threshold voltage (V). 0 when the method could not resolve one.
    pub vth: f64,
    /// Strategy that produced this value.
    pub method: VthMethod,
    /// Method-specific diagnostics.
    pub diagnostics: ThresholdDiagnostics,
}

impl ThresholdResult {
    fn unresolved(method: VthMethod) -> Self {
        Self {
            vth: 0.0,
            method,
            diagnostics: ThresholdDiagnostics {
                r_squared: None,
                points_used: 0,
                reliable: false,
            },
        }
    }
}

/// Common contract of the threshold strategies.
pub trait ThresholdExtractor {
    /// Extract a threshold voltage from a transfer sweep and its gm curve.
    ///
    /// Never fails: degenerate inputs resolve to a 0 V result flagged
    /// unreliable in the diagnostics.
    fn extract(&self, points: &[TransferPoint], gm: &TransconductanceCurve) -> ThresholdResult;
}

/// Linear extrapolation at the point of maximum transconductance:
/// `Vth = VG(gm_max) - ID(gm_max) / gm_max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GmMaxExtrapolation;

impl ThresholdExtractor for GmMaxExtrapolation {
    fn extract(&self, points: &[TransferPoint], gm: &TransconductanceCurve) -> ThresholdResult {
        let Some(peak) = gm.peak().filter(|p| p.gm > 0.0) else {
            return ThresholdResult::unresolved(VthMethod::LinearExtrapolation);
        };

        // Drain current at the sweep point matching the gm peak.
        let id_at_max = points
            .iter()
            .filter(|p| (p.vg - peak.vg).abs() <= GM_MATCH_TOL)
            .min_by(|a, b| (a.vg - peak.vg).abs().total_cmp(&(b.vg - peak.vg).abs()))
            .map(|p| p.id);
        let Some(id_at_max) = id_at_max else {
            return ThresholdResult::unresolved(VthMethod::LinearExtrapolation);
        };

        ThresholdResult {
            vth: peak.vg - id_at_max / peak.gm,
            method: VthMethod::LinearExtrapolation,
            diagnostics: ThresholdDiagnostics {
                r_squared: None,
                points_used: 1,
                reliable: true,
            },
        }
    }
}

/// Constant-current method: VG at which `ID` crosses a fixed target,
/// interpolated on the `(VG, log10|ID|)` curve.
#[derive(Debug, Clone, Copy)]
pub struct ConstantCurrent {
    /// Target current (A).
    pub target: f64,
}

impl Default for ConstantCurrent {
    fn default() -> Self {
        Self { target: 1e-7 }
    }
}

impl ThresholdExtractor for ConstantCurrent {
    fn extract(&self, points: &[TransferPoint], _gm: &TransconductanceCurve) -> ThresholdResult {
        if self.target <= 0.0 {
            return ThresholdResult::unresolved(VthMethod::ConstantCurrent);
        }

        let curve: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.id > 0.0)
            .map(|p| (p.vg, p.id.log10()))
            .collect();
        if curve.is_empty() {
            return ThresholdResult::unresolved(VthMethod::ConstantCurrent);
        }

        let target_log = self.target.log10();
        let diagnostics = |reliable| ThresholdDiagnostics {
            r_squared: None,
            points_used: curve.len(),
            reliable,
        };

        // Clamp to the curve ends when the target is out of range.
        if target_log <= curve[0].1 {
            return ThresholdResult {
                vth: curve[0].0,
                method: VthMethod::ConstantCurrent,
                diagnostics: diagnostics(false),
            };
        }
        if let Some(last) = curve.last() {
            if target_log >= last.1 {
                return ThresholdResult {
                    vth: last.0,
                    method: VthMethod::ConstantCurrent,
                    diagnostics: diagnostics(false),
                };
            }
        }

        for pair in curve.windows(2) {
            let (vg0, log0) = pair[0];
            let (vg1, log1) = pair[1];
            let crosses = (log0 <= target_log && log1 >= target_log)
                || (log0 >= target_log && log1 <= target_log);
            if crosses {
                let vth = if (log1 - log0).abs() < 1e-30 {
                    vg0
                } else {
                    let alpha = (target_log - log0) / (log1 - log0);
                    vg0 + alpha * (vg1 - vg0)
                };
                return ThresholdResult {
                    vth,
                    method: VthMethod::ConstantCurrent,
                    diagnostics: diagnostics(true),
                };
            }
        }

        ThresholdResult::unresolved(VthMethod::ConstantCurrent)
    }
}

/// Subthreshold extrapolation: fit `log10|ID| = slope*VG + intercept`
/// inside a log-current window, then invert at a target log current.
#[derive(Debug, Clone, Copy)]
pub struct SubthresholdFit {
    /// `log10|ID|` acceptance window.
    pub window: (f64, f64),
    /// Target `log10|ID|` at which the fit is inverted.
    pub target_log: f64,
}

impl Default for SubthresholdFit {
    fn default() -> Self {
        Self {
            window: (-10.0, -6.0),
            target_log: -7.0,
        }
    }
}

impl ThresholdExtractor for SubthresholdFit {
    fn extract(&self, points: &[TransferPoint], _gm: &TransconductanceCurve) -> ThresholdResult {
        let (lo, hi) = self.window;
        let (vgs, logs): (Vec<f64>, Vec<f64>) = points
            .iter()
            .filter(|p| p.id.abs() > 0.0)
            .map(|p| (p.vg, p.id.abs().log10()))
            .filter(|&(_, log_id)| log_id >= lo && log_id <= hi)
            .unzip();

        let Some(fit) = crate::regression::fit_line(&vgs, &logs) else {
            return ThresholdResult::unresolved(VthMethod::SubthresholdFit);
        };
        if fit.slope == 0.0 {
            return ThresholdResult::unresolved(VthMethod::SubthresholdFit);
        }

        ThresholdResult {
            vth: (self.target_log - fit.intercept) / fit.slope,
            method: VthMethod::SubthresholdFit,
            diagnostics: ThresholdDiagnostics {
                r_squared: Some(fit.r_squared),
                points_used: fit.n,
                reliable: true,
            },
        }
    }
}

/// gm-maximum extrapolation in log space: the slope maximum of
/// `log10|ID|` vs VG, extrapolated to the log-current axis crossing.
///
/// Kept for parity with instrument software; most sensitive to noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpaceExtrapolation;

impl ThresholdExtractor for LogSpaceExtrapolation {
    fn extract(&self, points: &[TransferPoint], _gm: &TransconductanceCurve) -> ThresholdResult {
        let curve: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.id > 0.0)
            .map(|p| (p.vg, p.id.log10()))
            .collect();
        if curve.len() < 3 {
            return ThresholdResult::unresolved(VthMethod::LogExtrapolation);
        }

        // Central-difference slope of the log-current curve.
        let mut best: Option<(f64, f64, f64)> = None; // (slope, vg, log_id)
        for i in 1..curve.len() - 1 {
            let dvg = curve[i + 1].0 - curve[i - 1].0;
            if dvg == 0.0 {
                continue;
            }
            let slope = (curve[i + 1].1 - curve[i - 1].1) / dvg;
            if best.is_none_or(|(s, _, _)| slope > s) {
                best = Some((slope, curve[i].0, curve[i].1));
            }
        }

        let Some((slope, vg, log_id)) = best.filter(|&(s, _, _)| s > 0.0) else {
            return ThresholdResult::unresolved(VthMethod::LogExtrapolation);
        };

        ThresholdResult {
            vth: vg - log_id / slope,
            method: VthMethod::LogExtrapolation,
            diagnostics: ThresholdDiagnostics {
                r_squared: None,
                points_used: curve.len(),
                reliable: true,
            },
        }
    }
}
