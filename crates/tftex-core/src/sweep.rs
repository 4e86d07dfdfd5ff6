//! Normalized sweep records.
//!
//! A [`MeasurementSweep`] is the unit of analysis: one measured curve (or
//! one round-trip pair for hysteresis) tagged with its kind and the sample
//! it belongs to. Sweeps are immutable once ingested; analyzers only
//! produce new derived records from them.

use serde::{Deserialize, Serialize};

use crate::geometry::DeviceGeometry;

/// Declared measurement kind of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepKind {
    /// ID vs VD at stepped gate voltages.
    Output,
    /// ID vs VG at a small constant drain bias.
    Linear,
    /// ID vs VG at a large constant drain bias.
    Saturation,
    /// Forward/backward ID vs VG round trip.
    Hysteresis,
}

impl SweepKind {
    /// Lower-case label for reports and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepKind::Output => "output",
            SweepKind::Linear => "linear",
            SweepKind::Saturation => "saturation",
            SweepKind::Hysteresis => "hysteresis",
        }
    }
}

/// One point of a transfer (ID vs VG) sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferPoint {
    /// Gate voltage (V).
    pub vg: f64,
    /// Drain current (A).
    pub id: f64,
    /// Gate leakage current (A), when the instrument recorded it.
    pub ig: Option<f64>,
    /// Instrument-measured transconductance (S), when recorded.
    pub gm: Option<f64>,
}

impl TransferPoint {
    /// Create a point carrying only gate voltage and drain current.
    pub fn new(vg: f64, id: f64) -> Self {
        Self {
            vg,
            id,
            ig: None,
            gm: None,
        }
    }
}

/// One point of an output (ID vs VD) sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputPoint {
    /// Drain voltage (V).
    pub vd: f64,
    /// Drain current (A).
    pub id: f64,
    /// Index of the gate-voltage sub-curve this point belongs to.
    /// Higher index means higher gate voltage.
    pub vg_index: usize,
}

/// Point data of a sweep, keyed by measurement family.
///
/// Hysteresis segments are explicit. Analyzers never split a round trip
/// positionally; callers holding a single round-trip column can use
/// [`detect_turnaround`] to locate the reversal before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SweepData {
    /// Transfer-family points (Linear or Saturation).
    Transfer(Vec<TransferPoint>),
    /// Output points across gate-voltage sub-curves.
    Output(Vec<OutputPoint>),
    /// Explicit forward and backward transfer segments.
    Hysteresis {
        forward: Vec<TransferPoint>,
        backward: Vec<TransferPoint>,
    },
}

impl SweepData {
    /// Total number of points across all segments.
    pub fn len(&self) -> usize {
        match self {
            SweepData::Transfer(points) => points.len(),
            SweepData::Output(points) => points.len(),
            SweepData::Hysteresis { forward, backward } => forward.len() + backward.len(),
        }
    }

    /// True when the sweep holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A normalized measurement sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSweep {
    /// Grouping key of the physical sample this sweep belongs to.
    pub sample: String,
    /// Declared measurement kind.
    pub kind: SweepKind,
    /// Point data.
    pub data: SweepData,
    /// Constant drain bias of a transfer sweep (V), when known.
    pub drain_bias: Option<f64>,
    /// Per-sweep geometry override; falls back to the run-level geometry.
    pub geometry: Option<DeviceGeometry>,
}

impl MeasurementSweep {
    /// Transfer points of a Linear or Saturation sweep, if this is one.
    pub fn transfer_points(&self) -> Option<&[TransferPoint]> {
        match &self.data {
            SweepData::Transfer(points) => Some(points),
            _ => None,
        }
    }

    /// Output points, if this is an Output sweep.
    pub fn output_points(&self) -> Option<&[OutputPoint]> {
        match &self.data {
            SweepData::Output(points) => Some(points),
            _ => None,
        }
    }

    /// Forward/backward segments, if this is a Hysteresis sweep.
    pub fn hysteresis_segments(&self) -> Option<(&[TransferPoint], &[TransferPoint])> {
        match &self.data {
            SweepData::Hysteresis { forward, backward } => Some((forward, backward)),
            _ => None,
        }
    }
}

/// Locate the turnaround index of a round-trip gate-voltage column.
///
/// Returns the index of the first point of the return segment, i.e. the
/// split position such that `vg[..i]` is the forward segment and `vg[i..]`
/// the backward one. Returns `None` when the column never reverses
/// direction, rather than assuming a half-way split.
pub fn detect_turnaround(vg: &[f64]) -> Option<usize> {
    if vg.len() < 3 {
        return None;
    }

    // Direction of the initial leg, skipping any leading flat run.
    let mut initial = 0.0;
    for pair in vg.windows(2) {
        let dv = pair[1] - pair[0];
        if dv != 0.0 {
            initial = dv;
            break;
        }
    }
    if initial == 0.0 {
        return None;
    }

    for (i, pair) in vg.windows(2).enumerate() {
        let dv = pair[1] - pair[0];
        if dv * initial < 0.0 {
            return Some(i + 1);
        }
    }

    None
}
