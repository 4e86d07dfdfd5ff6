//! Filename classification and sweep normalization.
//!
//! Measurement files are tagged by keyword: `IDVD` marks an output sweep,
//! `IDVG` plus a mode keyword marks a transfer sweep. The sample grouping
//! key is the file name with those keywords stripped, so
//! `SampleA_IDVD.xlsx` and `SampleA_IDVG_Linear.xlsx` land in one group.

use crate::error::{Error, Result};
use crate::geometry::DeviceGeometry;
use crate::sweep::{
    MeasurementSweep, OutputPoint, SweepData, SweepKind, TransferPoint, detect_turnaround,
};
use crate::table::DataTable;

const KEYWORDS: &[&str] = &[
    "IDVD",
    "IDVG",
    "LINEAR",
    "LIN",
    "SATURATION",
    "SAT",
    "HYSTERESIS",
    "HYS",
];

/// Derive the measurement kind from a file name.
pub fn sweep_kind_from_name(name: &str) -> Result<SweepKind> {
    let upper = name.to_uppercase();

    if upper.contains("IDVD") {
        return Ok(SweepKind::Output);
    }
    if upper.contains("IDVG") {
        if upper.contains("HYS") {
            return Ok(SweepKind::Hysteresis);
        }
        if upper.contains("SAT") {
            return Ok(SweepKind::Saturation);
        }
        if upper.contains("LIN") {
            return Ok(SweepKind::Linear);
        }
    }

    Err(Error::UnknownMeasurementKind(name.to_string()))
}

/// Derive the sample grouping key from a file name.
///
/// Strips the extension and every classification keyword token, then
/// rejoins what remains with `_`.
pub fn sample_key(name: &str) -> String {
    let stem = name
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(name);

    stem.split(['_', '-', ' '])
        .filter(|token| !token.is_empty())
        .filter(|token| {
            let upper = token.to_uppercase();
            !KEYWORDS.contains(&upper.as_str())
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Classify a decoded table into a normalized [`MeasurementSweep`].
///
/// `drain_bias` overrides the bias recorded in a `DrainV` column; for
/// transfer sweeps with neither, the bias stays unknown and the
/// bias-dependent mobility parameters come out unavailable.
pub fn classify_sweep(
    filename: &str,
    table: &DataTable,
    geometry: Option<DeviceGeometry>,
    drain_bias: Option<f64>,
) -> Result<MeasurementSweep> {
    let kind = sweep_kind_from_name(filename)?;
    let sample = sample_key(filename);

    let data = match kind {
        SweepKind::Output => build_output(table)?,
        SweepKind::Linear | SweepKind::Saturation => {
            SweepData::Transfer(build_transfer_points(table)?)
        }
        SweepKind::Hysteresis => build_hysteresis(table)?,
    };

    let drain_bias = drain_bias.or_else(|| match kind {
        SweepKind::Output => None,
        _ => table
            .column_aliased("DrainV")
            .and_then(|col| col.first().copied()),
    });

    Ok(MeasurementSweep {
        sample,
        kind,
        data,
        drain_bias,
        geometry,
    })
}

fn build_transfer_points(table: &DataTable) -> Result<Vec<TransferPoint>> {
    let vg = table.require_column("GateV")?;
    let id = table.require_column("DrainI")?;
    table.check_lengths(&["DrainI", "GateI", "GM"], vg.len())?;

    let ig = table.column_aliased("GateI");
    let gm = table.column_aliased("GM");

    Ok(vg
        .iter()
        .enumerate()
        .map(|(i, &vg)| TransferPoint {
            vg,
            id: id[i],
            ig: ig.map(|col| col[i]),
            gm: gm.map(|col| col[i]),
        })
        .collect())
}

fn build_output(table: &DataTable) -> Result<SweepData> {
    let vd = table.require_column("DrainV")?;
    let family = table.indexed_family("DrainI");
    if family.is_empty() {
        return Err(Error::ColumnNotFound("DrainI".to_string()));
    }

    let mut points = Vec::new();
    for (vg_index, (_, id)) in family.iter().enumerate() {
        if id.len() != vd.len() {
            return Err(Error::ColumnLengthMismatch {
                name: format!("DrainI({})", vg_index + 1),
                expected: vd.len(),
                actual: id.len(),
            });
        }
        points.extend(vd.iter().zip(id.iter()).map(|(&vd, &id)| OutputPoint {
            vd,
            id,
            vg_index,
        }));
    }

    Ok(SweepData::Output(points))
}

fn build_hysteresis(table: &DataTable) -> Result<SweepData> {
    let points = build_transfer_points(table)?;
    let vg: Vec<f64> = points.iter().map(|p| p.vg).collect();

    // The split is validated against an actual direction reversal; a
    // monotonic column is rejected instead of being halved blindly.
    let split = detect_turnaround(&vg).ok_or(Error::NoTurnaround)?;
    let (forward, backward) = points.split_at(split);

    Ok(SweepData::Hysteresis {
        forward: forward.to_vec(),
        backward: backward.to_vec(),
    })
}
