//! Two-phase sample aggregation.
//!
//! Phase 1 runs the per-sweep analyzers independently for every sweep
//! kind supplied for a sample. Phase 2 consumes the completed phase-1
//! results for the cross-sweep parameters: the mobility family needs the
//! linear sweep's threshold and the preferred gm maximum, so it cannot
//! run until every sweep of the sample has been seen.
//!
//! Samples are independent, so analysis fans out across them with rayon;
//! one sample's degenerate data never aborts another's analysis.

use indexmap::IndexMap;
use rayon::prelude::*;
use tftex_core::{DeviceGeometry, MeasurementSweep, SweepKind, TransferPoint};
use tftex_extract::{
    TransconductanceCurve, VthConfig, VthMethod, effective_mobility, field_effect_mobility,
    hysteresis_shift, interface_trap_density, mobility_degradation, normalized_saturation_current,
    on_off_metrics, on_resistance, saturation_current, subthreshold_analysis, y_function_mobility,
};

use crate::parameter::{DerivedCurve, ParamValue, SampleParameterSet, names};
use crate::quality::QualityEvidence;
use crate::stats::SeriesStatistics;

/// Gate-voltage span below which a transfer sweep cannot cover both the
/// subthreshold and on regions (V).
const MIN_VG_SPAN: f64 = 1.0;

/// Configuration of one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Threshold strategy applied to every transfer sweep.
    pub vth_method: VthMethod,
    /// Tunables of the threshold strategies.
    pub vth: VthConfig,
    /// Run-level geometry; a sweep-level geometry overrides it.
    pub geometry: Option<DeviceGeometry>,
    /// Minimum sample count before the run fans out across threads.
    pub min_samples_for_parallel: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            vth_method: VthMethod::default(),
            vth: VthConfig::default(),
            geometry: None,
            min_samples_for_parallel: 2,
        }
    }
}

/// Group sweeps by sample and analyze every group.
///
/// Groups keep first-seen order. Runs in parallel across samples when
/// enough groups and threads are available.
pub fn analyze_samples(
    sweeps: &[MeasurementSweep],
    config: &AnalysisConfig,
) -> Vec<SampleParameterSet> {
    let mut groups: IndexMap<&str, Vec<&MeasurementSweep>> = IndexMap::new();
    for sweep in sweeps {
        groups.entry(sweep.sample.as_str()).or_default().push(sweep);
    }
    let groups: Vec<(&str, Vec<&MeasurementSweep>)> = groups.into_iter().collect();

    let parallel =
        groups.len() >= config.min_samples_for_parallel && rayon::current_num_threads() > 1;

    log::info!(
        "analyzing {} sample(s) from {} sweep(s){}",
        groups.len(),
        sweeps.len(),
        if parallel { " in parallel" } else { "" }
    );

    if parallel {
        groups
            .par_iter()
            .map(|(sample, group)| analyze_sample(sample, group, config))
            .collect()
    } else {
        groups
            .iter()
            .map(|(sample, group)| analyze_sample(sample, group, config))
            .collect()
    }
}

/// Analyze one sample's sweeps into a consolidated parameter record.
pub fn analyze_sample(
    sample: &str,
    sweeps: &[&MeasurementSweep],
    config: &AnalysisConfig,
) -> SampleParameterSet {
    let mut set = SampleParameterSet::new(sample);
    let mut evidence = QualityEvidence::default();

    // First non-empty sweep of each kind.
    let linear = find_transfer(sweeps, SweepKind::Linear);
    let saturation = find_transfer(sweeps, SweepKind::Saturation);
    let output = sweeps
        .iter()
        .find(|s| s.kind == SweepKind::Output && !s.data.is_empty());
    let hysteresis = sweeps
        .iter()
        .find(|s| s.kind == SweepKind::Hysteresis && !s.data.is_empty());

    evidence.sweep_kinds = [
        linear.is_some(),
        saturation.is_some(),
        output.is_some(),
        hysteresis.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    let geometry = sweeps
        .iter()
        .find_map(|s| s.geometry)
        .or(config.geometry)
        .filter(DeviceGeometry::is_valid);

    // Phase 1: per-sweep analyzers.
    let extractor = config.vth_method.extractor(&config.vth);

    let gm_lin = linear.map(|(_, points)| TransconductanceCurve::from_sweep(points));
    let gm_sat = saturation.map(|(_, points)| TransconductanceCurve::from_sweep(points));

    let vth_lin = linear
        .zip(gm_lin.as_ref())
        .map(|((_, points), gm)| extractor.extract(points, gm));
    let vth_sat = saturation
        .zip(gm_sat.as_ref())
        .map(|((_, points), gm)| extractor.extract(points, gm));

    set.set(names::VTH_LIN, vth_lin.map(|r| r.vth).into());
    set.set(names::VTH_SAT, vth_sat.map(|r| r.vth).into());
    if let Some(r2) = vth_lin.and_then(|r| r.diagnostics.r_squared) {
        evidence.record_fit(r2);
    }

    // The reference transfer sweep for the single-sweep parameters:
    // linear when supplied, saturation otherwise.
    let reference = linear.or(saturation);

    if let Some((_, points)) = reference {
        let ss = subthreshold_analysis(points, config.vth.subthreshold_window);
        set.set(names::SS, ParamValue::Value(ss.ss));
        if let Some(r2) = ss.r_squared {
            evidence.record_fit(r2);
        }
        evidence.subthreshold_starved = ss.points_used < 5;

        let vg: Vec<f64> = points.iter().map(|p| p.vg).collect();
        evidence.narrow_range = SeriesStatistics::from_samples(&vg).range() < MIN_VG_SPAN;

        set.set(
            names::DIT,
            geometry
                .map(|g| interface_trap_density(ss.ss, &g))
                .into(),
        );

        let ids: Vec<f64> = points.iter().map(|p| p.id).collect();
        match on_off_metrics(&ids) {
            Some(m) => {
                set.set(names::ION, ParamValue::Value(m.ion));
                set.set(names::IOFF, ParamValue::Value(m.ioff));
                set.set(names::ON_OFF_RATIO, ParamValue::Value(m.ratio));
            }
            None => {
                set.set(names::ION, ParamValue::Unavailable);
                set.set(names::IOFF, ParamValue::Unavailable);
                set.set(names::ON_OFF_RATIO, ParamValue::Unavailable);
            }
        }
    } else {
        for name in [
            names::SS,
            names::DIT,
            names::ION,
            names::IOFF,
            names::ON_OFF_RATIO,
        ] {
            set.set(name, ParamValue::Unavailable);
        }
    }

    set.set(
        names::RON,
        output
            .and_then(|s| s.output_points())
            .and_then(on_resistance)
            .into(),
    );

    let id_sat = saturation
        .and_then(|(_, points)| saturation_current(&points.iter().map(|p| p.id).collect::<Vec<_>>()));
    set.set(names::ID_SAT, id_sat.into());
    set.set(
        names::ID_SAT_MM,
        id_sat
            .zip(geometry)
            .map(|(id, g)| normalized_saturation_current(id, &g))
            .into(),
    );

    match hysteresis.and_then(|s| s.hysteresis_segments()) {
        Some((forward, backward)) => match hysteresis_shift(forward, backward) {
            Some(result) if result.reliable => {
                set.set(names::DELTA_VTH, ParamValue::Value(result.delta_vth));
            }
            Some(_) => {
                log::debug!("sample {sample}: hysteresis extrapolation degenerate");
                set.set(names::DELTA_VTH, ParamValue::Unavailable);
            }
            None => set.set(names::DELTA_VTH, ParamValue::Unavailable),
        },
        None => set.set(names::DELTA_VTH, ParamValue::Unavailable),
    }

    set.set(names::IG_MAX, gate_leakage(sweeps).into());

    // Phase 2: cross-sweep parameters. The linear sweep's gm maximum is
    // preferred over the saturation sweep's.
    let peak_lin = gm_lin.as_ref().and_then(|gm| gm.peak());
    let peak_sat = gm_sat.as_ref().and_then(|gm| gm.peak());
    let peak = match (peak_lin, peak_sat) {
        (Some(lin), _) if lin.gm > 0.0 => Some(lin),
        (_, sat) => sat.or(peak_lin),
    };
    set.set(names::GM_MAX, peak.map(|p| p.gm).into());

    let mobility_inputs = linear.zip(gm_lin.as_ref()).zip(vth_lin).and_then(
        |(((sweep, points), gm), vth)| {
            let geometry = geometry?;
            let vds = sweep.drain_bias?;
            Some((points, gm, vth.vth, geometry, vds))
        },
    );

    match mobility_inputs {
        Some((points, gm, vth, geometry, vds)) => {
            let gm_max = peak.map(|p| p.gm).unwrap_or(0.0);
            set.set(
                names::MU_FE,
                ParamValue::Value(field_effect_mobility(gm_max, &geometry, vds)),
            );

            let y_fit = y_function_mobility(points, gm, vth, &geometry, vds);
            let mu0 = match y_fit {
                Some(fit) => {
                    evidence.record_fit(fit.r_squared);
                    fit.mu0
                }
                None => {
                    log::debug!("sample {sample}: Y-function fit degenerate");
                    0.0
                }
            };
            set.set(names::MU0, ParamValue::Value(mu0));

            let theta = mobility_degradation(points, vth, mu0, &geometry, vds).unwrap_or(0.0);
            set.set(names::THETA, ParamValue::Value(theta));

            let mu_eff = peak
                .map(|p| effective_mobility(mu0, theta, p.vg, vth))
                .unwrap_or(0.0);
            set.set(names::MU_EFF, ParamValue::Value(mu_eff));
        }
        None => {
            for name in [names::MU_FE, names::MU0, names::THETA, names::MU_EFF] {
                set.set(name, ParamValue::Unavailable);
            }
        }
    }

    set.curves = derived_curves(linear, saturation, hysteresis, gm_lin.as_ref(), gm_sat.as_ref());

    evidence.computed = set.available_count();
    set.quality = evidence.score();
    set
}

fn find_transfer<'a>(
    sweeps: &'a [&MeasurementSweep],
    kind: SweepKind,
) -> Option<(&'a MeasurementSweep, &'a [TransferPoint])> {
    sweeps
        .iter()
        .filter(|s| s.kind == kind)
        .find_map(|s| {
            s.transfer_points()
                .filter(|points| !points.is_empty())
                .map(|points| (&**s, points))
        })
}

/// Peak gate-leakage magnitude across every transfer-family sweep.
fn gate_leakage(sweeps: &[&MeasurementSweep]) -> Option<f64> {
    let mut max_ig: Option<f64> = None;
    let mut visit = |points: &[TransferPoint]| {
        for ig in points.iter().filter_map(|p| p.ig) {
            let mag = ig.abs();
            if max_ig.is_none_or(|current| mag > current) {
                max_ig = Some(mag);
            }
        }
    };

    for sweep in sweeps {
        if let Some(points) = sweep.transfer_points() {
            visit(points);
        }
        if let Some((forward, backward)) = sweep.hysteresis_segments() {
            visit(forward);
            visit(backward);
        }
    }
    max_ig
}

fn derived_curves(
    linear: Option<(&MeasurementSweep, &[TransferPoint])>,
    saturation: Option<(&MeasurementSweep, &[TransferPoint])>,
    hysteresis: Option<&&MeasurementSweep>,
    gm_lin: Option<&TransconductanceCurve>,
    gm_sat: Option<&TransconductanceCurve>,
) -> Vec<DerivedCurve> {
    let mut curves = Vec::new();

    let id_vg = |label: &str, points: &[TransferPoint]| DerivedCurve {
        label: label.to_string(),
        points: points.iter().map(|p| (p.vg, p.id)).collect(),
    };

    if let Some((_, points)) = linear {
        curves.push(id_vg("id_vg_linear", points));
    }
    if let Some((_, points)) = saturation {
        curves.push(id_vg("id_vg_saturation", points));
    }
    if let Some((forward, backward)) = hysteresis.and_then(|s| s.hysteresis_segments()) {
        curves.push(id_vg("id_vg_hysteresis_forward", forward));
        curves.push(id_vg("id_vg_hysteresis_backward", backward));
    }

    if let Some(gm) = gm_lin.filter(|gm| !gm.is_empty()).or(gm_sat) {
        curves.push(DerivedCurve {
            label: "gm_vg".to_string(),
            points: gm.points.iter().map(|p| (p.vg, p.gm)).collect(),
        });
    }

    curves
}
