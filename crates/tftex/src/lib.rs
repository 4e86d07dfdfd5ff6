//! # tftex
//!
//! Thin-film-transistor parameter extraction in Rust.
//!
//! tftex turns raw electrical sweep measurements into physical figures of
//! merit: threshold voltage, mobility, subthreshold swing, interface-trap
//! density, on/off currents, on-resistance and hysteresis shift. It is a
//! pure computation library: decoded column tables go in, consolidated
//! per-sample parameter records come out.
//!
//! ## Quick Start
//!
//! ```rust
//! use tftex::prelude::*;
//!
//! let table = DataTable::new()
//!     .with_column("GateV(1)", (0..=100).map(|i| i as f64 * 0.2).collect())
//!     .with_column(
//!         "DrainI(1)",
//!         (0..=100)
//!             .map(|i| {
//!                 let vg = i as f64 * 0.2;
//!                 if vg > 2.0 { 1e-5 * (vg - 2.0) } else { 1e-11 }
//!             })
//!             .collect(),
//!     );
//!
//! let sweep = classify_sweep("SampleA_IDVG_Linear.xlsx", &table, None, Some(0.1)).unwrap();
//! let results = analyze_samples(&[sweep], &AnalysisConfig::default());
//! println!("{}", run_to_text(&results));
//! ```

// Re-export member crates
pub use tftex_aggregate as aggregate;
pub use tftex_core as core;
pub use tftex_extract as extract;

// ============================================================================
// Convenient re-exports from tftex_core
// ============================================================================

pub use tftex_core::{
    DataTable,
    DeviceGeometry,
    // Errors
    Error as CoreError,
    // Sweep records
    MeasurementSweep,
    OutputPoint,
    SweepData,
    SweepKind,
    TransferPoint,
    // Classification
    classify_sweep,
    detect_turnaround,
    sample_key,
    sweep_kind_from_name,
};

// ============================================================================
// Convenient re-exports from tftex_extract
// ============================================================================

pub use tftex_extract::{
    ConstantCurrent,
    // Threshold strategies
    GmMaxExtrapolation,
    HysteresisResult,
    LogSpaceExtrapolation,
    OnOffMetrics,
    SubthresholdFit,
    SubthresholdResult,
    ThresholdExtractor,
    ThresholdResult,
    // Transconductance
    TransconductanceCurve,
    VthConfig,
    VthMethod,
    YFunctionFit,
    effective_mobility,
    // Mobility
    field_effect_mobility,
    hysteresis_shift,
    mobility_degradation,
    normalized_saturation_current,
    // Performance metrics
    on_off_metrics,
    on_resistance,
    saturation_current,
    subthreshold_analysis,
    y_function_mobility,
};

// ============================================================================
// Convenient re-exports from tftex_aggregate
// ============================================================================

pub use tftex_aggregate::{
    // Pipeline
    AnalysisConfig,
    DerivedCurve,
    // Parameter records
    ParamValue,
    QualityScore,
    SampleParameterSet,
    analyze_sample,
    analyze_samples,
    names,
    run_to_text,
    // Reports
    to_text,
};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use tftex::prelude::*;
/// ```
pub mod prelude {
    // Core data model
    pub use crate::{
        DataTable, DeviceGeometry, MeasurementSweep, SweepData, SweepKind, TransferPoint,
    };

    // Classification
    pub use crate::{classify_sweep, sample_key, sweep_kind_from_name};

    // Extraction
    pub use crate::{ThresholdExtractor, TransconductanceCurve, VthConfig, VthMethod};

    // Aggregation
    pub use crate::{
        AnalysisConfig, ParamValue, QualityScore, SampleParameterSet, analyze_samples, names,
        run_to_text,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_and_analyze() {
        let table = DataTable::new()
            .with_column("GateV", vec![0.0, 1.0, 2.0, 3.0, 4.0])
            .with_column("DrainI", vec![1e-11, 1e-10, 1e-8, 1e-6, 2e-6]);

        let sweep = classify_sweep("S1_IDVG_Lin.xlsx", &table, None, Some(0.1)).unwrap();
        assert_eq!(sweep.kind, SweepKind::Linear);

        let results = analyze_samples(&[sweep], &AnalysisConfig::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sample, "S1");
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let geometry = DeviceGeometry::new(1e-3, 100e-6, 100e-9);
        assert!(geometry.cox() > 0.0);
        let _ = VthMethod::default();
    }
}
