//! Per-sweep parameter extraction for tftex.
//!
//! This crate provides:
//! - Transconductance estimation (measured pass-through or central difference)
//! - Threshold-voltage extraction (four interchangeable strategies)
//! - Mobility extraction (field-effect, Y-function, degradation factor)
//! - Subthreshold swing and interface-trap density
//! - On/off performance metrics and on-resistance
//! - Hysteresis threshold shift

pub mod error;
pub mod hysteresis;
pub mod metrics;
pub mod mobility;
pub mod regression;
pub mod subthreshold;
pub mod threshold;
pub mod transconductance;

pub use error::{Error, Result};
pub use hysteresis::{HysteresisResult, hysteresis_shift};
pub use metrics::{
    OnOffMetrics, normalized_saturation_current, on_off_metrics, on_resistance,
    saturation_current,
};
pub use mobility::{
    YFunctionFit, effective_mobility, field_effect_mobility, mobility_degradation,
    y_function_mobility,
};
pub use regression::{LineFit, OriginFit, fit_line, fit_through_origin, unit_slope_intercept};
pub use subthreshold::{SubthresholdResult, interface_trap_density, subthreshold_analysis};
pub use threshold::{
    ConstantCurrent, GmMaxExtrapolation, LogSpaceExtrapolation, SubthresholdFit,
    ThresholdDiagnostics, ThresholdExtractor, ThresholdResult, VthConfig, VthMethod,
};
pub use transconductance::{GmPoint, TransconductanceCurve};
