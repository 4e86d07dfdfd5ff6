//! Sample aggregation and quality scoring for tftex.
//!
//! This crate groups classified sweeps by sample, runs the per-sweep
//! analyzers, merges cross-sweep results (the mobility family needs the
//! linear sweep's threshold and gm maximum), and emits one consolidated
//! [`SampleParameterSet`] with a categorical quality score per sample.

pub mod error;
pub mod parameter;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod stats;

pub use error::{Error, Result};
pub use parameter::{DerivedCurve, ParamValue, SampleParameterSet, names};
pub use pipeline::{AnalysisConfig, analyze_sample, analyze_samples};
pub use quality::{QualityEvidence, QualityScore};
pub use report::{run_to_text, to_text};
pub use stats::SeriesStatistics;
