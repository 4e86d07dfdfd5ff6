//! Parameter records.
//!
//! "Unavailable" and "computed as zero" are different facts: theta and
//! Dit are legitimately zero on a good device, while a missing output
//! sweep simply leaves Ron unknowable. [`ParamValue`] keeps the two
//! apart as a sum type instead of overloading 0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quality::QualityScore;

/// A named parameter value, or the explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// A computed value; 0 is legitimate.
    Value(f64),
    /// The required sweep kind or geometry was absent.
    Unavailable,
}

impl ParamValue {
    /// The numeric value, if one was computed.
    pub fn value(&self) -> Option<f64> {
        match self {
            ParamValue::Value(v) => Some(*v),
            ParamValue::Unavailable => None,
        }
    }

    /// True when a value was computed.
    pub fn is_available(&self) -> bool {
        matches!(self, ParamValue::Value(_))
    }
}

impl From<Option<f64>> for ParamValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => ParamValue::Value(v),
            None => ParamValue::Unavailable,
        }
    }
}

/// Well-known parameter names, in report order.
pub mod names {
    /// Threshold voltage from the linear transfer sweep (V).
    pub const VTH_LIN: &str = "vth_lin";
    /// Threshold voltage from the saturation transfer sweep (V).
    pub const VTH_SAT: &str = "vth_sat";
    /// Peak transconductance (S).
    pub const GM_MAX: &str = "gm_max";
    /// Field-effect mobility (cm^2/V.s).
    pub const MU_FE: &str = "mu_fe";
    /// Low-field mobility from the Y-function (cm^2/V.s).
    pub const MU0: &str = "mu0";
    /// Mobility degradation factor (1/V).
    pub const THETA: &str = "theta";
    /// Effective mobility at the gm peak (cm^2/V.s).
    pub const MU_EFF: &str = "mu_eff";
    /// Subthreshold swing (V/decade).
    pub const SS: &str = "ss";
    /// Interface-trap density (cm^-2 eV^-1).
    pub const DIT: &str = "dit";
    /// On current (A).
    pub const ION: &str = "ion";
    /// Off current (A).
    pub const IOFF: &str = "ioff";
    /// Ion/Ioff ratio.
    pub const ON_OFF_RATIO: &str = "on_off_ratio";
    /// On-resistance (ohm).
    pub const RON: &str = "ron";
    /// Saturation drain current (A).
    pub const ID_SAT: &str = "id_sat";
    /// Width-normalized saturation current (A/mm).
    pub const ID_SAT_MM: &str = "id_sat_mm";
    /// Hysteresis threshold shift (V).
    pub const DELTA_VTH: &str = "delta_vth";
    /// Peak gate leakage magnitude (A).
    pub const IG_MAX: &str = "ig_max";
}

/// A derived curve handed to downstream charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedCurve {
    /// Curve label, e.g. `id_vg_linear` or `gm_vg`.
    pub label: String,
    /// (x, y) points in sweep order.
    pub points: Vec<(f64, f64)>,
}

/// Consolidated parameter record of one physical sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleParameterSet {
    /// Sample grouping key.
    pub sample: String,
    /// Parameter name to value, in report order.
    pub params: IndexMap<String, ParamValue>,
    /// Data-quality category for the whole sample.
    pub quality: QualityScore,
    /// Derived curves for charting.
    pub curves: Vec<DerivedCurve>,
}

impl SampleParameterSet {
    /// Create an empty record for a sample.
    pub fn new(sample: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            params: IndexMap::new(),
            quality: QualityScore::Poor,
            curves: Vec::new(),
        }
    }

    /// Set a parameter.
    pub fn set(&mut self, name: &str, value: ParamValue) {
        self.params.insert(name.to_string(), value);
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Look up a parameter that must exist in the record.
    pub fn require(&self, name: &str) -> Result<ParamValue> {
        self.params
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    /// Number of parameters carrying a computed value.
    pub fn available_count(&self) -> usize {
        self.params.values().filter(|v| v.is_available()).count()
    }
}
