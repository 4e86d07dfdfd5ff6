//! Device geometry and derived oxide capacitance.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::physics::EPSILON_OX;
use crate::units::parse_value;

/// Channel geometry of a thin-film transistor.
///
/// All lengths are in meters. The oxide capacitance per unit area is
/// derived once from the oxide thickness; it is not an input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceGeometry {
    /// Channel width (m).
    pub w: f64,
    /// Channel length (m).
    pub l: f64,
    /// Gate-oxide thickness (m).
    pub tox: f64,
}

impl DeviceGeometry {
    /// Create a geometry from explicit dimensions in meters.
    pub fn new(w: f64, l: f64, tox: f64) -> Self {
        Self { w, l, tox }
    }

    /// Oxide capacitance per unit area Cox = eps_ox / tox (F/m^2).
    ///
    /// Returns 0 for a non-positive oxide thickness so downstream
    /// parameters degrade to 0 instead of infinity.
    pub fn cox(&self) -> f64 {
        if self.tox > 0.0 {
            EPSILON_OX / self.tox
        } else {
            0.0
        }
    }

    /// Oxide capacitance per unit area in F/cm^2.
    pub fn cox_per_cm2(&self) -> f64 {
        self.cox() * 1e-4
    }

    /// Channel width in millimeters, for A/mm current normalization.
    pub fn width_mm(&self) -> f64 {
        self.w * 1e3
    }

    /// True when every dimension is positive.
    pub fn is_valid(&self) -> bool {
        self.w > 0.0 && self.l > 0.0 && self.tox > 0.0
    }

    /// Parse a geometry from a `W=20u L=10u TOX=100n` style string.
    ///
    /// Keys are case-insensitive; values accept SI suffixes. All three
    /// dimensions are required.
    pub fn parse(s: &str) -> Result<Self> {
        let mut w = None;
        let mut l = None;
        let mut tox = None;

        for token in s.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                return Err(Error::InvalidGeometry(format!(
                    "expected KEY=VALUE, got {token}"
                )));
            };
            let parsed = parse_value(value)
                .ok_or_else(|| Error::InvalidGeometry(format!("bad value: {token}")))?;
            match key.to_uppercase().as_str() {
                "W" => w = Some(parsed),
                "L" => l = Some(parsed),
                "TOX" => tox = Some(parsed),
                other => {
                    return Err(Error::InvalidGeometry(format!("unknown key: {other}")));
                }
            }
        }

        match (w, l, tox) {
            (Some(w), Some(l), Some(tox)) => Ok(Self { w, l, tox }),
            _ => Err(Error::InvalidGeometry(
                "W, L and TOX are all required".to_string(),
            )),
        }
    }
}
