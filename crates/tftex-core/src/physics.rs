//! Physical constants used in parameter extraction.

/// Vacuum permittivity [F/m]
pub const EPSILON_0: f64 = 8.854e-12;
/// SiO2 relative permittivity
pub const EPSILON_R_SIO2: f64 = 3.9;
/// Gate-oxide permittivity [F/m]
pub const EPSILON_OX: f64 = EPSILON_R_SIO2 * EPSILON_0;
/// Electron charge [C]
pub const Q_ELECTRON: f64 = 1.602e-19;
/// Boltzmann constant [J/K]
pub const K_BOLTZMANN: f64 = 1.381e-23;
/// Nominal temperature [K] (27C)
pub const T_NOMINAL: f64 = 300.15;

/// Thermal voltage kT/q [V] at the given temperature.
pub fn thermal_voltage(temp: f64) -> f64 {
    K_BOLTZMANN * temp / Q_ELECTRON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thermal_voltage_room_temp() {
        let vt = thermal_voltage(T_NOMINAL);
        // ~25.9 mV at 300.15 K
        assert!((vt - 0.02588).abs() < 1e-4);
    }
}
