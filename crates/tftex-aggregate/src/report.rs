//! Human-readable parameter reports.

use tftex_core::units::format_value;

use crate::parameter::{ParamValue, SampleParameterSet, names};

/// Display unit of a well-known parameter, empty for dimensionless ones.
fn unit_of(name: &str) -> &'static str {
    match name {
        names::VTH_LIN | names::VTH_SAT | names::DELTA_VTH => "V",
        names::GM_MAX => "S",
        names::MU_FE | names::MU0 | names::MU_EFF => "cm^2/V.s",
        names::THETA => "1/V",
        names::SS => "V/dec",
        names::DIT => "cm^-2 eV^-1",
        names::ION | names::IOFF | names::IG_MAX => "A",
        names::RON => "ohm",
        names::ID_SAT => "A",
        names::ID_SAT_MM => "A/mm",
        _ => "",
    }
}

/// Format one sample's parameter record as aligned text.
pub fn to_text(set: &SampleParameterSet) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Sample: {} [quality: {}]\n",
        set.sample,
        set.quality.label()
    ));

    let width = set.params.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in &set.params {
        let rendered = match value {
            ParamValue::Value(v) => {
                let unit = unit_of(name);
                if unit.is_empty() {
                    format_value(*v)
                } else {
                    format!("{} {}", format_value(*v), unit)
                }
            }
            ParamValue::Unavailable => "unavailable".to_string(),
        };
        out.push_str(&format!("  {name:width$}  {rendered}\n"));
    }

    out
}

/// Format a whole analysis run, one block per sample.
pub fn run_to_text(sets: &[SampleParameterSet]) -> String {
    sets.iter()
        .map(to_text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_renders_values_and_unavailable() {
        let mut set = SampleParameterSet::new("S1");
        set.set(names::VTH_LIN, ParamValue::Value(2.05));
        set.set(names::GM_MAX, ParamValue::Value(1.2e-5));
        set.set(names::RON, ParamValue::Unavailable);

        let text = to_text(&set);
        assert!(text.contains("Sample: S1"));
        assert!(text.contains("quality: poor"));
        assert!(text.contains("2.0500 V"));
        assert!(text.contains("12.0000u S"));
        assert!(text.contains("unavailable"));
    }

    #[test]
    fn test_run_report_joins_samples() {
        let a = SampleParameterSet::new("A");
        let b = SampleParameterSet::new("B");
        let text = run_to_text(&[a, b]);
        assert!(text.contains("Sample: A"));
        assert!(text.contains("Sample: B"));
    }
}
