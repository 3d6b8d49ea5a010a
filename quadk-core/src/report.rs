//! Presentation of the evaluated stiffness matrix.

use crate::analysis::Spectrum;
use crate::config::EvaluationConfig;
use crate::element::quad4::Integration;
use crate::types::StiffnessMatrix;
use serde::{Serialize, Serializer};
use std::fmt;

/// Significant digits used when none are requested.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 3;

/// Largest useful precision; an f64 round-trips through 17 significant digits.
pub const MAX_SIGNIFICANT_DIGITS: usize = 17;

/// Format `value` rounded to `digits` significant digits.
///
/// `digits` is clamped to `1..=MAX_SIGNIFICANT_DIGITS`.
///
/// ```
/// use quadk_core::report::format_significant;
///
/// assert_eq!(format_significant(4.0 / 3.0, 3), "1.33");
/// assert_eq!(format_significant(-5.0 / 6.0, 3), "-0.833");
/// assert_eq!(format_significant(0.5, 3), "0.500");
/// assert_eq!(format_significant(0.0, 3), "0");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let precision = digits.clamp(1, MAX_SIGNIFICANT_DIGITS) - 1;

    // scientific notation rounds once and carries into the exponent, e.g. 9.996 -> 1.00e1
    let scientific = format!("{value:.precision$e}");
    let Some((_, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let (Ok(exponent), Ok(rounded)) = (exponent.parse::<i32>(), scientific.parse::<f64>()) else {
        return scientific;
    };
    let decimals = (precision as i32 - exponent).max(0) as usize;
    format!("{rounded:.decimals$}")
}

/// Entries smaller than this fraction of the largest entry print as zero.
const ROUND_OFF_RATIO: f64 = 1e-12;

fn format_snapped(value: f64, threshold: f64, digits: usize) -> String {
    format_significant(if value.abs() <= threshold { 0.0 } else { value }, digits)
}

/// Render the matrix row by row with right-aligned columns.
pub fn render_matrix(k: &StiffnessMatrix, digits: usize) -> String {
    let threshold = k.amax() * ROUND_OFF_RATIO;
    let cells: Vec<Vec<String>> = k
        .row_iter()
        .map(|row| row.iter().map(|&v| format_snapped(v, threshold, digits)).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(1);

    cells
        .iter()
        .map(|row| {
            let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
            format!("[{}]", line.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluated stiffness matrix together with the inputs that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct StiffnessReport {
    /// Young's modulus E.
    pub youngs_modulus: f64,
    /// Poisson's ratio ν.
    pub poissons_ratio: f64,
    /// Half-width h of the square.
    pub half_width: f64,
    /// Out-of-plane thickness t.
    pub thickness: f64,
    /// Strategy used to evaluate K.
    pub integration: Integration,
    /// Serialized as an array of rows.
    #[serde(serialize_with = "serialize_rows")]
    matrix: StiffnessMatrix,
    /// Eigenvalues of K in ascending order, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eigenvalues: Option<Vec<f64>>,
    /// Number of zero-energy modes, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_modes: Option<usize>,
    #[serde(skip)]
    significant_digits: usize,
}

fn serialize_rows<S: Serializer>(k: &StiffnessMatrix, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(k.row_iter().map(|row| row.iter().copied().collect::<Vec<f64>>()))
}

impl StiffnessReport {
    /// Report `k` with the inputs and display precision taken from `config`.
    pub fn new(config: &EvaluationConfig, k: &StiffnessMatrix) -> Self {
        Self {
            youngs_modulus: config.youngs_modulus,
            poissons_ratio: config.poissons_ratio,
            half_width: config.half_width,
            thickness: config.thickness,
            integration: config.integration,
            matrix: *k,
            eigenvalues: None,
            zero_modes: None,
            significant_digits: config.significant_digits,
        }
    }

    /// Attach eigenvalue information.
    pub fn with_spectrum(mut self, spectrum: Spectrum) -> Self {
        self.zero_modes = Some(spectrum.zero_modes);
        self.eigenvalues = Some(spectrum.eigenvalues);
        self
    }

    /// The reported stiffness matrix.
    pub fn stiffness(&self) -> &StiffnessMatrix {
        &self.matrix
    }
}

impl fmt::Display for StiffnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "K (E = {}, nu = {}, h = {}, t = {}, {}):",
            format_significant(self.youngs_modulus, self.significant_digits),
            format_significant(self.poissons_ratio, self.significant_digits),
            format_significant(self.half_width, self.significant_digits),
            format_significant(self.thickness, self.significant_digits),
            self.integration,
        )?;
        write!(f, "{}", render_matrix(&self.matrix, self.significant_digits))?;
        if let (Some(eigenvalues), Some(zero_modes)) = (&self.eigenvalues, self.zero_modes) {
            let threshold = eigenvalues.iter().fold(0.0_f64, |m, l| m.max(l.abs())) * ROUND_OFF_RATIO;
            let formatted: Vec<String> = eigenvalues
                .iter()
                .map(|&l| format_snapped(l, threshold, self.significant_digits))
                .collect();
            write!(f, "\neigenvalues: [{}]\nzero modes: {zero_modes}", formatted.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::spectrum;
    use crate::element::quad4::element_stiffness;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(1.0 / 6.0, 3), "0.167");
        assert_eq!(format_significant(-2.0 / 3.0, 3), "-0.667");
        assert_eq!(format_significant(1234.5, 3), "1230");
        assert_eq!(format_significant(9.996, 3), "10.0");
        assert_eq!(format_significant(0.000123456, 2), "0.00012");
        assert_eq!(format_significant(2.0, 1), "2");
        assert_eq!(format_significant(f64::INFINITY, 3), "inf");
    }

    #[test]
    fn test_render_reference_first_row() {
        let k = element_stiffness(8.0 / 3.0, 1.0 / 3.0, 1.0).unwrap();
        let text = render_matrix(&k, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);

        let first: Vec<&str> = lines[0]
            .trim_matches(&['[', ']'][..])
            .split_whitespace()
            .collect();
        assert_eq!(first, ["1.33", "0.500", "-0.833", "0", "-0.667", "-0.500", "0.167", "0"]);
    }

    #[test]
    fn test_report_row_major_and_json() {
        let config = EvaluationConfig::default();
        let k = config.evaluate().unwrap();
        let report = StiffnessReport::new(&config, &k).with_spectrum(spectrum(&k));

        assert_eq!(report.stiffness(), &k);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["zero_modes"], 3);
        assert_eq!(json["integration"], "closed-form");
        let rows = json["matrix"].as_array().unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|row| row.as_array().unwrap().len() == 8));
        assert_eq!(json["matrix"][0][2].as_f64().unwrap(), k[(0, 2)]);
        assert_eq!(json["matrix"][2][0].as_f64().unwrap(), k[(2, 0)]);
        assert!(json.get("significant_digits").is_none());

        let text = report.to_string();
        assert!(text.starts_with("K (E = 2.67, nu = 0.333, h = 1.00, t = 1.00, closed-form):"));
        assert!(text.contains("zero modes: 3"));
    }

    #[test]
    fn test_report_header_names_gauss_rule() {
        let config = EvaluationConfig {
            integration: Integration::Gauss(3),
            ..EvaluationConfig::default()
        };
        let k = config.evaluate().unwrap();
        let text = StiffnessReport::new(&config, &k).to_string();
        assert!(text.lines().next().unwrap().ends_with("gauss 3x3):"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_format_significant_caps_digits() {
        let text = format_significant(4.0 / 3.0, 320);
        assert_eq!(text, format_significant(4.0 / 3.0, MAX_SIGNIFICANT_DIGITS));
        assert!(text.starts_with("1.3333333333"));
        assert_relative_eq!(text.parse::<f64>().unwrap(), 4.0 / 3.0, max_relative = 1e-15);
        assert_eq!(format_significant(0.5, 0), "0.5");
    }

    #[test]
    fn test_format_significant_subnormal() {
        let text = format_significant(1e-310, 3);
        assert!(!text.contains("NaN"));
        assert!(text.starts_with("0.000"));
        assert!(text.ends_with("100"));
        assert_relative_eq!(text.parse::<f64>().unwrap(), 1e-310, max_relative = 1e-3);
    }

    #[test]
    fn test_render_subnormal_stiffness() {
        let k = element_stiffness(1e-309, 1.0 / 3.0, 1.0).unwrap();
        let text = render_matrix(&k, 3);
        assert!(!text.contains("NaN"));
        assert_eq!(text.lines().count(), 8);
        let first = text.lines().next().unwrap();
        assert_eq!(first.trim_matches(&['[', ']'][..]).split_whitespace().count(), 8);
    }

    #[test]
    fn test_report_with_excess_digits_is_finite() {
        let config = EvaluationConfig {
            significant_digits: 320,
            ..EvaluationConfig::default()
        };
        let k = config.evaluate().unwrap();
        let text = StiffnessReport::new(&config, &k).to_string();
        assert!(!text.contains("NaN"));
        assert!(text.starts_with("K (E = 2.6666666666666665, nu = 0.33333333333333331,"));
    }
}
