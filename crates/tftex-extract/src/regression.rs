//! Least-squares fitting helpers.
//!
//! Every extraction algorithm in this crate reduces to one of three tiny
//! fits: a free line, a line through the origin, or a unit-slope line.
//! The free fit solves its 2x2 normal equations with nalgebra.

use nalgebra::{Matrix2, Vector2};

/// Result of a free least-squares line fit `y = slope*x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of points used.
    pub n: usize,
}

/// Result of a through-origin fit `y = slope*x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginFit {
    /// Fitted slope.
    pub slope: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of points used.
    pub n: usize,
}

/// Fit `y = slope*x + intercept` by least squares.
///
/// Returns `None` for fewer than two points or a singular system
/// (all x identical).
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<LineFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let sx: f64 = xs[..n].iter().sum();
    let sy: f64 = ys[..n].iter().sum();
    let sxx: f64 = xs[..n].iter().map(|x| x * x).sum();
    let sxy: f64 = xs[..n].iter().zip(&ys[..n]).map(|(x, y)| x * y).sum();

    let normal = Matrix2::new(sxx, sx, sx, n as f64);
    let rhs = Vector2::new(sxy, sy);
    let solution = normal.lu().solve(&rhs)?;

    let slope = solution[0];
    let intercept = solution[1];

    Some(LineFit {
        slope,
        intercept,
        r_squared: r_squared(&xs[..n], &ys[..n], |x| slope * x + intercept),
        n,
    })
}

/// Fit `y = slope*x` by least squares through the origin.
///
/// Returns `None` for an empty input or all-zero x.
pub fn fit_through_origin(xs: &[f64], ys: &[f64]) -> Option<OriginFit> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return None;
    }

    let sxx: f64 = xs[..n].iter().map(|x| x * x).sum();
    if sxx <= 0.0 {
        return None;
    }
    let sxy: f64 = xs[..n].iter().zip(&ys[..n]).map(|(x, y)| x * y).sum();
    let slope = sxy / sxx;

    Some(OriginFit {
        slope,
        r_squared: r_squared(&xs[..n], &ys[..n], |x| slope * x),
        n,
    })
}

/// Fit `y = x + intercept` (slope constrained to 1); returns the
/// least-squares intercept, `None` for an empty input.
pub fn unit_slope_intercept(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return None;
    }
    let sum: f64 = xs[..n].iter().zip(&ys[..n]).map(|(x, y)| y - x).sum();
    Some(sum / n as f64)
}

fn r_squared(xs: &[f64], ys: &[f64], predict: impl Fn(f64) -> f64) -> f64 {
    let n = ys.len() as f64;
    let mean = ys.iter().sum::<f64>() / n;
    let ss_tot: f64 = ys.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (y - predict(x)).powi(2))
        .sum();

    if ss_tot <= f64::EPSILON {
        // Flat data: perfect if residuals vanish, meaningless otherwise.
        if ss_res <= f64::EPSILON { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.n, 4);
    }

    #[test]
    fn test_fit_noisy_line_r_squared() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.1, 0.9, 2.1, 2.9, 4.1];

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 1.0).abs() < 0.05);
        assert!(fit.r_squared > 0.99 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_fit_degenerate() {
        assert!(fit_line(&[1.0], &[2.0]).is_none());
        // All x identical: singular normal equations
        assert!(fit_line(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_fit_through_origin() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];

        let fit = fit_through_origin(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);

        assert!(fit_through_origin(&[], &[]).is_none());
        assert!(fit_through_origin(&[0.0, 0.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_unit_slope_intercept() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.5, 2.5, 3.5];
        let intercept = unit_slope_intercept(&xs, &ys).unwrap();
        assert!((intercept - 0.5).abs() < 1e-12);

        assert!(unit_slope_intercept(&[], &[]).is_none());
    }
}
