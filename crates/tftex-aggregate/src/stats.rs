//! Summary statistics over measurement series.

/// Statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStatistics {
    /// Mean value.
    pub mean: f64,
    /// Standard deviation.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Number of samples.
    pub count: usize,
}

impl SeriesStatistics {
    /// Calculate statistics from samples.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                count: 0,
            };
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std_dev,
            min,
            max,
            count,
        }
    }

    /// Span between the extremes.
    pub fn range(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.max - self.min }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SeriesStatistics::from_samples(&samples);

        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert!((stats.min - 1.0).abs() < 1e-10);
        assert!((stats.max - 5.0).abs() < 1e-10);
        assert!((stats.range() - 4.0).abs() < 1e-10);
        assert_eq!(stats.count, 5);
        assert!(stats.std_dev > 0.0);
    }

    #[test]
    fn test_statistics_empty() {
        let stats = SeriesStatistics::from_samples(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.range(), 0.0);
    }
}
