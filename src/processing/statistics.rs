/// Summary of one column's values over the whole dataset or a brushed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// First value in row order, not the minimum.
    pub start: f64,
    /// Last value in row order, not the maximum.
    pub end: f64,
}

impl Statistics {
    /// Compute statistics in input order, ignoring NaN and infinities.
    /// Returns `None` when nothing is left to summarize.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let ordered: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (&start, &end) = (ordered.first()?, ordered.last()?);

        let count = ordered.len();
        let mean = ordered.iter().sum::<f64>() / count as f64;

        let mut sorted = ordered;
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Some(Statistics {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
            start,
            end,
        })
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Count: {}\n  Min: {:.2}\n  Max: {:.2}\n  Mean: {:.2}\n  Median: {:.2}\n  Start: {:.2}\n  End: {:.2}\n",
            label, self.count, self.min, self.max, self.mean, self.median, self.start, self.end
        )
    }
}

/// Free-function form of [`Statistics::compute`].
pub fn compute_stats(values: &[f64]) -> Option<Statistics> {
    Statistics::compute(values)
}

/// Statistics for one value column of a plot. `stats` is `None` when the
/// column has no defined values in scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub stats: Option<Statistics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert_eq!(compute_stats(&[]), None);
        assert_eq!(compute_stats(&[f64::NAN, f64::INFINITY]), None);
    }

    #[test]
    fn test_start_end_follow_input_order() {
        let s = compute_stats(&[5.0, 1.0, 9.0]).unwrap();
        assert_eq!(s.start, 5.0);
        assert_eq!(s.end, 9.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.median, 5.0);
        assert_ne!(s.start, s.min);
    }

    #[test]
    fn test_start_differs_from_min_when_descending() {
        let s = compute_stats(&[9.0, 4.0, 7.0, 2.0]).unwrap();
        assert_eq!((s.start, s.end), (9.0, 2.0));
        assert_eq!((s.min, s.max), (2.0, 9.0));
        assert_ne!(s.end, s.max);
    }

    #[test]
    fn test_odd_count_median_and_mean() {
        let s = compute_stats(&[3.0, 1.0, 4.0, 1.0, 5.0]).unwrap();
        assert_eq!(s.median, 3.0);
        assert!((s.mean - 2.8).abs() < 1e-12);
        assert_eq!(s.count, 5);
    }

    #[test]
    fn test_even_count_median_averages_middle() {
        let s = compute_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.median, 2.5);
        let s = compute_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.5);
    }

    #[test]
    fn test_constant_series() {
        let s = compute_stats(&[7.0, 7.0, 7.0]).unwrap();
        assert_eq!((s.min, s.mean, s.max, s.median), (7.0, 7.0, 7.0, 7.0));
    }

    #[test]
    fn test_min_mean_max_ordering() {
        let series: [&[f64]; 4] = [
            &[1.0],
            &[-3.5, 2.0, 0.25],
            &[1e6, -1e6, 3.0, 3.0],
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        ];
        for values in series {
            let s = compute_stats(values).unwrap();
            assert!(s.min <= s.mean && s.mean <= s.max, "{values:?}");
            assert!(s.min <= s.median && s.median <= s.max, "{values:?}");
        }
    }

    #[test]
    fn test_single_value() {
        let s = compute_stats(&[42.0]).unwrap();
        assert_eq!((s.start, s.end, s.median), (42.0, 42.0, 42.0));
    }

    #[test]
    fn test_repeatable() {
        let values = [2.0, 8.0, 1.0];
        assert_eq!(compute_stats(&values), compute_stats(&values));
    }

    #[test]
    fn test_report() {
        let s = compute_stats(&[1.0, 3.0]).unwrap();
        let report = s.report("depth");
        assert!(report.starts_with("depth:\n"));
        assert!(report.contains("Median: 2.00"));
        assert!(report.contains("Start: 1.00"));
    }
}
