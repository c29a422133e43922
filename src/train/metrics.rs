//! Per-step metrics tracking

use serde::{Deserialize, Serialize};

/// Ordered, append-only series of scalar metrics recorded once per step.
///
/// Series keep insertion order, which is also the order the progress line
/// renders them in. After a training run the `"loss"` series holds exactly
/// one value per completed step, in step order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsTracker {
    series: Vec<(String, Vec<f32>)>,
    /// Number of completed training steps.
    pub steps: usize,
}

impl MetricsTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the named series, creating the series on first use.
    pub fn record(&mut self, name: &str, value: f32) {
        match self.series.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value),
            None => self.series.push((name.to_string(), vec![value])),
        }
    }

    /// The full series for a metric, if it has been recorded.
    pub fn series(&self, name: &str) -> Option<&[f32]> {
        self.series.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }

    /// The most recent value of a metric.
    pub fn latest(&self, name: &str) -> Option<f32> {
        self.series(name).and_then(|values| values.last().copied())
    }

    /// The smallest value recorded for a metric.
    pub fn best(&self, name: &str) -> Option<f32> {
        self.series(name)
            .and_then(|values| values.iter().copied().reduce(f32::min))
    }

    /// Iterate over all series in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.series.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Bump the completed-step counter.
    pub fn increment_step(&mut self) {
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_series() {
        let mut metrics = MetricsTracker::new();
        metrics.record("loss", 1.0);
        metrics.record("loss", 0.5);

        assert_eq!(metrics.series("loss"), Some(&[1.0, 0.5][..]));
        assert_eq!(metrics.latest("loss"), Some(0.5));
        assert!(metrics.series("acc").is_none());
    }

    #[test]
    fn test_best_is_minimum() {
        let mut metrics = MetricsTracker::new();
        metrics.record("loss", 0.8);
        metrics.record("loss", 0.3);
        metrics.record("loss", 0.6);
        assert_eq!(metrics.best("loss"), Some(0.3));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut metrics = MetricsTracker::new();
        metrics.record("loss", 1.0);
        metrics.record("grad_norm", 2.0);
        metrics.record("loss", 0.9);

        let names: Vec<&str> = metrics.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["loss", "grad_norm"]);
    }

    #[test]
    fn test_empty_tracker() {
        let metrics = MetricsTracker::new();
        assert!(metrics.is_empty());
        assert_eq!(metrics.steps, 0);
        assert!(metrics.latest("loss").is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut metrics = MetricsTracker::new();
        metrics.record("loss", 0.25);
        metrics.increment_step();

        let json = serde_json::to_string(&metrics).unwrap();
        let back: MetricsTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(back.latest("loss"), Some(0.25));
        assert_eq!(back.steps, 1);
    }
}
