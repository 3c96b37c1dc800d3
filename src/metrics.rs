//! Query metrics: latency distribution and how often the sentinel was returned.

use std::time::Duration;

/// Collects per-session query statistics.
#[derive(Debug)]
pub struct MetricsCollector {
    query_latencies_us: Vec<f64>,
    total_queries: u64,
    unanswered_queries: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            query_latencies_us: Vec::new(),
            total_queries: 0,
            unanswered_queries: 0,
        }
    }

    /// Record a query with its duration; `answered` is false when the
    /// caller got the no-knowledge sentinel.
    pub fn record_query(&mut self, duration: Duration, answered: bool) {
        self.total_queries += 1;
        if !answered {
            self.unanswered_queries += 1;
        }
        self.query_latencies_us.push(duration.as_micros() as f64);
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn unanswered_queries(&self) -> u64 {
        self.unanswered_queries
    }

    /// Average query latency in microseconds.
    pub fn avg_query_latency_us(&self) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.query_latencies_us.iter().sum();
        sum / self.query_latencies_us.len() as f64
    }

    /// Get a percentile of query latency (e.g., 50.0, 95.0, 99.0).
    pub fn percentile_query_latency_us(&self, percentile: f64) -> f64 {
        if self.query_latencies_us.is_empty() {
            return 0.0;
        }

        let mut sorted = self.query_latencies_us.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let index = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }

    /// One-line summary for the end of an interactive session.
    pub fn summary(&self) -> String {
        format!(
            "{} queries ({} unanswered), avg {:.0}us, p50 {:.0}us, p95 {:.0}us",
            self.total_queries,
            self.unanswered_queries,
            self.avg_query_latency_us(),
            self.percentile_query_latency_us(50.0),
            self.percentile_query_latency_us(95.0),
        )
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counts() {
        let mut m = MetricsCollector::new();
        m.record_query(Duration::from_micros(10), true);
        m.record_query(Duration::from_micros(10), false);

        assert_eq!(m.total_queries(), 2);
        assert_eq!(m.unanswered_queries(), 1);
    }

    #[test]
    fn test_metrics_latency() {
        let mut m = MetricsCollector::new();
        m.record_query(Duration::from_micros(100), true);
        m.record_query(Duration::from_micros(200), true);
        m.record_query(Duration::from_micros(300), true);

        assert!((m.avg_query_latency_us() - 200.0).abs() < 1.0);
        assert!((m.percentile_query_latency_us(50.0) - 200.0).abs() < 1.0);
        assert!((m.percentile_query_latency_us(100.0) - 300.0).abs() < 1.0);
    }

    #[test]
    fn test_metrics_empty() {
        let m = MetricsCollector::new();
        assert_eq!(m.avg_query_latency_us(), 0.0);
        assert_eq!(m.percentile_query_latency_us(99.0), 0.0);
        assert!(m.summary().starts_with("0 queries (0 unanswered)"));
    }
}
