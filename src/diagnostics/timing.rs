use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Elapsed time of one extraction stage, summed over objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one extraction run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Add `elapsed_ms` to the stage called `label`, creating it on first use.
    /// Stages keep first-seen order.
    pub fn add(&mut self, label: &str, elapsed_ms: f64) {
        match self.stages.iter_mut().find(|s| s.label == label) {
            Some(stage) => stage.elapsed_ms += elapsed_ms,
            None => self.stages.push(StageTiming::new(label, elapsed_ms)),
        }
    }

    pub fn merge(&mut self, other: &TimingBreakdown) {
        for stage in &other.stages {
            self.add(&stage.label, stage.elapsed_ms);
        }
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }

    /// Run `f`, charging its wall time to `label`.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.add(label, elapsed_ms(start));
        out
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_by_label() {
        let mut t = TimingBreakdown::default();
        t.add("skeleton", 1.5);
        t.add("decompose", 0.5);
        t.add("skeleton", 2.0);
        assert_eq!(t.stages.len(), 2);
        assert_eq!(t.stages[0].label, "skeleton");
        assert_eq!(t.stage_ms("skeleton"), Some(3.5));
        assert_eq!(t.stage_ms("resample"), None);
    }

    #[test]
    fn merge_and_time_record_stages() {
        let mut a = TimingBreakdown::default();
        let value = a.time("profile", || 7);
        assert_eq!(value, 7);
        let mut b = TimingBreakdown::default();
        b.add("profile", 1.0);
        b.add("canonical", 1.0);
        a.merge(&b);
        assert_eq!(a.stages.len(), 2);
        assert!(a.stage_ms("profile").unwrap() >= 1.0);
    }
}
