use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::core::models::{CommitMeasures, MetricField};


/// Increase / decrease / maintain counters for one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub increase: usize,
    pub decrease: usize,
    pub maintain: usize,
}

impl Balance {
    pub fn record(&mut self, before: u64, after: u64) {
        match before.cmp(&after) {
            Ordering::Equal => self.maintain += 1,
            Ordering::Greater => self.decrease += 1,
            Ordering::Less => self.increase += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.increase + self.decrease + self.maintain
    }

    /// `None` when no commit qualified, so there is nothing to divide by.
    pub fn percentages(&self) -> Option<Percentages> {
        Percentages::from_balance(self)
    }
}


/// Share of each outcome, in hundredths of a percent.
///
/// Values are apportioned with the largest-remainder method, so the three
/// parts always add up to exactly 100.00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "PercentShares")]
pub struct Percentages {
    worsening: u32,
    improvement: u32,
    unchanged: u32,
}

const FULL_SCALE: u128 = 10_000;


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentShares {
    pub worsening: f64,
    pub improvement: f64,
    pub unchanged: f64,
}

impl From<Percentages> for PercentShares {
    fn from(pct: Percentages) -> Self {
        Self {
            worsening: pct.worsening(),
            improvement: pct.improvement(),
            unchanged: pct.unchanged(),
        }
    }
}

impl Percentages {
    fn from_balance(balance: &Balance) -> Option<Self> {
        let total = balance.total() as u128;
        if total == 0 {
            return None;
        }

        let counts = [balance.increase, balance.decrease, balance.maintain];
        let mut parts = [0u128; 3];
        let mut remainders = [(0u128, 0usize); 3];
        for (i, count) in counts.iter().enumerate() {
            let scaled = *count as u128 * FULL_SCALE;
            parts[i] = scaled / total;
            remainders[i] = (scaled % total, i);
        }

        let assigned: u128 = parts.iter().sum();
        // Stable on ties: earlier outcome wins the leftover hundredth.
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, i) in remainders.iter().take((FULL_SCALE - assigned) as usize) {
            parts[*i] += 1;
        }

        Some(Self {
            worsening: parts[0] as u32,
            improvement: parts[1] as u32,
            unchanged: parts[2] as u32,
        })
    }

    /// Share of commits that increased the metric.
    pub fn worsening(&self) -> f64 {
        f64::from(self.worsening) / 100.0
    }

    /// Share of commits that decreased the metric.
    pub fn improvement(&self) -> f64 {
        f64::from(self.improvement) / 100.0
    }

    pub fn unchanged(&self) -> f64 {
        f64::from(self.unchanged) / 100.0
    }

    pub fn hundredths(&self) -> (u32, u32, u32) {
        (self.worsening, self.improvement, self.unchanged)
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub balance: Balance,
    /// `"before -> after"` per counted commit, in input order.
    pub transitions: Vec<String>,
}

impl MetricDelta {
    pub fn counted(&self) -> usize {
        self.transitions.len()
    }
}


/// Compares `before` and `after` of `field` for every listed commit that has both snapshots.
pub fn aggregate<S: AsRef<str>>(
    measures: &CommitMeasures,
    commit_ids: &[S],
    field: MetricField,
) -> MetricDelta {
    let mut delta = MetricDelta::default();
    let mut skipped = 0usize;

    for commit_id in commit_ids {
        let Some((before, after)) = measures
            .get(commit_id.as_ref())
            .and_then(|measure| measure.pair())
        else {
            skipped += 1;
            continue;
        };

        let (before, after) = (field.value(before), field.value(after));
        delta.balance.record(before, after);
        delta.transitions.push(format!("{} -> {}", before, after));
    }

    debug!(
        "Aggregated {} over {} commits ({} skipped)",
        field,
        delta.counted(),
        skipped
    );
    delta
}
