//! Derived Statistics
//!
//! Pure functions over an `AnalysisResult`. Every view reads its numbers from
//! here; nothing is cached.

use std::collections::HashMap;

use serde::Serialize;

use super::types::{AnalysisResult, PredictionRow, TrafficClass};

/// Headline counts of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub benign: u64,
    pub attack: u64,
    pub anomaly: u64,
}

impl Summary {
    pub fn of(result: &AnalysisResult) -> Self {
        Self {
            total: result.total_rows(),
            benign: result.benign_count(),
            attack: result.attack_count(),
            anomaly: result.anomaly_count(),
        }
    }

    pub fn benign_percent(&self) -> f64 {
        percent(self.benign, self.total)
    }

    pub fn attack_percent(&self) -> f64 {
        percent(self.attack, self.total)
    }

    pub fn anomaly_percent(&self) -> f64 {
        percent(self.anomaly, self.total)
    }

    /// Pie slices; empty slices are left out
    pub fn distribution(&self) -> Vec<ChartSlice> {
        [
            ("Benign", self.benign),
            ("Attack", self.attack),
            ("Anomaly", self.anomaly),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(name, value)| ChartSlice {
            name: name.to_string(),
            value,
        })
        .collect()
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
}

/// Top-`n` classes over all rows (analytics view)
pub fn top_classes(rows: &[PredictionRow], n: usize) -> Vec<ChartSlice> {
    histogram(rows.iter(), n)
}

/// Top-`n` attack classes (dashboard view). Benign rows and anomalous rows are
/// left out; anomalous rows still count toward the anomaly total.
pub fn top_attack_classes(rows: &[PredictionRow], n: usize) -> Vec<ChartSlice> {
    histogram(
        rows.iter().filter(|r| !r.predicted_class.is_benign() && !r.is_anomaly),
        n,
    )
}

/// Counts per class, sorted by count descending; ties keep first-seen order
fn histogram<'a>(rows: impl Iterator<Item = &'a PredictionRow>, n: usize) -> Vec<ChartSlice> {
    let mut order: Vec<(&'a TrafficClass, u64)> = Vec::new();
    let mut slot: HashMap<&'a TrafficClass, usize> = HashMap::new();

    for row in rows {
        match slot.get(&row.predicted_class) {
            Some(&idx) => order[idx].1 += 1,
            None => {
                slot.insert(&row.predicted_class, order.len());
                order.push((&row.predicted_class, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .take(n)
        .map(|(class, value)| ChartSlice {
            name: class.as_str().to_string(),
            value,
        })
        .collect()
}
