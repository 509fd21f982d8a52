//! Results Module
//!
//! Holds the latest analysis session and everything derived from it.
//!
//! ## Structure
//! - `types`: Data model (TrafficClass, PredictionRow, AnalysisResult)
//! - `store`: Shared slot with a single writer role
//! - `stats`: Pure derivations (summary, percentages, histograms)

pub mod types;
pub mod store;
pub mod stats;


pub use types::{AnalysisResult, ConfidenceBand, PredictionRow, RowBadge, TrafficClass};
pub use store::{ResultsStore, ResultsWriter};
pub use stats::{percent, top_attack_classes, top_classes, ChartSlice, Summary};
