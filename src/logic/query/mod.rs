//! Query Engine
//!
//! Filters, searches and paginates result rows entirely in memory.
//! `query` is pure: same rows and criteria, same page.
//!
//! ## Usage
//! ```ignore
//! let criteria = QueryCriteria { anomaly_only: true, ..Default::default() };
//! let page = query(result.rows(), &criteria);
//! println!("Page {} of {}", page.page, page.page_count);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::PAGE_SIZE;
use crate::logic::results::{PredictionRow, TrafficClass};

#[cfg(test)]
mod tests;

/// Wildcard value of the class filter
pub const ALL_CLASSES: &str = "ALL";

// ============================================================================
// CRITERIA
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClassFilter {
    #[default]
    All,
    Class(TrafficClass),
}

impl ClassFilter {
    pub fn matches(&self, class: &TrafficClass) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Class(wanted) => wanted == class,
        }
    }
}

impl From<String> for ClassFilter {
    fn from(value: String) -> Self {
        if value == ALL_CLASSES {
            ClassFilter::All
        } else {
            ClassFilter::Class(TrafficClass::from(value))
        }
    }
}

impl From<ClassFilter> for String {
    fn from(filter: ClassFilter) -> Self {
        match filter {
            ClassFilter::All => ALL_CLASSES.to_string(),
            ClassFilter::Class(class) => class.into(),
        }
    }
}

/// Transient table criteria; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub search_term: String,
    pub class_filter: ClassFilter,
    pub anomaly_only: bool,
    /// 1-based
    pub page: usize,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            class_filter: ClassFilter::All,
            anomaly_only: false,
            page: 1,
        }
    }
}

impl QueryCriteria {
    /// All three clauses must hold. `needle` is the lowercased search term.
    fn matches(&self, row: &PredictionRow, needle: &str) -> bool {
        let search = self.search_term.is_empty()
            || row.predicted_class.as_str().to_lowercase().contains(needle)
            || row.row_id.to_string().contains(self.search_term.as_str());

        search
            && self.class_filter.matches(&row.predicted_class)
            && (!self.anomaly_only || row.is_anomaly)
    }
}

// ============================================================================
// RESULT PAGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPage {
    pub rows: Vec<PredictionRow>,
    pub total_matched: usize,
    /// Never below 1
    pub page_count: usize,
    /// Effective page after clamping
    pub page: usize,
}

impl QueryPage {
    /// 1-based index of the first row shown, 0 when nothing matched
    pub fn first_index(&self) -> usize {
        if self.total_matched == 0 {
            0
        } else {
            (self.page - 1) * PAGE_SIZE + 1
        }
    }

    /// 1-based index of the last row shown, 0 when nothing matched
    pub fn last_index(&self) -> usize {
        (self.page * PAGE_SIZE).min(self.total_matched)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// `ceil(total / PAGE_SIZE)`, at least 1
pub fn page_count(total_matched: usize) -> usize {
    total_matched.div_ceil(PAGE_SIZE).max(1)
}

/// Run the filter, then slice the requested page out of the filtered sequence.
/// Original row order is preserved.
pub fn query(rows: &[PredictionRow], criteria: &QueryCriteria) -> QueryPage {
    let needle = criteria.search_term.to_lowercase();
    let matched: Vec<&PredictionRow> = rows
        .iter()
        .filter(|row| criteria.matches(row, &needle))
        .collect();

    let total_matched = matched.len();
    let page_count = page_count(total_matched);
    let page = criteria.page.clamp(1, page_count);
    let start = (page - 1) * PAGE_SIZE;

    let rows = matched
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    QueryPage {
        rows,
        total_matched,
        page_count,
        page,
    }
}

// ============================================================================
// TABLE STATE
// ============================================================================

/// Criteria of one table view. The page is clamped every time a page is
/// produced, so it always lies in `[1, page_count]`.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    criteria: QueryCriteria,
    generation: u64,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_class_filter(&mut self, filter: ClassFilter) {
        self.criteria.class_filter = filter;
    }

    pub fn set_anomaly_only(&mut self, anomaly_only: bool) {
        self.criteria.anomaly_only = anomaly_only;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.criteria.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.criteria.page = self.criteria.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.criteria.page = self.criteria.page.saturating_sub(1).max(1);
    }

    /// Start over at page 1 when a different result set is shown
    pub fn sync_generation(&mut self, generation: u64) {
        if self.generation != generation {
            self.generation = generation;
            self.criteria.page = 1;
        }
    }

    /// Produce the visible page and store the clamped page number
    pub fn refresh(&mut self, rows: &[PredictionRow]) -> QueryPage {
        let page = query(rows, &self.criteria);
        self.criteria.page = page.page;
        page
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Wildcard first, then the known classes in index order
pub fn class_filter_options() -> Vec<FilterOption> {
    let all = FilterOption {
        value: ALL_CLASSES.to_string(),
        label: ALL_CLASSES.to_string(),
    };

    std::iter::once(all)
        .chain(TrafficClass::KNOWN.iter().map(|class| FilterOption {
            value: class.as_str().to_string(),
            label: class.display_label(),
        }))
        .collect()
}
