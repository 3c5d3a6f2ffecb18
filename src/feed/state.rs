use super::aggregator::FeedError;
use crate::content::FeedEntry;
use crate::day::FeedDay;

/// Feed screen state for one selected day.
///
/// Each completed load replaces the entries wholesale; nothing is merged
/// across loads.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub day: FeedDay,
    pub entries: Vec<FeedEntry>,
    /// User-facing message for the last failed load, if any.
    pub error: Option<String>,
    pub loading: bool,
}

impl FeedState {
    pub fn new(day: FeedDay) -> Self {
        Self {
            day,
            entries: Vec::new(),
            error: None,
            loading: false,
        }
    }

    /// Mark a load for `day` as started.
    pub fn begin(&mut self, day: FeedDay) {
        self.day = day;
        self.loading = true;
        self.error = None;
    }

    /// Record the outcome of the load started by [`begin`](Self::begin).
    ///
    /// A failed load clears the entries and keeps a retryable message.
    /// A cancelled load leaves the previous state untouched.
    pub fn apply(&mut self, result: Result<Vec<FeedEntry>, FeedError>) {
        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(FeedError::Cancelled) => {}
            Err(e) => {
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
