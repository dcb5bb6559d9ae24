use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Server-computed aggregate over all skill records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryView {
    #[serde(default)]
    pub total_skills: u64,
    #[serde(default)]
    pub total_hours: f64,
    /// `None` when the backend omits the breakdown or sends `null`.
    #[serde(default)]
    pub status_counts: Option<BTreeMap<String, u64>>,
}

impl SummaryView {
    pub fn count_for(&self, status: &str) -> u64 {
        self.status_counts
            .as_ref()
            .and_then(|counts| counts.get(status))
            .copied()
            .unwrap_or(0)
    }

    /// Bumps the count for `status`, starting the breakdown if needed.
    pub fn tally(&mut self, status: &str) {
        *self
            .status_counts
            .get_or_insert_with(BTreeMap::new)
            .entry(status.to_string())
            .or_default() += 1;
    }
}
