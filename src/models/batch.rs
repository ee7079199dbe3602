//! Per-item results of multi-device actions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What happened to one device in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Written to the store
    Done,
    /// Overlaps an existing booking
    Conflict,
    /// Unknown device or wrong status
    Rejected,
    /// Store write failed; earlier items stay applied
    Failed,
    /// Not attempted after an earlier failure
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemOutcome {
    pub equipment_id: String,
    pub outcome: Outcome,
    pub message: Option<String>,
}

impl ItemOutcome {
    pub fn done(equipment_id: &str) -> Self {
        Self::with(equipment_id, Outcome::Done, None)
    }

    pub fn with(equipment_id: &str, outcome: Outcome, message: Option<String>) -> Self {
        Self {
            equipment_id: equipment_id.to_string(),
            outcome,
            message,
        }
    }
}

/// Batch response body
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, item: ItemOutcome) {
        self.items.push(item);
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.items.iter().filter(|i| i.outcome == outcome).count()
    }

    /// True when any store write was attempted
    pub fn touched_store(&self) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i.outcome, Outcome::Done | Outcome::Failed))
    }

    /// Mark the remaining ids as not attempted
    pub fn skip_rest<'a>(&mut self, rest: impl IntoIterator<Item = &'a String>) {
        for id in rest {
            self.push(ItemOutcome::with(
                id,
                Outcome::Skipped,
                Some("Not attempted after an earlier store failure".to_string()),
            ));
        }
    }
}
