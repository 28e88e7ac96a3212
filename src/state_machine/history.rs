use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::WizardEvent;
use super::states::WizardStage;

/// One applied stage transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: WizardStage,
    pub to: WizardStage,
    pub event: WizardEvent,
    pub occurred_at: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new(from: WizardStage, to: WizardStage, event: WizardEvent) -> Self {
        Self {
            from,
            to,
            event,
            occurred_at: Utc::now(),
        }
    }
}

/// In-memory transition log for a single wizard session
#[derive(Debug, Clone, Default)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
}

impl TransitionHistory {
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
