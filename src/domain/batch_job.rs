use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::BatchJobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchJobId(Uuid);

impl BatchJobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BatchJobId {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress record for one uploaded scoring file.
///
/// `processed_records + failed_records` never exceeds `total_records`, and
/// `completed_at` is set exactly when the status is terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub id: BatchJobId,
    pub file_name: String,
    pub status: BatchJobStatus,
    pub total_records: u32,
    pub processed_records: u32,
    pub failed_records: u32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BatchJob {
    pub fn new(file_name: String) -> Self {
        Self {
            id: BatchJobId::new(),
            file_name,
            status: BatchJobStatus::Processing,
            total_records: 0,
            processed_records: 0,
            failed_records: 0,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn remaining_records(&self) -> u32 {
        self.total_records
            .saturating_sub(self.processed_records + self.failed_records)
    }
}
