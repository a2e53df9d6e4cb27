//! Best and mean fitness history of a run, one record per finished generation.

use serde::{Deserialize, Serialize};

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index.
    pub generation: u32,
    /// Highest fitness in the generation.
    pub best: f32,
    /// Mean fitness over the generation.
    pub mean: f32,
}

/// Append-only series of generation summaries for reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreHistory {
    records: Vec<GenerationRecord>,
}

impl ScoreHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Records are never modified once pushed.
    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    /// Returns all records, oldest first.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// Returns the most recent record.
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no generation has finished yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the history as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
