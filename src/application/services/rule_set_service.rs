//! Rule set service - manages the authoring session's distribution entries
//!
//! Entries are held in authored order; the resolver relies on that order as
//! the same-file tie-break. Priorities are derived from the load order at
//! creation time, so a rule's precedence is fixed by the file it is authored
//! into.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::domain::entities::{DistributionEntry, Targeting};
use crate::domain::value_objects::{EntryId, FormKey, LoadOrder};

/// Errors raised while editing the rule set
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("Chance must be between 0 and 100, got {0}")]
    ChanceOutOfRange(u8),

    #[error("Source file '{0}' is not in the load order")]
    UnknownSourceFile(String),

    #[error("Override targeting needs at least one NPC")]
    EmptyNpcList,

    #[error("Entry {0} not found")]
    EntryNotFound(EntryId),
}

/// Request to add a distribution entry
#[derive(Debug, Clone)]
pub struct NewEntryRequest {
    /// Target outfit; `None` authors an outfit removal
    pub outfit: Option<FormKey>,
    pub targeting: Targeting,
    /// The source file the rule belongs to; must be in the load order
    pub source_file: String,
    pub chance: u8,
}

/// The authored rule collection for one session
pub struct RuleSetService {
    load_order: LoadOrder,
    entries: Vec<DistributionEntry>,
    modified_at: DateTime<Utc>,
}

impl RuleSetService {
    pub fn new(load_order: LoadOrder) -> Self {
        Self {
            load_order,
            entries: Vec::new(),
            modified_at: Utc::now(),
        }
    }

    fn validate(request: &NewEntryRequest) -> Result<(), RuleSetError> {
        if request.chance > 100 {
            return Err(RuleSetError::ChanceOutOfRange(request.chance));
        }
        if let Targeting::Npcs(keys) = &request.targeting {
            if keys.is_empty() {
                return Err(RuleSetError::EmptyNpcList);
            }
        }
        Ok(())
    }

    /// Add an entry, deriving its priority from the load-order position of
    /// its source file. Returns the created entry.
    #[instrument(skip(self, request), fields(source_file = %request.source_file))]
    pub fn add_entry(&mut self, request: NewEntryRequest) -> Result<DistributionEntry, RuleSetError> {
        Self::validate(&request)?;

        let priority = self
            .load_order
            .position(&request.source_file)
            .ok_or_else(|| RuleSetError::UnknownSourceFile(request.source_file.clone()))?;

        let entry = DistributionEntry::new(
            request.outfit,
            request.targeting,
            request.source_file,
            priority,
        )
        .with_chance(request.chance);

        info!(entry_id = %entry.id, priority, "Added distribution entry");
        self.entries.push(entry.clone());
        self.modified_at = Utc::now();
        Ok(entry)
    }

    /// Remove an entry by id, returning it.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub fn remove_entry(&mut self, id: EntryId) -> Result<DistributionEntry, RuleSetError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(RuleSetError::EntryNotFound(id))?;

        let entry = self.entries.remove(position);
        self.modified_at = Utc::now();
        debug!(entry_id = %id, "Removed distribution entry");
        Ok(entry)
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            info!(count = self.entries.len(), "Cleared rule set");
            self.entries.clear();
            self.modified_at = Utc::now();
        }
    }

    /// Entries in authored order.
    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the rule set last changed; drives the authoring UI's dirty state.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}
