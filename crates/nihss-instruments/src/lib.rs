//! nihss-instruments
//!
//! Scored clinical scale definitions and the per-session scoring engine.
//! Pure data and arithmetic, no I/O. Each instrument defines its items, the
//! point value of every answer, and any override rules between items.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod scoring;

use catalog::ItemCatalog;
use engine::ScoringEngine;
use scoring::{ScoreEntry, ValidationError};

/// Trait implemented by each scored clinical instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "nihss").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "NIH Stroke Scale").
    fn name(&self) -> &str;

    /// The items this instrument scores, in presentation order.
    fn catalog(&self) -> &'static ItemCatalog;

    /// Start a fresh all-zero assessment.
    fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.id(), self.catalog())
    }

    /// Validate a set of score entries against this instrument's items.
    ///
    /// Reports every bad entry rather than stopping at the first one.
    fn validate_entries(&self, entries: &[ScoreEntry]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for entry in entries {
            let Some(item) = self.catalog().item(&entry.item_id) else {
                errors.push(ValidationError {
                    item_id: entry.item_id.clone(),
                    value: entry.value,
                    untestable: entry.untestable,
                    allowed: Vec::new(),
                    message: format!("{}: unknown item '{}'", self.name(), entry.item_id),
                });
                continue;
            };

            if item.resolve(entry).is_none() {
                let allowed = item.allowed_points();
                let given = if entry.untestable {
                    "UN".to_string()
                } else {
                    entry.value.to_string()
                };
                let choices = allowed
                    .iter()
                    .map(u8::to_string)
                    .chain(item.untestable_option().map(|_| "UN".to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(ValidationError {
                    item_id: entry.item_id.clone(),
                    value: entry.value,
                    untestable: entry.untestable,
                    allowed,
                    message: format!(
                        "{}: {} does not accept {given} (expected one of {choices})",
                        self.name(),
                        item.name,
                    ),
                });
            }
        }
        errors
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::nihss::Nihss)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
