//! Per-session scoring state.
//!
//! A [`ScoringEngine`] owns one [`AssessmentState`] and is the only way to
//! mutate it. Totals and interpretations are derived on every read, so there
//! is no cached total to drift from the selections.

use tracing::{debug, info};

use crate::catalog::ItemCatalog;
use crate::error::InstrumentError;
use crate::scoring::{interpret, Interpretation, Item, ItemScore, ScoreEntry, ScoreSummary};

/// Selected option per item, in catalog order, plus whether coma defaults
/// are currently in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentState {
    selections: Vec<usize>,
    coma_active: bool,
}

impl AssessmentState {
    fn new(len: usize) -> Self {
        Self {
            selections: vec![0; len],
            coma_active: false,
        }
    }
}

pub struct ScoringEngine {
    instrument: String,
    catalog: &'static ItemCatalog,
    state: AssessmentState,
}

impl ScoringEngine {
    pub fn new(instrument: impl Into<String>, catalog: &'static ItemCatalog) -> Self {
        Self {
            instrument: instrument.into(),
            catalog,
            state: AssessmentState::new(catalog.len()),
        }
    }

    pub fn catalog(&self) -> &'static ItemCatalog {
        self.catalog
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Record `value` points for `item_id`.
    ///
    /// Picks the scored option worth `value`; Untestable answers go through
    /// [`ScoringEngine::select_option`] or [`ScoringEngine::apply`].
    pub fn set_item(&mut self, item_id: &str, value: u8) -> Result<(), InstrumentError> {
        let position = self.position(item_id)?;
        let option = self.catalog.items()[position]
            .option_for_points(value)
            .ok_or_else(|| InstrumentError::InvalidOptionValue {
                item_id: item_id.to_string(),
                value,
            })?;
        self.select_at(position, option)
    }

    /// Record the option at `index` for `item_id`.
    pub fn select_option(&mut self, item_id: &str, index: usize) -> Result<(), InstrumentError> {
        let position = self.position(item_id)?;
        if index >= self.catalog.items()[position].options.len() {
            return Err(InstrumentError::InvalidOptionIndex {
                item_id: item_id.to_string(),
                index,
            });
        }
        self.select_at(position, index)
    }

    pub fn apply(&mut self, entry: &ScoreEntry) -> Result<(), InstrumentError> {
        let position = self.position(&entry.item_id)?;
        let option = self.catalog.items()[position]
            .resolve(entry)
            .ok_or_else(|| InstrumentError::InvalidOptionValue {
                item_id: entry.item_id.clone(),
                value: entry.value,
            })?;
        self.select_at(position, option)
    }

    /// Points currently recorded for `item_id`.
    pub fn value(&self, item_id: &str) -> Result<u8, InstrumentError> {
        let position = self.position(item_id)?;
        Ok(self.points_at(position))
    }

    /// Items paired with their current points, in catalog order.
    pub fn values(&self) -> impl Iterator<Item = (&Item, u8)> + '_ {
        self.catalog
            .items()
            .iter()
            .enumerate()
            .map(move |(position, item)| (item, self.points_at(position)))
    }

    pub fn total(&self) -> u32 {
        self.values().map(|(_, points)| u32::from(points)).sum()
    }

    pub fn interpretation(&self) -> Interpretation {
        interpret(self.total())
    }

    pub fn is_coma_active(&self) -> bool {
        self.state.coma_active
    }

    pub fn is_locked(&self, item_id: &str) -> bool {
        self.state.coma_active && self.catalog.coma_rule().override_for(item_id).is_some()
    }

    /// Ids of every item currently locked by coma defaults.
    pub fn locked_items(&self) -> Vec<&str> {
        if !self.state.coma_active {
            return Vec::new();
        }
        self.catalog
            .coma_rule()
            .overrides
            .iter()
            .map(|o| o.item_id.as_str())
            .collect()
    }

    /// Return every item to its 0-point default and clear coma mode.
    pub fn reset(&mut self) {
        self.state = AssessmentState::new(self.catalog.len());
        info!(instrument = %self.instrument, "assessment reset");
    }

    pub fn summary(&self) -> ScoreSummary {
        let items = self
            .catalog
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let option = &item.options[self.state.selections[position]];
                ItemScore {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    points: option.points,
                    label: option.label.clone(),
                    untestable: option.untestable,
                    locked: self.is_locked(&item.id),
                }
            })
            .collect();

        ScoreSummary {
            instrument: self.instrument.clone(),
            total: self.total(),
            max_total: self.catalog.max_total(),
            interpretation: self.interpretation(),
            coma_active: self.state.coma_active,
            items,
        }
    }

    fn position(&self, item_id: &str) -> Result<usize, InstrumentError> {
        self.catalog
            .position(item_id)
            .ok_or_else(|| InstrumentError::InvalidItemId(item_id.to_string()))
    }

    fn points_at(&self, position: usize) -> u8 {
        let item = &self.catalog.items()[position];
        item.options[self.state.selections[position]].points
    }

    fn select_at(&mut self, position: usize, option: usize) -> Result<(), InstrumentError> {
        let catalog = self.catalog;
        let item = &catalog.items()[position];
        if self.is_locked(&item.id) {
            return Err(InstrumentError::ItemLocked(item.id.clone()));
        }

        self.state.selections[position] = option;
        debug!(
            item = %item.id,
            points = item.options[option].points,
            untestable = item.options[option].untestable,
            "item recorded"
        );

        let rule = catalog.coma_rule();
        if item.id == rule.trigger_item {
            let chosen = &item.options[option];
            let coma = !chosen.untestable && chosen.points == rule.trigger_points;
            if coma && !self.state.coma_active {
                for o in &rule.overrides {
                    self.state.selections[o.position] = o.option;
                }
                self.state.coma_active = true;
                info!(
                    trigger = %rule.trigger_item,
                    locked = rule.overrides.len(),
                    "coma defaults applied"
                );
            } else if !coma && self.state.coma_active {
                // Forced values are kept; only the locks are released.
                self.state.coma_active = false;
                info!(trigger = %rule.trigger_item, "coma defaults released");
            }
        }

        Ok(())
    }
}
