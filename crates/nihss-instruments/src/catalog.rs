use serde::Serialize;

use crate::error::InstrumentError;
use crate::scoring::Item;

/// A forced value for one item while coma defaults are in effect.
#[derive(Debug, Clone, Serialize)]
pub struct ComaOverride {
    pub item_id: String,
    pub points: u8,
    #[serde(skip)]
    pub(crate) position: usize,
    #[serde(skip)]
    pub(crate) option: usize,
}

/// Trigger plus the items it forces.
#[derive(Debug, Clone, Serialize)]
pub struct ComaRule {
    pub trigger_item: String,
    pub trigger_points: u8,
    pub overrides: Vec<ComaOverride>,
}

impl ComaRule {
    pub fn override_for(&self, item_id: &str) -> Option<&ComaOverride> {
        self.overrides.iter().find(|o| o.item_id == item_id)
    }
}

/// The ordered set of items an instrument scores, plus its coma rule.
///
/// Built once and checked on construction: every override target must be a
/// known item with an option worth the forced value, and the trigger item
/// must never be one of its own targets.
#[derive(Debug, Clone, Serialize)]
pub struct ItemCatalog {
    items: Vec<Item>,
    coma: ComaRule,
}

impl ItemCatalog {
    pub fn new(
        items: Vec<Item>,
        trigger: (&str, u8),
        overrides: &[(&str, u8)],
    ) -> Result<Self, InstrumentError> {
        let (trigger_item, trigger_points) = trigger;
        let trigger_pos = items
            .iter()
            .position(|i| i.id == trigger_item)
            .ok_or_else(|| {
                InstrumentError::InvalidCatalog(format!("coma trigger '{trigger_item}' not found"))
            })?;
        if items[trigger_pos].option_for_points(trigger_points).is_none() {
            return Err(InstrumentError::InvalidCatalog(format!(
                "coma trigger '{trigger_item}' has no option worth {trigger_points}"
            )));
        }

        let mut resolved = Vec::with_capacity(overrides.len());
        for &(item_id, points) in overrides {
            if item_id == trigger_item {
                return Err(InstrumentError::InvalidCatalog(format!(
                    "coma trigger '{item_id}' cannot override itself"
                )));
            }
            let position = items.iter().position(|i| i.id == item_id).ok_or_else(|| {
                InstrumentError::InvalidCatalog(format!("override target '{item_id}' not found"))
            })?;
            let option = items[position].option_for_points(points).ok_or_else(|| {
                InstrumentError::InvalidCatalog(format!(
                    "override target '{item_id}' has no option worth {points}"
                ))
            })?;
            resolved.push(ComaOverride {
                item_id: item_id.to_string(),
                points,
                position,
                option,
            });
        }

        Ok(Self {
            items,
            coma: ComaRule {
                trigger_item: trigger_item.to_string(),
                trigger_points,
                overrides: resolved,
            },
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == item_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn coma_rule(&self) -> &ComaRule {
        &self.coma
    }

    /// Highest attainable total.
    pub fn max_total(&self) -> u32 {
        self.items.iter().map(|i| u32::from(i.max_points())).sum()
    }
}
