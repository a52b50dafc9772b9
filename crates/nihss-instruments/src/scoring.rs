use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A single selectable answer for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemOption {
    pub label: String,
    pub points: u8,
    /// "UN" answers. They score their `points` (always 0 for NIHSS) but are
    /// reported separately from a genuine zero.
    pub untestable: bool,
}

/// A scored item: identifier, display name, and its ordered answers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub info: Option<String>,
    pub options: Vec<ItemOption>,
}

impl Item {
    /// Index of the first scored (non-UN) option worth `points`.
    pub fn option_for_points(&self, points: u8) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.points == points && !o.untestable)
    }

    /// Index of the Untestable option, if the item has one.
    pub fn untestable_option(&self) -> Option<usize> {
        self.options.iter().position(|o| o.untestable)
    }

    pub fn max_points(&self) -> u8 {
        self.options.iter().map(|o| o.points).max().unwrap_or(0)
    }

    /// Resolve a score entry to an option index.
    pub fn resolve(&self, entry: &ScoreEntry) -> Option<usize> {
        if entry.untestable {
            self.untestable_option()
        } else {
            self.option_for_points(entry.value)
        }
    }

    /// Point values this item accepts, in option order.
    pub fn allowed_points(&self) -> Vec<u8> {
        self.options
            .iter()
            .filter(|o| !o.untestable)
            .map(|o| o.points)
            .collect()
    }
}

/// A score entry provided by a caller for validation or application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreEntry {
    pub item_id: String,
    pub value: u8,
    #[serde(default)]
    pub untestable: bool,
}

impl ScoreEntry {
    pub fn points(item_id: impl Into<String>, value: u8) -> Self {
        Self {
            item_id: item_id.into(),
            value,
            untestable: false,
        }
    }

    pub fn untestable(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            value: 0,
            untestable: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub item_id: String,
    pub value: u8,
    pub untestable: bool,
    /// Empty when the item id itself is unknown.
    pub allowed: Vec<u8>,
    pub message: String,
}

/// Categorical interpretation of a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    /// Total of 0.
    NoSymptoms,
    /// 1–4.
    Minor,
    /// 5–15.
    Moderate,
    /// 16–20.
    ModerateToSevere,
    /// 21 and above.
    Severe,
}

/// How prominently a severity should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityClass {
    Normal,
    Elevated,
}

impl Severity {
    pub fn from_total(total: u32) -> Self {
        match total {
            0 => Severity::NoSymptoms,
            1..=4 => Severity::Minor,
            5..=15 => Severity::Moderate,
            16..=20 => Severity::ModerateToSevere,
            _ => Severity::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::NoSymptoms => "No Stroke Symptoms",
            Severity::Minor => "Minor Stroke",
            Severity::Moderate => "Moderate Stroke",
            Severity::ModerateToSevere => "Moderate to Severe",
            Severity::Severe => "Severe Stroke",
        }
    }

    pub fn class(&self) -> SeverityClass {
        match self {
            Severity::NoSymptoms | Severity::Minor => SeverityClass::Normal,
            _ => SeverityClass::Elevated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub severity: Severity,
    pub label: String,
    pub class: SeverityClass,
}

/// Map a total score to its severity label and display class.
pub fn interpret(total: u32) -> Interpretation {
    let severity = Severity::from_total(total);
    Interpretation {
        severity,
        label: severity.label().to_string(),
        class: severity.class(),
    }
}

/// One row of a [`ScoreSummary`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemScore {
    pub id: String,
    pub name: String,
    pub points: u8,
    pub label: String,
    pub untestable: bool,
    pub locked: bool,
}

/// Read-only snapshot of an assessment, in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSummary {
    pub instrument: String,
    pub total: u32,
    pub max_total: u32,
    pub interpretation: Interpretation,
    pub coma_active: bool,
    pub items: Vec<ItemScore>,
}
