use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown item id: {0}")]
    InvalidItemId(String),

    #[error("invalid option {value} for item '{item_id}'")]
    InvalidOptionValue { item_id: String, value: u8 },

    #[error("invalid option index {index} for item '{item_id}'")]
    InvalidOptionIndex { item_id: String, index: usize },

    #[error("item '{0}' is locked while coma defaults are applied")]
    ItemLocked(String),

    #[error("malformed item catalog: {0}")]
    InvalidCatalog(String),
}
