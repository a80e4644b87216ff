use crate::attributes::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

impl RosterError {
    pub fn owner_not_found(id: u64) -> Self {
        RosterError::NotFound { entity: "Owner", id }
    }

    pub fn definition_not_found(id: u64) -> Self {
        RosterError::NotFound {
            entity: "Attribute definition",
            id,
        }
    }

    pub fn value_not_found(id: u64) -> Self {
        RosterError::NotFound {
            entity: "Attribute value",
            id,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
