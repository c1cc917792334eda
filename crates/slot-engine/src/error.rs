//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
