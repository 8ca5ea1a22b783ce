use crate::error::transport::TransportError;

use common::ErrorLocation;

use models::ModelError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown Profile Error: no profile with id {id} {location}")]
    UnknownProfile {
        id: String,
        location: ErrorLocation,
    },

    #[error("Command Timeout Error: {kind} gave no result within {elapsed_ms} ms {location}")]
    Timeout {
        kind: &'static str,
        elapsed_ms: u64,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<ModelError> for DispatchError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Validation { message, location } => {
                DispatchError::Validation { message, location }
            }
        }
    }
}
