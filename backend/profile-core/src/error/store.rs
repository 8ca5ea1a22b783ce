use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Unknown Profile Error: no profile with id {id} {location}")]
    UnknownProfile {
        id: String,
        location: ErrorLocation,
    },
}
