use common::ErrorLocation;

use thiserror::Error;

/// Errors that can occur while wiring and running the shell.
///
/// Core failures are carried as rendered strings; the shell only logs them,
/// it never needs to match on the inner variant.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Error from the shell itself (logging, paths, wiring)
    #[error("Shell Error: {message} {location}")]
    Shell {
        message: String,
        location: ErrorLocation,
    },

    /// Error from profile-core operations (transport, dispatch, config)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Error from the embedded demo host (persistence, channels)
    #[error("Host Error: {message} {location}")]
    Host {
        message: String,
        location: ErrorLocation,
    },
}
