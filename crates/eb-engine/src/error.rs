//! Error types for the game engine.

use eb_core::CoreError;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur running a game session.
///
/// Player input problems are never errors; they surface as response
/// messages. These variants cover broken content and internal faults, which
/// the dispatch boundary catches and reports generically.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Content failed to load or validate.
    #[error(transparent)]
    Content(#[from] CoreError),

    /// The configured starting location is not defined in the content.
    #[error("starting location \"{0}\" is not defined in the content")]
    MissingStartLocation(String),

    /// The session's current location vanished from the content.
    #[error("current location \"{0}\" is not defined in the content")]
    UnknownLocation(String),
}
