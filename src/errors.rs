use thiserror::Error;

/// Represents errors that can occur while assembling or exporting a deck.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The requested theme name does not exist in the theme registry.
    #[error("Theme '{0}' not found")]
    ThemeNotFound(String),

    /// The requested layout name does not exist in the layout registry.
    #[error("Layout '{0}' not found")]
    LayoutNotFound(String),

    /// A deck request failed validation. Carries the blocking errors plus any
    /// non-blocking warnings collected while normalizing the request.
    #[error("Deck request validation failed: {}", errors.join("; "))]
    Validation {
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    /// Error occurred during JSON serialization or deserialization.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred, often related to writing the output artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The presentation archive could not be written.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error during string formatting of an output document.
    #[error("Formatting error during rendering: {0}")]
    Format(#[from] std::fmt::Error),

    /// The export request itself was malformed (missing theme, no slides, ...).
    #[error("Invalid export request: {0}")]
    InvalidRequest(String),
}

/// A type alias for `Result<T, DeckError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, DeckError>;
