//! Error types for the videotheque client.
//!
//! This module defines the centralized error type [`VideothequeError`] and a type alias
//! [`Result`] used throughout the crate. Every failure that can reach the user is
//! eventually reduced to a single toast message via [`VideothequeError::toast_message`].

use thiserror::Error;

/// HTTP status the server uses to flag an internal failure.
const INTERNAL_SERVER_ERROR: u16 = 500;

/// The main error type for videotheque operations.
///
/// Network, server and decoding failures are kept apart so that callers can
/// log them precisely, but the user only ever sees one transient notification.
///
/// # Examples
///
/// ```
/// use videotheque::VideothequeError;
///
/// let err = VideothequeError::Status { code: 404, message: "Film introuvable".to_string() };
/// assert_eq!(err.toast_message(), "Erreur : Film introuvable");
/// ```
#[derive(Debug, Error)]
pub enum VideothequeError {
    /// The request never produced an HTTP response (DNS, connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status or an envelope status other
    /// than 200. `message` is the structured `error` (or `message`) field when
    /// the body could be read.
    #[error("Server returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body was not the JSON document the endpoint promises.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// A form or request was rejected before being sent.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VideothequeError {
    /// Returns the text shown to the user in the error toast.
    #[must_use]
    pub fn toast_message(&self) -> String {
        match self {
            Self::Status { code, message } if *code == INTERNAL_SERVER_ERROR => {
                format!("Erreur interne du serveur : {message}")
            }
            Self::Status { message, .. } => format!("Erreur : {message}"),
            Self::Transport(detail) => format!("Une erreur est survenue : {detail}"),
            Self::MalformedBody(_) => {
                "Une erreur est survenue : réponse du serveur illisible".to_string()
            }
            Self::Invalid(message) => message.clone(),
            Self::Io(e) => format!("Une erreur est survenue : {e}"),
            Self::Theme(message) | Self::Config(message) => {
                format!("Une erreur est survenue : {message}")
            }
        }
    }
}

impl From<serde_json::Error> for VideothequeError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedBody(e.to_string())
    }
}

impl From<reqwest::Error> for VideothequeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// A specialized `Result` type for videotheque operations.
pub type Result<T> = std::result::Result<T, VideothequeError>;
