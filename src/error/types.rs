//! Error types for the diagnosis API client.

use thiserror::Error;

/// Coarse classification of a failed HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Server,
    Other,
}

impl HttpErrorKind {
    /// Classify an HTTP status code.
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// Errors produced by the diagnosis API client.
///
/// Validation errors are raised locally before any request is sent. Transport
/// and conversion errors are passed through to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A search filter value is not one of the supported concept types.
    #[error("Invalid search concept type: {0}")]
    InvalidSearchConceptType(String),

    /// A concept-list filter value is not one of the supported concept types.
    #[error("Invalid concept type: {0}")]
    InvalidConceptType(String),

    /// A raw sex value is neither `female` nor `male`.
    #[error("Invalid sex value: {0}")]
    InvalidSex(String),

    /// A raw age unit is neither `year` nor `month`.
    #[error("Invalid age unit: {0}")]
    InvalidAgeUnit(String),

    /// The configured API version needs a patient age for this method.
    #[error("Method '{0}' requires a patient age in API version v3")]
    MissingAge(String),

    /// The configured API version does not expose the requested method.
    #[error("Method '{method}' is not available in API version {version}")]
    MethodNotAvailable { version: String, method: String },

    /// No connector has been registered under the requested alias.
    #[error("{}", missing_configuration_message(.0))]
    MissingConfiguration(Option<String>),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    TransportError { status: u16, body: String },

    /// The request never reached the server or the connection dropped.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A JSON response lacks what the typed result requires.
    #[error("Malformed response for {target}: {message}")]
    MalformedResponse { target: String, message: String },

    /// JSON encoding or decoding failed outside of typed conversion.
    #[error("JSON error: {0}")]
    JsonError(String),
}

fn missing_configuration_message(alias: &Option<String>) -> String {
    match alias {
        Some(alias) => format!("No API connector configured for alias '{alias}'"),
        None => "No default API connector configured".to_string(),
    }
}

impl ApiError {
    /// Build a transport error from a status code and raw body.
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::TransportError {
            status,
            body: body.into(),
        }
    }

    /// Build a conversion error for the typed result `T`.
    pub fn malformed<T: ?Sized>(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            target: short_type_name::<T>(),
            message: message.into(),
        }
    }

    /// HTTP status of a transport error.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::TransportError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classification of a transport error; `None` for every other variant.
    pub const fn kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::TransportError { status, .. } => Some(HttpErrorKind::from_status(*status)),
            _ => None,
        }
    }

    /// True for errors raised before any request was sent.
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSearchConceptType(_)
                | Self::InvalidConceptType(_)
                | Self::InvalidSex(_)
                | Self::InvalidAgeUnit(_)
                | Self::MissingAge(_)
        )
    }
}

/// Type name with module paths stripped from every segment, so
/// `alloc::vec::Vec<crate::types::SuggestItem>` becomes `Vec<SuggestItem>`.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&') {
            short.push_str(segment.rsplit("::").next().unwrap_or(&segment));
            segment.clear();
            short.push(ch);
        } else {
            segment.push(ch);
        }
    }
    short.push_str(segment.rsplit("::").next().unwrap_or(&segment));
    short
}
