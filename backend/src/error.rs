//! Error types for chart computation.
//!
//! Every failure the engine can report is a [`ChartError`] variant. Variants
//! carry structured fields so callers (the HTTP layer in particular) can map
//! them to responses without parsing messages.

use crate::models::Body;

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Error type for chart computation and its provider boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A required request field was absent or blank.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A date-time literal did not match `YYYY-MM-DD HH:MM`.
    #[error("Could not parse '{input}': {message}")]
    Parse { input: String, message: String },

    /// The timezone name is not in the IANA database.
    #[error("Unknown timezone: {name}")]
    UnknownTimezone { name: String },

    /// The geocoder returned no result for the location text.
    #[error("Location not found: {location}")]
    LocationNotFound { location: String },

    /// The geocoder could not be reached or answered with garbage.
    #[error("Geocoding failed: {message}")]
    Geocoding { message: String },

    /// The ephemeris cannot answer for this body or instant.
    #[error("Ephemeris unavailable for {subject} at JD {instant}: {reason}")]
    EphemerisUnavailable {
        subject: String,
        instant: f64,
        reason: String,
    },

    /// A tracked body is absent from a position set handed to aspect detection.
    #[error("Position set is missing body {body}")]
    MissingBody { body: Body },

    /// Configuration or initialization error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ChartError {
    /// Create a parse error for a rejected literal.
    pub fn parse(input: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.to_string(),
        }
    }

    /// Create an ephemeris error for a single body.
    pub fn ephemeris_body(body: Body, instant: f64, reason: impl Into<String>) -> Self {
        Self::EphemerisUnavailable {
            subject: body.name().to_string(),
            instant,
            reason: reason.into(),
        }
    }

    /// Create an ephemeris error for something other than a body (house cusps).
    pub fn ephemeris(subject: impl Into<String>, instant: f64, reason: impl Into<String>) -> Self {
        Self::EphemerisUnavailable {
            subject: subject.into(),
            instant,
            reason: reason.into(),
        }
    }

    /// Create a geocoding transport error.
    pub fn geocoding(message: impl ToString) -> Self {
        Self::Geocoding {
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the request rather than a provider or a bug.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::Parse { .. } | Self::LocationNotFound { .. }
        )
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::UnknownTimezone { .. } => "UNKNOWN_TIMEZONE",
            Self::LocationNotFound { .. } => "LOCATION_NOT_FOUND",
            Self::Geocoding { .. } => "GEOCODING_ERROR",
            Self::EphemerisUnavailable { .. } => "EPHEMERIS_UNAVAILABLE",
            Self::MissingBody { .. } => "MISSING_BODY",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}
