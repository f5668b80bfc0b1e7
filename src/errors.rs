//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The bot layer turns
//! an [`Error`] into a user-facing notice with [`Error::user_message`] and logs
//! the full error separately.

use thiserror::Error;

/// All errors produced by `CompanyBuddy`.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Access-flag store failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport-level failure talking to the company API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The company API answered with a non-success status
    #[error("Upstream endpoint `{endpoint}` returned status {status}")]
    Upstream {
        /// Endpoint name, e.g. `companylist`
        endpoint: &'static str,
        /// HTTP status code returned
        status: u16,
    },

    /// The company detail endpoint did not return a company for this id
    #[error("Company not found: {id}")]
    CompanyNotFound {
        /// The requested company id
        id: String,
    },

    /// Company ids must be exactly ten characters
    #[error("Invalid company id `{id}`: expected {expected} characters")]
    InvalidCompanyId {
        /// The rejected id
        id: String,
        /// Required length
        expected: usize,
    },

    /// Rejected lookback window for history queries
    #[error("Invalid lookback: {message}")]
    InvalidLookback {
        /// Why the lookback was rejected
        message: String,
    },

    /// Someone other than the session owner touched a session-bound control
    #[error("User {user_id} does not own this listing session")]
    NotSessionOwner {
        /// The offending user
        user_id: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise failure
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Text shown to the user who triggered the failing request.
    ///
    /// Upstream and transport failures collapse into one generic notice so that
    /// no partial or internal detail leaks into the channel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCompanyId { id, expected } => {
                format!("❌ `{id}` is not a valid company ID. IDs are exactly {expected} characters.")
            }
            Self::InvalidLookback { message } => format!("❌ {message}"),
            Self::CompanyNotFound { id } => format!("❌ No company found with ID `{id}`."),
            Self::NotSessionOwner { .. } => {
                "⚠️ Only the person who opened this list can use its controls.".to_string()
            }
            Self::Upstream { .. } | Self::Http(_) => {
                "❌ Failed to fetch data from the company API. Please try again later."
                    .to_string()
            }
            _ => "❌ Something went wrong while running this command.".to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
