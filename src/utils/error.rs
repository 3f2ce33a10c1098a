use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter a prompt to generate the image.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error while generating the image.";
pub const TRANSPORT_PREFIX: &str =
    "Could not connect to the server. Check that the backend is running.";

/// Failure of one generate activation. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("{msg}", msg = VALIDATION_MESSAGE)]
    Validation,

    #[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))]
    Logical { message: Option<String> },

    #[error("{prefix} Details: {0}", prefix = TRANSPORT_PREFIX)]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
