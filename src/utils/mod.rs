mod display;
mod error;
mod generate;
mod settings;
mod theme;
mod types;

pub use display::{DisplayState, Panel};
pub use error::{
    ClientError, GenerateError, SettingsError, TRANSPORT_PREFIX, UNKNOWN_ERROR_MESSAGE,
    VALIDATION_MESSAGE,
};
pub use generate::GenerateClient;
pub use settings::Settings;
pub use theme::Theme;
pub use types::{AppView, GenerationRequest, GenerationResponse, Prompt, Ticket};
