pub mod generator;
mod header;
mod settings;

pub use generator::{ClientHandle, Generator};
pub use header::Header;
pub use settings::SettingsView;
