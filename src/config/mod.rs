//! Project-level configuration (`.titanium.toml`).

pub mod settings;

pub use settings::Settings;
