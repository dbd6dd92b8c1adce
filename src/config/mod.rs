//! Configuration module

mod settings;

pub use settings::Settings;
pub use settings::API_BASE_ENV;
