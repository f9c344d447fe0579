use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("failed to decode appearance settings: {message}")]
    SettingsDecode { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse tail settings JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unknown tail variant '{value}' for skin '{skin}'")]
    JsonUnknownVariant { skin: String, value: String },
}
