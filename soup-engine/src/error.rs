// error.rs - Errors at the configuration and host boundaries
//
// The simulation itself never fails; "nothing to do" is a silent no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoupError {
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("value out of range: {field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("canvas error: {0}")]
    Canvas(String),
}

pub type Result<T> = std::result::Result<T, SoupError>;
