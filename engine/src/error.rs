use thiserror::Error;

/// Errors raised while loading or validating engine settings.
///
/// Synthesis and indicator computation never return these: bad inputs there
/// are clamped or answered with the documented warm-up values.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Settings parsing error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Indicator configuration error: {0}")]
    IndicatorError(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
