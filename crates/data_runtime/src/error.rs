use thiserror::Error;

/// Structural configuration problems. Surfaced once at construction; the sim
/// never sees an invalid config.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite value > 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite value >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("unknown key binding '{0}'")]
    UnknownKey(String),
    #[error("catch and throw are both bound to {0}")]
    DuplicateBinding(String),
}

/// Check `v` is finite and strictly positive.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Check `v` is finite and non-negative.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Check `v` is finite.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
