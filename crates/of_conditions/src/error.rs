use thiserror::Error;

/// Errors raised while building or loading match conditions.
///
/// The per-tick evaluation path never produces these; it clamps instead.
#[derive(Error, Debug)]
pub enum ConditionError {
    #[error("Value out of range for {field}: {value} (expected 0.0..=1.0)")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("{field} must stay below 1.0 for this weather (got {value})")]
    NotDegraded { field: &'static str, value: f32 },

    #[error("Invalid moisture decay: {0} (expected 0.0 < decay <= 1.0)")]
    InvalidDecay(f32),

    #[error("Invalid weather sensitivity: {0} (must be finite and positive)")]
    InvalidSensitivity(f32),

    #[error("Ball drops cannot carry an injury baseline (got {0})")]
    NonZeroDropInjury(f32),

    #[error("Unknown weather: {0}")]
    UnknownWeather(String),

    #[error("Unknown accident kind: {0}")]
    UnknownAccident(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConditionError {
    /// Whether the error came from a malformed document rather than bad values.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConditionError::Json(_) | ConditionError::Yaml(_))
    }
}

pub type Result<T> = std::result::Result<T, ConditionError>;

/// Checks a unit-interval value, rejecting NaN as well.
pub(crate) fn ensure_unit(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConditionError::OutOfRange { field, value })
    }
}
