use thiserror::Error;

/// Errors raised by the jitter algorithms and the random-source validator.
///
/// Both kinds describe caller misconfiguration rather than transient failure,
/// so they are never retried or replaced by a fallback value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JitterError {
    #[error("`{name}` must be {requirement}, got {value}")]
    InvalidParameter {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("`{label}` must return a finite number in [0, 1), got {value}")]
    InvalidRandomSource { label: String, value: f64 },
}

impl JitterError {
    pub fn invalid_parameter(name: &'static str, requirement: &'static str, value: f64) -> Self {
        Self::InvalidParameter {
            name,
            requirement,
            value,
        }
    }

    pub fn invalid_random_source(label: impl Into<String>, value: f64) -> Self {
        Self::InvalidRandomSource {
            label: label.into(),
            value,
        }
    }

    /// Name of the rejected parameter, if this is a parameter error.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            Self::InvalidRandomSource { .. } => None,
        }
    }
}
