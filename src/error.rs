use thiserror::Error;

/// Unified error type for curvenav
#[derive(Error, Debug)]
pub enum CurveNavError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type CurveNavResult<T> = Result<T, CurveNavError>;

/// Why a style property change did not take effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No property with that name exists on the container
    UnknownField,
    /// The property exists but the value could not be parsed
    InvalidValue(String),
}

/// Outcome of a by-name style property update.
///
/// Updates never fail hard: an unusable property degrades to `Ignored` and
/// the widget keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyUpdate {
    Applied,
    Ignored { field: String, reason: IgnoreReason },
}

impl PropertyUpdate {
    pub fn ignored(field: &str, reason: IgnoreReason) -> Self {
        Self::Ignored {
            field: field.to_string(),
            reason,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
