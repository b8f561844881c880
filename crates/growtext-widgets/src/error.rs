#![forbid(unsafe_code)]

//! Configuration errors.

use std::fmt;

/// A rejected text-area setting.
///
/// Returned by the `try_with_*` builders and [`TextAreaConfig::validate`].
/// The plain `with_*` builders never fail: they clamp the value and log a
/// warning instead.
///
/// [`TextAreaConfig::validate`]: crate::textarea::TextAreaConfig::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Text width must be at least one column.
    InvalidWidth(usize),
    /// A maximum height, when set, must be at least one row.
    InvalidMaxHeight(usize),
    /// The minimum height may not exceed the maximum.
    MinHeightAboveMax { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth(width) => write!(f, "invalid width {width}: must be at least 1"),
            Self::InvalidMaxHeight(height) => {
                write!(f, "invalid max height {height}: must be at least 1")
            }
            Self::MinHeightAboveMax { min, max } => {
                write!(f, "min height {min} exceeds max height {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_value() {
        assert_eq!(
            ConfigError::InvalidWidth(0).to_string(),
            "invalid width 0: must be at least 1"
        );
        assert_eq!(
            ConfigError::MinHeightAboveMax { min: 5, max: 3 }.to_string(),
            "min height 5 exceeds max height 3"
        );
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ConfigError::InvalidMaxHeight(0));
        assert!(err.to_string().contains("max height"));
    }
}
