use core::fmt;

/// Rejections raised while loading a vehicle's calibration tables.
///
/// The control law itself never fails; everything it consumes is validated
/// here once, before the first tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A breakpoint axis has no points.
    EmptyAxis,
    /// A breakpoint axis decreases somewhere (or holds a NaN).
    NonMonotonicAxis,
    /// A value table length differs from its breakpoint axis.
    LengthMismatch,
    /// More curve entries than the evaluator has room for.
    TooManyEntries,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyAxis => f.write_str("empty breakpoint axis"),
            ConfigError::NonMonotonicAxis => f.write_str("breakpoint axis is not non-decreasing"),
            ConfigError::LengthMismatch => f.write_str("value table length differs from axis"),
            ConfigError::TooManyEntries => f.write_str("too many tuning curve entries"),
        }
    }
}
