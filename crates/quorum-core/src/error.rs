use std::fmt;

/// Which required field of a relationship record was missing or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Source,
    Target,
}

impl RecordField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the analysis pipelines.
///
/// Every failure is reported synchronously to the caller. Ranking
/// non-convergence is not represented here: it degrades to a best-effort
/// estimate flagged on the result instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// A relationship record is missing its source or target identifier.
    #[error("relationship record {index} has a missing or empty {field}")]
    DataFormat {
        /// Position of the offending record in the input sequence.
        index: usize,
        /// The field that failed the shape check.
        field: RecordField,
    },

    /// A value is outside the domain accepted by leading-digit analysis.
    #[error("value {value} at position {index} is out of range")]
    ValueRange {
        /// Position of the offending value in the input sequence.
        index: usize,
        /// The rejected value.
        value: i64,
    },

    /// A histogram percentage is negative or not a finite number.
    #[error("percentage {value} for digit {digit} is not a finite non-negative number")]
    InvalidPercentage {
        /// The digit the percentage was listed for.
        digit: u8,
        /// The rejected percentage.
        value: f64,
    },

    /// A numeric sample had no values to analyze.
    #[error("numeric sample is empty")]
    EmptySample,

    /// A tuning parameter is outside its valid range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Name of the parameter.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl AnalysisError {
    /// Return the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DataFormat { .. } => ErrorCode::DataFormat,
            Self::ValueRange { .. } | Self::InvalidPercentage { .. } => ErrorCode::ValueRange,
            Self::EmptySample => ErrorCode::EmptySample,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
        }
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfig,
    DataFormat,
    ValueRange,
    EmptySample,
    InputReadFailed,
    InputParseFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidConfig => "E1002",
            Self::DataFormat => "E2001",
            Self::ValueRange => "E2002",
            Self::EmptySample => "E2003",
            Self::InputReadFailed => "E5001",
            Self::InputParseFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfig => "Invalid analysis parameter",
            Self::DataFormat => "Malformed relationship record",
            Self::ValueRange => "Value out of range",
            Self::EmptySample => "Empty numeric sample",
            Self::InputReadFailed => "Input file could not be read",
            Self::InputParseFailed => "Input file could not be parsed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .quorum/config.toml and retry."),
            Self::InvalidConfig => {
                Some("Use damping in [0, 1), a positive tolerance, and at least one iteration.")
            }
            Self::DataFormat => Some("Every record needs non-empty `source` and `target` fields."),
            Self::ValueRange => {
                Some("Leading-digit analysis needs positive integers; pass --drop-non-positive.")
            }
            Self::EmptySample => Some("Provide at least one positive value."),
            Self::InputReadFailed => Some("Check the path and read permissions."),
            Self::InputParseFailed => Some(
                "Relationships are a JSON array of records; samples are one integer per line.",
            ),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
