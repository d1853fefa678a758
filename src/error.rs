//! Error types for the filter library
//!
//! Every failure a filter can report falls into one of a handful of kinds.
//! Missing required keys are `Lookup` errors, wrongly shaped arguments are
//! `Type` errors and malformed argument content is a `Value` error. Registry
//! dispatch adds its own variants for unknown names and bad argument binding.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = FilterError> = std::result::Result<T, E>;

/// Error code registry
///
/// Codes are grouped by kind:
/// - 1000-1999: lookup errors
/// - 2000-2999: type errors
/// - 3000-3999: value errors
/// - 4000-4999: registry and argument errors
/// - 5000-5999: configuration and serialization errors
pub struct ErrorCode;

impl ErrorCode {
    pub const LOOKUP_GENERIC: u16 = 1000;
    pub const LOOKUP_MISSING_KEY: u16 = 1001;
    pub const LOOKUP_NO_CANDIDATE: u16 = 1002;
    pub const LOOKUP_EMPTY_SEQUENCE: u16 = 1003;
    pub const LOOKUP_FORMAT_KEY: u16 = 1004;

    pub const TYPE_GENERIC: u16 = 2000;
    pub const TYPE_EXPECTED_MAPPING: u16 = 2001;
    pub const TYPE_EXPECTED_SEQUENCE: u16 = 2002;
    pub const TYPE_EXPECTED_STRING: u16 = 2003;

    pub const VALUE_GENERIC: u16 = 3000;
    pub const VALUE_INVALID_ADDRESS: u16 = 3001;
    pub const VALUE_INVALID_NETWORK: u16 = 3002;
    pub const VALUE_INVALID_REGEX: u16 = 3003;
    pub const VALUE_INVALID_FORMAT: u16 = 3004;
    pub const VALUE_INVALID_PAIR: u16 = 3005;

    pub const REGISTRY_UNKNOWN_FILTER: u16 = 4001;
    pub const REGISTRY_ARGUMENT: u16 = 4002;

    pub const CONFIG_GENERIC: u16 = 5000;
    pub const SERIALIZATION: u16 = 5001;
    pub const TEMPLATE: u16 = 5002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic lookup error",
        1001 => "Required key is missing",
        1002 => "None of the candidate keys is present",
        1003 => "Sequence is empty",
        1004 => "Format mapping key is missing",

        2000 => "Generic type error",
        2001 => "Expected a mapping",
        2002 => "Expected a sequence",
        2003 => "Expected a string",

        3000 => "Generic value error",
        3001 => "Invalid IP address",
        3002 => "Invalid CIDR network",
        3003 => "Invalid regular expression",
        3004 => "Invalid format pattern",
        3005 => "Expected a two-element pair",

        4001 => "Unknown filter name",
        4002 => "Invalid filter arguments",

        5000 => "Configuration error",
        5001 => "Serialization error",
        5002 => "Template rendering error",

        _ => "Unknown error code",
    }
}

/// The error type returned by every filter
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("[E{code:04}] Lookup error: {message}")]
    Lookup {
        code: u16,
        key: String,
        message: String,
    },

    #[error("[E{code:04}] Type error: {message}")]
    Type { code: u16, message: String },

    #[error("[E{code:04}] Value error: {message}")]
    Value { code: u16, message: String },

    #[error("[E{:04}] Unknown filter: {name}", ErrorCode::REGISTRY_UNKNOWN_FILTER)]
    UnknownFilter { name: String },

    #[error("[E{:04}] Invalid arguments for '{filter}': {message}", ErrorCode::REGISTRY_ARGUMENT)]
    Argument { filter: String, message: String },

    #[error("[E{:04}] Configuration error: {message}", ErrorCode::CONFIG_GENERIC)]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E5001] Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("[E5002] Template error: {0}")]
    Template(#[from] tera::Error),
}

impl FilterError {
    /// A required key is absent
    pub fn missing_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::Lookup {
            code: ErrorCode::LOOKUP_MISSING_KEY,
            message: format!("key '{}' not found", key),
            key,
        }
    }

    /// Create a lookup error with a specific code
    pub fn lookup_with_code(code: u16, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            code,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a type error with default code
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            code: ErrorCode::TYPE_GENERIC,
            message: message.into(),
        }
    }

    /// Create a type error with a specific code
    pub fn type_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Type {
            code,
            message: message.into(),
        }
    }

    /// Create a value error with default code
    pub fn value(message: impl Into<String>) -> Self {
        Self::Value {
            code: ErrorCode::VALUE_GENERIC,
            message: message.into(),
        }
    }

    /// Create a value error with a specific code
    pub fn value_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Value {
            code,
            message: message.into(),
        }
    }

    pub fn argument(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Argument {
            filter: filter.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error to a configuration error
    pub fn with_source(self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        match self {
            Self::Config { message, .. } => Self::Config {
                message,
                source: Some(source.into()),
            },
            other => other,
        }
    }

    /// Numeric code of this error
    pub fn code(&self) -> u16 {
        match self {
            Self::Lookup { code, .. } | Self::Type { code, .. } | Self::Value { code, .. } => *code,
            Self::UnknownFilter { .. } => ErrorCode::REGISTRY_UNKNOWN_FILTER,
            Self::Argument { .. } => ErrorCode::REGISTRY_ARGUMENT,
            Self::Config { .. } => ErrorCode::CONFIG_GENERIC,
            Self::Serialization(_) => ErrorCode::SERIALIZATION,
            Self::Template(_) => ErrorCode::TEMPLATE,
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }
}
