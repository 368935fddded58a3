//! Error types for graphmap operations

use graphmap_domain::ApiError;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Result type alias for operations that may also surface an API error
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to map between JSON and a declared type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    /// Input text was empty or only whitespace
    #[error("JSON is an empty string - can't map it")]
    EmptyInput,

    /// Input text is not valid JSON
    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    MalformedJson {
        /// Line of the syntax error (1-based)
        line: usize,
        /// Column of the syntax error (1-based)
        column: usize,
        /// Parser message
        message: String,
    },

    /// JSON node kind cannot be mapped to the target type
    #[error("Cannot map JSON {found} to {target} at {path}")]
    TypeMismatch {
        /// Target type name
        target: &'static str,
        /// Kind of the offending JSON node
        found: &'static str,
        /// JSON path of the node
        path: String,
    },

    /// Scalar could not be converted to the target type
    #[error("Cannot convert {value} to {target} at {path}: {reason}")]
    Coercion {
        /// Target type name
        target: &'static str,
        /// Offending JSON text
        value: String,
        /// JSON path of the node
        path: String,
        /// Why the conversion failed
        reason: String,
    },

    /// `null` (or the `false` stand-in) reached a type with no absent value
    #[error("Unexpected null for non-nullable {target} at {path}")]
    UnexpectedNull {
        /// Target type name
        target: &'static str,
        /// JSON path of the node
        path: String,
    },

    /// A JSON array was handed to an object type
    #[error(
        "JSON is an array but is being mapped as {target} at {path} - map it as a list instead"
    )]
    ArrayAsObject {
        /// Target type name
        target: &'static str,
        /// JSON path of the node
        path: String,
    },

    /// A JSON object could not be interpreted as a list
    #[error("JSON is an object but is being mapped as a list at {path} (keys: {keys})")]
    ObjectAsList {
        /// Comma separated keys of the object
        keys: String,
        /// JSON path of the node
        path: String,
    },

    /// Type declaration is inconsistent
    #[error("Invalid mapping declaration {owner}.{field}: {message}")]
    Configuration {
        /// Type declaring the field
        owner: &'static str,
        /// Field name
        field: &'static str,
        /// What is wrong
        message: String,
    },

    /// Post-mapping hook reported a failure
    #[error("Post-mapping hook {owner}::{hook} failed: {message}")]
    Hook {
        /// Type declaring the hook
        owner: &'static str,
        /// Hook name
        hook: &'static str,
        /// Failure description
        message: String,
    },

    /// Value has no JSON representation
    #[error("Cannot represent {what} as JSON")]
    Unrepresentable {
        /// Description of the value
        what: String,
    },
}

impl MappingError {
    /// Create a malformed JSON error from a serde_json parse error
    pub fn malformed(err: &serde_json::Error) -> Self {
        Self::MalformedJson {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Create a coercion error
    pub fn coercion(
        target: &'static str,
        value: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            target,
            value: value.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(
        owner: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            owner,
            field,
            message: message.into(),
        }
    }

    /// Create a hook failure
    pub fn hook(owner: &'static str, hook: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            owner,
            hook,
            message: message.into(),
        }
    }

    /// Create an unrepresentable value error
    pub fn unrepresentable(what: impl Into<String>) -> Self {
        Self::Unrepresentable { what: what.into() }
    }

    /// Whether the error comes from a type declaration rather than the document
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Top-level error: either the payload could not be mapped or it encodes an API error
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Mapping failure
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The API reported an error
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// The API error, if this is one
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            Error::Mapping(_) => None,
        }
    }
}
