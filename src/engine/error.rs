/// Every way a single invocation can fail. None of these is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    #[error("Invalid number value.")]
    InvalidNumber,

    #[error("Invalid boolean value.")]
    InvalidBoolean,

    #[error("Invalid regex: '{pattern}'.")]
    InvalidRegex { pattern: String },

    #[error("Unsupported type '{tag}'.")]
    UnsupportedType { tag: String },

    #[error("Method '{method}' does not exist on the {type_name} instance.")]
    MethodNotFound {
        method: String,
        type_name: &'static str,
    },

    #[error("The lengths of args and argTypes arrays do not match.")]
    ArgTypeMismatch,

    /// raised by the invoked operation itself, e.g. an out of range `toFixed` digit count.
    #[error("{message}")]
    OperationFailed { message: String },
}

impl InvocationError {
    pub(crate) fn range_error(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: format!("RangeError: {}", message.into()),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: format!("TypeError: {}", message.into()),
        }
    }
}
