use crate::engine::error::InvocationError;
use crate::engine::scanner::NumberScanner;
use crate::engine::type_tag::{ReceiverTypeTag, TypeTag};
use crate::engine::value::{Argument, Pattern, Receiver};

/// One caller supplied token and the tag that says how to read it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RawInput<'a> {
    pub value: &'a str,
    pub type_tag: &'a str,
}

impl<'a> RawInput<'a> {
    pub fn new(value: &'a str, type_tag: &'a str) -> Self {
        Self { value, type_tag }
    }

    pub fn coerce<T: FromRawInput>(&self) -> Result<T, InvocationError> {
        T::read(self)
    }
}

pub trait FromRawInput: Sized {
    fn read(input: &RawInput) -> Result<Self, InvocationError>;
}

impl FromRawInput for Receiver {
    fn read(input: &RawInput) -> Result<Self, InvocationError> {
        let receiver = match ReceiverTypeTag::resolve(input.type_tag)? {
            ReceiverTypeTag::String => Self::String(input.value.to_string()),
            ReceiverTypeTag::Number => Self::Number(coerce_number(input.value)?),
            ReceiverTypeTag::Boolean => Self::Boolean(coerce_boolean(input.value)?),
        };
        Ok(receiver)
    }
}

impl FromRawInput for Argument {
    fn read(input: &RawInput) -> Result<Self, InvocationError> {
        let argument = match TypeTag::resolve(input.type_tag)? {
            TypeTag::String => Self::Text(input.value.to_string()),
            TypeTag::Number => Self::Number(coerce_number(input.value)?),
            TypeTag::Boolean => Self::Logical(coerce_boolean(input.value)?),
            TypeTag::Regex => Self::Pattern(coerce_pattern(input.value)?),
        };
        Ok(argument)
    }
}

fn coerce_number(raw: &str) -> Result<f64, InvocationError> {
    NumberScanner::create(raw)
        .scan()
        .value()
        .filter(|number| !number.is_nan())
        .ok_or(InvocationError::InvalidNumber)
}

fn coerce_boolean(raw: &str) -> Result<bool, InvocationError> {
    match raw.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(InvocationError::InvalidBoolean),
    }
}

fn coerce_pattern(raw: &str) -> Result<Pattern, InvocationError> {
    Pattern::compile(raw).map_err(|_| InvocationError::InvalidRegex {
        pattern: raw.to_string(),
    })
}
