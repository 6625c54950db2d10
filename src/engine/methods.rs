//! Dispatch tables for boxed receivers.
//!
//! Each receiver kind has an exhaustive enum of the operations it answers to.
//! Resolving a name is a string to enum lookup; an unknown name has no entry.

use std::str::FromStr;

use crate::engine::error::InvocationError;
use crate::engine::value::{Argument, InvocationResult, Receiver};

pub mod boolean;
pub mod number;
pub mod string;

pub use boolean::BooleanMethod;
pub use number::NumberMethod;
pub use string::StringMethod;

pub(crate) type MethodResult = Result<InvocationResult, InvocationError>;

/// A resolved operation together with the receiver it will run on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundMethod<'r> {
    String(&'r str, StringMethod),
    Number(f64, NumberMethod),
    Boolean(bool, BooleanMethod),
}

impl Receiver {
    /// Looks up `name` among the operations of this receiver's kind.
    pub fn resolve(&self, name: &str) -> Option<BoundMethod<'_>> {
        match self {
            Self::String(text) => StringMethod::from_str(name)
                .ok()
                .map(|method| BoundMethod::String(text, method)),
            Self::Number(number) => NumberMethod::from_str(name)
                .ok()
                .map(|method| BoundMethod::Number(*number, method)),
            Self::Boolean(logical) => BooleanMethod::from_str(name)
                .ok()
                .map(|method| BoundMethod::Boolean(*logical, method)),
        }
    }
}

impl BoundMethod<'_> {
    pub fn call(self, args: &[Argument]) -> MethodResult {
        let args = Arguments(args);
        match self {
            Self::String(text, method) => string::call(text, method, &args),
            Self::Number(number, method) => number::call(number, method, &args),
            Self::Boolean(logical, method) => boolean::call(logical, method, &args),
        }
    }
}

/// Positional view over the coerced arguments. A missing position reads as `undefined`.
pub(crate) struct Arguments<'a>(&'a [Argument]);

impl<'a> Arguments<'a> {
    pub(crate) fn get(&self, index: usize) -> Option<&'a Argument> {
        self.0.get(index)
    }

    pub(crate) fn all(&self) -> &'a [Argument] {
        self.0
    }

    pub(crate) fn is_undefined(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    pub(crate) fn string(&self, index: usize) -> String {
        self.get(index)
            .map_or_else(|| "undefined".to_string(), Argument::to_js_string)
    }

    pub(crate) fn number(&self, index: usize) -> f64 {
        self.get(index).map_or(f64::NAN, Argument::to_number)
    }

    /// `ToIntegerOrInfinity`.
    pub(crate) fn integer(&self, index: usize) -> f64 {
        to_integer_or_infinity(self.number(index))
    }

    pub(crate) fn boolean(&self, index: usize) -> bool {
        self.get(index).map_or(false, Argument::to_boolean)
    }
}

pub(crate) fn to_integer_or_infinity(number: f64) -> f64 {
    if number.is_nan() {
        0.0
    } else {
        number.trunc()
    }
}

/// Operations every boxed primitive inherits from the common object prototype.
pub(crate) mod object {
    use super::{Arguments, MethodResult};
    use crate::engine::error::InvocationError;
    use crate::engine::value::InvocationResult;

    /// `hasOwnProperty` / `propertyIsEnumerable` given the receiver's own keys.
    pub(crate) fn has_own_property(is_own: impl Fn(&str) -> bool, args: &Arguments) -> MethodResult {
        Ok(InvocationResult::Logical(is_own(&args.string(0))))
    }

    /// A primitive argument is never an object, so never has a prototype chain to search.
    pub(crate) fn is_prototype_of(_args: &Arguments) -> MethodResult {
        Ok(InvocationResult::Logical(false))
    }

    /// `__defineGetter__` / `__defineSetter__`. The accessor has to be callable and no
    /// argument ever is.
    pub(crate) fn define_accessor(name: &str, _args: &Arguments) -> MethodResult {
        Err(InvocationError::type_error(format!(
            "Object.prototype.{name}: Expecting function"
        )))
    }

    /// `__lookupGetter__` / `__lookupSetter__`. Boxed primitives and their prototypes
    /// hold data properties only.
    pub(crate) fn lookup_accessor(_args: &Arguments) -> MethodResult {
        Ok(InvocationResult::Undefined)
    }
}
