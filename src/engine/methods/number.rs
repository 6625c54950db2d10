//! Operations of a boxed number.
//!
//! Digit-count and radix arguments are range checked before formatting; an out
//! of range value fails the call with the same message a JavaScript engine gives.

use strum::{EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::engine::error::InvocationError;
use crate::engine::methods::{object, to_integer_or_infinity, Arguments, MethodResult};
use crate::engine::number_format;
use crate::engine::value::InvocationResult;

#[derive(Debug, Eq, PartialEq, Copy, Clone, EnumString, IntoStaticStr, EnumIter, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum NumberMethod {
    #[strum(to_string = "__defineGetter__")]
    DefineGetter,
    #[strum(to_string = "__defineSetter__")]
    DefineSetter,
    #[strum(to_string = "__lookupGetter__")]
    LookupGetter,
    #[strum(to_string = "__lookupSetter__")]
    LookupSetter,
    Constructor,
    HasOwnProperty,
    IsPrototypeOf,
    PropertyIsEnumerable,
    ToExponential,
    ToFixed,
    ToLocaleString,
    ToPrecision,
    ToString,
    ValueOf,
}

pub(crate) fn call(number: f64, method: NumberMethod, args: &Arguments) -> MethodResult {
    let text = match method {
        NumberMethod::Constructor => {
            let converted = if args.is_undefined(0) { 0.0 } else { args.number(0) };
            return Ok(InvocationResult::Number(converted))
        }
        NumberMethod::HasOwnProperty | NumberMethod::PropertyIsEnumerable => {
            return object::has_own_property(|_| false, args)
        }
        NumberMethod::IsPrototypeOf => return object::is_prototype_of(args),
        NumberMethod::DefineGetter | NumberMethod::DefineSetter => {
            return object::define_accessor(method.into(), args)
        }
        NumberMethod::LookupGetter | NumberMethod::LookupSetter => return object::lookup_accessor(args),
        NumberMethod::ValueOf => return Ok(InvocationResult::Number(number)),
        NumberMethod::ToExponential => to_exponential(number, args)?,
        NumberMethod::ToFixed => to_fixed(number, args)?,
        NumberMethod::ToLocaleString => number_format::to_locale_string(number),
        NumberMethod::ToPrecision => to_precision(number, args)?,
        NumberMethod::ToString => to_string(number, args)?,
    };
    Ok(InvocationResult::Text(text))
}

fn to_fixed(number: f64, args: &Arguments) -> Result<String, InvocationError> {
    let digits = args.integer(0);
    if !(0.0..=100.0).contains(&digits) {
        return Err(InvocationError::range_error("toFixed() digits argument must be between 0 and 100"))
    }
    Ok(number_format::to_fixed(number, digits as usize))
}

fn to_exponential(number: f64, args: &Arguments) -> Result<String, InvocationError> {
    let digits = args.integer(0);
    if !number.is_finite() {
        return Ok(number_format::to_js_string(number))
    }
    if !(0.0..=100.0).contains(&digits) {
        return Err(InvocationError::range_error("toExponential() argument must be between 0 and 100"))
    }
    let fraction = (!args.is_undefined(0)).then_some(digits as usize);
    Ok(number_format::to_exponential(number, fraction))
}

fn to_precision(number: f64, args: &Arguments) -> Result<String, InvocationError> {
    if args.is_undefined(0) {
        return Ok(number_format::to_js_string(number))
    }
    let precision = args.integer(0);
    if !number.is_finite() {
        return Ok(number_format::to_js_string(number))
    }
    if !(1.0..=100.0).contains(&precision) {
        return Err(InvocationError::range_error("toPrecision() argument must be between 1 and 100"))
    }
    Ok(number_format::to_precision(number, precision as usize))
}

fn to_string(number: f64, args: &Arguments) -> Result<String, InvocationError> {
    let radix = if args.is_undefined(0) {
        10.0
    } else {
        to_integer_or_infinity(args.number(0))
    };
    if !(2.0..=36.0).contains(&radix) {
        return Err(InvocationError::range_error("toString() radix must be between 2 and 36"))
    }
    if radix == 10.0 {
        Ok(number_format::to_js_string(number))
    } else {
        Ok(number_format::to_radix_string(number, radix as u32))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::engine::value::Argument;

    fn run(number: f64, name: &str, args: &[Argument]) -> MethodResult {
        let method = NumberMethod::from_str(name).unwrap();
        call(number, method, &Arguments(args))
    }

    fn text(value: &str) -> MethodResult {
        Ok(InvocationResult::Text(value.to_string()))
    }

    #[test]
    fn to_fixed_formats_and_checks_range() {
        assert_eq!(run(42.0, "toFixed", &[Argument::Number(1.0)]), text("42.0"));
        assert_eq!(run(3.14159, "toFixed", &[]), text("3"));
        assert_eq!(run(3.14159, "toFixed", &[Argument::Text("2".into())]), text("3.14"));
        assert_eq!(
            run(1.0, "toFixed", &[Argument::Number(101.0)]),
            Err(InvocationError::OperationFailed {
                message: "RangeError: toFixed() digits argument must be between 0 and 100".into()
            })
        );
    }

    #[test]
    fn to_string_with_radix() {
        assert_eq!(run(255.0, "toString", &[Argument::Number(16.0)]), text("ff"));
        assert_eq!(run(255.0, "toString", &[]), text("255"));
        assert!(run(255.0, "toString", &[Argument::Number(1.0)]).is_err());
        assert!(run(255.0, "toString", &[Argument::Number(37.0)]).is_err());
    }

    #[test]
    fn precision_and_exponential() {
        assert_eq!(run(123.456, "toPrecision", &[Argument::Number(4.0)]), text("123.5"));
        assert_eq!(run(123.456, "toPrecision", &[]), text("123.456"));
        assert!(run(1.0, "toPrecision", &[Argument::Number(0.0)]).is_err());
        assert_eq!(run(123456.0, "toExponential", &[]), text("1.23456e+5"));
        assert_eq!(run(f64::INFINITY, "toExponential", &[Argument::Number(500.0)]), text("Infinity"));
    }

    #[test]
    fn value_and_locale() {
        assert_eq!(run(1.5, "valueOf", &[]), Ok(InvocationResult::Number(1.5)));
        assert_eq!(run(1234.5, "toLocaleString", &[]), text("1,234.5"));
        assert_eq!(run(0.0, "constructor", &[Argument::Text("12".into())]), Ok(InvocationResult::Number(12.0)));
    }
}
