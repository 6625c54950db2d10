//! Dynamic invocation of primitive operations by name.
//!
//! A caller hands over nothing but text: a value, its type, an operation name
//! and optionally arguments with their own types. [`invoke`] rebuilds typed
//! values from that text, finds the operation in the receiver's dispatch table
//! and runs it.

use strum::{EnumMessage, IntoEnumIterator};

pub mod coercion;
pub mod error;
pub mod invoker;
pub mod methods;
pub mod number_format;
pub mod scanner;
pub mod type_tag;
pub mod value;

pub use error::InvocationError;
pub use invoker::{invoke, InvocationRequest};
pub use type_tag::{ReceiverTypeTag, TypeTag};
pub use value::{Argument, InvocationResult, Receiver};

use methods::{BooleanMethod, NumberMethod, StringMethod};

/// Every name a receiver of the given type answers to, aliases included, in declaration order.
pub fn supported_methods(tag: ReceiverTypeTag) -> Vec<&'static str> {
    match tag {
        ReceiverTypeTag::String => names::<StringMethod>(),
        ReceiverTypeTag::Number => names::<NumberMethod>(),
        ReceiverTypeTag::Boolean => names::<BooleanMethod>(),
    }
}

fn names<M: IntoEnumIterator + EnumMessage>() -> Vec<&'static str> {
    M::iter()
        .flat_map(|method| method.get_serializations().iter().copied())
        .collect()
}
