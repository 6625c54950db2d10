use strum::{EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::engine::methods::{object, Arguments, MethodResult};
use crate::engine::value::InvocationResult;

#[derive(Debug, Eq, PartialEq, Copy, Clone, EnumString, IntoStaticStr, EnumIter, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum BooleanMethod {
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
    ToLocaleString,
    ToString,
    ValueOf,
}

pub(crate) fn call(logical: bool, method: BooleanMethod, args: &Arguments) -> MethodResult {
    match method {
        BooleanMethod::Constructor => Ok(InvocationResult::Logical(args.boolean(0))),
        BooleanMethod::HasOwnProperty | BooleanMethod::PropertyIsEnumerable => {
            object::has_own_property(|_| false, args)
        }
        BooleanMethod::IsPrototypeOf => object::is_prototype_of(args),
        BooleanMethod::DefineGetter | BooleanMethod::DefineSetter => {
            object::define_accessor(method.into(), args)
        }
        BooleanMethod::LookupGetter | BooleanMethod::LookupSetter => object::lookup_accessor(args),
        BooleanMethod::ToLocaleString | BooleanMethod::ToString => {
            Ok(InvocationResult::Text(logical.to_string()))
        }
        BooleanMethod::ValueOf => Ok(InvocationResult::Logical(logical)),
    }
}
