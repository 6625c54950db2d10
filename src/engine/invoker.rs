use crate::engine::coercion::RawInput;
use crate::engine::error::InvocationError;
use crate::engine::value::{Argument, InvocationResult, Receiver};

/// Everything needed for one call, still in raw textual form.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InvocationRequest {
    pub value: String,
    pub type_tag: String,
    pub method: String,
    pub args: Option<Vec<String>>,
    pub arg_types: Option<Vec<String>>,
}

impl InvocationRequest {
    pub fn new(value: impl Into<String>, type_tag: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_tag: type_tag.into(),
            method: method.into(),
            args: None,
            arg_types: None,
        }
    }

    pub fn with_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_arg_types<S: Into<String>>(mut self, arg_types: impl IntoIterator<Item = S>) -> Self {
        self.arg_types = Some(arg_types.into_iter().map(Into::into).collect());
        self
    }

    fn receiver_input(&self) -> RawInput<'_> {
        RawInput::new(&self.value, &self.type_tag)
    }

    /// Pairs every argument with its tag. Either sequence missing means no arguments.
    fn argument_inputs(&self) -> Result<Vec<RawInput<'_>>, InvocationError> {
        let (Some(args), Some(arg_types)) = (&self.args, &self.arg_types) else {
            return Ok(vec![])
        };
        if args.len() != arg_types.len() {
            return Err(InvocationError::ArgTypeMismatch)
        }
        Ok(args
            .iter()
            .zip(arg_types)
            .map(|(value, type_tag)| RawInput::new(value, type_tag))
            .collect())
    }
}

/// Runs `coerce receiver → check existence → check arity → coerce args → invoke`.
///
/// The existence check comes before any argument is looked at, so a bad method
/// name is reported even when the arguments are malformed too.
pub fn invoke(request: &InvocationRequest) -> Result<InvocationResult, InvocationError> {
    let receiver: Receiver = request.receiver_input().coerce()?;

    let method = receiver
        .resolve(&request.method)
        .ok_or_else(|| InvocationError::MethodNotFound {
            method: request.method.clone(),
            type_name: receiver.type_tag().name(),
        })?;

    let args = request
        .argument_inputs()?
        .iter()
        .map(|input| input.coerce::<Argument>())
        .collect::<Result<Vec<_>, _>>()?;

    method.call(&args)
}
