use anyhow::{bail, Result};
use clap::Args;

use crate::engine::InvocationRequest;

/// Named inputs of the step. Each flag falls back to the variable the runner sets for it.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// the receiver, as text.
    #[clap(long, env = "INPUT_VALUE", allow_hyphen_values = true)]
    pub value: Option<String>,
    /// operation to call on the receiver.
    #[clap(long, env = "INPUT_METHOD")]
    pub method: Option<String>,
    /// receiver type: string, number or boolean.
    #[clap(long = "type", env = "INPUT_TYPE")]
    pub type_tag: Option<String>,
    /// comma separated argument values.
    #[clap(long, env = "INPUT_ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,
    /// comma separated argument types: string, number, boolean or regex.
    #[clap(long, env = "INPUT_ARGTYPES")]
    pub arg_types: Option<String>,
    /// environment variable that receives the result.
    #[clap(long, env = "INPUT_ENVVAR")]
    pub env_var: Option<String>,
}

impl InputArgs {
    /// Reads every input straight from the runner's environment.
    pub fn from_env() -> Self {
        Self {
            value: get_input("value"),
            method: get_input("method"),
            type_tag: get_input("type"),
            args: get_input("args"),
            arg_types: get_input("argTypes"),
            env_var: get_input("envVar"),
        }
    }
}

/// The runner exposes input `name` as `INPUT_<NAME>`, upper-cased with spaces as underscores.
pub fn get_input(name: &str) -> Option<String> {
    let variable = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(variable).ok()
}

/// Inputs after trimming, with the required ones known to be present.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActionInputs {
    pub value: String,
    pub method: String,
    pub type_tag: String,
    pub args: Vec<String>,
    pub arg_types: Vec<String>,
    pub env_var: Option<String>,
}

impl TryFrom<InputArgs> for ActionInputs {
    type Error = anyhow::Error;

    fn try_from(raw: InputArgs) -> Result<Self> {
        let (Some(value), Some(method), Some(type_tag)) = (
            present(raw.value),
            present(raw.method),
            present(raw.type_tag),
        ) else {
            bail!("Required inputs 'value', 'method', and 'type' must be provided.")
        };

        Ok(Self {
            value,
            method,
            type_tag,
            args: split_list(raw.args.as_deref()),
            arg_types: split_list(raw.arg_types.as_deref()),
            env_var: present(raw.env_var),
        })
    }
}

impl ActionInputs {
    /// Both sequences are always handed over, so an empty `args` against a
    /// non-empty `argTypes` still counts as a length mismatch.
    pub fn to_request(&self) -> InvocationRequest {
        InvocationRequest::new(&self.value, &self.type_tag, &self.method)
            .with_args(self.args.iter().cloned())
            .with_arg_types(self.arg_types.iter().cloned())
    }
}

/// trimmed; blank counts as absent.
fn present(input: Option<String>) -> Option<String> {
    input
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Splits a list input on commas, trimming each element. A blank input is an empty list.
pub fn split_list(input: Option<&str>) -> Vec<String> {
    match input.map(str::trim) {
        None | Some("") => vec![],
        Some(list) => list.split(',').map(|item| item.trim().to_string()).collect(),
    }
}
