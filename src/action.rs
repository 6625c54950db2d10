//! The automation step around the engine: named inputs in, result out.

use std::io::Write;

use anyhow::{anyhow, Result};
use log::{debug, info};

use crate::engine::{self, InvocationResult};

pub mod commands;
pub mod inputs;

pub use commands::WorkflowCommands;
pub use inputs::{ActionInputs, InputArgs};

/// Name of the step output that carries the result.
pub const RESULT_OUTPUT: &str = "result";

/// Validates the inputs, invokes the engine and publishes the result.
///
/// Any error returned here is meant for the operator; the caller reports it as
/// a failed step.
pub fn run<W: Write>(raw: InputArgs, commands: &mut WorkflowCommands<W>) -> Result<InvocationResult> {
    let inputs = ActionInputs::try_from(raw)?;
    debug!("inputs: {inputs:?}");

    let request = inputs.to_request();
    let result = engine::invoke(&request)
        .map_err(|e| anyhow!("Error during method call: {e}"))?;

    info!("The result of the method call is: {result}");
    let value = result.to_command_value();
    commands.set_output(RESULT_OUTPUT, &value)?;

    if let Some(env_var) = &inputs.env_var {
        info!("The result has been assigned to: env.{env_var}");
        commands.export_variable(env_var, &value)?;
    }

    Ok(result)
}

/// Reports a failed step: logs it, issues `::error::`.
pub fn set_failed<W: Write>(commands: &mut WorkflowCommands<W>, error: &anyhow::Error) {
    log::error!("{error:#}");
    if let Err(e) = commands.error(&error.to_string()) {
        log::error!("could not report failure to the runner: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(value: &str, method: &str, type_tag: &str) -> InputArgs {
        InputArgs {
            value: Some(value.to_string()),
            method: Some(method.to_string()),
            type_tag: Some(type_tag.to_string()),
            ..InputArgs::default()
        }
    }

    #[test]
    fn publishes_result_as_output() {
        let mut commands = WorkflowCommands::new(Vec::new(), None, None);
        let result = run(inputs("Hello World", "toUpperCase", "string"), &mut commands).unwrap();
        assert_eq!(result, InvocationResult::Text("HELLO WORLD".into()));
        let stdout = String::from_utf8(commands.into_inner()).unwrap();
        assert_eq!(stdout, "::set-output name=result::HELLO WORLD\n");
    }

    #[test]
    fn engine_errors_are_prefixed() {
        let mut commands = WorkflowCommands::new(Vec::new(), None, None);
        let err = run(inputs("Hello", "nonExistentMethod", "string"), &mut commands).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error during method call: Method 'nonExistentMethod' does not exist on the string instance."
        );
    }

    #[test]
    fn failure_becomes_error_command() {
        let mut commands = WorkflowCommands::new(Vec::new(), None, None);
        let err = run(InputArgs::default(), &mut commands).unwrap_err();
        set_failed(&mut commands, &err);
        let stdout = String::from_utf8(commands.into_inner()).unwrap();
        assert_eq!(
            stdout,
            "::error::Required inputs 'value', 'method', and 'type' must be provided.\n"
        );
    }
}
