use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use dynamic_methods::action::{self, InputArgs, WorkflowCommands};
use dynamic_methods::console;

mod logging;

use logging::LogLevel;

/// Calls a named operation on a string, number or boolean given as text.
#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(long, value_enum, env = "DYNAMIC_METHODS_LOG", default_value = "info")]
    log_level: LogLevel,
    #[clap(subcommand)]
    sub_command: Option<SubCommand>,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Run as an Actions step: inputs from `INPUT_*`, result to the step outputs.
    Action {
        #[clap(flatten)]
        inputs: InputArgs,
    },
    /// Invoke once and print the result.
    Call {
        #[clap(flatten)]
        inputs: InputArgs,
        /// print the result as JSON.
        #[clap(long)]
        json: bool,
    },
    /// List the operations a receiver type supports.
    Methods {
        #[clap(long = "type")]
        type_tag: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_level) {
        eprintln!("failed to initialize logger: {e:#}");
    }

    let sub_command = cli.sub_command.unwrap_or_else(|| SubCommand::Action {
        inputs: InputArgs::from_env(),
    });

    match sub_command {
        SubCommand::Action { inputs } => run_action(inputs),
        SubCommand::Call { inputs, json } => run_call(inputs, json),
        SubCommand::Methods { type_tag } => list_methods(&type_tag),
    }
}

fn run_action(inputs: InputArgs) -> ExitCode {
    let mut commands = WorkflowCommands::from_env();
    match action::run(inputs, &mut commands) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            action::set_failed(&mut commands, &e);
            ExitCode::FAILURE
        }
    }
}

fn run_call(inputs: InputArgs, json: bool) -> ExitCode {
    print_outcome(console::call(inputs, json))
}

fn list_methods(type_tag: &str) -> ExitCode {
    print_outcome(console::list_methods(type_tag))
}

fn print_outcome(outcome: anyhow::Result<String>) -> ExitCode {
    match outcome {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
