use std::fs;

use dynamic_methods::action::{self, InputArgs, WorkflowCommands};
use dynamic_methods::engine::InvocationResult;

fn inputs(value: &str, method: &str, type_tag: &str) -> InputArgs {
    InputArgs {
        value: Some(value.to_string()),
        method: Some(method.to_string()),
        type_tag: Some(type_tag.to_string()),
        ..InputArgs::default()
    }
}

/// `name<<DELIM\nvalue\nDELIM\n` entries, as (name, value) pairs.
fn read_entries(contents: &str) -> Vec<(String, String)> {
    let mut entries = vec![];
    let mut lines = contents.lines();
    while let Some(header) = lines.next() {
        let (name, delimiter) = header.split_once("<<").expect("heredoc header");
        let mut value = vec![];
        for line in lines.by_ref() {
            if line == delimiter {
                break
            }
            value.push(line);
        }
        entries.push((name.to_string(), value.join("\n")));
    }
    entries
}

#[test]
fn output_and_env_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    let env = dir.path().join("env");
    let mut commands = WorkflowCommands::new(Vec::new(), Some(output.clone()), Some(env.clone()));

    // list inputs are trimmed, so the separator has to be visible
    let mut raw = inputs("Hello-World", "split", "string");
    raw.args = Some("-".to_string());
    raw.arg_types = Some("string".to_string());
    raw.env_var = Some("SPLIT_RESULT".to_string());
    let result = action::run(raw, &mut commands).unwrap();
    assert_eq!(
        result,
        InvocationResult::List(vec![
            InvocationResult::Text("Hello".into()),
            InvocationResult::Text("World".into()),
        ])
    );

    let outputs = read_entries(&fs::read_to_string(&output).unwrap());
    assert_eq!(outputs, vec![("result".to_string(), r#"["Hello","World"]"#.to_string())]);
    let exported = read_entries(&fs::read_to_string(&env).unwrap());
    assert_eq!(exported, vec![("SPLIT_RESULT".to_string(), r#"["Hello","World"]"#.to_string())]);
    assert_eq!(std::env::var("SPLIT_RESULT").unwrap(), r#"["Hello","World"]"#);

    assert!(commands.into_inner().is_empty());
}

#[test]
fn blank_separator_is_trimmed_away() {
    let mut commands = WorkflowCommands::new(Vec::new(), None, None);
    let mut raw = inputs("Hello World", "split", "string");
    raw.args = Some(" ".to_string());
    raw.arg_types = Some("string".to_string());
    let err = action::run(raw, &mut commands).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error during method call: The lengths of args and argTypes arrays do not match."
    );
}

#[test]
fn multi_line_values_survive() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    let mut commands = WorkflowCommands::new(Vec::new(), Some(output.clone()), None);

    let mut raw = inputs("line", "padEnd", "string");
    raw.args = Some("9,\n".to_string());
    raw.arg_types = Some("number,string".to_string());
    action::run(raw, &mut commands).unwrap();

    // list elements are trimmed, so the filler is empty and nothing is padded
    let outputs = read_entries(&fs::read_to_string(&output).unwrap());
    assert_eq!(outputs, vec![("result".to_string(), "line".to_string())]);

    commands.set_output("notes", "first\nsecond").unwrap();
    let outputs = read_entries(&fs::read_to_string(&output).unwrap());
    assert_eq!(outputs[1], ("notes".to_string(), "first\nsecond".to_string()));
}

#[test]
fn empty_args_against_declared_types_is_a_mismatch() {
    let mut commands = WorkflowCommands::new(Vec::new(), None, None);
    let mut raw = inputs("42", "toFixed", "number");
    raw.arg_types = Some("number".to_string());
    let err = action::run(raw, &mut commands).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error during method call: The lengths of args and argTypes arrays do not match."
    );
}
