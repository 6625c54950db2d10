use dynamic_methods::engine::{invoke, InvocationError, InvocationRequest, InvocationResult};

fn text(value: &str) -> Result<InvocationResult, InvocationError> {
    Ok(InvocationResult::Text(value.to_string()))
}

#[test]
fn string_receiver() {
    let request = InvocationRequest::new("Hello, World!", "string", "toUpperCase");
    assert_eq!(invoke(&request), text("HELLO, WORLD!"));
}

#[test]
fn number_receiver_with_argument() {
    let request = InvocationRequest::new("42", "number", "toFixed")
        .with_args(["1"])
        .with_arg_types(["number"]);
    assert_eq!(invoke(&request), text("42.0"));
}

#[test]
fn boolean_receiver() {
    let request = InvocationRequest::new("true", "boolean", "toString");
    assert_eq!(invoke(&request), text("true"));
}

#[test]
fn missing_method() {
    let request = InvocationRequest::new("Hello, World!", "string", "nonExistentMethod");
    let err = invoke(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Method 'nonExistentMethod' does not exist on the string instance."
    );
}

#[test]
fn mismatched_argument_lengths() {
    let request = InvocationRequest::new("42", "number", "toFixed")
        .with_args(["1", "2"])
        .with_arg_types(["number"]);
    let err = invoke(&request).unwrap_err();
    assert_eq!(err.to_string(), "The lengths of args and argTypes arrays do not match.");
}

#[test]
fn missing_method_regardless_of_value() {
    for (value, type_tag) in [("", "string"), ("x y z", "string"), ("1", "number"), ("false", "boolean")] {
        let request = InvocationRequest::new(value, type_tag, "nonExistentMethod");
        assert_eq!(
            invoke(&request),
            Err(InvocationError::MethodNotFound {
                method: "nonExistentMethod".to_string(),
                type_name: match type_tag {
                    "string" => "string",
                    "number" => "number",
                    _ => "boolean",
                },
            })
        );
    }
}

#[test]
fn numbers_pass_through_value_of() {
    for (raw, expected) in [("42", 42.0), ("-0.5", -0.5), ("1e3", 1000.0), ("7.25 apples", 7.25)] {
        let request = InvocationRequest::new(raw, "number", "valueOf");
        assert_eq!(invoke(&request), Ok(InvocationResult::Number(expected)));
    }
    let request = InvocationRequest::new("forty-two", "number", "valueOf");
    assert_eq!(invoke(&request), Err(InvocationError::InvalidNumber));
}

#[test]
fn booleans_are_case_insensitive() {
    for raw in ["true", "TRUE", "True"] {
        let request = InvocationRequest::new(raw, "boolean", "valueOf");
        assert_eq!(invoke(&request), Ok(InvocationResult::Logical(true)));
    }
    for raw in ["false", "FALSE"] {
        let request = InvocationRequest::new(raw, "boolean", "valueOf");
        assert_eq!(invoke(&request), Ok(InvocationResult::Logical(false)));
    }
    let request = InvocationRequest::new("yes", "boolean", "valueOf");
    assert_eq!(invoke(&request), Err(InvocationError::InvalidBoolean));
}

#[test]
fn repeated_requests_agree() {
    let request = InvocationRequest::new("a-b-c", "string", "split")
        .with_args(["-"])
        .with_arg_types(["string"]);
    let first = invoke(&request);
    assert_eq!(first, invoke(&request));
    assert_eq!(first.unwrap().to_string(), "a,b,c");
}

#[test]
fn regex_arguments() {
    let request = InvocationRequest::new("v1.2.3", "string", "replace")
        .with_args([r"v(\d+)", "version $1"])
        .with_arg_types(["regex", "string"]);
    assert_eq!(invoke(&request), text("version 1.2.3"));

    let request = InvocationRequest::new("abc", "string", "match")
        .with_args(["(b"])
        .with_arg_types(["regex"]);
    assert_eq!(
        invoke(&request),
        Err(InvocationError::InvalidRegex { pattern: "(b".to_string() })
    );
}

#[test]
fn regex_is_not_a_receiver_type() {
    let request = InvocationRequest::new("a+", "regex", "toString");
    assert_eq!(
        invoke(&request).unwrap_err().to_string(),
        "Unsupported type 'regex'."
    );
}

#[test]
fn operation_errors_surface() {
    let request = InvocationRequest::new("1", "number", "toFixed")
        .with_args(["101"])
        .with_arg_types(["number"]);
    assert_eq!(
        invoke(&request).unwrap_err().to_string(),
        "RangeError: toFixed() digits argument must be between 0 and 100"
    );
}

#[test]
fn large_numbers_localize_without_exponent() {
    let request = InvocationRequest::new("1e21", "number", "toLocaleString");
    assert_eq!(invoke(&request), text("1,000,000,000,000,000,000,000"));
    let request = InvocationRequest::new("1.5e22", "number", "toLocaleString");
    assert_eq!(invoke(&request), text("15,000,000,000,000,000,000,000"));
}

#[test]
fn regex_arguments_follow_ecmascript_syntax() {
    let matched = |value: &str, pattern: &str| {
        invoke(
            &InvocationRequest::new(value, "string", "match")
                .with_args([pattern])
                .with_arg_types(["regex"]),
        )
    };
    assert_eq!(
        matched("ab", "a(?=b)"),
        Ok(InvocationResult::List(vec![InvocationResult::Text("a".into())]))
    );
    assert_eq!(
        matched("aa", r"(a)\1"),
        Ok(InvocationResult::List(vec![
            InvocationResult::Text("aa".into()),
            InvocationResult::Text("a".into()),
        ]))
    );
    assert_eq!(matched("\u{661}", r"\d"), Ok(InvocationResult::Null));
}

#[test]
fn regex_arguments_render_like_regexp_literals() {
    let request = InvocationRequest::new("x", "string", "concat")
        .with_args([r"a\/b", "a/b"])
        .with_arg_types(["regex", "regex"]);
    assert_eq!(invoke(&request), text(r"x/a\/b//a\/b/"));
}

#[test]
fn legacy_accessor_methods_exist_on_every_type() {
    for (value, type_tag) in [("abc", "string"), ("1", "number"), ("true", "boolean")] {
        let request = InvocationRequest::new(value, type_tag, "__lookupGetter__")
            .with_args(["length"])
            .with_arg_types(["string"]);
        assert_eq!(invoke(&request), Ok(InvocationResult::Undefined));

        let request = InvocationRequest::new(value, type_tag, "__defineSetter__")
            .with_args(["x", "1"])
            .with_arg_types(["string", "number"]);
        assert_eq!(
            invoke(&request).unwrap_err().to_string(),
            "TypeError: Object.prototype.__defineSetter__: Expecting function"
        );
    }
}
