use std::fmt::{Display, Formatter};

use regress::Regex;
use serde::{Serialize, Serializer};

use crate::engine::number_format;
use crate::engine::scanner::is_js_whitespace;
use crate::engine::type_tag::ReceiverTypeTag;

/// Boxed receiver: carries the operations of its primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Receiver {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Receiver {
    pub fn type_tag(&self) -> ReceiverTypeTag {
        match self {
            Self::String(_) => ReceiverTypeTag::String,
            Self::Number(_) => ReceiverTypeTag::Number,
            Self::Boolean(_) => ReceiverTypeTag::Boolean,
        }
    }
}

/// Compiled pattern argument, remembering the source it was built from.
///
/// Patterns follow ECMAScript syntax without flags, as `new RegExp(source)` would
/// build them: lookaround and backreferences are available, `\d` `\w` `\s` are
/// ASCII-only.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, regress::Error> {
        Ok(Self {
            source: source.to_string(),
            compiled: Regex::new(source)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn find<'t>(&self, subject: &'t str) -> Option<PatternMatch<'t>> {
        self.find_at(subject, 0)
    }

    /// First match starting at or after byte offset `start`.
    pub fn find_at<'t>(&self, subject: &'t str, start: usize) -> Option<PatternMatch<'t>> {
        if start > subject.len() {
            return None
        }
        self.compiled
            .find_from(subject, start)
            .next()
            .map(|found| PatternMatch { subject, found })
    }

    /// Every match from left to right. An empty match moves the search on by one character.
    pub fn find_all<'t>(&self, subject: &'t str) -> Vec<PatternMatch<'t>> {
        let mut matches = vec![];
        let mut from = 0;
        while let Some(found) = self.find_at(subject, from) {
            from = if found.start() == found.end() {
                found.end() + subject[found.end()..].chars().next().map_or(1, char::len_utf8)
            } else {
                found.end()
            };
            matches.push(found);
        }
        matches
    }

    /// The source as `RegExp.prototype.source` shows it: `/` and line terminators escaped.
    fn escaped_source(&self) -> String {
        let mut escaped = String::new();
        let mut in_class = false;
        let mut chars = self.source.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    escaped.push('\\');
                    if let Some(next) = chars.next() {
                        match line_terminator_escape(next) {
                            Some(name) => escaped.push_str(name),
                            None => escaped.push(next),
                        }
                    }
                }
                '/' if !in_class => escaped.push_str("\\/"),
                '[' => {
                    in_class = true;
                    escaped.push(c);
                }
                ']' => {
                    in_class = false;
                    escaped.push(c);
                }
                _ => match line_terminator_escape(c) {
                    Some(name) => {
                        escaped.push('\\');
                        escaped.push_str(name);
                    }
                    None => escaped.push(c),
                },
            }
        }
        escaped
    }
}

fn line_terminator_escape(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("n"),
        '\r' => Some("r"),
        '\u{2028}' => Some("u2028"),
        '\u{2029}' => Some("u2029"),
        _ => None,
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.source.is_empty() {
            f.write_str("/(?:)/")
        } else {
            write!(f, "/{}/", self.escaped_source())
        }
    }
}

/// One successful match of a [`Pattern`] against a subject.
#[derive(Debug, Clone)]
pub struct PatternMatch<'t> {
    subject: &'t str,
    found: regress::Match,
}

impl<'t> PatternMatch<'t> {
    /// Byte offset of the match in the subject.
    pub fn start(&self) -> usize {
        self.found.start()
    }

    pub fn end(&self) -> usize {
        self.found.end()
    }

    pub fn as_str(&self) -> &'t str {
        &self.subject[self.found.range()]
    }

    /// Capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.found.captures.len()
    }

    /// Group `index`, 0 being the whole match. `None` when the group took no part.
    pub fn group(&self, index: usize) -> Option<&'t str> {
        let subject = self.subject;
        self.found.group(index).map(|range| &subject[range])
    }

    /// The whole match followed by every group.
    pub fn groups(&self) -> impl Iterator<Item = Option<&'t str>> + '_ {
        (0..=self.group_count()).map(move |index| self.group(index))
    }

    pub fn has_named_groups(&self) -> bool {
        self.found.named_groups().next().is_some()
    }

    pub fn named_group(&self, name: &str) -> Option<&'t str> {
        let subject = self.subject;
        self.found.named_group(name).map(|range| &subject[range])
    }
}

/// Bare argument value. Arguments are never boxed.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Text(String),
    Number(f64),
    Logical(bool),
    Pattern(Pattern),
}

impl Argument {
    /// ECMAScript `ToString`.
    pub fn to_js_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number_format::to_js_string(*number),
            Self::Logical(logical) => logical.to_string(),
            Self::Pattern(pattern) => pattern.to_string(),
        }
    }

    /// ECMAScript `ToNumber`. Stricter than the receiver coercion: the whole text must be numeric.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Text(text) => string_to_number(text),
            Self::Number(number) => *number,
            Self::Logical(logical) => if *logical { 1.0 } else { 0.0 },
            Self::Pattern(_) => f64::NAN,
        }
    }

    /// ECMAScript `ToBoolean`.
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Logical(logical) => *logical,
            Self::Pattern(_) => true,
        }
    }
}

fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0
    }

    let radix_prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in radix_prefixed {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN
            }
            return digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit))
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // rust also accepts "inf" and "nan"; those are not numeric literals here.
    if !trimmed.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) {
        return f64::NAN
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Whatever the invoked operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Text(String),
    Number(f64),
    Logical(bool),
    List(Vec<InvocationResult>),
    Null,
    Undefined,
}

impl InvocationResult {
    /// Text written to outputs and exported variables: text as is,
    /// nothing for null and undefined, JSON for everything else.
    pub fn to_command_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Null | Self::Undefined => String::new(),
            other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Renders like JavaScript's `String(value)`.
impl Display for InvocationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&number_format::to_js_string(*number)),
            Self::Logical(logical) => write!(f, "{logical}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // join() leaves holes for null and undefined
                    if !matches!(item, Self::Null | Self::Undefined) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

impl Serialize for InvocationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) if !number.is_finite() => serializer.serialize_none(),
            Self::Number(number) if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*number as i64)
            }
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Logical(logical) => serializer.serialize_bool(*logical),
            Self::List(items) => serializer.collect_seq(items),
            Self::Null | Self::Undefined => serializer.serialize_none(),
        }
    }
}
