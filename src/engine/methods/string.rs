//! Operations of a boxed string.
//!
//! Positions and lengths are counted in UTF-16 code units, so `"日本".length`-style
//! arithmetic agrees with what a JavaScript caller expects. Pattern arguments
//! never carry flags, so they behave as non-global expressions.

use std::borrow::Cow;
use std::cmp::Ordering;

use strum::{EnumIter, EnumMessage, EnumString, IntoStaticStr};
use unicode_normalization::UnicodeNormalization;

use crate::engine::error::InvocationError;
use crate::engine::methods::{object, Arguments, MethodResult};
use crate::engine::number_format;
use crate::engine::scanner::is_js_whitespace;
use crate::engine::value::{Argument, InvocationResult, Pattern, PatternMatch};

/// Longest string V8 will build, in code units.
const MAX_STRING_LENGTH: f64 = ((1u64 << 29) - 24) as f64;

#[derive(Debug, Eq, PartialEq, Copy, Clone, EnumString, IntoStaticStr, EnumIter, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum StringMethod {
    #[strum(to_string = "__defineGetter__")]
    DefineGetter,
    #[strum(to_string = "__defineSetter__")]
    DefineSetter,
    #[strum(to_string = "__lookupGetter__")]
    LookupGetter,
    #[strum(to_string = "__lookupSetter__")]
    LookupSetter,
    Anchor,
    At,
    Big,
    Blink,
    Bold,
    CharAt,
    CharCodeAt,
    CodePointAt,
    Concat,
    Constructor,
    EndsWith,
    Fixed,
    Fontcolor,
    Fontsize,
    HasOwnProperty,
    Includes,
    IndexOf,
    IsPrototypeOf,
    IsWellFormed,
    Italics,
    LastIndexOf,
    Link,
    LocaleCompare,
    Match,
    MatchAll,
    Normalize,
    PadEnd,
    PadStart,
    PropertyIsEnumerable,
    Repeat,
    Replace,
    ReplaceAll,
    Search,
    Slice,
    Small,
    Split,
    StartsWith,
    Strike,
    Sub,
    Substr,
    Substring,
    Sup,
    ToLocaleLowerCase,
    ToLocaleString,
    ToLocaleUpperCase,
    ToLowerCase,
    ToString,
    ToUpperCase,
    ToWellFormed,
    Trim,
    #[strum(to_string = "trimEnd", serialize = "trimRight")]
    TrimEnd,
    #[strum(to_string = "trimStart", serialize = "trimLeft")]
    TrimStart,
    ValueOf,
}

pub(crate) fn call(text: &str, method: StringMethod, args: &Arguments) -> MethodResult {
    use InvocationResult::{Logical, Number, Text};

    let units = || -> Vec<u16> { text.encode_utf16().collect() };

    match method {
        StringMethod::At => {
            let units = units();
            let relative = args.integer(0);
            let index = if relative >= 0.0 { relative } else { units.len() as f64 + relative };
            Ok(unit_at(&units, index).map_or(InvocationResult::Undefined, |unit| Text(from_units(&[unit]))))
        }
        StringMethod::CharAt => {
            let units = units();
            Ok(Text(unit_at(&units, args.integer(0)).map_or_else(String::new, |unit| from_units(&[unit]))))
        }
        StringMethod::CharCodeAt => {
            let units = units();
            Ok(Number(unit_at(&units, args.integer(0)).map_or(f64::NAN, f64::from)))
        }
        StringMethod::CodePointAt => {
            let units = units();
            Ok(code_point_at(&units, args.integer(0)).map_or(InvocationResult::Undefined, |cp| Number(f64::from(cp))))
        }
        StringMethod::Concat => {
            let mut joined = text.to_string();
            for arg in args.all() {
                joined.push_str(&arg.to_js_string());
            }
            Ok(Text(joined))
        }
        StringMethod::Constructor => {
            Ok(Text(if args.is_undefined(0) { String::new() } else { args.string(0) }))
        }
        StringMethod::EndsWith => {
            let search = non_pattern_search(args, "endsWith")?;
            let units = units();
            let end = if args.is_undefined(1) { units.len() } else { clamp_position(args.integer(1), units.len()) };
            let ends_with = end
                .checked_sub(search.len())
                .map_or(false, |start| units[start..end] == *search);
            Ok(Logical(ends_with))
        }
        StringMethod::StartsWith => {
            let search = non_pattern_search(args, "startsWith")?;
            let units = units();
            let start = clamp_position(args.integer(1), units.len());
            let starts_with = units
                .get(start..start + search.len())
                .map_or(false, |window| window == search.as_slice());
            Ok(Logical(starts_with))
        }
        StringMethod::Includes => {
            let search = non_pattern_search(args, "includes")?;
            let units = units();
            let start = clamp_position(args.integer(1), units.len());
            Ok(Logical(find_units(&units, &search, start).is_some()))
        }
        StringMethod::IndexOf => {
            let search: Vec<u16> = args.string(0).encode_utf16().collect();
            let units = units();
            let start = clamp_position(args.integer(1), units.len());
            Ok(Number(find_units(&units, &search, start).map_or(-1.0, |i| i as f64)))
        }
        StringMethod::LastIndexOf => {
            let search: Vec<u16> = args.string(0).encode_utf16().collect();
            let units = units();
            let position = args.number(1);
            let position = if position.is_nan() { f64::INFINITY } else { position.trunc() };
            let start = clamp_position(position, units.len());
            Ok(Number(rfind_units(&units, &search, start).map_or(-1.0, |i| i as f64)))
        }
        StringMethod::IsWellFormed => Ok(Logical(true)),
        StringMethod::ToWellFormed => Ok(Text(text.to_string())),
        StringMethod::LocaleCompare => {
            let ordering = locale_compare(text, &args.string(0));
            Ok(Number(match ordering {
                Ordering::Less => -1.0,
                Ordering::Equal => 0.0,
                Ordering::Greater => 1.0,
            }))
        }
        StringMethod::Match => {
            let pattern = pattern_argument(args)?;
            Ok(pattern
                .find(text)
                .map_or(InvocationResult::Null, |found| match_array(&found)))
        }
        StringMethod::MatchAll => {
            if let Some(Argument::Pattern(_)) = args.get(0) {
                return Err(InvocationError::type_error(
                    "String.prototype.matchAll called with a non-global RegExp argument",
                ))
            }
            let pattern = pattern_argument(args)?;
            let matches = pattern.find_all(text).iter().map(match_array).collect();
            Ok(InvocationResult::List(matches))
        }
        StringMethod::Search => {
            let pattern = pattern_argument(args)?;
            Ok(Number(
                pattern
                    .find(text)
                    .map_or(-1.0, |found| utf16_index(text, found.start()) as f64),
            ))
        }
        StringMethod::Normalize => {
            let form = if args.is_undefined(0) { "NFC".to_string() } else { args.string(0) };
            let normalized = match form.as_str() {
                "NFC" => text.nfc().collect(),
                "NFD" => text.nfd().collect(),
                "NFKC" => text.nfkc().collect(),
                "NFKD" => text.nfkd().collect(),
                _ => {
                    return Err(InvocationError::range_error(
                        "The normalization form should be one of NFC, NFD, NFKC, NFKD.",
                    ))
                }
            };
            Ok(Text(normalized))
        }
        StringMethod::PadEnd => pad(text, args, false).map(Text),
        StringMethod::PadStart => pad(text, args, true).map(Text),
        StringMethod::Repeat => {
            let count = args.integer(0);
            if count < 0.0 || count.is_infinite() {
                return Err(InvocationError::range_error(format!(
                    "Invalid count value: {}",
                    number_format::to_js_string(count)
                )))
            }
            let length = text.encode_utf16().count() as f64;
            if length * count > MAX_STRING_LENGTH {
                return Err(InvocationError::range_error("Invalid string length"))
            }
            Ok(Text(text.repeat(count as usize)))
        }
        StringMethod::Replace => replace(text, args, false).map(Text),
        StringMethod::ReplaceAll => replace(text, args, true).map(Text),
        StringMethod::Slice => {
            let units = units();
            let from = relative_position(args.integer(0), units.len());
            let to = if args.is_undefined(1) { units.len() } else { relative_position(args.integer(1), units.len()) };
            Ok(Text(if from < to { from_units(&units[from..to]) } else { String::new() }))
        }
        StringMethod::Split => split(text, args).map(InvocationResult::List),
        StringMethod::Substr => {
            let units = units();
            let size = units.len();
            let start = relative_position(args.integer(0), size);
            let length = if args.is_undefined(1) { size as f64 } else { args.integer(1) };
            let end = clamp_position(start as f64 + length.max(0.0), size);
            Ok(Text(if start < end { from_units(&units[start..end]) } else { String::new() }))
        }
        StringMethod::Substring => {
            let units = units();
            let start = clamp_position(args.integer(0), units.len());
            let end = if args.is_undefined(1) { units.len() } else { clamp_position(args.integer(1), units.len()) };
            Ok(Text(from_units(&units[start.min(end)..start.max(end)])))
        }
        StringMethod::ToLocaleLowerCase | StringMethod::ToLowerCase => Ok(Text(text.to_lowercase())),
        StringMethod::ToLocaleUpperCase | StringMethod::ToUpperCase => Ok(Text(text.to_uppercase())),
        StringMethod::ToLocaleString | StringMethod::ToString | StringMethod::ValueOf => {
            Ok(Text(text.to_string()))
        }
        StringMethod::Trim => Ok(Text(text.trim_matches(is_js_whitespace).to_string())),
        StringMethod::TrimEnd => Ok(Text(text.trim_end_matches(is_js_whitespace).to_string())),
        StringMethod::TrimStart => Ok(Text(text.trim_start_matches(is_js_whitespace).to_string())),
        StringMethod::HasOwnProperty => {
            let length = text.encode_utf16().count();
            object::has_own_property(|key| key == "length" || array_index(key).map_or(false, |i| i < length), args)
        }
        StringMethod::PropertyIsEnumerable => {
            let length = text.encode_utf16().count();
            object::has_own_property(|key| array_index(key).map_or(false, |i| i < length), args)
        }
        StringMethod::IsPrototypeOf => object::is_prototype_of(args),
        StringMethod::DefineGetter | StringMethod::DefineSetter => object::define_accessor(method.into(), args),
        StringMethod::LookupGetter | StringMethod::LookupSetter => object::lookup_accessor(args),
        StringMethod::Anchor => Ok(Text(html(text, "a", Some(("name", args))))),
        StringMethod::Big => Ok(Text(html(text, "big", None))),
        StringMethod::Blink => Ok(Text(html(text, "blink", None))),
        StringMethod::Bold => Ok(Text(html(text, "b", None))),
        StringMethod::Fixed => Ok(Text(html(text, "tt", None))),
        StringMethod::Fontcolor => Ok(Text(html(text, "font", Some(("color", args))))),
        StringMethod::Fontsize => Ok(Text(html(text, "font", Some(("size", args))))),
        StringMethod::Italics => Ok(Text(html(text, "i", None))),
        StringMethod::Link => Ok(Text(html(text, "a", Some(("href", args))))),
        StringMethod::Small => Ok(Text(html(text, "small", None))),
        StringMethod::Strike => Ok(Text(html(text, "strike", None))),
        StringMethod::Sub => Ok(Text(html(text, "sub", None))),
        StringMethod::Sup => Ok(Text(html(text, "sup", None))),
    }
}

// ---------------------------------------------------------------------------
// code unit helpers

fn from_units(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

fn unit_at(units: &[u16], index: f64) -> Option<u16> {
    if index < 0.0 || index >= units.len() as f64 {
        return None
    }
    units.get(index as usize).copied()
}

fn code_point_at(units: &[u16], index: f64) -> Option<u32> {
    let first = unit_at(units, index)?;
    let next = units.get(index as usize + 1).copied();
    match next {
        Some(second) if (0xD800..0xDC00).contains(&first) && (0xDC00..0xE000).contains(&second) => {
            Some(0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00))
        }
        _ => Some(u32::from(first)),
    }
}

/// `position` clamped into `0..=length`.
fn clamp_position(position: f64, length: usize) -> usize {
    position.max(0.0).min(length as f64) as usize
}

/// negative positions count back from the end.
fn relative_position(position: f64, length: usize) -> usize {
    if position < 0.0 {
        clamp_position(length as f64 + position, length)
    } else {
        clamp_position(position, length)
    }
}

fn find_units(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn rfind_units(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None
    }
    let last = from.min(haystack.len() - needle.len());
    (0..=last).rev().find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn utf16_index(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].encode_utf16().count()
}

/// canonical array index such as `"0"` or `"12"`, never `"01"` or `"+1"`.
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

// ---------------------------------------------------------------------------
// argument helpers

fn non_pattern_search(args: &Arguments, method: &str) -> Result<Vec<u16>, InvocationError> {
    if let Some(Argument::Pattern(_)) = args.get(0) {
        return Err(InvocationError::type_error(format!(
            "First argument to String.prototype.{method} must not be a regular expression"
        )))
    }
    Ok(args.string(0).encode_utf16().collect())
}

/// The first argument as a pattern, compiling any other value the way `new RegExp(value)` would.
fn pattern_argument<'a>(args: &Arguments<'a>) -> Result<Cow<'a, Pattern>, InvocationError> {
    let source = match args.get(0) {
        Some(Argument::Pattern(pattern)) => return Ok(Cow::Borrowed(pattern)),
        Some(other) => other.to_js_string(),
        None => String::new(),
    };
    Pattern::compile(&source)
        .map(Cow::Owned)
        .map_err(|_| InvocationError::OperationFailed {
            message: format!("SyntaxError: Invalid regular expression: /{source}/"),
        })
}

fn match_array(found: &PatternMatch) -> InvocationResult {
    InvocationResult::List(
        found
            .groups()
            .map(|group| group.map_or(InvocationResult::Undefined, |m| InvocationResult::Text(m.to_string())))
            .collect(),
    )
}

fn locale_compare(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        // lower case sorts before upper case once letters agree
        .then_with(|| right.cmp(left))
}

fn html(text: &str, tag: &str, attribute: Option<(&str, &Arguments)>) -> String {
    match attribute {
        Some((name, args)) => {
            let value = args.string(0).replace('"', "&quot;");
            format!("<{tag} {name}=\"{value}\">{text}</{tag}>")
        }
        None => format!("<{tag}>{text}</{tag}>"),
    }
}

// ---------------------------------------------------------------------------
// padding, replacement and splitting

fn pad(text: &str, args: &Arguments, at_start: bool) -> Result<String, InvocationError> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let max_length = args.integer(0);
    if max_length <= units.len() as f64 {
        return Ok(text.to_string())
    }
    let filler: Vec<u16> = if args.is_undefined(1) {
        vec![u16::from(b' ')]
    } else {
        args.string(1).encode_utf16().collect()
    };
    if filler.is_empty() {
        return Ok(text.to_string())
    }
    if max_length > MAX_STRING_LENGTH {
        return Err(InvocationError::range_error("Invalid string length"))
    }

    let fill_length = max_length as usize - units.len();
    let fill: Vec<u16> = filler.iter().copied().cycle().take(fill_length).collect();
    let padded = if at_start {
        [fill, units].concat()
    } else {
        [units, fill].concat()
    };
    Ok(from_units(&padded))
}

/// Position and content of one match being replaced.
struct Replaced<'t> {
    start: usize,
    matched: &'t str,
    found: Option<&'t PatternMatch<'t>>,
}

fn replace(text: &str, args: &Arguments, all: bool) -> Result<String, InvocationError> {
    let template = args.string(1);

    if let Some(Argument::Pattern(pattern)) = args.get(0) {
        if all {
            return Err(InvocationError::type_error(
                "replaceAll must be called with a global RegExp",
            ))
        }
        let Some(found) = pattern.find(text) else {
            return Ok(text.to_string())
        };
        let replaced = Replaced {
            start: found.start(),
            matched: found.as_str(),
            found: Some(&found),
        };
        let substitution = substitute(&template, text, &replaced);
        return Ok(format!("{}{substitution}{}", &text[..found.start()], &text[found.end()..]))
    }

    let search = args.string(0);
    let positions: Vec<usize> = if !all {
        text.find(&search).into_iter().collect()
    } else if search.is_empty() {
        text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect()
    } else {
        text.match_indices(&search).map(|(i, _)| i).collect()
    };

    let mut result = String::new();
    let mut copied = 0;
    for start in positions {
        let replaced = Replaced {
            start,
            matched: &text[start..start + search.len()],
            found: None,
        };
        result.push_str(&text[copied..start]);
        result.push_str(&substitute(&template, text, &replaced));
        copied = start + search.len();
    }
    result.push_str(&text[copied..]);
    Ok(result)
}

/// Expands `$$`, `$&`, `` $` ``, `$'`, `$n`, `$nn` and `$<name>` in a replacement template.
fn substitute(template: &str, text: &str, replaced: &Replaced) -> String {
    let chars: Vec<char> = template.chars().collect();
    let group_count = replaced.found.map_or(0, PatternMatch::group_count);
    let has_names = replaced.found.map_or(false, PatternMatch::has_named_groups);
    let group_text = |index: usize| {
        replaced
            .found
            .and_then(|found| found.group(index))
            .unwrap_or("")
    };

    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '$' || i + 1 == chars.len() {
            out.push(chars[i]);
            i += 1;
            continue
        }
        match chars[i + 1] {
            '$' => {
                out.push('$');
                i += 2;
            }
            '&' => {
                out.push_str(replaced.matched);
                i += 2;
            }
            '`' => {
                out.push_str(&text[..replaced.start]);
                i += 2;
            }
            '\'' => {
                out.push_str(&text[replaced.start + replaced.matched.len()..]);
                i += 2;
            }
            first @ '0'..='9' => {
                let one = first.to_digit(10).unwrap_or(0) as usize;
                let two = chars
                    .get(i + 2)
                    .and_then(|c| c.to_digit(10))
                    .map(|second| one * 10 + second as usize);
                match two {
                    Some(index) if (1..=group_count).contains(&index) => {
                        out.push_str(group_text(index));
                        i += 3;
                    }
                    _ if (1..=group_count).contains(&one) => {
                        out.push_str(group_text(one));
                        i += 2;
                    }
                    _ => {
                        out.push('$');
                        i += 1;
                    }
                }
            }
            '<' if has_names => {
                let close = chars[i + 2..].iter().position(|c| *c == '>');
                match close {
                    Some(offset) => {
                        let name: String = chars[i + 2..i + 2 + offset].iter().collect();
                        let named = replaced
                            .found
                            .and_then(|found| found.named_group(&name))
                            .unwrap_or("");
                        out.push_str(named);
                        i += offset + 3;
                    }
                    None => {
                        out.push('$');
                        i += 1;
                    }
                }
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }
    out
}

/// ECMAScript `ToUint32` applied to the split limit.
fn split_limit(args: &Arguments) -> usize {
    if args.is_undefined(1) {
        return u32::MAX as usize
    }
    let number = args.number(1);
    if !number.is_finite() {
        return 0
    }
    number.trunc().rem_euclid(4_294_967_296.0) as usize
}

fn split(text: &str, args: &Arguments) -> Result<Vec<InvocationResult>, InvocationError> {
    let limit = split_limit(args);
    if limit == 0 {
        return Ok(vec![])
    }
    let pieces = match args.get(0) {
        None => vec![text.to_string()],
        Some(Argument::Pattern(pattern)) => return Ok(split_by_pattern(text, pattern, limit)),
        Some(separator) => {
            let separator = separator.to_js_string();
            if separator.is_empty() {
                text.encode_utf16().take(limit).map(|unit| from_units(&[unit])).collect()
            } else {
                text.split(separator.as_str()).take(limit).map(str::to_string).collect()
            }
        }
    };
    Ok(pieces.into_iter().map(InvocationResult::Text).collect())
}

fn split_by_pattern(text: &str, pattern: &Pattern, limit: usize) -> Vec<InvocationResult> {
    let piece = |slice: &str| InvocationResult::Text(slice.to_string());

    if text.is_empty() {
        return if pattern.find(text).is_some() { vec![] } else { vec![piece(text)] }
    }

    let mut pieces = Vec::new();
    let mut last_end = 0;
    let mut search_from = 0;
    while search_from < text.len() {
        let Some(whole) = pattern.find_at(text, search_from) else {
            break
        };
        if whole.start() >= text.len() {
            break
        }
        // an empty match where the previous piece ended does not split
        if whole.end() == last_end {
            let step = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
            search_from = whole.start() + step;
            continue
        }

        pieces.push(piece(&text[last_end..whole.start()]));
        if pieces.len() == limit {
            return pieces
        }
        for group in whole.groups().skip(1) {
            pieces.push(group.map_or(InvocationResult::Undefined, piece));
            if pieces.len() == limit {
                return pieces
            }
        }
        last_end = whole.end();
        search_from = last_end;
    }
    pieces.push(piece(&text[last_end..]));
    pieces
}
