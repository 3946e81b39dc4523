//! Built-in constraint kinds.
//!
//! | Kind     | Valid when                                                        |
//! |----------|-------------------------------------------------------------------|
//! | Min      | length (strings, lists, maps) or value is >= required; null fails |
//! | Max      | length or value is <= required; null fails                        |
//! | Nullable | required is truthy or the value is not null                       |
//! | Matches  | value is a string matching the pattern from its start             |
//! | InList   | value is a member of the required list                            |
//! | Scale    | value is a float with at most `required` decimal places           |
//! | Email    | not required, or value is a string shaped like an e-mail address  |
//! | IP       | not required, or value is a dotted-quad IPv4 address              |
//! | Site     | not required, or value is an http(s) URL                          |
//! | Custom   | the required predicate accepts the value                          |

use crate::kind::ConstraintKind;
use dataobj_core::semantics::values_equal;
use dataobj_core::{ObjectResult, Value};
use regex_lite::Regex;
use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

const EMAIL_PATTERN: &str = r"^.+[@].+[.].{1,4}$";
const IP_PATTERN: &str = concat!(
    r"^(([0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5])[.]){3}",
    r"([0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5]){1}$",
);
const SITE_PATTERN: &str = r"^(http|https)[:][/][/].+$";

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());
static IP: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(IP_PATTERN).ok());
static SITE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(SITE_PATTERN).ok());

/// All built-in kinds, ready for registration.
pub fn builtin_kinds() -> Vec<Arc<dyn ConstraintKind>> {
    vec![
        Arc::new(Min),
        Arc::new(Max),
        Arc::new(Nullable),
        Arc::new(Matches),
        Arc::new(InList),
        Arc::new(Scale),
        Arc::new(Email),
        Arc::new(Ip),
        Arc::new(Site),
        Arc::new(Custom),
    ]
}

fn describe(attribute: &str, actual: &Value, rule: impl std::fmt::Display) -> String {
    format!("{} (= {}) {}", attribute, actual, rule)
}

/// Compare the measured value (length for sequence-like values) to the bound.
fn bound_holds(required: &Value, actual: &Value, accept: fn(Ordering) -> bool) -> bool {
    let ordering = match actual {
        Value::Null => None,
        v => match v.len() {
            Some(len) => Value::from(len).try_cmp(required),
            None => v.try_cmp(required),
        },
    };
    ordering.is_some_and(accept)
}

fn matches_from_start(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.find(text).is_some_and(|m| m.start() == 0),
        Err(_) => false,
    }
}

fn full_match(re: &LazyLock<Option<Regex>>, actual: &Value) -> bool {
    match (re.as_ref(), actual.as_str()) {
        (Some(re), Some(text)) => re.is_match(text),
        _ => false,
    }
}

/// Membership by value equality. A nested value object naming a missing
/// equality field fails the whole check.
fn contains<'v>(candidates: impl Iterator<Item = &'v Value>, actual: &Value) -> ObjectResult<bool> {
    for candidate in candidates {
        if values_equal(actual, candidate)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Digits after the decimal point in the shortest round-trip form.
fn decimal_places(f: f64) -> Option<usize> {
    if !f.is_finite() {
        return None;
    }
    let text = f.to_string();
    Some(text.split_once('.').map_or(0, |(_, frac)| frac.len()))
}

/// Lower bound on value or length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl ConstraintKind for Min {
    fn name(&self) -> &str {
        "Min"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        bound_holds(required, actual, |o| o != Ordering::Less)
    }

    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String {
        if actual.is_sequence_like() {
            let rule = format!("must have length greater or equal than {}", required);
            describe(attribute, actual, rule)
        } else {
            describe(attribute, actual, format_args!("must be greater or equal than {}", required))
        }
    }
}

/// Upper bound on value or length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl ConstraintKind for Max {
    fn name(&self) -> &str {
        "Max"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        bound_holds(required, actual, |o| o != Ordering::Greater)
    }

    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String {
        if actual.is_sequence_like() {
            let rule = format!("must have length lower or equal than {}", required);
            describe(attribute, actual, rule)
        } else {
            describe(attribute, actual, format_args!("must be lower or equal than {}", required))
        }
    }
}

/// `Nullable=false` forbids null.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable;

impl ConstraintKind for Nullable {
    fn name(&self) -> &str {
        "Nullable"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        required.is_truthy() || !actual.is_null()
    }

    fn message(&self, attribute: &str, _required: &Value, actual: &Value) -> String {
        describe(attribute, actual, "must be different of None")
    }
}

/// Regular expression match anchored at the start of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matches;

impl ConstraintKind for Matches {
    fn name(&self) -> &str {
        "Matches"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        match (required.as_str(), actual.as_str()) {
            (Some(pattern), Some(text)) => matches_from_start(pattern, text),
            _ => false,
        }
    }

    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String {
        describe(attribute, actual, format_args!("must matches {}", required))
    }
}

/// Membership in a list (or the keys of a map, or a substring of a string).
#[derive(Debug, Clone, Copy, Default)]
pub struct InList;

impl ConstraintKind for InList {
    fn name(&self) -> &str {
        "InList"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        self.check(required, actual).unwrap_or(false)
    }

    fn check(&self, required: &Value, actual: &Value) -> ObjectResult<bool> {
        match required {
            Value::List(items) => contains(items.iter(), actual),
            Value::Map(entries) => contains(entries.iter().map(|(key, _)| key), actual),
            Value::String(s) => Ok(actual.as_str().is_some_and(|a| s.contains(a))),
            _ => Ok(false),
        }
    }

    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String {
        describe(attribute, actual, format_args!("must be in list {}", required))
    }
}

/// Maximum number of decimal places of a float.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scale;

impl ConstraintKind for Scale {
    fn name(&self) -> &str {
        "Scale"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        actual
            .as_float()
            .and_then(decimal_places)
            .and_then(|places| Value::from(places).try_cmp(required))
            .is_some_and(|o| o != Ordering::Greater)
    }

    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String {
        describe(attribute, actual, format_args!("must have {} decimals or less", required))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl ConstraintKind for Email {
    fn name(&self) -> &str {
        "Email"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        !required.is_truthy() || full_match(&EMAIL, actual)
    }

    fn message(&self, attribute: &str, _required: &Value, actual: &Value) -> String {
        describe(attribute, actual, "must be a valid e-mail address")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ip;

impl ConstraintKind for Ip {
    fn name(&self) -> &str {
        "IP"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        !required.is_truthy() || full_match(&IP, actual)
    }

    fn message(&self, attribute: &str, _required: &Value, actual: &Value) -> String {
        describe(attribute, actual, "must be a valid ip address")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Site;

impl ConstraintKind for Site {
    fn name(&self) -> &str {
        "Site"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        !required.is_truthy() || full_match(&SITE, actual)
    }

    fn message(&self, attribute: &str, _required: &Value, actual: &Value) -> String {
        describe(attribute, actual, "must be a valid site address")
    }
}

/// Delegates to a predicate. Null is passed through to the predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Custom;

impl ConstraintKind for Custom {
    fn name(&self) -> &str {
        "Custom"
    }

    fn is_valid(&self, required: &Value, actual: &Value) -> bool {
        required.as_function().is_some_and(|p| p.test(actual))
    }

    fn message(&self, attribute: &str, _required: &Value, actual: &Value) -> String {
        describe(attribute, actual, "must be satisfied by specific function")
    }
}
