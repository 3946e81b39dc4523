//! Equality and ordering of data objects.
//!
//! Value objects compare structurally, over every field or over the type's
//! `equals_fields`. Entities and plain data objects compare by identity.
//! Ordered value objects additionally compare field by field in priority
//! order, skipping fields whose values cannot be ordered. Nested ordered
//! value objects take part through their own ordering.

use crate::error::{ObjectError, ObjectResult};
use crate::object::DataObject;
use crate::value::Value;
use crate::ObjectId;
use std::cmp::Ordering;
use std::sync::Arc;

/// Result of comparing two ordered value objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// Different types, or a type without an ordering.
    Incomparable,
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// Pairs of objects whose structural comparison is in progress.
///
/// A pair met again further down is assumed equal, which makes equality and
/// ordering over cyclic graphs terminate.
#[derive(Debug, Default)]
struct PairGuard {
    in_progress: Vec<(ObjectId, ObjectId)>,
}

/// Equality between two objects per the kind of `a`.
pub fn equals(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<bool> {
    objects_equal(a, b, &mut PairGuard::default())
}

/// Equality between two values.
///
/// Fails only when a nested value object names an equality field that does
/// not exist.
pub fn values_equal(a: &Value, b: &Value) -> ObjectResult<bool> {
    values_equal_guarded(a, b, &mut PairGuard::default())
}

fn values_equal_guarded(a: &Value, b: &Value, guard: &mut PairGuard) -> ObjectResult<bool> {
    let equal = match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => (*x as f64) == *y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::List(xs), Value::List(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.iter().zip(ys) {
                if !values_equal_guarded(x, y, guard)? {
                    return Ok(false);
                }
            }
            true
        }
        (Value::Map(xs), Value::Map(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (key, x) in xs {
                let mut found = None;
                for (other_key, y) in ys {
                    if values_equal_guarded(key, other_key, guard)? {
                        found = Some(y);
                        break;
                    }
                }
                match found {
                    Some(y) if values_equal_guarded(x, y, guard)? => {}
                    _ => return Ok(false),
                }
            }
            true
        }
        (Value::Object(x), Value::Object(y)) => objects_equal(x.as_ref(), y.as_ref(), guard)?,
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        _ => false,
    };
    Ok(equal)
}

fn objects_equal(
    a: &dyn DataObject,
    b: &dyn DataObject,
    guard: &mut PairGuard,
) -> ObjectResult<bool> {
    let pair = (ObjectId::of(a), ObjectId::of(b));
    if pair.0 == pair.1 {
        return Ok(true);
    }
    let ty = a.object_type();
    if !ty.kind().is_value() || !Arc::ptr_eq(ty, b.object_type()) {
        return Ok(false);
    }
    if guard.in_progress.contains(&pair) {
        return Ok(true);
    }

    guard.in_progress.push(pair);
    let result = structural_equal(a, b, guard);
    guard.in_progress.pop();
    result
}

fn structural_equal(
    a: &dyn DataObject,
    b: &dyn DataObject,
    guard: &mut PairGuard,
) -> ObjectResult<bool> {
    let type_name = a.object_type().name();
    match a.object_type().equals_fields() {
        Some(fields) => {
            for field in fields {
                let x = a
                    .attribute(field)
                    .ok_or_else(|| ObjectError::unknown_field(type_name, field))?;
                let y = b
                    .attribute(field)
                    .ok_or_else(|| ObjectError::unknown_field(type_name, field))?;
                if !values_equal_guarded(&x, &y, guard)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        None => {
            let mut names = a.attribute_names();
            let mut other_names = b.attribute_names();
            names.sort();
            other_names.sort();
            if names != other_names {
                return Ok(false);
            }
            for name in &names {
                match (a.attribute(name), b.attribute(name)) {
                    (Some(x), Some(y)) => {
                        if !values_equal_guarded(&x, &y, guard)? {
                            return Ok(false);
                        }
                    }
                    _ => return Ok(false),
                }
            }
            Ok(true)
        }
    }
}

/// Compare two objects field by field in the type's priority order.
///
/// The first field whose values order decides. Nested objects are compared
/// with this same function. Fields whose values cannot be ordered are treated
/// as equal. Objects of different types, or of a kind without ordering, are
/// [`Comparison::Incomparable`].
pub fn compare(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<Comparison> {
    compare_guarded(a, b, &mut PairGuard::default())
}

fn compare_guarded(
    a: &dyn DataObject,
    b: &dyn DataObject,
    guard: &mut PairGuard,
) -> ObjectResult<Comparison> {
    let ty = a.object_type();
    if !ty.kind().is_ordered() || !Arc::ptr_eq(ty, b.object_type()) {
        return Ok(Comparison::Incomparable);
    }
    let pair = (ObjectId::of(a), ObjectId::of(b));
    if guard.in_progress.contains(&pair) {
        return Ok(Comparison::Equal);
    }

    guard.in_progress.push(pair);
    let result = compare_fields(a, b, guard);
    guard.in_progress.pop();
    result
}

fn compare_fields(
    a: &dyn DataObject,
    b: &dyn DataObject,
    guard: &mut PairGuard,
) -> ObjectResult<Comparison> {
    let ty = a.object_type();
    let fields = match ty.priority_order() {
        Some(fields) => fields.to_vec(),
        None => {
            let mut names = a.attribute_names();
            names.sort();
            names
        }
    };

    for field in &fields {
        let x = a
            .attribute(field)
            .ok_or_else(|| ObjectError::unknown_field(ty.name(), field))?;
        let y = b
            .attribute(field)
            .ok_or_else(|| ObjectError::unknown_field(ty.name(), field))?;
        let comparison = match (&x, &y) {
            (Value::Object(x), Value::Object(y)) => {
                compare_guarded(x.as_ref(), y.as_ref(), guard)?
            }
            _ => x.try_cmp(&y).map_or(Comparison::Incomparable, Comparison::from),
        };
        match comparison {
            Comparison::Less | Comparison::Greater => return Ok(comparison),
            Comparison::Equal | Comparison::Incomparable => {}
        }
    }
    Ok(Comparison::Equal)
}

pub fn lt(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<bool> {
    Ok(compare(a, b)? == Comparison::Less)
}

pub fn le(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<bool> {
    Ok(matches!(compare(a, b)?, Comparison::Less | Comparison::Equal))
}

/// Derived as `!le`, so incomparable objects are "greater".
pub fn gt(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<bool> {
    Ok(!le(a, b)?)
}

/// Derived as `!lt`, so incomparable objects are "greater or equal".
pub fn ge(a: &dyn DataObject, b: &dyn DataObject) -> ObjectResult<bool> {
    Ok(!lt(a, b)?)
}
