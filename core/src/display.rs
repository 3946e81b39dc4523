//! Textual rendering of values and objects.
//!
//! This is the form interpolated into violation messages: text is shown raw at
//! the top level and quoted inside collections; objects render as
//! `TypeName: field=(value), ...` with fields in name order.

use crate::object::DataObject;
use crate::value::Value;
use crate::ObjectId;
use std::fmt::Write;

/// Objects currently being rendered. Re-entering one renders its bare type name.
#[derive(Debug, Default)]
struct RenderGuard {
    active: Vec<ObjectId>,
}

/// Render a value the way it appears in messages.
pub fn render_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, false, &mut RenderGuard::default());
    out
}

/// Render an object as `TypeName` or `TypeName: a=(1), b=(2)`.
pub fn render_object(object: &dyn DataObject) -> String {
    let mut out = String::new();
    write_object(&mut out, object, &mut RenderGuard::default());
    out
}

fn write_object(out: &mut String, object: &dyn DataObject, guard: &mut RenderGuard) {
    out.push_str(object.object_type().name());
    let id = ObjectId::of(object);
    if guard.active.contains(&id) {
        return;
    }

    let mut names = object.attribute_names();
    if names.is_empty() {
        return;
    }
    names.sort();

    guard.active.push(id);
    out.push_str(": ");
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str("=(");
        if let Some(value) = object.attribute(name) {
            write_value(out, &value, false, guard);
        }
        out.push(')');
    }
    guard.active.pop();
}

fn write_value(out: &mut String, value: &Value, nested: bool, guard: &mut RenderGuard) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => write_float(out, *f),
        Value::String(s) if nested => write_quoted(out, s),
        Value::String(s) => out.push_str(s),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, true, guard);
            }
            out.push(']');
        }
        Value::Map(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, key, true, guard);
                out.push_str(": ");
                write_value(out, item, true, guard);
            }
            out.push('}');
        }
        Value::Object(obj) => write_object(out, obj.as_ref(), guard),
        Value::Function(_) => out.push_str("<function>"),
    }
}

/// Shortest round-trip form; integral values keep a trailing `.0`.
fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("nan");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "inf" } else { "-inf" });
    } else {
        // `{:e}` yields the shortest round-trip digits and the decimal exponent.
        let scientific = format!("{:e}", f);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            let _ = write!(out, "{}e{}{:02}", mantissa, sign, exponent.abs());
        } else if f.fract() == 0.0 {
            let _ = write!(out, "{:.1}", f);
        } else {
            let _ = write!(out, "{}", f);
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}
