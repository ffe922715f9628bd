//! Rendering of host default values as target-language literals.
//!
//! | value                | rendered            |
//! |----------------------|---------------------|
//! | `None`               | `NULL`              |
//! | `True` / `False`     | `TRUE` / `FALSE`    |
//! | `"x"`                | `"x"`               |
//! | `3`                  | `3L`                |
//! | `0.5`                | `0.5`               |
//! | `[1, 2]`             | `c(1L, 2L)`         |
//! | `(1, 2)` / `{1, 2}`  | `list(1L, 2L)`      |
//! | `{"a": 1}`           | `list(a = 1L)`      |
//! | named callable       | its name            |
//! | anything else        | its host `repr`     |
//!
//! After rendering, each level passes through the namespace rewrite rules of
//! [`RenderSettings`], so `tf.float32` becomes `tf$float32`.

use crate::settings::{RenderSettings, settings};
use crate::value::Value;

/// Render `value` with the process-global settings.
pub fn render_default(value: &Value) -> String {
    render_default_with(value, &settings())
}

pub fn render_default_with(value: &Value, settings: &RenderSettings) -> String {
    let rendered = match value {
        Value::Callable { name } => name.clone(),
        Value::Null => settings.null_literal.clone(),
        Value::Bool(true) => settings.true_literal.clone(),
        Value::Bool(false) => settings.false_literal.clone(),
        Value::Str(text) => format!("\"{text}\""),
        Value::Int(n) => format!("{n}{}", settings.integer_suffix),
        Value::BigInt { digits } => format!("{digits}{}", settings.integer_suffix),
        Value::Float(x) => float_repr(*x),
        Value::List(items) => render_call("c", items.iter().map(|item| render_default_with(item, settings))),
        Value::Tuple(items) | Value::Set(items) => {
            render_call("list", items.iter().map(|item| render_default_with(item, settings)))
        }
        Value::Dict(entries) => render_call(
            "list",
            entries
                .iter()
                .map(|(key, value)| format!("{key} = {}", render_default_with(value, settings))),
        ),
        Value::Object { repr } => repr.clone(),
    };
    settings.rewrite(rendered)
}

fn render_call(function: &str, args: impl Iterator<Item = String>) -> String {
    format!("{function}({})", args.collect::<Vec<_>>().join(", "))
}

/// Format a float the way the host's `repr` does.
///
/// Shortest round-trip digits, positional notation for decimal exponents in
/// `[-4, 16)`, otherwise scientific with a signed, two-digit exponent.
pub fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if x.is_sign_negative() { "-" } else { "" };
    let scientific = format!("{:e}", x.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}{fraction}e{exp_sign}{:02}", exponent.abs());
    }

    // Position of the decimal point relative to the start of `digits`.
    let point = exponent + 1;
    let body = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if point < digits.len() {
            format!("{}.{}", &digits[..point], &digits[point..])
        } else {
            format!("{digits}{}.0", "0".repeat(point - digits.len()))
        }
    };
    format!("{sign}{body}")
}
