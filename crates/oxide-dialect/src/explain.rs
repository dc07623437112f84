//! Human-readable SQL for logs.
//!
//! Substitutes bound values back into a parameterized statement. The output
//! is meant for diagnostics only and must never be sent to a database.

use regex::{Captures, Regex};

use crate::value::Value;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders `sql` with every placeholder replaced by its value.
///
/// Without `numeric_placeholder`, the n-th `?` receives the n-th value and
/// surplus `?` stay as they are. With a pattern whose first capture group
/// is the 1-based position (e.g. `\$(\d+)`), each match is replaced by the
/// referenced value; references past the end are left untouched.
///
/// String-like values are wrapped in `escaper`, and occurrences of the
/// escaper inside them are doubled.
#[must_use]
pub fn explain_sql(
    sql: &str,
    numeric_placeholder: Option<&Regex>,
    escaper: &str,
    vars: &[Value],
) -> String {
    let rendered: Vec<String> = vars.iter().map(|v| render_value(v, escaper)).collect();

    match numeric_placeholder {
        None => {
            let mut out = String::with_capacity(sql.len());
            let mut values = rendered.iter();
            for ch in sql.chars() {
                let value = if ch == '?' { values.next() } else { None };
                match value {
                    Some(value) => out.push_str(value),
                    None => out.push(ch),
                }
            }
            out
        }
        Some(pattern) => pattern
            .replace_all(sql, |caps: &Captures<'_>| {
                caps.get(1)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| rendered.get(idx))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned(),
    }
}

fn render_value(value: &Value, escaper: &str) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Uint(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => quote(s, escaper),
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) if s.chars().all(|c| !c.is_control() || c.is_whitespace()) => quote(s, escaper),
            _ => format!("{escaper}<binary>{escaper}"),
        },
        Value::Time(t) => {
            let formatted = t.format(TIME_FORMAT).to_string();
            // Trailing zeros of the fraction are dropped, and so is an empty fraction.
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            format!("{escaper}{trimmed}{escaper}")
        }
    }
}

fn quote(s: &str, escaper: &str) -> String {
    let doubled = format!("{escaper}{escaper}");
    format!("{escaper}{}{escaper}", s.replace(escaper, &doubled))
}
