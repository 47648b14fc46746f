//! Diff generation for audit logging
//!
//! Describes how one run's output differs from the previous run's, in terms
//! a user reads: category amounts and totals rather than JSON paths.

use std::collections::BTreeMap;

use serde_json::Value;

/// Most changes listed in one diff summary
pub const MAX_CHANGES: usize = 12;

/// Compare the outputs of two runs
///
/// Outputs with a `categories` list (allocations) are compared per category
/// name plus their `summary`; anything else falls back to a field-by-field
/// comparison.
pub fn diff_runs(before: &Value, after: &Value) -> Option<String> {
    let mut changes = match (before.get("categories"), after.get("categories")) {
        (Some(Value::Array(b)), Some(Value::Array(a))) => {
            let mut changes = diff_named_amounts(b, a);
            if let (Some(b), Some(a)) = (before.get("summary"), after.get("summary")) {
                changes.extend(generate_detailed_diff(b, a, "summary"));
            }
            changes
        }
        _ => generate_detailed_diff(before, after, ""),
    };

    if changes.is_empty() {
        return None;
    }

    if changes.len() > MAX_CHANGES {
        let hidden = changes.len() - MAX_CHANGES;
        changes.truncate(MAX_CHANGES);
        changes.push(format!("(+{} more)", hidden));
    }

    Some(changes.join(", "))
}

fn named_amounts(lines: &[Value]) -> BTreeMap<String, f64> {
    lines
        .iter()
        .filter_map(|line| {
            let name = line.get("name")?.as_str()?;
            let amount = line.get("amount")?.as_f64()?;
            Some((name.to_string(), amount))
        })
        .collect()
}

/// Per-name amount changes between two lists of `{name, amount}` objects
fn diff_named_amounts(before: &[Value], after: &[Value]) -> Vec<String> {
    let before = named_amounts(before);
    let after = named_amounts(after);
    let mut changes = Vec::new();

    for (name, old) in &before {
        match after.get(name) {
            Some(new) if !same_amount(*old, *new) => {
                changes.push(format!("{}: {:.2} -> {:.2}", name, old, new))
            }
            Some(_) => {}
            None => changes.push(format!("{}: {:.2} -> (removed)", name, old)),
        }
    }

    for (name, new) in &after {
        if !before.contains_key(name) {
            changes.push(format!("{}: (added) -> {:.2}", name, new));
        }
    }

    changes
}

/// Amounts equal to the cent count as unchanged
fn same_amount(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.2}", f),
            _ => n.to_string(),
        },
        Value::String(s) => {
            if s.len() > 50 {
                format!("\"{}...\"", s.chars().take(47).collect::<String>())
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

fn values_differ(before: &Value, after: &Value) -> bool {
    match (before.as_f64(), after.as_f64()) {
        (Some(b), Some(a)) => !same_amount(b, a),
        _ => before != after,
    }
}

fn join_prefix(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Nested field-by-field diff, paths joined with `.`
pub fn generate_detailed_diff(before: &Value, after: &Value, prefix: &str) -> Vec<String> {
    let mut changes = Vec::new();

    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let field = join_prefix(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) => {
                        changes.extend(generate_detailed_diff(before_val, after_val, &field))
                    }
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        field,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_prefix(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        (Value::Array(before_arr), Value::Array(after_arr)) => {
            if before_arr.len() != after_arr.len() {
                changes.push(format!(
                    "{}: [{} items] -> [{} items]",
                    prefix,
                    before_arr.len(),
                    after_arr.len()
                ));
            } else {
                for (i, (b, a)) in before_arr.iter().zip(after_arr).enumerate() {
                    changes.extend(generate_detailed_diff(b, a, &format!("{}[{}]", prefix, i)));
                }
            }
        }
        _ => {
            if values_differ(before, after) {
                changes.push(format!(
                    "{}: {} -> {}",
                    prefix,
                    format_value(before),
                    format_value(after)
                ));
            }
        }
    }

    changes
}
