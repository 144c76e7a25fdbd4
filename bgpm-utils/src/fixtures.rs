//! Module to compare computed results against expected JSON fixtures.

use std::{fs, path::Path};

use itertools::Itertools;
use serde_json::Value;

/// Relative tolerance when comparing two numbers.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the fixture at `path`. Returns `Ok(None)` if there is no such file.
pub fn load(path: impl AsRef<Path>) -> Result<Option<Value>, Error> {
    let path = path.as_ref();
    if !path.exists() {
        log::trace!("No fixture at {path:?}");
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&fs::read_to_string(path)?)?))
}

/// Compare `actual` against `expected` and describe every difference, addressed by its JSON
/// pointer. An empty result means both values match.
///
/// Numbers are compared with a relative tolerance of [`FLOAT_TOLERANCE`], so that `5` and `5.0`
/// (or two renderings of the same duration) are considered equal.
pub fn diff(expected: &Value, actual: &Value) -> Vec<String> {
    let mut differences = Vec::new();
    diff_at("", expected, actual, &mut differences);
    differences
}

fn diff_at(pointer: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => match (e.as_f64(), a.as_f64()) {
            (Some(e), Some(a)) if (e - a).abs() <= FLOAT_TOLERANCE * e.abs().max(1.0) => {}
            _ => out.push(format!("{pointer}: expected {expected}, got {actual}")),
        },
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                out.push(format!(
                    "{pointer}: expected {} entries, got {}",
                    e.len(),
                    a.len()
                ));
                return;
            }
            for (i, (e, a)) in e.iter().zip(a).enumerate() {
                diff_at(&format!("{pointer}/{i}"), e, a, out);
            }
        }
        (Value::Object(e), Value::Object(a)) => {
            for key in e.keys().chain(a.keys()).unique() {
                let sub = format!("{pointer}/{}", escape(key));
                match (e.get(key), a.get(key)) {
                    (Some(e), Some(a)) => diff_at(&sub, e, a, out),
                    (Some(_), None) => out.push(format!("{sub}: missing")),
                    (None, _) => out.push(format!("{sub}: unexpected")),
                }
            }
        }
        _ if expected == actual => {}
        _ => out.push(format!("{pointer}: expected {expected}, got {actual}")),
    }
}

/// Escape a key for use in a JSON pointer (RFC 6901). Prefixes contain a `/`.
fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
