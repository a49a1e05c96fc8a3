//! Call parameters: positional-argument normalization and form encoding.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StripeError};

/// The parameter payload of one API call.
pub type Params = Map<String, Value>;

/// Collapse positional call arguments into one parameter payload.
///
/// - no arguments: empty payload
/// - one argument: the argument if it is an object, else empty (a bare id)
/// - two or more: the second argument if it is an object, else empty
///
/// Identifiers are never merged into the payload; they travel in the URL.
pub fn normalize_args(args: &[Value]) -> Params {
    match args {
        [Value::Object(params)] => params.clone(),
        [_, Value::Object(params), ..] => params.clone(),
        _ => Params::new(),
    }
}

/// The leading string arguments of a call, i.e. the resource identifiers.
pub fn leading_identifiers(args: &[Value]) -> Vec<String> {
    args.iter()
        .map_while(|arg| arg.as_str().map(str::to_string))
        .collect()
}

/// Serialize a request builder into a parameter payload.
pub fn to_params<T: Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value).map_err(|e| StripeError::Serialization(e.to_string()))? {
        Value::Object(params) => Ok(params),
        Value::Null => Ok(Params::new()),
        other => Err(StripeError::Serialization(format!(
            "parameters must serialize to an object, got {other}"
        ))),
    }
}

/// Encode a payload the way Stripe expects request bodies and query strings:
/// nested objects as `a[b]=c`, arrays as `a[0]=c`, null as an empty value.
pub fn encode_form(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(format!("{prefix}[{key}]"), child, out);
            }
        }
        Value::Array(items) if items.is_empty() => out.push((prefix, String::new())),
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), child, out);
            }
        }
        Value::Null => out.push((prefix, String::new())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Bool(_) | Value::Number(_) => out.push((prefix, value.to_string())),
    }
}

/// Decode a form-encoded body or query string back into a nested payload.
///
/// Scalars stay strings; the wire carries no type information. Objects whose
/// keys are all indices become arrays.
pub fn decode_form(body: &str) -> Params {
    let mut params = Params::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key);
        let value = decode_component(raw_value);
        insert_path(&mut params, &key_path(&key), Value::String(value));
    }
    params
        .into_iter()
        .map(|(key, value)| (key, indices_to_arrays(value)))
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

fn key_path(key: &str) -> Vec<String> {
    match key.find('[') {
        None => vec![key.to_string()],
        Some(open) => {
            let mut path = vec![key[..open].to_string()];
            path.extend(
                key[open..]
                    .split('[')
                    .skip(1)
                    .map(|segment| segment.trim_end_matches(']').to_string()),
            );
            path
        }
    }
}

fn insert_path(map: &mut Params, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    // `a[]=x` appends
    let head = if head.is_empty() { map.len().to_string() } else { head.clone() };
    if rest.is_empty() {
        map.insert(head, value);
        return;
    }
    let entry = map.entry(head).or_insert_with(|| Value::Object(Params::new()));
    if !entry.is_object() {
        *entry = Value::Object(Params::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}

fn indices_to_arrays(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let all_indices =
                !map.is_empty() && map.keys().all(|key| key.parse::<usize>().is_ok());
            if all_indices {
                let mut items: Vec<(usize, Value)> = map
                    .into_iter()
                    .filter_map(|(key, child)| {
                        key.parse().ok().map(|i| (i, indices_to_arrays(child)))
                    })
                    .collect();
                items.sort_by_key(|(index, _)| *index);
                Value::Array(items.into_iter().map(|(_, child)| child).collect())
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(key, child)| (key, indices_to_arrays(child)))
                        .collect(),
                )
            }
        }
        other => other,
    }
}
