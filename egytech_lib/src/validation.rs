//! Normalisation of human-typed filter input (CLI flags, query specs) into the
//! exact forms the query models accept.

use std::str::FromStr;

use egytech_api::types::{Gender, ProgrammingLanguage};
use egytech_api::ValidationError;
use serde_json::{Map, Value};

use crate::error::EgytechError;

pub const MAX_QUERY_SPEC_LENGTH: usize = 500;

/// Lowercases, trims and turns `-` and spaces into `_`, so `Data Engineer`
/// and `data-engineer` both reach the wire value `data_engineer`.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Parses any filter enum from loosely formatted input.
pub fn parse_choice<T>(input: &str) -> Result<T, EgytechError>
where
    T: FromStr<Err = ValidationError>,
{
    normalize(input)
        .parse::<T>()
        .map_err(|e| EgytechError::InvalidInput(e.to_string()))
}

/// Validate a gender string: case-insensitive, supports shorthand f/m.
pub fn validate_gender(input: &str) -> Result<Gender, EgytechError> {
    match normalize(input).as_str() {
        "female" | "f" => Ok(Gender::Female),
        "male" | "m" => Ok(Gender::Male),
        _ => Err(EgytechError::InvalidInput(format!(
            "unknown gender '{}'. Valid values: female (f), male (m)",
            input
        ))),
    }
}

/// Validate a programming language, accepting the common spellings
/// (`javascript`, `c++`, `c#`) besides the wire values.
pub fn validate_language(input: &str) -> Result<ProgrammingLanguage, EgytechError> {
    match normalize(input).as_str() {
        "javascript" | "js" => Ok(ProgrammingLanguage::JavaScript),
        "typescript" | "ts" => Ok(ProgrammingLanguage::TypeScript),
        "c++" | "cpp" | "c_plus_plus" => Ok(ProgrammingLanguage::CPlusPlus),
        "c#" | "csharp" => Ok(ProgrammingLanguage::CSharp),
        "golang" => Ok(ProgrammingLanguage::Go),
        other => parse_choice(other),
    }
}

/// Validate a yes/no style flag.
pub fn parse_flag(input: &str) -> Result<bool, EgytechError> {
    match normalize(input).as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(EgytechError::InvalidInput(format!(
            "expected yes or no, got '{}'",
            input
        ))),
    }
}

/// Parses a compact query spec such as `title=backend,min_yoe=2,cs_degree=yes`
/// into a JSON mapping for `ParticipantsQuery::from_map`.
///
/// Keys are normalised. Integer values become numbers, `true`/`false` become
/// booleans, and everything else stays a string, so schema and value checks
/// are left to the query model.
pub fn parse_query_spec(spec: &str) -> Result<Map<String, Value>, EgytechError> {
    if spec.len() > MAX_QUERY_SPEC_LENGTH {
        return Err(EgytechError::InvalidInput(format!(
            "query spec exceeds maximum length of {} bytes",
            MAX_QUERY_SPEC_LENGTH
        )));
    }
    let mut map = Map::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            return Err(EgytechError::InvalidInput(format!(
                "expected key=value, got '{}'",
                part
            )));
        };
        let key = normalize(key);
        if key.is_empty() {
            return Err(EgytechError::InvalidInput(format!(
                "missing key in '{}'",
                part
            )));
        }
        if map.contains_key(&key) {
            return Err(EgytechError::InvalidInput(format!(
                "'{}' given more than once",
                key
            )));
        }
        map.insert(key, spec_value(value));
    }
    Ok(map)
}

fn spec_value(raw: &str) -> Value {
    // before normalising, which would turn a leading minus into `_`
    if let Ok(n) = raw.trim().parse::<i64>() {
        return Value::from(n);
    }
    let value = normalize(raw);
    match value.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(value),
    }
}

/// Parses a JSON array of filter objects, as read from a queries file.
pub fn parse_query_list(json: &str) -> Result<Vec<Map<String, Value>>, EgytechError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| EgytechError::InvalidInput(format!("queries file is not JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(EgytechError::InvalidInput(
            "queries file must hold a JSON array of objects".to_string(),
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(EgytechError::InvalidInput(format!(
                "query {} in file is not an object",
                idx + 1
            ))),
        })
        .collect()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
