use heck::{ToShoutySnakeCase, ToSnakeCase};

use crate::model::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);
    let pascal_case = camelize(&sanitized);

    NormalizedName {
        original: name.to_string(),
        camel_case: lower_first(&pascal_case),
        pascal_case,
        snake_case: sanitized.to_snake_case(),
        screaming_snake: sanitized.to_shouty_snake_case(),
    }
}

/// Upper-case the first character and leave the rest untouched.
///
/// Unlike PascalCase conversion this keeps acronyms: `GetTelegrafsID` stays
/// `GetTelegrafsID`.
pub fn initial_caps(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join the alphanumeric segments of `name`, each with its first letter
/// upper-cased: `orgID` → `OrgID`, `chronograf-v2` → `ChronografV2`.
///
/// Inner capitals are kept, so acronyms survive.
pub fn camelize(name: &str) -> String {
    let joined: String = name
        .split(|c: char| !c.is_alphanumeric())
        .map(initial_caps)
        .collect();
    if joined.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{joined}")
    } else {
        joined
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Operation id for operations that don't declare one: method followed by
/// the path segments, e.g. `GET /telegrafs/{telegrafID}` → `GetTelegrafsTelegrafID`.
pub fn operation_id_from_route(method: &str, path: &str) -> String {
    let mut id = initial_caps(&method.to_lowercase());
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let segment = segment.trim_start_matches('{').trim_end_matches('}');
        for part in segment.split(|c: char| !c.is_alphanumeric()) {
            id.push_str(&initial_caps(part));
        }
    }
    id
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for (i, ch) in name.chars().enumerate() {
        if ch.is_alphanumeric() {
            if i == 0 && ch.is_ascii_digit() {
                result.push('_');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
