//! Redaction of sensitive material before hashing, archival, or error
//! reporting.

use serde_json::Value;

/// Replacement marker for redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Replacement marker for scrubbed URLs.
pub const REDACTED_ENDPOINT: &str = "[REDACTED_ENDPOINT]";

/// Field names whose values are always redacted.
pub const DEFAULT_REDACT_FIELDS: &[&str] = &["apiKey", "token", "password", "secret", "privateKey"];

/// Recursively replace values of sensitive keys with [`REDACTED`].
///
/// The default field set is always applied; `extra_fields` extends it.
/// Redaction happens before hashing, so retries over the same payload
/// produce the same digest.
pub fn redact_value(value: &Value, extra_fields: &[String]) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, extra_fields))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, v) in map {
                let sensitive = DEFAULT_REDACT_FIELDS.contains(&key.as_str())
                    || extra_fields.iter().any(|f| f == key);
                if sensitive {
                    out.insert(key.clone(), Value::String(REDACTED.to_string()));
                } else {
                    out.insert(key.clone(), redact_value(v, extra_fields));
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Scrub secret-shaped patterns from free text.
///
/// Applied to provider error bodies and similar text before it is
/// embedded in an error that crosses the system boundary: bearer
/// tokens, JWTs, and URLs (which may name internal infrastructure).
pub fn redact_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while !rest.is_empty() {
        if let Some(stripped) = strip_bearer(rest) {
            out.push_str("Bearer [REDACTED]");
            rest = stripped;
        } else if let Some(stripped) = strip_jwt(rest) {
            out.push_str("[TOKEN]");
            rest = stripped;
        } else if let Some(stripped) = strip_url(rest) {
            out.push_str(REDACTED_ENDPOINT);
            rest = stripped;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }

    out
}

fn token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

fn strip_bearer(s: &str) -> Option<&str> {
    let after = s.strip_prefix("Bearer ")?;
    let end = after.find(char::is_whitespace).unwrap_or(after.len());
    if end == 0 {
        return None;
    }
    Some(&after[end..])
}

fn strip_jwt(s: &str) -> Option<&str> {
    if !s.starts_with("eyJ") {
        return None;
    }
    let end = s.find(|c: char| !token_char(c)).unwrap_or(s.len());
    let candidate = &s[..end];
    // Three dot-separated base64url segments.
    if candidate.split('.').count() == 3 && candidate.split('.').all(|seg| !seg.is_empty()) {
        Some(&s[end..])
    } else {
        None
    }
}

fn strip_url(s: &str) -> Option<&str> {
    let scheme = if s.starts_with("https://") {
        8
    } else if s.starts_with("http://") {
        7
    } else {
        return None;
    };
    let after = &s[scheme..];
    let end = after
        .find(|c: char| c.is_whitespace() || c == ')' || c == ']' || c == '"')
        .unwrap_or(after.len());
    if end == 0 {
        return None;
    }
    Some(&after[end..])
}
