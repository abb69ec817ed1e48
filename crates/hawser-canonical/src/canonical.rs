//! Canonical JSON serialization.
//!
//! Arrays keep their order, object keys are re-emitted sorted by byte
//! order, scalars use serde_json's standard textual form. The walk is
//! total over the closed `serde_json::Value` variant, so canonicalization
//! never fails.

use serde_json::Value;

/// Produce the canonical string form of a value.
///
/// For all deep-equal `v1`, `v2`: `canonicalize(v1) == canonicalize(v2)`,
/// independent of key insertion order.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(out, key);
                out.push(':');
                // Key came from the map, so the lookup cannot miss.
                if let Some(v) = map.get(key.as_str()) {
                    write_value(out, v);
                }
            }
            out.push('}');
        }
    }
}

/// JSON string escaping matching serde_json's serializer output.
fn write_escaped(out: &mut String, s: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{0c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                let b = c as u32;
                out.push_str("\\u00");
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xf) as usize] as char);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_independence() {
        let a = json!({"b": 1, "a": 2, "c": {"z": true, "y": false}});
        let b = json!({"c": {"y": false, "z": true}, "a": 2, "b": 1});

        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_keys_are_sorted() {
        let v = json!({"zeta": 1, "alpha": 2});
        assert_eq!(canonicalize(&v), r#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn test_array_order_preserved() {
        let a = json!([3, 1, 2]);
        let b = json!([1, 2, 3]);

        assert_eq!(canonicalize(&a), "[3,1,2]");
        assert_ne!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(canonicalize(&json!(null)), "null");
        assert_eq!(canonicalize(&json!(true)), "true");
        assert_eq!(canonicalize(&json!(42)), "42");
        assert_eq!(canonicalize(&json!("hi")), "\"hi\"");
    }

    #[test]
    fn test_escaping_matches_serde_json() {
        let samples = ["plain", "with \"quotes\"", "tab\there", "line\nbreak", "\u{01}ctl"];
        for s in samples {
            let v = json!(s);
            let mut ours = String::new();
            write_escaped(&mut ours, s);
            assert_eq!(ours, serde_json::to_string(&v).unwrap());
        }
    }

    #[test]
    fn test_nested_mixed_structure() {
        let v = json!({
            "seq": [{"k": "v", "a": 1}, null],
            "empty": {},
            "n": 1.5
        });
        assert_eq!(
            canonicalize(&v),
            r#"{"empty":{},"n":1.5,"seq":[{"a":1,"k":"v"},null]}"#
        );
    }
}
