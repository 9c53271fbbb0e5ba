//! Lenient extraction of typed values from a `serde_json::Value` object.
//!
//! Missing keys and values of the wrong JSON type fall back to the given
//! default. Range checking is left to the typed constructors in
//! [`crate::config`].

use serde_json::Value;

/// Extracts an unsigned integer from `params[name]`.
///
/// Floats, negative numbers, strings and nulls all yield `default`.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_u64_reads_integer() {
        let params = json!({"pixels_per_unit": 250});
        assert_eq!(param_u64(&params, "pixels_per_unit", 100), 250);
    }

    #[test]
    fn param_u64_defaults_when_missing() {
        assert_eq!(param_u64(&json!({}), "field_density", 4), 4);
    }

    #[test]
    fn param_u64_defaults_for_float_negative_and_string() {
        for value in [json!(2.5), json!(-3), json!("ten"), json!(null)] {
            let params = json!({ "field_density": value });
            assert_eq!(param_u64(&params, "field_density", 4), 4);
        }
    }

    #[test]
    fn param_u64_defaults_for_non_object() {
        assert_eq!(param_u64(&json!([1, 2]), "field_density", 7), 7);
    }

    #[test]
    fn param_bool_reads_both_values() {
        let params = json!({"heatmap": true, "field_lines": false});
        assert!(param_bool(&params, "heatmap", false));
        assert!(!param_bool(&params, "field_lines", true));
    }

    #[test]
    fn param_bool_defaults_for_wrong_type() {
        let params = json!({"heatmap": 1});
        assert!(!param_bool(&params, "heatmap", false));
    }
}
