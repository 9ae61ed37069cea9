use serde_json::Value;

/// Largest integer that a `f64` represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.;

/// Converts a float into a JSON number the way `JSON.stringify` prints it,
/// i.e. integral values have no fractional part and non-finite values become `null`.
pub fn js_number(value: f64) -> Value {
    if is_safe_integer(value) {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Formats a float for display, dropping the fractional part of integral values
pub fn format_number(value: f64) -> String {
    if is_safe_integer(value) {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

fn is_safe_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0. && value.abs() <= MAX_SAFE_INTEGER
}
