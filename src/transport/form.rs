use crate::domain::{ParamValue, RequestParams};

/// Normalize request parameters into the flat form Kavenegar expects.
///
/// Scalars pass through as their plain string form. List- and map-shaped
/// values are replaced by their compact JSON text, so `receptor:
/// ["3000","3001"]` is submitted as the literal field value
/// `["3000","3001"]`. The output carries exactly the input's key set.
pub fn encode_params_form(params: &RequestParams) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

fn encode_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(text) => text.clone(),
        ParamValue::Int(number) => number.to_string(),
        ParamValue::Float(number) => number.to_string(),
        ParamValue::Bool(flag) => flag.to_string(),
        // serde_json::Value renders as compact JSON through Display.
        ParamValue::List(_) | ParamValue::Map(_) => value.to_json_value().to_string(),
    }
}
