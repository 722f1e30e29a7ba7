//! Request payload validators.
//!
//! Pure predicate functions over the raw JSON body, run before any write.
//! An `Err` message is returned to the client verbatim in a 400 envelope.

use serde_json::Value;
use url::Url;

const BASE_URL_ERROR: &str =
    "baseUrl must be a valid URL (e.g., https://api.example.com or api.example.com)";

fn non_empty_string<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// All six system fields are required non-empty strings, and `baseUrl`
/// must look like a real URL.
pub fn validate_system_data(data: &Value) -> Result<(), String> {
    const REQUIRED: [&str; 6] = [
        "name",
        "baseUrl",
        "authenticationMethod",
        "authenticationPlace",
        "key",
        "value",
    ];

    for field in REQUIRED {
        if non_empty_string(data.get(field)).is_none() {
            return Err(format!(
                "{} is required and must be a non-empty string",
                field
            ));
        }
    }

    validate_base_url(data.get("baseUrl").and_then(Value::as_str).unwrap_or_default())
}

/// A base URL may omit the scheme (`https://` is assumed); the hostname
/// must be at least 3 characters and contain a dot. Bare `localhost` is
/// rejected like any other undotted host.
pub fn validate_base_url(raw: &str) -> Result<(), String> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|_| BASE_URL_ERROR.to_string())?;
    let host = parsed.host_str().ok_or_else(|| BASE_URL_ERROR.to_string())?;
    if host.len() < 3 || !host.contains('.') {
        return Err(BASE_URL_ERROR.to_string());
    }

    Ok(())
}

/// Planner payloads need three non-empty strings; the structured fields
/// only have their outer shape checked (arrays stay arrays, the trigger is
/// an object). Element structure is deliberately not validated here.
pub fn validate_planner_data(data: &Value) -> Result<(), String> {
    const REQUIRED: [&str; 3] = ["name", "description", "plannerType"];
    const ARRAY_FIELDS: [&str; 4] = ["funds", "sources", "runs", "reports"];

    for field in REQUIRED {
        if non_empty_string(data.get(field)).is_none() {
            return Err(format!(
                "{} is required and must be a non-empty string",
                field
            ));
        }
    }

    for field in ARRAY_FIELDS {
        if let Some(value) = data.get(field) {
            if !value.is_array() {
                return Err(format!("{} must be an array", field));
            }
        }
    }

    if let Some(trigger) = data.get("trigger") {
        if !trigger.is_object() && !trigger.is_null() {
            return Err("trigger must be an object".to_string());
        }
    }

    Ok(())
}

/// A dropdown save payload is an array of items, each with a non-empty
/// name and value; report items additionally require a type. Messages
/// name the offending item by 1-based position.
pub fn validate_dropdown_items(items: &Value, has_type: bool) -> Result<(), String> {
    let Some(list) = items.as_array() else {
        return Err("Items must be an array".to_string());
    };

    for (index, item) in list.iter().enumerate() {
        let position = index + 1;
        if non_empty_string(item.get("name")).is_none() {
            return Err(format!(
                "Item {}: Name is required and must be a non-empty string",
                position
            ));
        }
        if non_empty_string(item.get("value")).is_none() {
            return Err(format!(
                "Item {}: Value is required and must be a non-empty string",
                position
            ));
        }
        if has_type && non_empty_string(item.get("type")).is_none() {
            return Err(format!("Item {}: Type is required for reports", position));
        }
    }

    Ok(())
}

/// Trims and caps a free-text input at 255 characters.
pub fn sanitize_string(raw: &str) -> String {
    raw.trim().chars().take(255).collect()
}

/// Parses a numeric query parameter, falling back to `default` when the
/// value is missing or not a non-negative integer.
pub fn sanitize_number(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|r| r.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn system_payload() -> Value {
        json!({
            "name": "X",
            "baseUrl": "api.example.com",
            "authenticationMethod": "bearer",
            "authenticationPlace": "header",
            "key": "k1",
            "value": "v1"
        })
    }

    #[test]
    fn accepts_a_complete_system_payload() {
        assert_eq!(validate_system_data(&system_payload()), Ok(()));
    }

    #[test]
    fn rejects_missing_and_blank_system_fields() {
        let mut data = system_payload();
        data.as_object_mut().unwrap().remove("key");
        assert_eq!(
            validate_system_data(&data),
            Err("key is required and must be a non-empty string".to_string())
        );

        let mut data = system_payload();
        data["name"] = json!("   ");
        assert_eq!(
            validate_system_data(&data),
            Err("name is required and must be a non-empty string".to_string())
        );
    }

    #[test]
    fn base_url_accepts_schemeless_hosts() {
        assert_eq!(validate_base_url("api.example.com"), Ok(()));
        assert_eq!(validate_base_url("https://api.example.com/v2"), Ok(()));
        assert_eq!(validate_base_url("http://api.example.com:8443"), Ok(()));
    }

    #[test]
    fn base_url_rejects_undotted_hosts() {
        assert!(validate_base_url("localhost").is_err());
        assert!(validate_base_url("ab").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn planner_requires_core_strings() {
        let data = json!({ "name": "P", "description": "d" });
        assert_eq!(
            validate_planner_data(&data),
            Err("plannerType is required and must be a non-empty string".to_string())
        );
    }

    #[test]
    fn planner_array_fields_must_be_arrays_when_present() {
        let data = json!({
            "name": "P",
            "description": "d",
            "plannerType": "t",
            "funds": "nope"
        });
        assert_eq!(
            validate_planner_data(&data),
            Err("funds must be an array".to_string())
        );

        let data = json!({
            "name": "P",
            "description": "d",
            "plannerType": "t",
            "trigger": [1, 2]
        });
        assert_eq!(
            validate_planner_data(&data),
            Err("trigger must be an object".to_string())
        );
    }

    #[test]
    fn planner_tolerates_absent_structured_fields() {
        let data = json!({ "name": "P", "description": "d", "plannerType": "t" });
        assert_eq!(validate_planner_data(&data), Ok(()));
    }

    #[test]
    fn dropdown_items_must_be_an_array_of_named_values() {
        assert_eq!(
            validate_dropdown_items(&json!({"name": "A"}), false),
            Err("Items must be an array".to_string())
        );
        assert_eq!(
            validate_dropdown_items(&json!([{"name": "A", "value": "a"}]), false),
            Ok(())
        );
        assert_eq!(
            validate_dropdown_items(&json!([{"name": "A"}]), false),
            Err("Item 1: Value is required and must be a non-empty string".to_string())
        );
        assert_eq!(
            validate_dropdown_items(
                &json!([{"name": "A", "value": "a"}, {"value": "b"}]),
                false
            ),
            Err("Item 2: Name is required and must be a non-empty string".to_string())
        );
    }

    #[test]
    fn report_items_require_a_type() {
        assert_eq!(
            validate_dropdown_items(&json!([{"name": "A", "value": "a"}]), true),
            Err("Item 1: Type is required for reports".to_string())
        );
        assert_eq!(
            validate_dropdown_items(&json!([{"name": "A", "value": "a", "type": "risk"}]), true),
            Ok(())
        );
    }

    #[test]
    fn sanitize_helpers() {
        assert_eq!(sanitize_string("  hello  "), "hello");
        assert_eq!(sanitize_string(&"x".repeat(300)).len(), 255);
        assert_eq!(sanitize_number(Some("42"), 1), 42);
        assert_eq!(sanitize_number(Some("abc"), 7), 7);
        assert_eq!(sanitize_number(None, 10), 10);
    }
}
