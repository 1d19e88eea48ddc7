use validator::ValidationErrors;

pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut result = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match err.code.as_ref() {
                    "length" => "invalid length".to_string(),
                    "range" => "value out of range".to_string(),
                    "required" => "required".to_string(),
                    "custom" => "custom validation failed".to_string(),
                    _ => "invalid value".to_string(),
                });

            result.push(format!("{field}: {message}"));
        }
    }

    if result.is_empty() {
        result.push("Validation failed".to_string());
    }

    result.sort();
    result
}
