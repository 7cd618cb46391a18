use serde_json::Value;

use crate::prompts::EXTRACTION_CATEGORIES;

/// Result of checking an extraction response against the expected field
/// names.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub valid: bool,
    pub missing: Vec<String>,
}

/// Checks whether an extraction response is JSON carrying every expected
/// category as a field name.
///
/// The extraction output is a trust boundary: by default the pipeline passes
/// it through unparsed, and even when this check runs its result is only
/// logged. It never rejects a response.
pub fn check_extracted_fields(json_text: &str) -> FieldCheck {
    match serde_json::from_str::<Value>(json_text) {
        Ok(Value::Object(fields)) => {
            let missing: Vec<String> = EXTRACTION_CATEGORIES
                .iter()
                .filter(|category| !fields.contains_key(**category))
                .map(|category| category.to_string())
                .collect();
            FieldCheck {
                valid: missing.is_empty(),
                missing,
            }
        }
        _ => FieldCheck {
            valid: false,
            missing: vec!["invalid JSON format".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_response_passes() {
        let response = serde_json::json!({
            "Coverage Details": "hospitalization",
            "Exclusions": "pre-existing conditions",
            "Premium Structure": "$500 annually",
            "Waiting Periods": "90 days",
            "Maximum and Minimum Age Limit": "18-65",
            "Claim Process": "online portal",
            "Policy Term": "1 year",
        });
        let check = check_extracted_fields(&response.to_string());
        assert!(check.valid);
        assert!(check.missing.is_empty());
    }

    #[test]
    fn reports_missing_field_names() {
        let check = check_extracted_fields(r#"{"Coverage Details": "hospitalization"}"#);
        assert!(!check.valid);
        assert!(check.missing.contains(&"Exclusions".to_string()));
        assert!(check.missing.contains(&"Policy Term".to_string()));
    }

    #[test]
    fn flags_non_json_output() {
        let check = check_extracted_fields("The plan covers hospitalization.");
        assert!(!check.valid);
        assert_eq!(check.missing, vec!["invalid JSON format".to_string()]);
    }
}
