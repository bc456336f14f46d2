//! Per-submission form state returned to the rendering layer
//!
//! A failed validation or persistence attempt produces a [`FormState`] that
//! annotates individual form fields and carries a top-level summary message.
//! It lives for a single render cycle and is never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → failure messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Transient error/message payload for a single form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Field-level error messages, keyed by the submitted field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: FieldErrors,

    /// Top-level status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    /// A form state carrying only a summary message (persistence failures).
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: Some(message.into()),
        }
    }

    /// A form state carrying field errors plus a summary message
    /// (validation failures).
    pub fn rejected(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }

    /// Whether any field-level errors are present.
    pub fn has_field_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Messages recorded for a single field, if any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_message_has_no_field_errors() {
        let state = FormState::with_message("Database Error: Failed to Create Invoice.");
        assert!(!state.has_field_errors());
        assert_eq!(
            state.message.as_deref(),
            Some("Database Error: Failed to Create Invoice.")
        );
    }

    #[test]
    fn test_rejected_keeps_field_messages() {
        let mut errors = FieldErrors::new();
        errors.insert(
            "amount".to_string(),
            vec!["Please enter an amount greater than $0.".to_string()],
        );
        let state = FormState::rejected(errors, "Missing Fields. Failed to Create Invoice.");
        assert!(state.has_field_errors());
        assert_eq!(
            state.field("amount").unwrap()[0],
            "Please enter an amount greater than $0."
        );
        assert!(state.field("status").is_none());
    }

    #[test]
    fn test_serialization_omits_empty_parts() {
        let state = FormState::with_message("msg");
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["message"], "msg");
    }
}
