//! Inbound notification form validation.

use serde::Serialize;

/// Fields every notification must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    "p24_merchant_id",
    "p24_pos_id",
    "p24_session_id",
    "p24_amount",
    "p24_currency",
    "p24_order_id",
    "p24_method",
    "p24_statement",
    "p24_sign",
];

/// Fields that must hold an integer.
pub const NUMERIC_FIELDS: &[&str] = &[
    "p24_merchant_id",
    "p24_pos_id",
    "p24_amount",
    "p24_order_id",
    "p24_method",
];

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` notification body.
pub fn parse_form(body: &[u8]) -> Result<Vec<(String, String)>, Vec<FieldError>> {
    serde_urlencoded::from_bytes(body)
        .map_err(|_| vec![FieldError::new("body", "is not a valid form body")])
}

/// Check required and numeric fields; every problem is reported, in field order.
pub fn validate_notification(fields: &[(String, String)]) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for name in REQUIRED_FIELDS {
        let value = fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty());

        match value {
            None => errors.push(FieldError::new(name, "is required")),
            Some(v) if NUMERIC_FIELDS.contains(name) && v.parse::<i64>().is_err() => {
                errors.push(FieldError::new(name, "must be an integer"))
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_decodes_pairs_in_order() {
        let fields = parse_form(b"p24_session_id=s1&p24_statement=Order+1").unwrap();

        assert_eq!(
            fields,
            vec![
                ("p24_session_id".to_string(), "s1".to_string()),
                ("p24_statement".to_string(), "Order 1".to_string()),
            ]
        );
    }

    fn valid() -> Vec<(String, String)> {
        [
            ("p24_merchant_id", "1"),
            ("p24_pos_id", "1"),
            ("p24_session_id", "s1"),
            ("p24_amount", "100"),
            ("p24_currency", "PLN"),
            ("p24_order_id", "9"),
            ("p24_method", "1"),
            ("p24_statement", "x"),
            ("p24_sign", "abc"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn accepts_complete_notification() {
        assert!(validate_notification(&valid()).is_ok());
    }

    #[test]
    fn reports_missing_fields() {
        let fields: Vec<_> = valid()
            .into_iter()
            .filter(|(k, _)| k != "p24_sign" && k != "p24_currency")
            .collect();

        let errors = validate_notification(&fields).unwrap_err();
        let names: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["p24_currency", "p24_sign"]);
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut fields = valid();
        fields[2].1 = "  ".to_string();

        let errors = validate_notification(&fields).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("p24_session_id", "is required")]);
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let mut fields = valid();
        fields[3].1 = "1.50".to_string();

        let errors = validate_notification(&fields).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("p24_amount", "must be an integer")]);
    }

    #[test]
    fn text_fields_need_not_be_numeric() {
        let mut fields = valid();
        fields[4].1 = "EUR".to_string();
        fields[7].1 = "Order 1".to_string();

        assert!(validate_notification(&fields).is_ok());
    }
}
