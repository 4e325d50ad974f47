use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;
use validator::ValidateEmail;

/// Ordered mapping from field path to human-readable rejection reason.
/// An empty mapping means the body is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Optional leading +, then 7 to 15 digits.
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone number pattern"));

/// Checks that a path id is non-empty and well-formed, returning the parsed
/// id so callers never hit the database with a malformed one.
pub fn validate_id(id: &str) -> Option<Uuid> {
    if id.is_empty() {
        return None;
    }
    Uuid::parse_str(id).ok()
}

/// Validates a create request body. All required fields must be present;
/// per field the first failing rule wins, independent fields accumulate.
pub fn validate_create(body: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match field(body, "name") {
        None => {
            errors.insert("name".into(), "Name is required".into());
        }
        Some(value) => {
            if let Some(message) = string_rules(value, "Name", 2, 40) {
                errors.insert("name".into(), message);
            }
        }
    }

    if let Some(value) = field(body, "description") {
        if let Some(message) = string_rules(value, "Description", 2, 250) {
            errors.insert("description".into(), message);
        }
    }

    match field(body, "contact") {
        None => {
            errors.insert("contact".into(), "Contact is required".into());
        }
        Some(contact) if !contact.is_object() => {
            errors.insert("contact".into(), "Contact must be an object".into());
        }
        Some(contact) => {
            match field(contact, "firstname") {
                None => {
                    errors.insert("contact.firstname".into(), "Firstname is required".into());
                }
                Some(value) => {
                    if let Some(message) = string_rules(value, "Firstname", 2, 20) {
                        errors.insert("contact.firstname".into(), message);
                    }
                }
            }

            match field(contact, "lastname") {
                None => {
                    errors.insert("contact.lastname".into(), "Lastname is required".into());
                }
                Some(value) => {
                    if let Some(message) = string_rules(value, "Lastname", 2, 20) {
                        errors.insert("contact.lastname".into(), message);
                    }
                }
            }

            match field(contact, "email") {
                None => {
                    errors.insert("contact.email".into(), "Email is required".into());
                }
                Some(value) => {
                    if let Some(message) = email_rules(value) {
                        errors.insert("contact.email".into(), message);
                    }
                }
            }

            if let Some(value) = field(contact, "phoneNumber") {
                if let Some(message) = phone_rules(value) {
                    errors.insert("contact.phoneNumber".into(), message);
                }
            }
        }
    }

    if let Some(value) = field(body, "logo") {
        if let Some(message) = string_rules(value, "Logo", 2, 250) {
            errors.insert("logo".into(), message);
        }
    }

    errors
}

/// Validates an update request body. Every field is optional but must pass
/// the same rules as on create when present.
pub fn validate_update(body: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(value) = field(body, "name") {
        if let Some(message) = string_rules(value, "Name", 2, 40) {
            errors.insert("name".into(), message);
        }
    }

    if let Some(value) = field(body, "description") {
        if let Some(message) = string_rules(value, "Description", 2, 250) {
            errors.insert("description".into(), message);
        }
    }

    match field(body, "contact") {
        None => {}
        Some(contact) if !contact.is_object() => {
            errors.insert("contact".into(), "Contact must be an object".into());
        }
        Some(contact) => {
            if let Some(value) = field(contact, "firstname") {
                if let Some(message) = string_rules(value, "Firstname", 2, 20) {
                    errors.insert("contact.firstname".into(), message);
                }
            }

            if let Some(value) = field(contact, "lastname") {
                if let Some(message) = string_rules(value, "Lastname", 2, 20) {
                    errors.insert("contact.lastname".into(), message);
                }
            }

            if let Some(value) = field(contact, "email") {
                if let Some(message) = email_rules(value) {
                    errors.insert("contact.email".into(), message);
                }
            }

            if let Some(value) = field(contact, "phoneNumber") {
                if let Some(message) = phone_rules(value) {
                    errors.insert("contact.phoneNumber".into(), message);
                }
            }
        }
    }

    if let Some(value) = field(body, "logo") {
        if let Some(message) = string_rules(value, "Logo", 2, 250) {
            errors.insert("logo".into(), message);
        }
    }

    errors
}

/// JSON `null` counts as absent.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    match body.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn string_rules(value: &Value, label: &str, min: usize, max: usize) -> Option<String> {
    let Some(text) = value.as_str() else {
        return Some(format!("{label} must be a string"));
    };
    if text.trim().is_empty() {
        return Some(format!("{label} cannot be an empty string"));
    }
    let length = text.chars().count();
    if length < min || length > max {
        return Some(format!("{label} must be between {min} and {max} characters"));
    }
    None
}

fn email_rules(value: &Value) -> Option<String> {
    let Some(text) = value.as_str() else {
        return Some("Email must be a string".into());
    };
    if !text.validate_email() {
        return Some("Email must be a valid email address".into());
    }
    None
}

fn phone_rules(value: &Value) -> Option<String> {
    let Some(text) = value.as_str() else {
        return Some("Phone number must be a string".into());
    };
    if !PHONE_NUMBER.is_match(text) {
        return Some("Phone number must be a valid phone number".into());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_create_body() -> Value {
        json!({
            "name": "Company1",
            "description": "IT company that makes simple websites",
            "contact": {
                "firstname": "John",
                "lastname": "Doe",
                "email": "JohnDoe@mail.com",
                "phoneNumber": "0643724597"
            },
            "logo": "https://mylogo.nl/logo.png"
        })
    }

    #[test]
    fn accepts_a_complete_body() {
        assert!(validate_create(&valid_create_body()).is_empty());
    }

    #[test]
    fn accepts_a_body_without_optional_fields() {
        let body = json!({
            "name": "Company1",
            "contact": {
                "firstname": "John",
                "lastname": "Doe",
                "email": "JohnDoe@mail.com"
            }
        });
        assert!(validate_create(&body).is_empty());
    }

    #[test]
    fn requires_name_on_create() {
        let mut body = valid_create_body();
        body.as_object_mut().unwrap().remove("name");

        let errors = validate_create(&body);
        assert_eq!(errors.get("name").unwrap(), "Name is required");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_a_non_string_name() {
        let mut body = valid_create_body();
        body["name"] = json!(42);

        let errors = validate_create(&body);
        assert_eq!(errors.get("name").unwrap(), "Name must be a string");
    }

    #[test]
    fn rejects_a_blank_name() {
        let mut body = valid_create_body();
        body["name"] = json!("   ");

        let errors = validate_create(&body);
        assert_eq!(errors.get("name").unwrap(), "Name cannot be an empty string");
    }

    #[test]
    fn rejects_a_name_outside_its_length_bounds() {
        let mut body = valid_create_body();
        body["name"] = json!("C");
        assert_eq!(
            validate_create(&body).get("name").unwrap(),
            "Name must be between 2 and 40 characters"
        );

        body["name"] = json!("C".repeat(41));
        assert!(validate_create(&body).contains_key("name"));
    }

    #[test]
    fn requires_the_contact_object_on_create() {
        let mut body = valid_create_body();
        body.as_object_mut().unwrap().remove("contact");

        let errors = validate_create(&body);
        assert_eq!(errors.get("contact").unwrap(), "Contact is required");
    }

    #[test]
    fn rejects_a_non_object_contact() {
        let mut body = valid_create_body();
        body["contact"] = json!("John Doe");

        let errors = validate_create(&body);
        assert_eq!(errors.get("contact").unwrap(), "Contact must be an object");
    }

    #[test]
    fn requires_the_contact_subfields_on_create() {
        let body = json!({ "name": "Company1", "contact": {} });

        let errors = validate_create(&body);
        assert_eq!(errors.get("contact.firstname").unwrap(), "Firstname is required");
        assert_eq!(errors.get("contact.lastname").unwrap(), "Lastname is required");
        assert_eq!(errors.get("contact.email").unwrap(), "Email is required");
        assert!(!errors.contains_key("contact.phoneNumber"));
    }

    #[test]
    fn rejects_a_malformed_email() {
        let mut body = valid_create_body();
        body["contact"]["email"] = json!("not-an-email");

        let errors = validate_create(&body);
        assert_eq!(
            errors.get("contact.email").unwrap(),
            "Email must be a valid email address"
        );
    }

    #[test]
    fn rejects_a_malformed_phone_number() {
        let mut body = valid_create_body();
        body["contact"]["phoneNumber"] = json!("call me maybe");

        let errors = validate_create(&body);
        assert_eq!(
            errors.get("contact.phoneNumber").unwrap(),
            "Phone number must be a valid phone number"
        );
    }

    #[test]
    fn accepts_an_international_phone_number() {
        let mut body = valid_create_body();
        body["contact"]["phoneNumber"] = json!("+31643724597");
        assert!(validate_create(&body).is_empty());
    }

    #[test]
    fn accumulates_errors_across_independent_fields() {
        let body = json!({
            "description": "x",
            "contact": { "firstname": "J", "email": "nope" },
            "logo": 7
        });

        let errors = validate_create(&body);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("description"));
        assert!(errors.contains_key("contact.firstname"));
        assert!(errors.contains_key("contact.lastname"));
        assert!(errors.contains_key("contact.email"));
        assert!(errors.contains_key("logo"));
    }

    #[test]
    fn treats_null_as_absent() {
        let mut body = valid_create_body();
        body["name"] = Value::Null;

        let errors = validate_create(&body);
        assert_eq!(errors.get("name").unwrap(), "Name is required");
    }

    #[test]
    fn update_accepts_an_empty_object() {
        assert!(validate_update(&json!({})).is_empty());
    }

    #[test]
    fn update_accepts_a_partial_contact() {
        let body = json!({ "contact": { "firstname": "Jo" } });
        assert!(validate_update(&body).is_empty());
    }

    #[test]
    fn update_still_validates_present_fields() {
        let body = json!({
            "name": "",
            "contact": { "email": "not-an-email" }
        });

        let errors = validate_update(&body);
        assert_eq!(errors.get("name").unwrap(), "Name cannot be an empty string");
        assert_eq!(
            errors.get("contact.email").unwrap(),
            "Email must be a valid email address"
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn update_does_not_require_anything() {
        let body = json!({ "description": "A fine description" });
        assert!(validate_update(&body).is_empty());
    }

    #[test]
    fn id_must_be_a_well_formed_uuid() {
        assert!(validate_id("d40a6ad2-8518-4bd5-af9a-1edf073544ec").is_some());
        assert!(validate_id("").is_none());
        assert!(validate_id("not-a-uuid").is_none());
        assert!(validate_id("d40a6ad2-8518-4bd5-af9a").is_none());
    }
}
