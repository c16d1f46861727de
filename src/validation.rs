//! Declarative field rules evaluated before a write.
//!
//! Each entity owns a table of `(field, rule, message)` entries. `check` walks the
//! table against a JSON object body and collects every violated message.
//! `Unique` / `References` are enforced by the store; their messages are looked
//! up from the same table when the store reports a constraint violation.

use serde_json::{Map, Value};

use crate::repos::error::ConstraintViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present, not null, and (for strings) not blank.
    Required,
    EmailShape,
    /// String length in bytes must not exceed the bound.
    MaxBytes(usize),
    Unique,
    References,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

const fn rule(field: &'static str, rule: Rule, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        rule,
        message,
    }
}

pub const PASSWORD_MAX_BYTES: usize = 72;

pub const USER_RULES: &[FieldRule] = &[
    rule("firstName", Rule::Required, r#"Please provide a value for "first name""#),
    rule("lastName", Rule::Required, r#"Please provide a value for "last name""#),
    rule("emailAddress", Rule::Required, r#"Please provide a value for "emailAddress""#),
    rule("emailAddress", Rule::EmailShape, "Please provide a valid email address"),
    rule("emailAddress", Rule::Unique, "Sorry, Email address is already in use."),
    rule("password", Rule::Required, r#"Please provide a value for "password""#),
    // bcrypt は 72 byte 以降を無視する
    rule(
        "password",
        Rule::MaxBytes(PASSWORD_MAX_BYTES),
        "Please provide a password of at most 72 bytes",
    ),
];

pub const COURSE_RULES: &[FieldRule] = &[
    rule("title", Rule::Required, r#"Please provide a value for "title""#),
    rule("description", Rule::Required, r#"Please provide a value for "description""#),
    rule("userId", Rule::Required, r#"Please provide a value for "userId""#),
    rule(
        "userId",
        Rule::References,
        r#"Please provide a "userId" that belongs to an existing user"#,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field in the table is evaluated.
    Create,
    /// Only fields present in the body are evaluated.
    Update,
}

/// Evaluates `rules` against `body` and returns every violated message in table order.
pub fn check(rules: &[FieldRule], body: &Map<String, Value>, mode: Mode) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for r in rules {
        let value = body.get(r.field);
        if mode == Mode::Update && value.is_none() {
            continue;
        }

        // null / 欠落は Required だけを報告する
        let value = match value {
            None | Some(Value::Null) => {
                if r.rule == Rule::Required {
                    errors.push(r.message.to_string());
                }
                continue;
            }
            Some(v) => v,
        };

        let ok = match r.rule {
            Rule::Required => !is_blank(value),
            Rule::EmailShape => value.as_str().is_some_and(is_email),
            Rule::MaxBytes(max) => value.as_str().is_none_or(|s| s.len() <= max),
            Rule::Unique | Rule::References => true,
        };
        if !ok {
            errors.push(r.message.to_string());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Maps a store-level constraint violation back to the rule message for the field.
pub fn store_violation(rules: &[FieldRule], violation: &ConstraintViolation) -> Option<&'static str> {
    let (field, kind) = match violation {
        ConstraintViolation::Unique { column } => (column.as_str(), Rule::Unique),
        ConstraintViolation::NotNull { column } => (column.as_str(), Rule::Required),
        ConstraintViolation::ForeignKey => {
            return rules
                .iter()
                .find(|r| r.rule == Rule::References)
                .map(|r| r.message);
        }
    };

    rules
        .iter()
        .find(|r| r.field == field && r.rule == kind)
        .map(|r| r.message)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Syntactic email check: `local@domain.tld`, no whitespace, dotted domain
/// whose labels are alphanumeric/hyphen and do not start or end with a hyphen.
pub fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.len() > 253 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && !tld.chars().all(|c| c.is_ascii_digit()));

    labels_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn complete_user_passes() {
        let body = obj(json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
            "password": "joepassword"
        }));
        assert!(check(USER_RULES, &body, Mode::Create).is_ok());
    }

    #[test]
    fn password_longer_than_bcrypt_input_is_rejected() {
        let mut body = obj(json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
        }));

        body.insert("password".into(), json!("a".repeat(PASSWORD_MAX_BYTES)));
        assert!(check(USER_RULES, &body, Mode::Create).is_ok());

        // 2 byte 文字で 72 byte を超える
        body.insert("password".into(), json!("é".repeat(37)));
        assert_eq!(
            check(USER_RULES, &body, Mode::Create).unwrap_err(),
            vec!["Please provide a password of at most 72 bytes"]
        );
    }

    #[test]
    fn missing_fields_report_one_message_each() {
        let body = obj(json!({ "firstName": "Joe", "emailAddress": null }));
        let errors = check(USER_RULES, &body, Mode::Create).unwrap_err();
        assert_eq!(
            errors,
            vec![
                r#"Please provide a value for "last name""#,
                r#"Please provide a value for "emailAddress""#,
                r#"Please provide a value for "password""#,
            ]
        );
    }

    #[test]
    fn empty_email_fails_presence_and_shape() {
        let body = obj(json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "",
            "password": "x"
        }));
        let errors = check(USER_RULES, &body, Mode::Create).unwrap_err();
        assert_eq!(
            errors,
            vec![
                r#"Please provide a value for "emailAddress""#,
                "Please provide a valid email address",
            ]
        );
    }

    #[test]
    fn whitespace_only_is_blank() {
        let body = obj(json!({ "title": "   ", "description": "d", "userId": 1 }));
        let errors = check(COURSE_RULES, &body, Mode::Create).unwrap_err();
        assert_eq!(errors, vec![r#"Please provide a value for "title""#]);
    }

    #[test]
    fn update_mode_skips_absent_fields() {
        let body = obj(json!({ "estimatedTime": "3 hours" }));
        assert!(check(COURSE_RULES, &body, Mode::Update).is_ok());

        let body = obj(json!({ "title": "", "description": null }));
        let errors = check(COURSE_RULES, &body, Mode::Update).unwrap_err();
        assert_eq!(
            errors,
            vec![
                r#"Please provide a value for "title""#,
                r#"Please provide a value for "description""#,
            ]
        );
    }

    #[test]
    fn store_violations_map_to_rule_messages() {
        let unique = ConstraintViolation::Unique {
            column: "emailAddress".into(),
        };
        assert_eq!(
            store_violation(USER_RULES, &unique),
            Some("Sorry, Email address is already in use.")
        );

        let not_null = ConstraintViolation::NotNull {
            column: "userId".into(),
        };
        assert_eq!(
            store_violation(COURSE_RULES, &not_null),
            Some(r#"Please provide a value for "userId""#)
        );

        assert_eq!(
            store_violation(COURSE_RULES, &ConstraintViolation::ForeignKey),
            Some(r#"Please provide a "userId" that belongs to an existing user"#)
        );
        assert_eq!(store_violation(USER_RULES, &ConstraintViolation::ForeignKey), None);
    }

    #[test]
    fn email_shapes() {
        for ok in ["joe@smith.com", "a.b+tag@mail.example.org", "x_y@sub-domain.io"] {
            assert!(is_email(ok), "{ok} should be accepted");
        }
        for bad in [
            "",
            "joe",
            "joe@",
            "@smith.com",
            "joe@smith",
            "joe smith@smith.com",
            "joe..smith@smith.com",
            "joe@-smith.com",
            "joe@smith.c",
            "joe@smith..com",
        ] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
    }
}
