//! Structural checker for raw AI output.
//!
//! serde stops at the first decode failure, which is useless feedback for a
//! document assembled by a language model. This pass walks the raw JSON value
//! against the target schema and collects *every* field issue before the
//! typed decode runs. The decode in `schema::validate` only executes once
//! this walk reports zero issues.
//!
//! Null handling is stricter than serde's default: an optional field set to
//! explicit `null` is an issue. Absent is valid, an empty array is valid,
//! and the two stay distinguishable.

use serde_json::{Map, Value};

use super::{FieldIssue, SchemaKind};

pub const PROFICIENCY_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Fluent", "Native"];

pub fn check(kind: SchemaKind, raw: &Value) -> Vec<FieldIssue> {
    let mut c = Checker::default();
    match kind {
        SchemaKind::Resume => check_resume(&mut c, raw),
        SchemaKind::TailoredCv => check_tailored_cv(&mut c, raw),
    }
    c.issues
}

#[derive(Default)]
struct Checker {
    issues: Vec<FieldIssue>,
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

impl Checker {
    fn issue(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// The value at `path` must be a JSON object.
    fn as_object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.issue(path, format!("expected an object, got {}", type_name(other)));
                None
            }
        }
    }

    fn required_object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        let field = join(path, key);
        match obj.get(key) {
            None => {
                self.issue(field, "required object is missing");
                None
            }
            Some(Value::Null) => {
                self.issue(field, "required object must not be null");
                None
            }
            Some(v) => self.as_object(v, &field),
        }
    }

    fn optional_object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        let field = join(path, key);
        match obj.get(key) {
            None => None,
            Some(Value::Null) => {
                self.issue(field, "optional field must be omitted, not null");
                None
            }
            Some(v) => self.as_object(v, &field),
        }
    }

    fn required_string(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        let field = join(path, key);
        match obj.get(key) {
            None => self.issue(field, "required string is missing"),
            Some(Value::String(_)) => {}
            Some(Value::Null) => self.issue(field, "required string must not be null"),
            Some(other) => {
                self.issue(field, format!("expected a string, got {}", type_name(other)))
            }
        }
    }

    fn optional_string(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        let field = join(path, key);
        match obj.get(key) {
            None | Some(Value::String(_)) => {}
            Some(Value::Null) => self.issue(field, "optional field must be omitted, not null"),
            Some(other) => {
                self.issue(field, format!("expected a string, got {}", type_name(other)))
            }
        }
    }

    fn required_email(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        let field = join(path, key);
        match obj.get(key) {
            None => self.issue(field, "required string is missing"),
            Some(Value::String(s)) => {
                if !validator::validate_email(s) {
                    self.issue(field, format!("'{s}' is not a valid email address"));
                }
            }
            Some(Value::Null) => self.issue(field, "required string must not be null"),
            Some(other) => {
                self.issue(field, format!("expected a string, got {}", type_name(other)))
            }
        }
    }

    fn required_string_array(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        let field = join(path, key);
        match obj.get(key) {
            None => self.issue(field, "required array is missing"),
            Some(Value::Null) => self.issue(field, "required array must not be null"),
            Some(Value::Array(items)) => self.string_items(&field, items),
            Some(other) => {
                self.issue(field, format!("expected an array, got {}", type_name(other)))
            }
        }
    }

    fn optional_string_array(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        let field = join(path, key);
        match obj.get(key) {
            None => {}
            Some(Value::Null) => self.issue(field, "optional field must be omitted, not null"),
            Some(Value::Array(items)) => self.string_items(&field, items),
            Some(other) => {
                self.issue(field, format!("expected an array, got {}", type_name(other)))
            }
        }
    }

    fn string_items(&mut self, field: &str, items: &[Value]) {
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                self.issue(
                    format!("{field}[{i}]"),
                    format!("expected a string, got {}", type_name(item)),
                );
            }
        }
    }

    /// A required sequence of objects; runs `check_item` per element.
    fn required_seq(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
        check_item: impl Fn(&mut Checker, &Map<String, Value>, &str),
    ) {
        let field = join(path, key);
        match obj.get(key) {
            None => self.issue(field, "required array is missing"),
            Some(Value::Null) => self.issue(field, "required array must not be null"),
            Some(Value::Array(items)) => self.seq_items(&field, items, check_item),
            Some(other) => {
                self.issue(field, format!("expected an array, got {}", type_name(other)))
            }
        }
    }

    /// An optional sequence of objects. Absent is fine; explicit null is not.
    fn optional_seq(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
        check_item: impl Fn(&mut Checker, &Map<String, Value>, &str),
    ) {
        let field = join(path, key);
        match obj.get(key) {
            None => {}
            Some(Value::Null) => self.issue(field, "optional field must be omitted, not null"),
            Some(Value::Array(items)) => self.seq_items(&field, items, check_item),
            Some(other) => {
                self.issue(field, format!("expected an array, got {}", type_name(other)))
            }
        }
    }

    fn seq_items(
        &mut self,
        field: &str,
        items: &[Value],
        check_item: impl Fn(&mut Checker, &Map<String, Value>, &str),
    ) {
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{field}[{i}]");
            if let Some(map) = self.as_object(item, &item_path) {
                check_item(self, map, &item_path);
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeDocument
// ────────────────────────────────────────────────────────────────────────────

fn check_resume(c: &mut Checker, raw: &Value) {
    let Some(root) = c.as_object(raw, "$") else {
        return;
    };

    if let Some(pi) = c.required_object(root, "", "personalInformation") {
        let p = "personalInformation";
        c.required_string(pi, p, "firstName");
        c.required_string(pi, p, "lastName");
        c.required_email(pi, p, "email");
        c.required_string(pi, p, "phone");
        if let Some(addr) = c.required_object(pi, p, "address") {
            let a = join(p, "address");
            for key in ["street", "city", "state", "postalCode", "country"] {
                c.required_string(addr, &a, key);
            }
        }
        if let Some(links) = c.optional_object(pi, p, "links") {
            let l = join(p, "links");
            for key in ["linkedin", "github", "portfolio"] {
                c.optional_string(links, &l, key);
            }
        }
    }

    if let Some(summary) = c.optional_object(root, "", "summary") {
        c.required_string(summary, "summary", "text");
    }

    c.optional_seq(root, "", "workExperience", |c, entry, path| {
        c.required_string(entry, path, "jobTitle");
        c.required_string(entry, path, "company");
        c.required_string(entry, path, "location");
        c.required_string(entry, path, "startDate");
        c.optional_string(entry, path, "endDate");
        c.required_string_array(entry, path, "responsibilities");
        c.optional_string_array(entry, path, "achievements");
    });

    c.optional_seq(root, "", "education", |c, entry, path| {
        c.required_string(entry, path, "degree");
        c.required_string(entry, path, "institution");
        c.required_string(entry, path, "location");
        c.required_string(entry, path, "startDate");
        c.required_string(entry, path, "endDate");
        c.optional_string(entry, path, "gpa");
        c.optional_string_array(entry, path, "relevantCourses");
    });

    if let Some(skills) = c.optional_object(root, "", "skills") {
        c.required_string_array(skills, "skills", "technicalSkills");
        c.optional_string_array(skills, "skills", "softSkills");
    }

    c.optional_seq(root, "", "certifications", |c, entry, path| {
        c.required_string(entry, path, "title");
        c.required_string(entry, path, "issuer");
        c.required_string(entry, path, "date");
        c.optional_string(entry, path, "url");
    });

    c.optional_seq(root, "", "projects", |c, entry, path| {
        c.required_string(entry, path, "name");
        c.required_string(entry, path, "description");
        c.optional_string(entry, path, "url");
        c.required_string_array(entry, path, "technologies");
    });

    c.optional_seq(root, "", "languages", |c, entry, path| {
        c.required_string(entry, path, "language");
        let field = join(path, "proficiency");
        match entry.get("proficiency") {
            None => c.issue(field, "required string is missing"),
            Some(Value::String(s)) if PROFICIENCY_LEVELS.contains(&s.as_str()) => {}
            Some(Value::String(s)) => c.issue(
                field,
                format!(
                    "'{s}' is not a valid proficiency (expected one of: {})",
                    PROFICIENCY_LEVELS.join(", ")
                ),
            ),
            Some(other) => c.issue(field, format!("expected a string, got {}", type_name(other))),
        }
    });

    c.optional_seq(root, "", "volunteerExperience", |c, entry, path| {
        c.required_string(entry, path, "role");
        c.required_string(entry, path, "organization");
        c.required_string(entry, path, "location");
        c.required_string(entry, path, "startDate");
        c.optional_string(entry, path, "endDate");
        c.required_string_array(entry, path, "responsibilities");
    });

    c.optional_seq(root, "", "publications", |c, entry, path| {
        c.required_string(entry, path, "title");
        c.required_string(entry, path, "publication");
        c.required_string(entry, path, "date");
        c.optional_string(entry, path, "url");
    });
}

// ────────────────────────────────────────────────────────────────────────────
// TailoredCvDocument
// ────────────────────────────────────────────────────────────────────────────

fn check_tailored_cv(c: &mut Checker, raw: &Value) {
    let Some(root) = c.as_object(raw, "$") else {
        return;
    };

    c.required_string(root, "", "name");
    c.required_string(root, "", "surname");
    c.required_string(root, "", "professionalTitle");

    if let Some(contact) = c.required_object(root, "", "contact") {
        c.optional_string(contact, "contact", "phone");
        c.required_email(contact, "contact", "email");
        c.optional_string(contact, "contact", "linkedin");
        c.optional_string(contact, "contact", "portfolio");
    }

    c.required_string(root, "", "profile");
    c.required_string_array(root, "", "skills");

    c.required_seq(root, "", "languages", |c, entry, path| {
        c.required_string(entry, path, "name");
        c.required_string(entry, path, "level");
    });

    for key in ["courses", "awards"] {
        c.optional_seq(root, "", key, |c, entry, path| {
            c.required_string(entry, path, "name");
            c.required_string(entry, path, "date");
        });
    }

    c.optional_seq(root, "", "workExperience", |c, entry, path| {
        c.required_string(entry, path, "jobTitle");
        c.required_string(entry, path, "companyName");
        c.required_string(entry, path, "dates");
        c.required_string_array(entry, path, "responsibilities");
    });

    c.optional_seq(root, "", "education", |c, entry, path| {
        c.required_string(entry, path, "dates");
        c.required_string(entry, path, "universityName");
        c.required_string(entry, path, "location");
        c.required_string(entry, path, "degreeAndMajor");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(issues: &[FieldIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_non_object_root_is_single_issue() {
        let issues = check(SchemaKind::Resume, &json!("not a document"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$");
    }

    #[test]
    fn test_missing_personal_information() {
        let issues = check(SchemaKind::Resume, &json!({}));
        assert_eq!(paths(&issues), vec!["personalInformation"]);
    }

    #[test]
    fn test_collects_multiple_issues_in_one_pass() {
        let raw = json!({
            "personalInformation": {
                "firstName": "Jan",
                "lastName": "Kowalski",
                "email": "not-an-email",
                "phone": 42,
                "address": {
                    "street": "Main 1", "city": "Warsaw", "state": "MZ",
                    "postalCode": "00-001", "country": "PL"
                }
            },
            "workExperience": null
        });
        let issues = check(SchemaKind::Resume, &raw);
        let found = paths(&issues);
        assert!(found.contains(&"personalInformation.email"));
        assert!(found.contains(&"personalInformation.phone"));
        assert!(found.contains(&"workExperience"));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_null_optional_collection_rejected_but_empty_and_absent_ok() {
        let base = json!({
            "personalInformation": {
                "firstName": "A", "lastName": "B", "email": "a@b.com", "phone": "1",
                "address": {
                    "street": "s", "city": "c", "state": "st",
                    "postalCode": "p", "country": "pl"
                }
            }
        });

        assert!(check(SchemaKind::Resume, &base).is_empty());

        let mut empty = base.clone();
        empty["projects"] = json!([]);
        assert!(check(SchemaKind::Resume, &empty).is_empty());

        let mut null = base;
        null["projects"] = Value::Null;
        let issues = check(SchemaKind::Resume, &null);
        assert_eq!(paths(&issues), vec!["projects"]);
        assert!(issues[0].reason.contains("omitted, not null"));
    }

    #[test]
    fn test_proficiency_outside_enumeration_names_the_field() {
        let raw = json!({
            "personalInformation": {
                "firstName": "A", "lastName": "B", "email": "a@b.com", "phone": "1",
                "address": {
                    "street": "s", "city": "c", "state": "st",
                    "postalCode": "p", "country": "pl"
                }
            },
            "languages": [{"language": "Polish", "proficiency": "Godlike"}]
        });
        let issues = check(SchemaKind::Resume, &raw);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "languages[0].proficiency");
        assert!(issues[0].reason.contains("Godlike"));
        assert!(issues[0].reason.contains("Native"));
    }

    #[test]
    fn test_work_entry_without_end_date_is_valid() {
        let raw = json!({
            "personalInformation": {
                "firstName": "A", "lastName": "B", "email": "a@b.com", "phone": "1",
                "address": {
                    "street": "s", "city": "c", "state": "st",
                    "postalCode": "p", "country": "pl"
                }
            },
            "workExperience": [{
                "jobTitle": "Engineer", "company": "Acme", "location": "Remote",
                "startDate": "2021-01", "responsibilities": ["Ship"]
            }]
        });
        assert!(check(SchemaKind::Resume, &raw).is_empty());
    }

    #[test]
    fn test_tailored_cv_minimal_valid() {
        let raw = json!({
            "name": "Jan", "surname": "Kowalski", "professionalTitle": "Developer",
            "contact": {"email": "jan@x.com"},
            "profile": "Builds things.",
            "skills": ["TypeScript", "React"],
            "languages": [{"name": "Polish", "level": "Native"}]
        });
        assert!(check(SchemaKind::TailoredCv, &raw).is_empty());
    }

    #[test]
    fn test_tailored_cv_missing_required_fields_all_reported() {
        let issues = check(SchemaKind::TailoredCv, &json!({"name": "Jan"}));
        let found = paths(&issues);
        for expected in [
            "surname",
            "professionalTitle",
            "contact",
            "profile",
            "skills",
            "languages",
        ] {
            assert!(found.contains(&expected), "missing issue for {expected}");
        }
    }

    #[test]
    fn test_tailored_cv_bad_email_reported_with_path() {
        let raw = json!({
            "name": "Jan", "surname": "Kowalski", "professionalTitle": "Developer",
            "contact": {"email": "jan-at-x"},
            "profile": "p",
            "skills": [],
            "languages": []
        });
        let issues = check(SchemaKind::TailoredCv, &raw);
        assert_eq!(paths(&issues), vec!["contact.email"]);
    }

    #[test]
    fn test_array_item_wrong_type_indexed_path() {
        let raw = json!({
            "name": "Jan", "surname": "K", "professionalTitle": "Dev",
            "contact": {"email": "jan@x.com"},
            "profile": "p",
            "skills": ["ok", 7],
            "languages": []
        });
        let issues = check(SchemaKind::TailoredCv, &raw);
        assert_eq!(paths(&issues), vec!["skills[1]"]);
    }
}
