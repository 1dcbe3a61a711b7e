//! Schema Layer — the canonical document shapes and the single validation
//! entry point.
//!
//! Everything downstream (pipeline, session carrier, renderer) only ever
//! handles a `Document` that has passed `validate`. AI output is untrusted
//! input; nothing is silently coerced — a document is either fully valid or
//! rejected with the complete list of field issues.

pub mod cv;
pub mod resume;
mod shape;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub use cv::TailoredCvDocument;
pub use resume::ResumeDocument;

/// Which schema a raw value is validated against. Call sites pick the kind
/// matching their rendering target; the two are never interconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Resume,
    TailoredCv,
}

/// A validated document. Tagged so the session carrier round-trips the
/// variant without guessing from shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Resume(ResumeDocument),
    TailoredCv(TailoredCvDocument),
}

impl Document {
    pub fn schema_kind(&self) -> SchemaKind {
        match self {
            Document::Resume(_) => SchemaKind::Resume,
            Document::TailoredCv(_) => SchemaKind::TailoredCv,
        }
    }

    /// The document body without the variant tag — the shape the schemas
    /// describe and the prompts embed.
    pub fn body_json(&self) -> Value {
        match self {
            Document::Resume(doc) => serde_json::to_value(doc),
            Document::TailoredCv(doc) => serde_json::to_value(doc),
        }
        .unwrap_or(Value::Null)
    }
}

/// One field-level validation problem: where and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: String,
    pub reason: String,
}

/// The complete set of issues found in one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssues {
    pub issues: Vec<FieldIssue>,
}

impl ValidationIssues {
    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                path: path.into(),
                reason: reason.into(),
            }],
        }
    }
}

impl std::fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.path, issue.reason)?;
        }
        Ok(())
    }
}

/// Validates a raw JSON value against the target schema.
///
/// Pure and deterministic: identical input always yields an identical
/// verdict. Normal malformed input never panics — it comes back as issues.
pub fn validate(kind: SchemaKind, raw: &Value) -> Result<Document, ValidationIssues> {
    let issues = shape::check(kind, raw);
    if !issues.is_empty() {
        return Err(ValidationIssues { issues });
    }

    // The structural pass covers every constraint the schemas state, so the
    // typed decode is expected to succeed here. Any residual failure still
    // surfaces as an issue with its path rather than a panic.
    match kind {
        SchemaKind::Resume => decode::<ResumeDocument>(raw).map(Document::Resume),
        SchemaKind::TailoredCv => decode::<TailoredCvDocument>(raw).map(Document::TailoredCv),
    }
}

fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T, ValidationIssues> {
    serde_path_to_error::deserialize::<_, T>(raw.clone())
        .map_err(|e| ValidationIssues::single(e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_resume_value() -> Value {
        json!({
            "personalInformation": {
                "firstName": "Jan",
                "lastName": "Kowalski",
                "email": "jan@x.com",
                "phone": "+48 600 000 000",
                "address": {
                    "street": "Marszalkowska 1",
                    "city": "Warsaw",
                    "state": "Mazowieckie",
                    "postalCode": "00-001",
                    "country": "Poland"
                },
                "links": {"github": "github.com/jank"}
            },
            "summary": {"text": "Frontend developer with 5 years of experience."},
            "workExperience": [{
                "jobTitle": "Frontend Developer",
                "company": "Acme",
                "location": "Warsaw",
                "startDate": "2021-03",
                "responsibilities": ["Built the design system"],
                "achievements": ["Cut bundle size by 40%"]
            }],
            "skills": {"technicalSkills": ["TypeScript", "React"]},
            "languages": [{"language": "Polish", "proficiency": "Native"}]
        })
    }

    #[test]
    fn test_valid_resume_validates() {
        let doc = validate(SchemaKind::Resume, &valid_resume_value()).unwrap();
        let Document::Resume(resume) = doc else {
            panic!("expected resume variant");
        };
        assert_eq!(resume.personal_information.first_name, "Jan");
        assert_eq!(
            resume.work_experience.as_ref().unwrap()[0].end_date,
            None,
            "absent endDate must stay absent"
        );
    }

    #[test]
    fn test_validation_is_deterministic_and_idempotent() {
        let raw = valid_resume_value();
        let first = validate(SchemaKind::Resume, &raw).unwrap();
        let second = validate(SchemaKind::Resume, &raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_serialize_then_validate_is_identity() {
        let doc = validate(SchemaKind::Resume, &valid_resume_value()).unwrap();
        let reserialized = doc.body_json();
        let again = validate(SchemaKind::Resume, &reserialized).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn test_invalid_email_rejected_not_coerced() {
        let mut raw = valid_resume_value();
        raw["personalInformation"]["email"] = json!("not-an-email");
        let err = validate(SchemaKind::Resume, &raw).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "personalInformation.email");
    }

    #[test]
    fn test_partially_valid_document_is_rejected_whole() {
        let mut raw = valid_resume_value();
        raw["languages"] = json!([{"language": "Polish", "proficiency": "Expert"}]);
        raw["personalInformation"]["phone"] = json!(12345);
        let err = validate(SchemaKind::Resume, &raw).unwrap_err();
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn test_tailored_cv_round_trip() {
        let raw = json!({
            "name": "Jan",
            "surname": "Kowalski",
            "professionalTitle": "Frontend Developer",
            "contact": {"email": "jan@x.com", "phone": "+48 600 000 000"},
            "profile": "Ships accessible UIs.",
            "skills": ["TypeScript", "React"],
            "languages": [{"name": "Polish", "level": "Native"}],
            "workExperience": [{
                "jobTitle": "Frontend Developer",
                "companyName": "Acme",
                "dates": "2021 - 2024",
                "responsibilities": ["Built the design system"]
            }]
        });
        let doc = validate(SchemaKind::TailoredCv, &raw).unwrap();
        assert_eq!(doc.schema_kind(), SchemaKind::TailoredCv);
        let again = validate(SchemaKind::TailoredCv, &doc.body_json()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn test_document_tag_round_trips_through_session_serialization() {
        let doc = validate(SchemaKind::Resume, &valid_resume_value()).unwrap();
        let stored = serde_json::to_string(&doc).unwrap();
        assert!(stored.contains("\"kind\":\"resume\""));
        let loaded: Document = serde_json::from_str(&stored).unwrap();
        assert_eq!(doc, loaded);
    }
}
