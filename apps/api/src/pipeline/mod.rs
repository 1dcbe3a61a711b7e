//! Transformation Pipeline — orchestrates completion-service calls and
//! applies the Schema Layer to whatever comes back.
//!
//! The pipeline performs no retries. A `Transport` failure is transient and
//! the caller may retry the request; a `Validation` failure means the service
//! produced a malformed or hallucinated structure and retrying the identical
//! input is pointless.

pub mod prompts;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm::{strip_json_fences, ChatMessage, CompletionModel, LlmError};
use crate::schema::{self, Document, SchemaKind, ValidationIssues};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The completion service was unreachable or errored. Retryable upstream.
    #[error("completion service failure: {0}")]
    Transport(#[from] LlmError),

    /// The completion service answered, but the structure does not conform
    /// to the target schema. Not retryable without changing the input.
    #[error("completion output failed validation: {0}")]
    Validation(ValidationIssues),
}

impl SchemaKind {
    fn shape_json(self) -> &'static str {
        match self {
            SchemaKind::Resume => prompts::RESUME_SHAPE,
            SchemaKind::TailoredCv => prompts::TAILORED_CV_SHAPE,
        }
    }
}

/// Reads raw extracted text (from an uploaded file) into the target schema.
pub async fn extract_from_text(
    model: &dyn CompletionModel,
    raw_text: &str,
    target: SchemaKind,
) -> Result<Document, PipelineError> {
    let prompt = prompts::EXTRACT_PROMPT_TEMPLATE
        .replace("{schema_shape}", target.shape_json())
        .replace("{raw_text}", raw_text);

    let messages = [
        ChatMessage::system(prompts::EXTRACT_SYSTEM),
        ChatMessage::user(prompt),
    ];

    let completion = model.complete(&messages).await?;
    validate_completion(&completion, target)
}

/// Tailors an existing validated document to a scraped job offer, producing
/// a document in the target schema.
pub async fn retarget(
    model: &dyn CompletionModel,
    existing: &Document,
    job_offer_text: &str,
    target: SchemaKind,
) -> Result<Document, PipelineError> {
    let shape = prompts::RETARGET_SHAPE_TEMPLATE.replace("{schema_shape}", target.shape_json());
    let resume_json = existing.body_json().to_string();

    let messages = [
        ChatMessage::system(prompts::RETARGET_SYSTEM),
        ChatMessage::user(shape),
        ChatMessage::user(format!("\nThis is the job offer: {job_offer_text}\n")),
        ChatMessage::user(format!("\nThis is the resume: {resume_json}\n")),
    ];

    let completion = model.complete(&messages).await?;
    validate_completion(&completion, target)
}

/// Parses the completion text and runs schema validation. Unparseable text
/// counts as a validation failure at the document root: the service answered,
/// the answer is malformed, and a retry with the same input won't help.
fn validate_completion(completion: &str, target: SchemaKind) -> Result<Document, PipelineError> {
    let text = strip_json_fences(completion);

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        PipelineError::Validation(ValidationIssues::single(
            "$",
            format!("completion is not valid JSON: {e}"),
        ))
    })?;

    let document = schema::validate(target, &raw).map_err(PipelineError::Validation)?;
    debug!("completion validated against {:?} schema", target);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Canned completion service for pipeline tests.
    struct StubModel {
        response: Result<String, fn() -> LlmError>,
    }

    impl StubModel {
        fn returning(text: impl Into<String>) -> Self {
            Self {
                response: Ok(text.into()),
            }
        }

        fn failing(err: fn() -> LlmError) -> Self {
            Self { response: Err(err) }
        }
    }

    #[async_trait]
    impl CompletionModel for StubModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn tailored_cv_json() -> String {
        json!({
            "name": "Jan",
            "surname": "Kowalski",
            "professionalTitle": "Frontend Developer",
            "contact": {"email": "jan@x.com"},
            "profile": "TypeScript developer focused on React applications.",
            "skills": ["TypeScript", "React"],
            "languages": [{"name": "Polish", "level": "Native"}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_extract_with_stub_yields_validated_document() {
        let stub = StubModel::returning(tailored_cv_json());
        let doc = extract_from_text(
            &stub,
            "Jan Kowalski, jan@x.com, Skills: TypeScript, React",
            SchemaKind::TailoredCv,
        )
        .await
        .unwrap();

        let Document::TailoredCv(cv) = doc else {
            panic!("expected tailored CV variant");
        };
        assert_eq!(cv.name, "Jan");
        assert_eq!(cv.surname, "Kowalski");
        assert_eq!(cv.skills, vec!["TypeScript", "React"]);
        assert!(cv.courses.is_none());
    }

    #[tokio::test]
    async fn test_extracted_document_renders_to_markup() {
        use crate::render::{self, ColorScheme};

        let stub = StubModel::returning(tailored_cv_json());
        let doc = extract_from_text(
            &stub,
            "Jan Kowalski, jan@x.com, Skills: TypeScript, React",
            SchemaKind::TailoredCv,
        )
        .await
        .unwrap();

        let env = render::environment();
        let html = render::render(&env, &doc, ColorScheme::Sky).unwrap();
        for expected in [
            "Jan Kowalski",
            "jan@x.com",
            "TypeScript",
            "React",
            "TypeScript developer focused on React applications.",
        ] {
            assert!(html.contains(expected), "missing '{expected}'");
        }
    }

    #[tokio::test]
    async fn test_fenced_completion_is_accepted() {
        let stub = StubModel::returning(format!("```json\n{}\n```", tailored_cv_json()));
        let doc = extract_from_text(&stub, "text", SchemaKind::TailoredCv)
            .await
            .unwrap();
        assert_eq!(doc.schema_kind(), SchemaKind::TailoredCv);
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct_from_validation() {
        let stub = StubModel::failing(|| LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });
        let err = extract_from_text(&stub, "text", SchemaKind::Resume)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transport(_)));
    }

    #[tokio::test]
    async fn test_non_json_completion_is_validation_failure_at_root() {
        let stub = StubModel::returning("Sorry, I cannot help with that.");
        let err = extract_from_text(&stub, "text", SchemaKind::Resume)
            .await
            .unwrap_err();
        let PipelineError::Validation(issues) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(issues.issues[0].path, "$");
    }

    #[tokio::test]
    async fn test_nonconforming_completion_carries_field_issues() {
        let stub = StubModel::returning(json!({"name": "Jan"}).to_string());
        let err = extract_from_text(&stub, "text", SchemaKind::TailoredCv)
            .await
            .unwrap_err();
        let PipelineError::Validation(issues) = err else {
            panic!("expected validation failure");
        };
        assert!(issues.issues.iter().any(|i| i.path == "surname"));
        assert!(issues.issues.iter().any(|i| i.path == "contact"));
    }

    #[tokio::test]
    async fn test_retarget_validates_against_target_schema() {
        let existing = schema::validate(
            SchemaKind::TailoredCv,
            &serde_json::from_str(&tailored_cv_json()).unwrap(),
        )
        .unwrap();

        // Stub echoes a tailored CV regardless of input; the pipeline must
        // still validate it against the requested schema.
        let stub = StubModel::returning(tailored_cv_json());
        let doc = retarget(&stub, &existing, "We need a React developer", SchemaKind::TailoredCv)
            .await
            .unwrap();
        assert_eq!(doc.schema_kind(), SchemaKind::TailoredCv);
    }
}
