//! Axum route handlers for the CV flow: upload a résumé, retarget it to a
//! job offer, view the rendered page, export it as PDF.

use axum::{
    extract::{Multipart, Query, State},
    http::header::{self, HeaderName},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::text_from_upload;
use crate::render::{self, ColorScheme};
use crate::schema::SchemaKind;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;
use crate::{browser, pipeline};

const UPLOAD_FIELD: &str = "file-upload";
const DEFAULT_SCHEME: &str = "sky";

#[derive(Debug, Deserialize)]
pub struct RetargetForm {
    pub offer_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub scheme: Option<String>,
}

/// Reuses the caller's session cookie or mints a fresh one.
fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let sid = cookie.value().to_string();
        return (jar, sid);
    }
    let sid = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, sid.clone()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), sid)
}

fn scheme_from_query(query: &RenderQuery) -> Result<ColorScheme, AppError> {
    ColorScheme::from_name(query.scheme.as_deref().unwrap_or(DEFAULT_SCHEME))
}

/// POST /api/v1/cv/upload
///
/// Multipart résumé upload: extract text, normalize into the résumé schema
/// via the pipeline, carry the validated document in the session.
pub async fn handle_upload(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UserInput(format!("malformed upload: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::UserInput(format!("could not read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(AppError::UserInput("No file uploaded".to_string()));
    };

    let text = tokio::task::spawn_blocking(move || text_from_upload(&filename, &bytes))
        .await
        .map_err(|e| anyhow::anyhow!("extraction task panicked: {e}"))??;

    let document =
        pipeline::extract_from_text(state.llm.as_ref(), &text, SchemaKind::Resume).await?;

    let (jar, sid) = ensure_session(jar);
    state.sessions.put_document(&sid, &document).await?;

    Ok((jar, Redirect::to("/api/v1/cv/current")))
}

/// POST /api/v1/cv/retarget
///
/// Scrapes the job offer, tailors the carried résumé to it, and replaces
/// the session document with the tailored CV.
pub async fn handle_retarget(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RetargetForm>,
) -> Result<Redirect, AppError> {
    let url = form.offer_url.trim();
    if url.is_empty() {
        return Err(AppError::UserInput("offer_url cannot be empty".to_string()));
    }

    let sid = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let existing = state
        .sessions
        .document(&sid)
        .await?
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let offer_text = browser::page_text(url)
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    let tailored =
        pipeline::retarget(state.llm.as_ref(), &existing, &offer_text, SchemaKind::TailoredCv)
            .await?;

    // The tailored CV supersedes the uploaded résumé; one read-then-write
    // step within this request.
    state.sessions.clear_document(&sid).await?;
    state.sessions.put_document(&sid, &tailored).await?;

    Ok(Redirect::to("/api/v1/cv/current"))
}

/// GET /api/v1/cv/current?scheme=sky
///
/// Renders the carried document as an HTML page.
pub async fn handle_current(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, AppError> {
    let scheme = scheme_from_query(&query)?;

    let sid = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let document = state
        .sessions
        .document(&sid)
        .await?
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let markup = render::render(&state.templates, &document, scheme)?;
    Ok(Html(markup))
}

/// GET /api/v1/cv/export?scheme=sky
///
/// Renders the carried document and prints it to PDF bytes.
pub async fn handle_export(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<RenderQuery>,
) -> Result<([(HeaderName, String); 2], Vec<u8>), AppError> {
    let scheme = scheme_from_query(&query)?;

    let sid = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let document = state
        .sessions
        .document(&sid)
        .await?
        .ok_or_else(|| AppError::NotFound("No CV data found".to_string()))?;

    let markup = render::render(&state.templates, &document, scheme)?;
    let pdf = browser::html_to_pdf(markup)
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"cv-{}.pdf\"", scheme.name()),
            ),
        ],
        pdf,
    ))
}
