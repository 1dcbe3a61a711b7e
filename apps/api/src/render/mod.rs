//! Rendering Layer — pure mapping from a validated document plus a color
//! scheme to presentational HTML. No I/O, no external calls; identical
//! inputs always produce identical markup.
//!
//! Section policy: an optional field absent from the document is omitted
//! entirely (no empty headers); a present-but-empty sequence renders its
//! header with no items. The templates enforce this with `is defined`
//! guards, which is why serialization skips absent optionals.

use minijinja::{context, Environment};

use crate::errors::AppError;
use crate::schema::Document;

/// Named palette for the rendered page: a line color plus a background
/// color. Unrecognized names are a caller error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Sky,
    Indygo,
    Fuchsia,
}

impl ColorScheme {
    pub fn from_name(name: &str) -> Result<Self, AppError> {
        match name {
            "sky" => Ok(ColorScheme::Sky),
            "indygo" => Ok(ColorScheme::Indygo),
            "fuchsia" => Ok(ColorScheme::Fuchsia),
            other => Err(AppError::UserInput(format!(
                "unknown color scheme '{other}' (expected one of: sky, indygo, fuchsia)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Sky => "sky",
            ColorScheme::Indygo => "indygo",
            ColorScheme::Fuchsia => "fuchsia",
        }
    }

    pub fn line_color(self) -> &'static str {
        match self {
            ColorScheme::Sky => "#075985",
            ColorScheme::Indygo => "#3730A3",
            ColorScheme::Fuchsia => "#86198F",
        }
    }

    pub fn background_color(self) -> &'static str {
        match self {
            ColorScheme::Sky => "#E0F2FE",
            ColorScheme::Indygo => "#EEF2FF",
            ColorScheme::Fuchsia => "#FDF4FF",
        }
    }
}

const RESUME_TEMPLATE: &str = include_str!("../../templates/resume.html");
const CV_TEMPLATE: &str = include_str!("../../templates/cv.html");

/// Builds the template environment once at startup; it is cloned into the
/// shared app state.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("resume.html", RESUME_TEMPLATE)
        .expect("resume template must parse");
    env.add_template("cv.html", CV_TEMPLATE)
        .expect("cv template must parse");
    env
}

/// Renders a validated document with the given palette. The template is
/// picked by document variant; each template consumes exactly its schema.
pub fn render(
    env: &Environment<'_>,
    document: &Document,
    scheme: ColorScheme,
) -> Result<String, AppError> {
    let template_name = match document {
        Document::Resume(_) => "resume.html",
        Document::TailoredCv(_) => "cv.html",
    };

    let template = env
        .get_template(template_name)
        .map_err(|e| AppError::Render(e.to_string()))?;

    template
        .render(context! {
            doc => document.body_json(),
            line_color => scheme.line_color(),
            background_color => scheme.background_color(),
        })
        .map_err(|e| AppError::Render(e.to_string()))
}
