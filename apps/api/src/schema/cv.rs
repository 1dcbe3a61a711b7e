//! The offer-tailored CV document — a flatter shape than the general résumé,
//! matched to the colored sidebar/main-content layout.
//!
//! Deliberately a distinct type from `ResumeDocument`: the two overlap
//! semantically but renderer contracts stay precise when each renderer
//! receives exactly the shape it expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredCvDocument {
    pub name: String,
    pub surname: String,
    pub professional_title: String,
    pub contact: Contact,
    pub profile: String,
    pub skills: Vec<String>,
    pub languages: Vec<CvLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<DatedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<Vec<DatedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<CvWorkEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<CvEducationEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvLanguage {
    pub name: String,
    pub level: String,
}

/// Shared shape for courses and awards: a name plus a free-form date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedItem {
    pub name: String,
    pub date: String,
}

/// Work entries here carry a single free-form `dates` string rather than the
/// résumé's startDate/endDate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvWorkEntry {
    pub job_title: String,
    pub company_name: String,
    pub dates: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvEducationEntry {
    pub dates: String,
    pub university_name: String,
    pub location: String,
    pub degree_and_major: String,
}
