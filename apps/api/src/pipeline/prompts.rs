// All LLM prompt constants for the Transformation Pipeline.
// Each prompt embeds the exact JSON shape the response must match; the
// response is still validated against the Schema Layer before use.

/// System prompt for reading extracted résumé text into the schema.
pub const EXTRACT_SYSTEM: &str =
    "You will be provided with text parsed from a resume file. \
    Your task is to read the text and fill out the schema as per the information in it. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts that are not present in the text. \
    Omit optional fields entirely when the text has no information for them; \
    never set a field to null.";

/// Extraction prompt template. Replace `{schema_shape}` and `{raw_text}`.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Fill out this EXACT JSON shape from the resume text below (no extra fields):

{schema_shape}

RESUME TEXT:
{raw_text}"#;

/// System prompt for tailoring an existing résumé to a job offer.
pub const RETARGET_SYSTEM: &str =
    "You will be provided with two prompts from the user. \
    The first one will be the text of a job offer they are applying to, \
    and the second one will be the contents of their resume. \
    Your job is to create a CV for the user by filling out the provided schema. \
    The CV you create should be based on the provided resume, \
    but fine-tuned for that specific job offer. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Omit optional fields entirely when the resume has no information for them; \
    never set a field to null.";

/// Retarget prompt template for the schema shape. Replace `{schema_shape}`.
pub const RETARGET_SHAPE_TEMPLATE: &str =
    r#"Fill out this EXACT JSON shape (no extra fields):

{schema_shape}"#;

/// JSON shape of the general résumé document, embedded into prompts.
pub const RESUME_SHAPE: &str = r#"{
  "personalInformation": {
    "firstName": "string",
    "lastName": "string",
    "email": "valid email address",
    "phone": "string",
    "address": {
      "street": "string",
      "city": "string",
      "state": "string",
      "postalCode": "string",
      "country": "string"
    },
    "links": {
      "linkedin": "string (optional)",
      "github": "string (optional)",
      "portfolio": "string (optional)"
    }
  },
  "summary": {"text": "string"},
  "workExperience": [{
    "jobTitle": "string",
    "company": "string",
    "location": "string",
    "startDate": "string",
    "endDate": "string (omit for current positions)",
    "responsibilities": ["string"],
    "achievements": ["string (optional list)"]
  }],
  "education": [{
    "degree": "string",
    "institution": "string",
    "location": "string",
    "startDate": "string",
    "endDate": "string",
    "gpa": "string (optional)",
    "relevantCourses": ["string (optional list)"]
  }],
  "skills": {
    "technicalSkills": ["string"],
    "softSkills": ["string (optional list)"]
  },
  "certifications": [{"title": "string", "issuer": "string", "date": "string", "url": "string (optional)"}],
  "projects": [{"name": "string", "description": "string", "url": "string (optional)", "technologies": ["string"]}],
  "languages": [{"language": "string", "proficiency": "one of: Beginner, Intermediate, Advanced, Fluent, Native"}],
  "volunteerExperience": [{
    "role": "string",
    "organization": "string",
    "location": "string",
    "startDate": "string",
    "endDate": "string (omit for ongoing roles)",
    "responsibilities": ["string"]
  }],
  "publications": [{"title": "string", "publication": "string", "date": "string", "url": "string (optional)"}]
}"#;

/// JSON shape of the tailored CV document, embedded into prompts.
pub const TAILORED_CV_SHAPE: &str = r#"{
  "name": "string",
  "surname": "string",
  "professionalTitle": "string",
  "contact": {
    "phone": "string (optional)",
    "email": "valid email address",
    "linkedin": "string (optional)",
    "portfolio": "string (optional)"
  },
  "profile": "string, a short professional profile tuned to the offer",
  "skills": ["string"],
  "languages": [{"name": "string", "level": "string"}],
  "courses": [{"name": "string", "date": "string"}],
  "awards": [{"name": "string", "date": "string"}],
  "workExperience": [{
    "jobTitle": "string",
    "companyName": "string",
    "dates": "string",
    "responsibilities": ["string"]
  }],
  "education": [{
    "dates": "string",
    "universityName": "string",
    "location": "string",
    "degreeAndMajor": "string"
  }]
}"#;
