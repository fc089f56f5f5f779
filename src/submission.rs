use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{AppError, BackendError, ValidationError};

// @module: Submission form model and multipart layout

pub const FIELD_STUDENT_NAME: &str = "studentName";
pub const FIELD_SUBJECT: &str = "subject";
pub const FIELD_FILE: &str = "file";
pub const FIELD_ANSWER_SCRIPT: &str = "answerScript";
pub const FIELD_SOLUTION_SET: &str = "solutionSet";

const PDF_MIME: &str = "application/pdf";

/// Which of the two submission forms is in use
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    // @variant: Answer script plus solution set
    #[default]
    Paired,
    // @variant: A single answer script, identity echoed into the result
    Single,
}

impl FormVariant {
    pub fn title(&self) -> &'static str {
        "Answer Paper Checker"
    }

    /// Message shown when a required field or file is missing
    pub fn validation_message(&self) -> &'static str {
        match self {
            Self::Paired => "Please fill all fields and upload both PDFs.",
            Self::Single => "Please fill all fields",
        }
    }

    /// Message shown for every backend failure
    pub fn connectivity_message(&self) -> &'static str {
        match self {
            Self::Paired => {
                "Cannot connect to backend server. Please ensure backend is running on port 5000."
            }
            Self::Single => "Failed to evaluate paper",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Paired => "Evaluate Paper",
            Self::Single => "Evaluate",
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::Paired => "Connecting to Backend...",
            Self::Single => "Evaluating...",
        }
    }

    /// Multipart field name of the answer script
    pub fn answer_field(&self) -> &'static str {
        match self {
            Self::Paired => FIELD_ANSWER_SCRIPT,
            Self::Single => FIELD_FILE,
        }
    }

    pub fn requires_solution_set(&self) -> bool {
        matches!(self, Self::Paired)
    }

    /// Whether a non-2xx status is treated as a failure before parsing the body
    pub fn checks_status(&self) -> bool {
        matches!(self, Self::Paired)
    }

    /// Whether the submitted name and subject are copied into the displayed result
    pub fn echoes_identity(&self) -> bool {
        matches!(self, Self::Single)
    }

    /// Whether the result view hides the form
    pub fn result_replaces_form(&self) -> bool {
        matches!(self, Self::Single)
    }

    // @returns: Lowercase variant identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Paired => "paired".to_string(),
            Self::Single => "single".to_string(),
        }
    }
}

impl std::fmt::Display for FormVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for FormVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "paired" => Ok(Self::Paired),
            "single" => Ok(Self::Single),
            _ => Err(anyhow::anyhow!("Invalid form variant: {}", s)),
        }
    }
}

/// A PDF selected for upload
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// File name sent with the multipart part
    pub file_name: String,
    /// Raw file content
    pub content: Bytes,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Read a PDF from disk; files without a `.pdf` extension are refused
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();

        if !is_pdf_path(path) {
            return Err(ValidationError::NotPdf(path.display().to_string()).into());
        }

        let content = std::fs::read(path)
            .map_err(|e| AppError::File(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());

        Ok(Self::new(file_name, content))
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn to_part(&self) -> Result<Part, BackendError> {
        let part = Part::bytes(self.content.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(PDF_MIME)?;
        Ok(part)
    }
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Editable form state, fields may be missing
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub student_name: String,
    pub subject: String,
    pub answer_script: Option<Attachment>,
    pub solution_set: Option<Attachment>,
}

impl SubmissionForm {
    pub fn new(student_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_answer_script(mut self, attachment: Attachment) -> Self {
        self.answer_script = Some(attachment);
        self
    }

    pub fn with_solution_set(mut self, attachment: Attachment) -> Self {
        self.solution_set = Some(attachment);
        self
    }

    /// Names of the required fields that are still empty, in form order
    pub fn missing_fields(&self, variant: FormVariant) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.student_name.is_empty() {
            missing.push(FIELD_STUDENT_NAME);
        }
        if self.subject.is_empty() {
            missing.push(FIELD_SUBJECT);
        }
        if self.answer_script.is_none() {
            missing.push(variant.answer_field());
        }
        if variant.requires_solution_set() && self.solution_set.is_none() {
            missing.push(FIELD_SOLUTION_SET);
        }

        missing
    }

    /// Check presence of every required field and build the payload
    pub fn validate(&self, variant: FormVariant) -> Result<Submission, ValidationError> {
        if let Some(field) = self.missing_fields(variant).first() {
            return Err(ValidationError::MissingField(*field));
        }

        let answer_script = self
            .answer_script
            .clone()
            .ok_or(ValidationError::MissingField(variant.answer_field()))?;

        let solution_set = if variant.requires_solution_set() {
            Some(
                self.solution_set
                    .clone()
                    .ok_or(ValidationError::MissingField(FIELD_SOLUTION_SET))?,
            )
        } else {
            None
        };

        Ok(Submission {
            variant,
            student_name: self.student_name.clone(),
            subject: self.subject.clone(),
            answer_script,
            solution_set,
        })
    }
}

/// A complete submission, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub variant: FormVariant,
    pub student_name: String,
    pub subject: String,
    pub answer_script: Attachment,
    pub solution_set: Option<Attachment>,
}

impl Submission {
    /// Multipart field names in the order they are appended
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![FIELD_STUDENT_NAME, FIELD_SUBJECT, self.variant.answer_field()];
        if self.solution_set.is_some() {
            names.push(FIELD_SOLUTION_SET);
        }
        names
    }

    /// Build the multipart body
    pub fn to_multipart(&self) -> Result<Form, BackendError> {
        let mut form = Form::new()
            .text(FIELD_STUDENT_NAME, self.student_name.clone())
            .text(FIELD_SUBJECT, self.subject.clone())
            .part(self.variant.answer_field(), self.answer_script.to_part()?);

        if let Some(solution_set) = &self.solution_set {
            form = form.part(FIELD_SOLUTION_SET, solution_set.to_part()?);
        }

        Ok(form)
    }

    /// Total bytes of attached files
    pub fn upload_size(&self) -> usize {
        self.answer_script.len() + self.solution_set.as_ref().map_or(0, Attachment::len)
    }
}
