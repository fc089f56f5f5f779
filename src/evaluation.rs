use serde::{Deserialize, Serialize};

/// Score summary returned by the grading service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Maximum attainable marks
    pub total_marks: f64,

    /// Marks awarded to the student
    pub obtained_marks: f64,

    /// Location of the annotated review document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_pdf_url: Option<String>,

    /// Student name, echoed by the client for the single-file form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,

    /// Subject, echoed by the client for the single-file form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl EvaluationResult {
    pub fn new(total_marks: f64, obtained_marks: f64) -> Self {
        Self {
            total_marks,
            obtained_marks,
            review_pdf_url: None,
            student_name: None,
            subject: None,
        }
    }

    pub fn with_review_pdf_url(mut self, url: impl Into<String>) -> Self {
        self.review_pdf_url = Some(url.into());
        self
    }

    /// Overwrite the identity with what the student typed in
    pub fn with_identity(
        mut self,
        student_name: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        self.student_name = Some(student_name.into());
        self.subject = Some(subject.into());
        self
    }

    /// Obtained over total as a percentage; `None` when total is zero
    pub fn percentage(&self) -> Option<f64> {
        if self.total_marks == 0.0 {
            return None;
        }
        Some(self.obtained_marks / self.total_marks * 100.0)
    }

    /// Review URL when it is present and non-blank
    pub fn review_url(&self) -> Option<&str> {
        self.review_pdf_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Format marks the way a JSON number would print: no trailing `.0` for whole values
pub fn format_marks(marks: f64) -> String {
    if marks.fract() == 0.0 && marks.is_finite() && marks.abs() < 1e15 {
        format!("{}", marks as i64)
    } else {
        format!("{}", marks)
    }
}
