use log::{debug, info, warn};
use std::fmt::Write;

use crate::backend::EvaluationBackend;
use crate::errors::{BackendError, ViewError};
use crate::evaluation::{format_marks, EvaluationResult};
use crate::submission::{Attachment, FormVariant, Submission, SubmissionForm};

// @module: Submission form view state

/// What the view currently displays below (or instead of) the form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewStatus {
    /// Nothing submitted yet, or the last state was cleared
    #[default]
    Idle,
    /// A request is in flight; submission is disabled
    Busy,
    /// A validation or connectivity message
    Failed(String),
    /// The last response, parsed
    Evaluated(EvaluationResult),
}

/// Submission form view
///
/// Holds the form fields and the display state for one interaction. Errors
/// and results share a single `ViewStatus`, so the two can never be shown
/// together.
#[derive(Debug, Clone, Default)]
pub struct SubmissionView {
    variant: FormVariant,
    form: SubmissionForm,
    status: ViewStatus,
    // name and subject of the request in flight, echoed into the result
    in_flight: Option<(String, String)>,
}

impl SubmissionView {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn with_form(variant: FormVariant, form: SubmissionForm) -> Self {
        Self {
            variant,
            form,
            ..Default::default()
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SubmissionForm {
        &mut self.form
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, ViewStatus::Busy)
    }

    /// State of the submit control
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.shows_form()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ViewStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&EvaluationResult> {
        match &self.status {
            ViewStatus::Evaluated(result) => Some(result),
            _ => None,
        }
    }

    /// False once a result replaces the form
    pub fn shows_form(&self) -> bool {
        !(self.variant.result_replaces_form() && self.result().is_some())
    }

    /// Validate the form and enter the busy state
    ///
    /// On a missing field the variant's validation message is displayed and
    /// no submission is returned. A second call while busy, or after a result
    /// replaced the form, is refused without touching the displayed state.
    pub fn begin_submission(&mut self) -> Result<Submission, ViewError> {
        if self.is_busy() {
            return Err(ViewError::Busy);
        }
        if !self.shows_form() {
            return Err(ViewError::FormClosed);
        }

        let submission = match self.form.validate(self.variant) {
            Ok(submission) => submission,
            Err(e) => {
                debug!("Form incomplete: {}", e);
                self.status = ViewStatus::Failed(self.variant.validation_message().to_string());
                return Err(e.into());
            }
        };

        self.in_flight = Some((submission.student_name.clone(), submission.subject.clone()));
        self.status = ViewStatus::Busy;
        Ok(submission)
    }

    /// Leave the busy state with the backend outcome
    pub fn finish_submission(
        &mut self,
        outcome: Result<EvaluationResult, BackendError>,
    ) -> &ViewStatus {
        if !self.is_busy() {
            warn!("Ignoring evaluation outcome, no submission in progress");
            return &self.status;
        }

        let identity = self.in_flight.take();

        self.status = match outcome {
            Ok(result) => {
                let result = match identity {
                    Some((student_name, subject)) if self.variant.echoes_identity() => {
                        result.with_identity(student_name, subject)
                    }
                    _ => result,
                };
                info!(
                    "Evaluation complete: {}/{}",
                    format_marks(result.obtained_marks),
                    format_marks(result.total_marks)
                );
                ViewStatus::Evaluated(result)
            }
            Err(e) => {
                warn!("Evaluation failed: {}", e);
                ViewStatus::Failed(self.variant.connectivity_message().to_string())
            }
        };

        &self.status
    }

    /// Validate, send once, and record the outcome
    pub async fn submit<B>(&mut self, backend: &B) -> &ViewStatus
    where
        B: EvaluationBackend + ?Sized,
    {
        let submission = match self.begin_submission() {
            Ok(submission) => submission,
            Err(_) => return &self.status,
        };

        info!(
            "Submitting {} for evaluation to {}",
            submission.student_name,
            backend.endpoint()
        );
        let outcome = backend.evaluate(&submission).await;
        self.finish_submission(outcome)
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        self.form = SubmissionForm::default();
        self.status = ViewStatus::Idle;
        self.in_flight = None;
    }

    /// Text rendering of the whole view
    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = self.variant.title();
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "=".repeat(title.len()));

        if self.shows_form() {
            self.render_form(&mut out);
        }

        if let Some(result) = self.result() {
            self.render_result(&mut out, result);
        }

        out
    }

    fn render_form(&self, out: &mut String) {
        let form = &self.form;
        let _ = writeln!(out, "Student Name *: {}", form.student_name);
        let _ = writeln!(out, "Subject *: {}", form.subject);
        let _ = writeln!(
            out,
            "Answer Script PDF *: {}",
            describe_attachment(form.answer_script.as_ref())
        );
        if self.variant.requires_solution_set() {
            let _ = writeln!(
                out,
                "Solution Set PDF *: {}",
                describe_attachment(form.solution_set.as_ref())
            );
        }

        if let Some(error) = self.error() {
            let _ = writeln!(out, "! {}", error);
        }

        if self.is_busy() {
            let _ = writeln!(out, "[ ... {} ] (disabled)", self.variant.busy_label());
        } else {
            let _ = writeln!(out, "[ {} ]", self.variant.submit_label());
        }
    }

    fn render_result(&self, out: &mut String, result: &EvaluationResult) {
        let _ = writeln!(out);
        match self.variant {
            FormVariant::Paired => {
                let _ = writeln!(out, "Total Marks: {}", format_marks(result.total_marks));
                let _ = writeln!(out, "Obtained Marks: {}", format_marks(result.obtained_marks));
            }
            FormVariant::Single => {
                if let Some(name) = &result.student_name {
                    let _ = writeln!(out, "Name: {}", name);
                }
                if let Some(subject) = &result.subject {
                    let _ = writeln!(out, "Subject: {}", subject);
                }
                let _ = writeln!(out, "Total: {}", format_marks(result.total_marks));
                let _ = writeln!(out, "Obtained: {}", format_marks(result.obtained_marks));
            }
        }

        if let Some(percentage) = result.percentage() {
            let _ = writeln!(out, "Score: {:.1}%", percentage);
        }
        if let Some(url) = result.review_url() {
            let _ = writeln!(out, "Review PDF: {}", url);
        }
    }
}

fn describe_attachment(attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(a) => format!("{} ({} bytes)", a.file_name, a.len()),
        None => "(none)".to_string(),
    }
}
