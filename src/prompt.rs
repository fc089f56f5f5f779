use log::warn;
use std::io::{self, BufRead, Write};

use crate::errors::AppError;
use crate::submission::{
    Attachment, FIELD_SOLUTION_SET, FIELD_STUDENT_NAME, FIELD_SUBJECT, FormVariant, SubmissionForm,
};

// @module: Terminal prompts for fields left out on the command line

/// Line-based prompter over any reader/writer pair
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr so stdout stays clean for the rendered view
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Ask one question; `None` on an empty answer or end of input
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}: ", label)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    /// Ask for every required field that is still missing
    ///
    /// Unreadable or non-PDF files are reported and left missing, so the
    /// view's own validation still decides whether the form can be sent.
    pub fn fill_missing(
        &mut self,
        form: &mut SubmissionForm,
        variant: FormVariant,
    ) -> Result<(), AppError> {
        for field in form.missing_fields(variant) {
            match field {
                FIELD_STUDENT_NAME => {
                    if let Some(name) = self.ask("Student Name")? {
                        form.student_name = name;
                    }
                }
                FIELD_SUBJECT => {
                    if let Some(subject) = self.ask("Subject")? {
                        form.subject = subject;
                    }
                }
                FIELD_SOLUTION_SET => {
                    form.solution_set = self.ask_pdf("Solution Set PDF")?;
                }
                _ => {
                    form.answer_script = self.ask_pdf("Answer Script PDF")?;
                }
            }
        }
        Ok(())
    }

    fn ask_pdf(&mut self, label: &str) -> Result<Option<Attachment>, AppError> {
        let Some(path) = self.ask(label)? else {
            return Ok(None);
        };

        match Attachment::from_path(path.trim()) {
            Ok(attachment) => Ok(Some(attachment)),
            Err(e) => {
                warn!("{}", e);
                writeln!(self.writer, "Skipped: {}", e)?;
                Ok(None)
            }
        }
    }
}
