/*!
 * Tests for interactive prompting
 */

use anyhow::Result;
use std::io::Cursor;

use answer_checker::prompt::Prompter;
use answer_checker::submission::{FormVariant, SubmissionForm};

use crate::common;

#[test]
fn test_ask_shouldStripLineEndingOnly() -> Result<()> {
    let mut output = Vec::new();
    let mut prompter = Prompter::new(Cursor::new(" Alice \r\n"), &mut output);

    let answer = prompter.ask("Student Name")?;

    assert_eq!(answer.as_deref(), Some(" Alice "));
    drop(prompter);
    assert_eq!(String::from_utf8(output)?, "Student Name: ");

    Ok(())
}

#[test]
fn test_ask_withEmptyLineOrEof_shouldReturnNone() -> Result<()> {
    let mut prompter = Prompter::new(Cursor::new("\n"), Vec::new());
    assert_eq!(prompter.ask("Subject")?, None);
    assert_eq!(prompter.ask("Subject")?, None);

    Ok(())
}

#[test]
fn test_fillMissing_withPairedForm_shouldAskForEveryMissingField() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let answers = common::create_test_pdf(temp_dir.path(), "answers.pdf")?;
    let solutions = common::create_test_pdf(temp_dir.path(), "solutions.pdf")?;
    let input = format!("Alice\nMathematics\n{}\n{}\n", answers.display(), solutions.display());

    let mut form = SubmissionForm::default();
    let mut output = Vec::new();
    Prompter::new(Cursor::new(input), &mut output).fill_missing(&mut form, FormVariant::Paired)?;

    assert_eq!(form.student_name, "Alice");
    assert_eq!(form.subject, "Mathematics");
    assert_eq!(form.answer_script.as_ref().map(|a| a.file_name.as_str()), Some("answers.pdf"));
    assert_eq!(form.solution_set.as_ref().map(|a| a.file_name.as_str()), Some("solutions.pdf"));
    assert!(form.validate(FormVariant::Paired).is_ok());

    let prompts = String::from_utf8(output)?;
    assert!(prompts.contains("Solution Set PDF: "));

    Ok(())
}

#[test]
fn test_fillMissing_shouldOnlyAskForMissingFields() -> Result<()> {
    let mut form = SubmissionForm::new("Alice", "Mathematics");
    let temp_dir = common::create_temp_dir()?;
    let answers = common::create_test_pdf(temp_dir.path(), "answers.pdf")?;

    let mut output = Vec::new();
    Prompter::new(Cursor::new(format!("{}\n", answers.display())), &mut output)
        .fill_missing(&mut form, FormVariant::Single)?;

    let prompts = String::from_utf8(output)?;
    assert!(!prompts.contains("Student Name"));
    assert!(prompts.contains("Answer Script PDF"));
    assert!(form.validate(FormVariant::Single).is_ok());

    Ok(())
}

#[test]
fn test_fillMissing_withNonPdf_shouldLeaveFieldMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let notes = temp_dir.path().join("notes.txt");
    std::fs::write(&notes, "plain text")?;

    let mut form = SubmissionForm::new("Alice", "Mathematics");
    let mut output = Vec::new();
    Prompter::new(Cursor::new(format!("{}\n", notes.display())), &mut output)
        .fill_missing(&mut form, FormVariant::Single)?;

    assert!(form.answer_script.is_none());
    assert!(String::from_utf8(output)?.contains("Skipped"));
    assert!(form.validate(FormVariant::Single).is_err());

    Ok(())
}
