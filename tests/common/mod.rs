/*!
 * Common test utilities for the answer-checker test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::net::TcpListener;

use answer_checker::submission::{Attachment, FormVariant, SubmissionForm};
use answer_checker::view::SubmissionView;

/// Minimal PDF content used for uploads
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

/// Route test logs through env_logger, once per process
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a small PDF file in the specified directory
pub fn create_test_pdf(dir: &Path, filename: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, PDF_BYTES)?;
    Ok(file_path)
}

/// In-memory PDF attachment
pub fn pdf_attachment(file_name: &str) -> Attachment {
    Attachment::new(file_name, PDF_BYTES.to_vec())
}

/// A form with every field the variant requires
pub fn complete_form(variant: FormVariant) -> SubmissionForm {
    let form = SubmissionForm::new("Alice", "Mathematics")
        .with_answer_script(pdf_attachment("answers.pdf"));
    match variant {
        FormVariant::Paired => form.with_solution_set(pdf_attachment("solutions.pdf")),
        FormVariant::Single => form,
    }
}

/// A view over a complete form of the given variant
pub fn complete_view(variant: FormVariant) -> SubmissionView {
    SubmissionView::with_form(variant, complete_form(variant))
}

/// Address on which nothing is listening
pub async fn closed_port_url(path: &str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}{}", addr, path))
}
