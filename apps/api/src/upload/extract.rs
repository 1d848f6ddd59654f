//! Text extraction from uploaded resume files.
//!
//! PDF goes through `pdf-extract`; DOCX is unpacked with `docx-rs` and the
//! paragraph runs are flattened to plain text. Legacy `.doc` is not
//! supported and the user is asked to convert first.

use anyhow::{anyhow, bail, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

pub fn extract_resume_text(buffer: &[u8], filename: &str) -> Result<String> {
    match file_extension(filename).as_deref() {
        Some(".pdf") => extract_text_from_pdf(buffer),
        Some(".docx") => extract_text_from_docx(buffer),
        Some(".doc") => {
            bail!("DOC format is not supported. Please convert to DOCX or PDF.")
        }
        other => bail!(
            "Unsupported file format: {}",
            other.unwrap_or("(no extension)")
        ),
    }
}

pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .map(|idx| filename[idx..].to_lowercase())
}

fn extract_text_from_pdf(buffer: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(buffer)
        .map_err(|e| anyhow!("Failed to extract text from PDF file: {e}"))?;
    if text.trim().is_empty() {
        bail!("PDF file appears to be empty or contains no extractable text");
    }
    Ok(text)
}

fn extract_text_from_docx(buffer: &[u8]) -> Result<String> {
    let docx = read_docx(buffer).map_err(|e| anyhow!("Failed to read Word document: {e}"))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        match rc {
                            RunChild::Text(t) => line.push_str(&t.text),
                            RunChild::Tab(_) => line.push('\t'),
                            RunChild::Break(_) => line.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            text.push_str(&line);
            text.push('\n');
        }
    }

    if text.trim().is_empty() {
        bail!("Word document appears to be empty or contains no extractable text");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Resume.PDF").as_deref(), Some(".pdf"));
        assert_eq!(file_extension("cv.docx").as_deref(), Some(".docx"));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn doc_format_asks_for_conversion() {
        let err = extract_resume_text(b"old binary format", "resume.doc").unwrap_err();
        assert!(err.to_string().contains("convert to DOCX or PDF"));
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = extract_resume_text(b"plain", "resume.txt").unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn garbage_docx_reports_read_failure() {
        assert!(extract_resume_text(b"not a zip", "resume.docx").is_err());
    }

    #[test]
    fn generated_docx_round_trips_through_extraction() {
        // Build a small document with our own Word renderer and read it back.
        let blocks = vec![
            crate::export::layout::Block::Plain("JIANG, Yanze Robert".into()),
            crate::export::layout::Block::Plain("5950 4201 | robert@example.com".into()),
        ];
        let bytes = crate::export::word::render_docx(&blocks).unwrap();
        let text = extract_resume_text(&bytes, "cv.docx").unwrap();
        assert!(text.contains("JIANG, Yanze Robert"));
        assert!(text.contains("5950 4201"));
    }
}
