//! Document Extractor — turns an uploaded resume file into plain text.
//!
//! Supports PDF (pdf-extract) and DOCX (the OOXML container is a zip; the
//! text lives in `word/document.xml`). Any extraction failure aborts space
//! creation upstream; nothing is persisted for a resume we could not read.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported resume format '{0}' (expected .pdf or .docx)")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Extraction(String),
}

/// Recognized resume file formats, tagged by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Determines the format from the uploaded file name.
    /// Anything but `.pdf` / `.docx` is rejected before extraction starts.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if ext.eq_ignore_ascii_case("pdf") {
            Ok(ResumeFormat::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Ok(ResumeFormat::Docx)
        } else {
            Err(ExtractError::UnsupportedFormat(filename.to_string()))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "pdf",
            ResumeFormat::Docx => "docx",
        }
    }
}

/// Extracts plain text from a resume file on disk.
/// Fails if the file is unreadable, corrupt, or yields no text at all.
pub fn extract_text(path: &Path, format: ResumeFormat) -> Result<String, ExtractError> {
    let text = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| ExtractError::Extraction(format!("failed to read PDF: {e}")))?,
        ResumeFormat::Docx => extract_docx(path)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Extraction(
            "resume contained no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Reads `word/document.xml` out of the DOCX zip container and collects the
/// text runs, inserting newlines at paragraph and line-break boundaries.
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path)
        .map_err(|e| ExtractError::Extraction(format!("failed to open DOCX: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ExtractError::Extraction(format!("not a valid DOCX container: {e}")))?;
    let document = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Extraction(format!("DOCX has no document body: {e}")))?;

    let mut reader = Reader::from_reader(BufReader::new(document));
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Text(e)) => {
                let chunk = e
                    .unescape()
                    .map_err(|e| ExtractError::Extraction(format!("malformed DOCX XML: {e}")))?;
                text.push_str(&chunk);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => text.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => text.push('\t'),
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Extraction(format!("malformed DOCX XML: {e}")));
            }
        }
        buf.clear();
    }

    Ok(text)
}

impl From<ExtractError> for crate::errors::AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(name) => Self::UnsupportedFormat(name),
            ExtractError::Extraction(msg) => Self::Extraction(msg),
        }
    }
}
