use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use lopdf::Document;
use tokio::process::Command;

use crate::{
    errors::{AppError, AppResult},
    services::file_store::file_extension,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
}

impl SourceKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(SourceKind::Pdf),
            "jpg" | "jpeg" | "png" => Some(SourceKind::Image),
            _ => None,
        }
    }
}

/// Text layer of a PDF document, pages in order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PdfTextSource: Send + Sync {
    async fn extract_text(&self, path: &Path) -> AppResult<String>;
}

/// Optical character recognition over a single image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, path: &Path) -> AppResult<String>;
}

pub struct TextExtractor {
    pdf: Arc<dyn PdfTextSource>,
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(pdf: Arc<dyn PdfTextSource>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { pdf, ocr }
    }

    /// Extracts trimmed text from a stored upload, dispatching on its extension.
    pub async fn extract(&self, path: &Path) -> AppResult<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = file_extension(&name).unwrap_or_default();

        let kind = SourceKind::from_extension(&ext).ok_or_else(|| {
            AppError::UnsupportedFileType(format!("'.{}' files cannot be read", ext))
        })?;

        let raw = match kind {
            SourceKind::Pdf => self.pdf.extract_text(path).await?,
            SourceKind::Image => self.ocr.recognize(path).await?,
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err(AppError::NoTextFound(format!(
                "'{}' contains no extractable text",
                name
            )));
        }

        log::debug!("Extracted {} characters from '{}'", text.chars().count(), name);
        Ok(text.to_string())
    }
}

/// PDF text extraction with `lopdf`.
pub struct LopdfTextSource;

impl LopdfTextSource {
    fn extract_blocking(path: &Path) -> AppResult<String> {
        let doc = Document::load(path)
            .map_err(|e| AppError::ExtractionFailed(format!("Failed to load PDF: {}", e)))?;

        let mut text = String::new();
        // get_pages is keyed by page number, so iteration follows page order
        for page_number in doc.get_pages().into_keys() {
            let page_text = doc.extract_text(&[page_number]).map_err(|e| {
                AppError::ExtractionFailed(format!(
                    "Failed to read text of page {}: {}",
                    page_number, e
                ))
            })?;
            text.push_str(&page_text);
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl PdfTextSource for LopdfTextSource {
    async fn extract_text(&self, path: &Path) -> AppResult<String> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_blocking(&path))
            .await
            .map_err(|e| AppError::InternalError(format!("PDF extraction task failed: {}", e)))?
    }
}

/// OCR through the `tesseract` command line tool.
pub struct TesseractOcr {
    binary: PathBuf,
}

impl TesseractOcr {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, path: &Path) -> AppResult<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .output()
            .await
            .map_err(|e| {
                AppError::ExtractionFailed(format!(
                    "Failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExtractionFailed(format!(
                "OCR exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
