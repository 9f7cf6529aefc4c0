//! Client-side gate for resume files.
//!
//! Files are screened before they can reach the gateway: exactly one file,
//! PDF or Word, at most 10 MiB. Rejections surface as a notice and never
//! produce a network call.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::notify::Notifier;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const REJECTED_NOTICE: &str = "File rejected. Please check size and format.";
pub const ACCEPTED_NOTICE: &str = "File uploaded successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Case-insensitive match on the file extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// The MIME type the upload form advertises for this kind.
    pub fn content_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Doc | DocumentKind::Docx => "application/msword",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_file_name(&self.name)
    }

    pub fn content_type(&self) -> &'static str {
        self.kind()
            .map(DocumentKind::content_type)
            .unwrap_or("application/octet-stream")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No file selected")]
    NoFile,

    #[error("Only one file can be uploaded at a time (got {0})")]
    TooManyFiles(usize),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File is {size} bytes; the limit is {max}")]
    TooLarge { size: u64, max: u64 },
}

/// Checks a single file against the type and size rules.
pub fn check_file(file: &ResumeFile) -> Result<(), UploadRejection> {
    if file.kind().is_none() {
        return Err(UploadRejection::UnsupportedType(file.name.clone()));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge {
            size: file.size(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Screens a pick/drop of files, notifying the user either way.
pub fn accept_files(
    mut files: Vec<ResumeFile>,
    notifier: &dyn Notifier,
) -> Result<ResumeFile, UploadRejection> {
    let outcome = match files.len() {
        0 => Err(UploadRejection::NoFile),
        1 => {
            let file = files.remove(0);
            check_file(&file).map(|()| file)
        }
        n => Err(UploadRejection::TooManyFiles(n)),
    };

    match &outcome {
        Ok(file) => {
            info!("Accepted {} ({} bytes)", file.name, file.size());
            notifier.success(ACCEPTED_NOTICE);
        }
        Err(UploadRejection::NoFile) => {}
        Err(reason) => {
            info!("Rejected upload: {reason}");
            notifier.failure(REJECTED_NOTICE);
        }
    }
    outcome
}
