//! Picture upload: file checks and async decoding to a `data:` URL

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Largest accepted picture, in bytes
pub const MAX_PICTURE_BYTES: u64 = 2 * 1024 * 1024;

/// MIME types accepted by the picture input
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File size should be less than 2 MB")]
    TooLarge { size: u64 },
    #[error("Only PNG and JPEG files are allowed")]
    UnsupportedType { mime: String },
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// MIME type for a path, judged by extension the way a file picker does
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// A file chosen for upload, described before any of it is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFile {
    pub path: PathBuf,
    pub mime: String,
    pub size: u64,
}

impl PictureFile {
    /// Describe the file at `path` from its metadata
    pub fn probe(path: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|source| UploadError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            mime: mime_for_path(&path).to_string(),
            size: metadata.len(),
            path,
        })
    }

    /// Size is checked before type
    pub fn check(&self) -> Result<(), UploadError> {
        if self.size > MAX_PICTURE_BYTES {
            return Err(UploadError::TooLarge { size: self.size });
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime.as_str()) {
            return Err(UploadError::UnsupportedType {
                mime: self.mime.clone(),
            });
        }
        Ok(())
    }
}

/// Encode raw bytes as a base64 `data:` URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Source of picture bytes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureReader: Send + Sync {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads pictures from the local filesystem
#[derive(Debug, Default)]
pub struct FsPictureReader;

#[async_trait]
impl PictureReader for FsPictureReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// An accepted upload waiting to be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub id: u64,
    pub file: PictureFile,
}

/// Completion of a decode task, delivered back to the event loop
#[derive(Debug)]
pub struct UploadEvent {
    pub ticket: u64,
    pub result: Result<String, UploadError>,
}

/// Read and encode the ticket's file
pub async fn decode(reader: &dyn PictureReader, ticket: &UploadTicket) -> UploadEvent {
    let file = &ticket.file;
    let result = match reader.read(&file.path).await {
        Ok(bytes) if bytes.len() as u64 > MAX_PICTURE_BYTES => Err(UploadError::TooLarge {
            size: bytes.len() as u64,
        }),
        Ok(bytes) => Ok(encode_data_url(&file.mime, &bytes)),
        Err(source) => Err(UploadError::Read {
            path: file.path.clone(),
            source,
        }),
    };
    UploadEvent {
        ticket: ticket.id,
        result,
    }
}

/// Decode on a background task and send the outcome to `tx`
pub fn spawn_decode(
    reader: Arc<dyn PictureReader>,
    ticket: UploadTicket,
    tx: UnboundedSender<UploadEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = decode(reader.as_ref(), &ticket).await;
        if tx.send(event).is_err() {
            tracing::debug!("Upload {} finished after the event loop closed", ticket.id);
        }
    })
}
