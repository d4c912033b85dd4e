use std::path::PathBuf;
use uuid::Uuid;

use crate::error::ApiError;

/// Accepted document type for legal contracts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// 5 MiB upload cap.
pub const MAX_LEGAL_CONTRACT_BYTES: usize = 5 * 1024 * 1024;

/// Blob store for uploaded legal documents. The core only ever sees the
/// returned reference and the URL it maps to; the files themselves live in a
/// directory served statically.
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Validate and persist a PDF payload, returning an opaque reference.
    pub async fn store_pdf(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::Validation("No file uploaded".into()));
        }
        if content_type != Some(PDF_CONTENT_TYPE) {
            return Err(ApiError::Validation("Only PDF files are allowed".into()));
        }
        if bytes.len() > MAX_LEGAL_CONTRACT_BYTES {
            return Err(ApiError::Validation(
                "File exceeds the 5 MB upload limit".into(),
            ));
        }

        let reference = format!("contract-{}.pdf", Uuid::new_v4());
        let path = self.root.join(&reference);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApiError::Unavailable(format!("Failed to store file: {e}")))?;

        Ok(reference)
    }

    /// Public URL for a stored reference, under the static uploads mount.
    pub fn url_for(&self, reference: &str) -> String {
        format!("/uploads/{reference}")
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_empty_and_non_pdf_payloads() {
        let dir = std::env::temp_dir().join(format!("agrisetu-test-{}", Uuid::new_v4()));
        let store = BlobStore::new(&dir).unwrap();

        assert!(store.store_pdf(b"", Some(PDF_CONTENT_TYPE)).await.is_err());
        assert!(
            store
                .store_pdf(b"%PDF-1.7 ...", Some("image/png"))
                .await
                .is_err()
        );
        assert!(store.store_pdf(b"%PDF-1.7 ...", None).await.is_err());

        let reference = store
            .store_pdf(b"%PDF-1.7 ...", Some(PDF_CONTENT_TYPE))
            .await
            .unwrap();
        assert!(reference.ends_with(".pdf"));
        assert_eq!(store.url_for(&reference), format!("/uploads/{reference}"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
