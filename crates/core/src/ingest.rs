use crate::extractor::ExtractorSet;
use crate::{DocumentFingerprint, DocumentKind, ExtractError, ExtractedDocument, UploadedFile};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;

impl UploadedFile {
    /// Reads a local file. An empty media type leaves classification to the
    /// filename extension.
    pub fn from_path(path: &Path, media_type: Option<&str>) -> Result<Self, ExtractError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ExtractError::MissingFileName(path.display().to_string()))?
            .to_string();
        let bytes = fs::read(path)?;

        Ok(Self::new(bytes, media_type.unwrap_or_default(), filename))
    }
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn build_fingerprint(file: &UploadedFile, kind: DocumentKind) -> DocumentFingerprint {
    DocumentFingerprint {
        filename: file.filename.clone(),
        kind,
        checksum: digest_bytes(&file.bytes),
        byte_len: file.bytes.len(),
        ingested_at: Utc::now(),
    }
}

pub fn ingest_upload(
    extractors: &ExtractorSet,
    file: &UploadedFile,
) -> Result<ExtractedDocument, ExtractError> {
    let (kind, text) = extractors.extract(file)?;
    let fingerprint = build_fingerprint(file, kind);

    info!(
        filename = %fingerprint.filename,
        kind = %kind,
        bytes = fingerprint.byte_len,
        chars = text.char_count(),
        "document extracted"
    );

    Ok(ExtractedDocument { fingerprint, text })
}

#[cfg(test)]
mod tests {
    use super::{digest_bytes, ingest_upload};
    use crate::extractor::fixtures::docx_with_paragraphs;
    use crate::extractor::ExtractorSet;
    use crate::{DocumentKind, ExtractError, UploadedFile};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn checksum_is_reproducible() {
        assert_eq!(digest_bytes(b"abc"), digest_bytes(b"abc"));
        assert_ne!(digest_bytes(b"abc"), digest_bytes(b"abd"));
    }

    #[test]
    fn from_path_keeps_filename_and_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("lease.docx");
        fs::write(&path, b"payload")?;

        let file = UploadedFile::from_path(&path, None)?;
        assert_eq!(file.filename, "lease.docx");
        assert_eq!(file.media_type, "");
        assert_eq!(file.bytes, b"payload");
        Ok(())
    }

    #[test]
    fn from_path_reports_missing_files() {
        let dir = tempdir().expect("tempdir");
        let result = UploadedFile::from_path(&dir.path().join("missing.pdf"), None);
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn ingest_fingerprints_the_upload() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = docx_with_paragraphs(&["Term one"]);
        let file = UploadedFile::new(bytes.clone(), "", "terms.docx");

        let document = ingest_upload(&ExtractorSet::default(), &file)?;
        assert_eq!(document.fingerprint.kind, DocumentKind::Word);
        assert_eq!(document.fingerprint.byte_len, bytes.len());
        assert_eq!(document.fingerprint.checksum, digest_bytes(&bytes));
        assert_eq!(document.text.as_str(), "Term one");
        Ok(())
    }
}
