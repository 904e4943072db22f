use crate::models::{DocumentKind, UploadedFile};
use std::path::Path;

pub fn classify(media_type: &str, filename: &str) -> DocumentKind {
    let media_type = media_type.to_ascii_lowercase();

    if media_type.contains("pdf") {
        return DocumentKind::Pdf;
    }
    if media_type.contains("word") || extension(filename).as_deref() == Some("docx") {
        return DocumentKind::Word;
    }
    if media_type.contains("image") {
        return DocumentKind::Image;
    }

    classify_extension(filename)
}

pub fn classify_upload(file: &UploadedFile) -> DocumentKind {
    classify(&file.media_type, &file.filename)
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn classify_extension(filename: &str) -> DocumentKind {
    match extension(filename).as_deref() {
        Some("pdf") => DocumentKind::Pdf,
        Some("docx") => DocumentKind::Word,
        Some("png" | "jpg" | "jpeg") => DocumentKind::Image,
        _ => DocumentKind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use crate::DocumentKind;

    const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    #[test]
    fn media_type_wins_over_extension() {
        assert_eq!(classify("application/pdf", "notes.docx"), DocumentKind::Pdf);
        assert_eq!(classify(DOCX_MIME, "contract"), DocumentKind::Word);
        assert_eq!(classify("application/msword", "x.bin"), DocumentKind::Word);
    }

    #[test]
    fn docx_name_wins_over_image_media_type() {
        assert_eq!(classify("image/png", "scan.docx"), DocumentKind::Word);
        assert_eq!(classify("IMAGE/JPEG", "Scan.DOCX"), DocumentKind::Word);
    }

    #[test]
    fn any_image_subtype_is_an_image() {
        for mime in ["image/png", "image/jpeg", "image/jpg", "IMAGE/PNG"] {
            assert_eq!(classify(mime, "scan"), DocumentKind::Image, "{mime}");
        }
    }

    #[test]
    fn extension_is_the_fallback() {
        assert_eq!(classify("", "Lease.PDF"), DocumentKind::Pdf);
        assert_eq!(classify("application/octet-stream", "nda.docx"), DocumentKind::Word);
        assert_eq!(classify("", "photo.jpeg"), DocumentKind::Image);
        assert_eq!(classify("", "photo.JPG"), DocumentKind::Image);
    }

    #[test]
    fn unknown_inputs_are_unsupported() {
        assert_eq!(classify("text/plain", "readme.txt"), DocumentKind::Unsupported);
        assert_eq!(classify("", "no_extension"), DocumentKind::Unsupported);
        assert_eq!(classify("", ""), DocumentKind::Unsupported);
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("application/zip", "bundle.docx");
        let second = classify("application/zip", "bundle.docx");
        assert_eq!(first, second);
    }
}
