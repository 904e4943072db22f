pub mod docx;
pub mod ocr;
pub mod pdf;

pub use docx::DocxExtractor;
pub use ocr::{
    ocr_engine_from_env, parse_llm_ocr_config, EndpointOcr, ImageOcrExtractor, OcrEndpointConfig,
    OcrEngine, TesseractOcr,
};
pub use pdf::LopdfExtractor;

use crate::classify::classify_upload;
use crate::error::ExtractError;
use crate::models::{DocumentKind, ExtractedText, UploadedFile};

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError>;
}

/// One extractor per supported [`DocumentKind`].
pub struct ExtractorSet {
    pdf: Box<dyn TextExtractor>,
    word: Box<dyn TextExtractor>,
    image: Box<dyn TextExtractor>,
}

impl ExtractorSet {
    pub fn new(
        pdf: Box<dyn TextExtractor>,
        word: Box<dyn TextExtractor>,
        image: Box<dyn TextExtractor>,
    ) -> Self {
        Self { pdf, word, image }
    }

    pub fn with_ocr(engine: Box<dyn OcrEngine>) -> Self {
        Self::new(
            Box::new(LopdfExtractor),
            Box::new(DocxExtractor),
            Box::new(ImageOcrExtractor::new(engine)),
        )
    }

    pub fn for_kind(&self, kind: DocumentKind) -> Option<&dyn TextExtractor> {
        match kind {
            DocumentKind::Pdf => Some(self.pdf.as_ref()),
            DocumentKind::Word => Some(self.word.as_ref()),
            DocumentKind::Image => Some(self.image.as_ref()),
            DocumentKind::Unsupported => None,
        }
    }

    pub fn extract(&self, file: &UploadedFile) -> Result<(DocumentKind, ExtractedText), ExtractError> {
        let kind = classify_upload(file);
        let extractor = self
            .for_kind(kind)
            .ok_or_else(|| ExtractError::UnsupportedFormat {
                filename: file.filename.clone(),
                media_type: file.media_type.clone(),
            })?;

        let text = extractor.extract(&file.bytes)?;
        Ok((kind, text))
    }
}

impl Default for ExtractorSet {
    fn default() -> Self {
        Self::with_ocr(Box::new(TesseractOcr::default()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let encoded = content.encode().expect("content stream should encode");
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }

    pub fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let document_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .expect("zip entry should start");
        writer
            .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .expect("zip entry should write");
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .expect("zip entry should start");
        writer
            .write_all(document_xml.as_bytes())
            .expect("zip entry should write");
        writer.finish().expect("zip should finish").into_inner()
    }

    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body = paragraphs
            .iter()
            .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
            .collect::<String>();
        docx_with_body(&body)
    }

    pub fn png_image() -> Vec<u8> {
        let canvas = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let mut bytes = Cursor::new(Vec::new());
        canvas
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("png should encode");
        bytes.into_inner()
    }
}
