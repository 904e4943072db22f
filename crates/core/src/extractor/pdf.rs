use super::TextExtractor;
use crate::error::ExtractError;
use crate::models::ExtractedText;
use lopdf::Document;
use tracing::warn;

/// Concatenates the text layer of every page. Scanned pages carry no text
/// layer and contribute nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        let document = Document::load_mem(bytes).map_err(|error| ExtractError::decode("pdf", error))?;

        let mut text = String::new();
        for (page_no, _page_id) in document.get_pages() {
            match document.extract_text(&[page_no]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(error) => warn!(page = page_no, %error, "skipping unreadable pdf page"),
            }
        }

        Ok(ExtractedText::new(text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::LopdfExtractor;
    use crate::extractor::fixtures::pdf_with_pages;
    use crate::extractor::TextExtractor;
    use crate::ExtractError;

    #[test]
    fn pages_are_concatenated_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = pdf_with_pages(&["First clause", "Second clause"]);

        let text = LopdfExtractor.extract(&bytes)?;
        let first = text.as_str().find("First clause").expect("first page text");
        let second = text.as_str().find("Second clause").expect("second page text");
        assert!(first < second);
        Ok(())
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let error = LopdfExtractor
            .extract(b"definitely not a pdf")
            .expect_err("garbage should not parse");
        assert!(matches!(error, ExtractError::Decode { format: "pdf", .. }));
    }
}
