use super::TextExtractor;
use crate::error::ExtractError;
use crate::models::ExtractedText;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};
use tokio::runtime::RuntimeFlavor;

pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<String, ExtractError>;
}

/// Decodes the raster image and returns whatever the OCR engine reads from it.
pub struct ImageOcrExtractor {
    engine: Box<dyn OcrEngine>,
}

impl ImageOcrExtractor {
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        Self { engine }
    }
}

impl TextExtractor for ImageOcrExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        let format = image::guess_format(bytes).map_err(|error| ExtractError::decode("image", error))?;
        image::load_from_memory_with_format(bytes, format)
            .map_err(|error| ExtractError::decode("image", error))?;

        let text = self.engine.recognize(bytes)?;
        Ok(ExtractedText::new(text))
    }
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub command: String,
    pub language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, ExtractError> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| ExtractError::Ocr(format!("could not start {}: {error}", self.command)))?;

        // tesseract can exit before reading all of stdin; the child is still reaped.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(image),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|error| ExtractError::Ocr(format!("{} did not finish: {error}", self.command)))?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(ExtractError::Ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }
        if let Err(error) = written {
            return Err(ExtractError::Ocr(format!(
                "{} stopped reading the image: {error}: {}",
                self.command,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Clone, Serialize)]
struct LlmOcrRequest {
    image_base64: String,
    media_type: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
struct LlmOcrResponse {
    pages: Option<Vec<LlmOcrPage>>,
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LlmOcrPage {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OcrEndpointConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

/// Sends the image to a multimodal OCR service instead of a local binary.
#[derive(Debug, Clone)]
pub struct EndpointOcr {
    config: OcrEndpointConfig,
}

impl EndpointOcr {
    pub fn new(config: OcrEndpointConfig) -> Self {
        Self { config }
    }

    fn recognize_blocking(&self, image: &[u8]) -> Result<String, ExtractError> {
        let media_type = image::guess_format(image)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");
        let payload = LlmOcrRequest {
            image_base64: STANDARD.encode(image),
            media_type,
        };

        let mut request = Client::new()
            .post(&self.config.endpoint)
            .header("content-type", "application/json")
            .json(&payload);

        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .map_err(|error| ExtractError::Ocr(error.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractError::Ocr(format!(
                "multimodal OCR request to {} returned {}",
                self.config.endpoint,
                response.status()
            )));
        }

        let payload: LlmOcrResponse = response
            .json()
            .map_err(|error| ExtractError::Ocr(error.to_string()))?;
        payload_to_text(payload)
    }
}

impl OcrEngine for EndpointOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, ExtractError> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| self.recognize_blocking(image))
            }
            // The blocking client panics on a thread that is driving a runtime.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.recognize_blocking(image))
                    .join()
                    .unwrap_or_else(|_| Err(ExtractError::Ocr("OCR worker thread panicked".to_string())))
            }),
            Err(_) => self.recognize_blocking(image),
        }
    }
}

pub fn parse_llm_ocr_config() -> Option<OcrEndpointConfig> {
    let endpoint = std::env::var("LLM_OCR_ENDPOINT").ok()?;
    let endpoint = endpoint.trim().to_string();
    if endpoint.is_empty() {
        return None;
    }

    let api_key = std::env::var("LLM_OCR_API_KEY")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|key| !key.is_empty());

    Some(OcrEndpointConfig { endpoint, api_key })
}

/// Prefers a configured OCR endpoint and falls back to the local tesseract.
pub fn ocr_engine_from_env(tesseract: TesseractOcr) -> Box<dyn OcrEngine> {
    match parse_llm_ocr_config() {
        Some(config) => Box::new(EndpointOcr::new(config)),
        None => Box::new(tesseract),
    }
}

fn payload_to_text(payload: LlmOcrResponse) -> Result<String, ExtractError> {
    if let Some(mut listed) = payload.pages {
        listed.sort_by_key(|page| page.page.unwrap_or(1));
        let texts = listed
            .into_iter()
            .filter_map(|page| page.text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>();

        if !texts.is_empty() {
            return Ok(texts.join("\n"));
        }
    }

    payload
        .text
        .ok_or_else(|| ExtractError::Ocr("multimodal OCR response had no text field".to_string()))
}
