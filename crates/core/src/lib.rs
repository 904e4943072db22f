pub mod agreement;
pub mod assistant;
pub mod classify;
pub mod clients;
pub mod config;
pub mod conversation;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod prompt;
pub mod session;
pub mod traits;

pub use agreement::{draft_agreement, generate_agreement, DEFAULT_COMPANY};
pub use assistant::LegalAssistant;
pub use classify::{classify, classify_upload};
pub use clients::{OpenAiChatClient, DEFAULT_BASE_URL};
pub use config::{resolve_api_key, ApiKey, AppConfig, ConfigSources, DEFAULT_SECRETS_PATH};
pub use conversation::ConversationHistory;
pub use error::{AgreementError, ChatError, ConfigError, ExtractError};
pub use extractor::{
    ocr_engine_from_env, DocxExtractor, EndpointOcr, ExtractorSet, ImageOcrExtractor,
    LopdfExtractor, OcrEngine, TesseractOcr, TextExtractor,
};
pub use ingest::{build_fingerprint, digest_bytes, ingest_upload};
pub use models::{
    ChatSettings, ConversationTurn, DocumentFingerprint, DocumentKind, ExtractedDocument,
    ExtractedText, Role, UploadedFile,
};
pub use prompt::{compose, SYSTEM_INSTRUCTION};
pub use session::Session;
pub use traits::{ChatModel, ChatRequest};
