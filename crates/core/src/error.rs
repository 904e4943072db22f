use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {filename} ({media_type})")]
    UnsupportedFormat { filename: String, media_type: String },

    #[error("could not decode {format} payload: {details}")]
    Decode { format: &'static str, details: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("ocr failed: {0}")]
    Ocr(String),
}

impl ExtractError {
    pub(crate) fn decode(format: &'static str, details: impl ToString) -> Self {
        Self::Decode {
            format,
            details: details.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Request(String),

    #[error("question is empty")]
    EmptyQuestion,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing model API credential: set OPENAI_API_KEY, pass --api-key, or add [openai] api_key to {0}")]
    MissingCredential(String),

    #[error("could not read secrets file {path}: {source}")]
    SecretsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse secrets file {path}: {source}")]
    SecretsParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid model base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum AgreementError {
    #[error("agreement field is required: {0}")]
    MissingField(&'static str),
}
