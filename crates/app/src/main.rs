mod repl;

use chrono::Utc;
use clap::{Parser, Subcommand};
use legalease_core::{
    draft_agreement, ocr_engine_from_env, AppConfig, ChatError, ChatSettings, ConfigSources,
    ExtractError, ExtractorSet, LegalAssistant, OpenAiChatClient, Session, TesseractOcr,
    UploadedFile, DEFAULT_BASE_URL, DEFAULT_COMPANY, DEFAULT_SECRETS_PATH,
};
use repl::{parse_chat_input, ChatInput, HELP};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ABOUT: &str = "LegalEase AI is your digital legal assistant. It allows:
  - parsing of legal files: PDFs, Word documents, images
  - agreement drafting for SaaS and software services
  - a conversational legal chatbot backed by a hosted language model

Built by Chereka Technology.";

#[derive(Parser)]
#[command(name = "legalease", version, about = "Legal document parser, agreement generator, and AI legal chatbot")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Model API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Secrets file consulted when no API key is given
    #[arg(long, default_value = DEFAULT_SECRETS_PATH)]
    secrets: PathBuf,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "LEGALEASE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Chat model name
    #[arg(long, default_value = "gpt-3.5-turbo")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    /// Maximum reply length in tokens
    #[arg(long, default_value_t = 700)]
    max_tokens: u32,

    /// Tesseract binary used for image OCR
    #[arg(long, default_value = "tesseract")]
    tesseract_cmd: String,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    ocr_lang: String,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text from a PDF, Word document, or image.
    Extract {
        /// File to parse.
        #[arg(long)]
        file: PathBuf,
        /// Declared media type; the extension is used when omitted.
        #[arg(long)]
        media_type: Option<String>,
    },
    /// Generate a software service agreement between two parties.
    Agreement {
        /// Your company name.
        #[arg(long, default_value = DEFAULT_COMPANY)]
        company: String,
        /// Client name.
        #[arg(long)]
        client: String,
        /// Description of the services provided.
        #[arg(long)]
        description: String,
        /// Write the agreement to this file as well as printing it.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Ask one question, optionally about a document.
    Ask {
        /// Question for the assistant.
        #[arg(long)]
        question: String,
        /// Document to use as context.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Declared media type of the document.
        #[arg(long)]
        media_type: Option<String>,
    },
    /// Start an interactive chat session.
    Chat {
        /// Document to load before the first question.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Default path for /save.
        #[arg(long, default_value = "legal_chat.txt")]
        transcript: PathBuf,
    },
    /// Describe the assistant.
    About,
}

type Assistant = LegalAssistant<OpenAiChatClient>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "legalease boot"
    );

    match &cli.command {
        Command::Extract { file, media_type } => {
            let extractors = build_extractors(&cli);
            let upload = UploadedFile::from_path(file, media_type.as_deref())?;
            match extractors.extract(&upload) {
                Ok((kind, text)) => {
                    println!("extracted {} text from {}:", kind, upload.filename);
                    println!("{}", text.as_str());
                }
                Err(error) => report_extract_error(&error)?,
            }
        }
        Command::Agreement {
            company,
            client,
            description,
            output,
        } => {
            let agreement = draft_agreement(company, client, description)?;
            println!("{agreement}");
            if let Some(path) = output {
                tokio::fs::write(path, &agreement).await?;
                println!("agreement saved to {}", path.display());
            }
        }
        Command::Ask {
            question,
            file,
            media_type,
        } => {
            let assistant = build_assistant(&cli)?;
            let mut session = Session::new();
            if let Some(path) = file {
                load_document(&assistant, &mut session, path, media_type.as_deref())?;
            }

            match assistant.ask(&mut session, question).await {
                Ok(reply) => println!("{reply}"),
                Err(error) => println!("error: {error}"),
            }
        }
        Command::Chat { file, transcript } => {
            let assistant = build_assistant(&cli)?;
            let mut session = Session::new();
            if let Some(path) = file {
                load_document(&assistant, &mut session, path, None)?;
            }
            run_chat(&assistant, &mut session, transcript).await?;
        }
        Command::About => println!("{ABOUT}"),
    }

    Ok(())
}

fn build_extractors(cli: &Cli) -> ExtractorSet {
    ExtractorSet::with_ocr(ocr_engine_from_env(TesseractOcr {
        command: cli.tesseract_cmd.clone(),
        language: cli.ocr_lang.clone(),
    }))
}

fn build_assistant(cli: &Cli) -> anyhow::Result<Assistant> {
    let config = AppConfig::resolve(ConfigSources {
        api_key: cli.api_key.as_deref(),
        secrets_path: &cli.secrets,
        base_url: &cli.base_url,
        chat: ChatSettings {
            model: cli.model.clone(),
            temperature: cli.temperature,
            max_tokens: cli.max_tokens,
        },
    })?;

    info!(model = %config.chat.model, base_url = %config.base_url, "model client configured");
    let client = OpenAiChatClient::new(config.base_url.as_str(), config.api_key.clone(), &config.chat);
    Ok(LegalAssistant::new(client, build_extractors(cli), config.chat))
}

/// Prints recoverable extraction failures; anything else aborts the command.
fn report_extract_error(error: &ExtractError) -> anyhow::Result<()> {
    match error {
        ExtractError::UnsupportedFormat { .. } => {
            warn!(%error, "upload rejected");
            println!("warning: {error}. Supported: pdf, docx, png, jpg, jpeg.");
            Ok(())
        }
        ExtractError::Decode { .. } | ExtractError::Ocr(_) => {
            warn!(%error, "extraction failed");
            println!("extraction failed: {error}");
            Ok(())
        }
        ExtractError::Io(_) | ExtractError::MissingFileName(_) => {
            Err(anyhow::anyhow!(error.to_string()))
        }
    }
}

fn load_document(
    assistant: &Assistant,
    session: &mut Session,
    path: &Path,
    media_type: Option<&str>,
) -> anyhow::Result<()> {
    let upload = UploadedFile::from_path(path, media_type)?;
    match assistant.ingest(session, &upload) {
        Ok(document) => {
            println!(
                "loaded {} ({}, {} characters)",
                document.fingerprint.filename,
                document.fingerprint.kind,
                document.text.char_count()
            );
            if document.text.is_empty() {
                println!("warning: no text could be recovered from this document");
            }
            Ok(())
        }
        Err(error) => report_extract_error(&error),
    }
}

async fn run_chat(
    assistant: &Assistant,
    session: &mut Session,
    default_transcript: &Path,
) -> anyhow::Result<()> {
    println!("LegalEase chatbot. Ask me anything legal: contracts, clauses, regulations...");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_chat_input(&line) {
            ChatInput::Empty => {}
            ChatInput::Quit => break,
            ChatInput::Help => println!("{HELP}"),
            ChatInput::Unknown(input) => println!("unknown command: {input}\n{HELP}"),
            ChatInput::History => {
                for turn in session.history().turns() {
                    println!("[{}] {}", turn.role.label(), turn.content);
                }
            }
            ChatInput::Save(path) => {
                if session.history().is_empty() {
                    println!("nothing to save yet");
                    continue;
                }
                let path = path.unwrap_or_else(|| default_transcript.to_path_buf());
                tokio::fs::write(&path, session.history().transcript()).await?;
                println!("chat saved to {}", path.display());
            }
            ChatInput::Upload(path) => {
                if let Err(error) = load_document(assistant, session, &path, None) {
                    println!("error: {error}");
                }
            }
            ChatInput::Question(question) => match assistant.ask(session, &question).await {
                Ok(reply) => println!("assistant: {reply}"),
                Err(ChatError::EmptyQuestion) => {}
                Err(error) => println!("error: {error}. You can ask again."),
            },
        }
    }

    Ok(())
}
