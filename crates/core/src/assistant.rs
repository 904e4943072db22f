use crate::extractor::ExtractorSet;
use crate::ingest::ingest_upload;
use crate::prompt::{compose, SYSTEM_INSTRUCTION};
use crate::session::Session;
use crate::traits::{ChatModel, ChatRequest};
use crate::{ChatError, ChatSettings, ConversationTurn, ExtractError, ExtractedDocument, UploadedFile};
use tracing::{info, warn};

/// Runs the ingest and ask steps against an explicitly passed [`Session`].
pub struct LegalAssistant<M>
where
    M: ChatModel,
{
    model: M,
    extractors: ExtractorSet,
    settings: ChatSettings,
}

impl<M> LegalAssistant<M>
where
    M: ChatModel,
{
    pub fn new(model: M, extractors: ExtractorSet, settings: ChatSettings) -> Self {
        Self {
            model,
            extractors,
            settings,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Extracts the upload and makes it the session's chat context. A failed
    /// upload leaves the previous document in place.
    pub fn ingest<'s>(
        &self,
        session: &'s mut Session,
        file: &UploadedFile,
    ) -> Result<&'s ExtractedDocument, ExtractError> {
        let document = ingest_upload(&self.extractors, file)?;
        Ok(session.replace_document(document))
    }

    /// Appends the question, asks the model with the prior turns, and appends
    /// the reply. A failed call appends no assistant turn.
    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<String, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let prior = session.history().turns().to_vec();
        let prompt = compose(question, session.context());
        session.history_mut().append(ConversationTurn::user(question));

        let request = ChatRequest {
            system_instruction: SYSTEM_INSTRUCTION,
            history: &prior,
            prompt: &prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match self.model.complete(&request).await {
            Ok(reply) => {
                info!(
                    session = %session.id(),
                    prompt_chars = prompt.chars().count(),
                    reply_chars = reply.chars().count(),
                    "assistant replied"
                );
                session
                    .history_mut()
                    .append(ConversationTurn::assistant(reply.clone()));
                Ok(reply)
            }
            Err(error) => {
                warn!(session = %session.id(), %error, "chat request failed");
                Err(error)
            }
        }
    }
}
