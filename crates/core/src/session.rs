use crate::conversation::ConversationHistory;
use crate::models::ExtractedDocument;
use uuid::Uuid;

/// Per-user state: one transcript and the most recently extracted document.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    history: ConversationHistory,
    document: Option<ExtractedDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: ConversationHistory::new(),
            document: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut ConversationHistory {
        &mut self.history
    }

    pub fn document(&self) -> Option<&ExtractedDocument> {
        self.document.as_ref()
    }

    /// Text used as chat context; empty when nothing has been extracted yet.
    pub fn context(&self) -> &str {
        self.document
            .as_ref()
            .map(|document| document.text.as_str())
            .unwrap_or_default()
    }

    pub(crate) fn replace_document(&mut self, document: ExtractedDocument) -> &ExtractedDocument {
        self.document.insert(document)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
