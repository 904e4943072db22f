use crate::models::ConversationTurn;

/// Append-only transcript. Corrections are new turns; nothing is edited or
/// removed.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Newest first, for display only.
    pub fn iter_recent_first(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().rev()
    }

    /// Plain-text export: `User: ...` and `Assistant: ...` blocks separated by a
    /// blank line.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
