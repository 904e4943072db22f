pub const SYSTEM_INSTRUCTION: &str = "You are LegalEase AI, a professional legal assistant. You help users with contracts, legal advice, terms, and summaries.";

const CONTEXT_MARKER: &str = "Context:";
const SEPARATOR: &str = "\n\n";

/// Appends the document text verbatim after the question. Nothing is
/// truncated, so very large documents can exceed the model's input limit.
pub fn compose(question: &str, context: &str) -> String {
    if context.trim().is_empty() {
        return question.to_string();
    }

    let mut prompt = String::with_capacity(question.len() + context.len() + 16);
    prompt.push_str(question);
    prompt.push_str(SEPARATOR);
    prompt.push_str(CONTEXT_MARKER);
    prompt.push('\n');
    prompt.push_str(context);
    prompt
}

#[cfg(test)]
mod tests {
    use super::compose;

    #[test]
    fn empty_context_leaves_question_alone() {
        assert_eq!(compose("Is this enforceable?", ""), "Is this enforceable?");
        assert_eq!(compose("Is this enforceable?", " \n"), "Is this enforceable?");
    }

    #[test]
    fn context_is_appended_after_marker() {
        assert_eq!(
            compose("What does this say?", "Confidential"),
            "What does this say?\n\nContext:\nConfidential"
        );
    }

    #[test]
    fn context_is_kept_verbatim() {
        let context = "Clause 1.\n\n  Clause 2 (indented)";
        let prompt = compose("Summarize", context);
        assert!(prompt.starts_with("Summarize"));
        assert!(prompt.contains("Context:"));
        assert!(prompt.ends_with(context));
    }
}
