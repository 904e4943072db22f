pub mod openai;

pub use openai::{OpenAiChatClient, DEFAULT_BASE_URL};
