// LLM abstraction layer

pub mod openai;
pub mod provider;

pub use openai::OpenAIAdapter;
pub use provider::*;

#[cfg(test)]
pub(crate) mod testing;
