//! External collaborator implementations: model clients, the corpus store,
//! configuration, and the prompt templates they carry.

pub mod config;
pub mod corpus_store;
pub mod groq_client;
pub mod ollama_client;
pub mod prompts;
pub mod search;
