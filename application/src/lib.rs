//! Use-case layer: retrieval query composition and the staged image
//! analysis pipeline.

pub mod pipeline;
pub mod retriever;
