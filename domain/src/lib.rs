//! Core types for the analysis pipeline: domain models, collaborator
//! contracts, and the stage failure taxonomy.

pub mod errors;
pub mod models;
pub mod providers;
