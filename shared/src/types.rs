/// Shared result alias used across all layers.
pub type Result<T> = anyhow::Result<T>;
