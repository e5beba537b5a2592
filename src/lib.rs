pub mod args;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod summary;
pub mod web;

// Re-export commonly used items for convenience
pub use config::AppConfig;
pub use errors::AppError;
pub use graph::{DecisionGraph, Neo4jGraph};
pub use summary::{summarize_outcomes, OpenRouterClient, TextGenerator};
