//! CLI command implementations
//!
//! Each command lives in its own module with an `Args` struct and an
//! `execute` function taking the shared services and output format.

pub mod build;
pub mod completions;
pub mod config;
pub mod info;
pub mod search;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use info::InfoArgs;
pub use search::SearchArgs;
