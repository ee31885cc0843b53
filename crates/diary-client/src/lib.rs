//! CLI, configuration and terminal rendering for the diary
//!
//! This crate provides the `diary` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use config::DiaryConfig;
pub use error::{ClientError, ClientResult};
pub use render::Renderer;
