//! CLI support for kaql
//!
//! Provides programmatic access to the kaql CLI commands so they can be
//! embedded in other tools and tested without a process.

mod check;
mod docs;

pub use check::{CheckResult, ParseOptions, execute_check, execute_parse, execute_tokens};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoQuery,

    #[error("Unknown topic: '{0}'\nRun 'kaql docs' to see available topics.")]
    UnknownTopic(String),
}
