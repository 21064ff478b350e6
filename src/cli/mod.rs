//! CLI support for json-linq
//!
//! Provides programmatic access to the jlinq CLI functionality for embedding
//! in other tools.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query failed to scan, parse or evaluate, or the records were not a JSON array
    #[error(transparent)]
    Query(#[from] crate::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input, --file or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'jlinq docs' to see available topics.")]
    UnknownTopic(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::EvalError> for CliError {
    fn from(e: crate::EvalError) -> Self {
        CliError::Query(e.into())
    }
}
