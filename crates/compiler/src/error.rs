/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use crate::ast::Position;
use thiserror::Error;

pub use crate::parser::error::ParseError;

/// Top-level error type for the compiler
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

/// Errors raised while matching the client declaration grammar.
///
/// Every variant is terminal: one malformed declaration aborts the whole file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no init function with a body found")]
    MissingEntryPoint,

    #[error("init function does not call {0}")]
    NoClientDeclaration(String),

    #[error("{position}: init function may only contain call statements, found {kind}")]
    MalformedStatement { kind: String, position: Position },

    #[error("{position}: unknown field {name}")]
    UnknownField { name: String, position: Position },

    #[error("{position}: {field} must be {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position}: {context} is missing required field {field}")]
    MissingField {
        field: String,
        context: String,
        position: Position,
    },
}
