/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser-specific error types.
 */

use crate::ast::Position;
use thiserror::Error;

/// Parser error type for Go source that cannot be tokenized or parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{position}: {message}")]
    Lexical { message: String, position: Position },

    #[error("{position}: expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position}: {message}")]
    Syntax { message: String, position: Position },
}

impl ParseError {
    pub fn lexical(message: &str, position: Position) -> Self {
        Self::Lexical {
            message: message.to_string(),
            position,
        }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Lexical { position, .. }
            | Self::Unexpected { position, .. }
            | Self::Syntax { position, .. } => *position,
        }
    }
}
