//! Shugen Compiler Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library reads Go declaration files and extracts the client declarations made in
//! their `init` function. It works only with in-memory data (no file I/O); rendering the
//! extracted [`Package`] into code is left to generators.
//!
//! # Example
//!
//! ```rust
//! use shugen_compiler::compile_source;
//!
//! let source = r#"
//! package api
//!
//! import "github.com/damonchen/shu/bundle"
//!
//! func init() {
//!     bundle.Client(bundle.ClientDef{
//!         Name: "auth",
//!         APIs: []bundle.API{
//!             {Name: "login", Params: UserLogin{}, Response: LoginResp{}},
//!         },
//!     })
//! }
//! "#;
//!
//! let package = compile_source(source)?;
//! assert_eq!(package.clients[0].name, "auth");
//! assert_eq!(package.clients[0].funcs[0].response_type, "LoginResp");
//! # Ok::<(), shugen_compiler::CompilerError>(())
//! ```

pub mod ast;
pub mod error;
pub mod extractor;
pub mod model;
pub mod parser;

// Re-export error and model types for public API
pub use error::{CompilerError, ExtractError, ParseError};
pub use model::{Client, Func, Package, Param};

/// Parse Go source text into a syntax tree.
///
/// # Errors
///
/// Returns `CompilerError::Parse` if the source cannot be tokenized or parsed.
pub fn parse_source(source: &str) -> Result<ast::File, CompilerError> {
    Ok(parser::parse_file(source)?)
}

/// Extract the client declarations from a parsed file.
///
/// # Errors
///
/// Returns `ExtractError` if the declaration block does not follow the expected grammar.
pub fn extract_package(file: &ast::File) -> Result<Package, ExtractError> {
    extractor::extract_package(file)
}

/// Parse a declaration file and extract its client declarations in one step.
///
/// # Errors
///
/// Returns `CompilerError` if parsing or extraction fails.
pub fn compile_source(source: &str) -> Result<Package, CompilerError> {
    let file = parse_source(source)?;
    Ok(extract_package(&file)?)
}
