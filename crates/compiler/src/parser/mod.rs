/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser module for Go declaration files.
 * This module works only with in-memory data (no file I/O).
 */

pub mod error;
mod expressions;
pub mod lexer;


pub use error::ParseError;

use crate::ast::{Block, Decl, File, FuncDecl, GenKeyword, Ident, ImportSpec, Position, Stmt, StmtKind};
use lexer::{Keyword, Lexer, Token, TokenKind};

/// Parse a Go source file into a syntax tree.
///
/// # Errors
///
/// Returns `ParseError` if the text cannot be tokenized, lacks a package clause, or
/// contains a construct the parser does not understand.
pub fn parse_file(source: &str) -> Result<File, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_file()
}

/// Recursive descent parser over the token stream.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn parse_file(&mut self) -> Result<File, ParseError> {
        self.expect_keyword(Keyword::Package)?;
        let package = self.expect_ident()?;
        self.expect_semicolon()?;

        let mut imports = Vec::new();
        while self.at_keyword(Keyword::Import) {
            self.parse_import_decl(&mut imports)?;
        }

        let mut decls = Vec::new();
        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Op(";") => {
                    self.advance();
                }
                TokenKind::Keyword(Keyword::Func) => decls.push(Decl::Func(self.parse_func_decl()?)),
                TokenKind::Keyword(kw @ (Keyword::Var | Keyword::Const | Keyword::Type)) => {
                    self.advance();
                    self.skip_to_statement_end();
                    let keyword = match kw {
                        Keyword::Var => GenKeyword::Var,
                        Keyword::Const => GenKeyword::Const,
                        _ => GenKeyword::Type,
                    };
                    decls.push(Decl::Gen {
                        keyword,
                        pos: token.pos,
                    });
                }
                TokenKind::Keyword(Keyword::Import) => {
                    return Err(ParseError::syntax(
                        "imports must appear before other declarations",
                        token.pos,
                    ));
                }
                _ => return Err(self.unexpected("declaration")),
            }
        }

        Ok(File {
            package,
            imports,
            decls,
        })
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Import)?;
        if self.eat_op("(") {
            while !self.at_op(")") {
                if self.eat_op(";") {
                    continue;
                }
                imports.push(self.parse_import_spec()?);
                if !self.at_op(")") {
                    self.expect_semicolon()?;
                }
            }
            self.expect_op(")")?;
        } else {
            imports.push(self.parse_import_spec()?);
        }
        self.expect_semicolon()
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let pos = self.peek().pos;
        let alias = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            TokenKind::Op(".") => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };
        match &self.peek().kind {
            TokenKind::String(path) => {
                let path = unquote(path)
                    .ok_or_else(|| ParseError::syntax("invalid import path", self.peek().pos))?;
                self.advance();
                Ok(ImportSpec { alias, path, pos })
            }
            _ => Err(self.unexpected("import path")),
        }
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.expect_keyword(Keyword::Func)?;

        let has_receiver = self.at_op("(");
        if has_receiver {
            self.skip_balanced()?;
        }
        let name = self.expect_ident()?;
        if self.at_op("[") {
            self.skip_balanced()?;
        }
        if !self.at_op("(") {
            return Err(self.unexpected("'('"));
        }
        self.skip_balanced()?;
        self.skip_result_type()?;

        let body = if self.at_op("{") {
            Some(self.parse_block()?)
        } else {
            None
        };
        self.expect_semicolon()?;

        Ok(FuncDecl {
            name,
            has_receiver,
            body,
        })
    }

    /// Skip a function's result list, stopping at the body or the end of the declaration.
    fn skip_result_type(&mut self) -> Result<(), ParseError> {
        loop {
            match &self.peek().kind {
                TokenKind::Op("{") | TokenKind::Op(";") | TokenKind::Eof => return Ok(()),
                TokenKind::Op("(") | TokenKind::Op("[") => self.skip_balanced()?,
                TokenKind::Keyword(Keyword::Struct | Keyword::Interface) => {
                    self.advance();
                    if self.at_op("{") {
                        self.skip_balanced()?;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let pos = self.expect_op("{")?;
        let mut stmts = Vec::new();
        loop {
            if self.eat_op(";") {
                continue;
            }
            if self.at_op("}") || self.at_eof() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect_op("}")?;
        Ok(Block { stmts, pos })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.peek().pos;
        if matches!(
            &self.peek().kind,
            TokenKind::Keyword(Keyword::If | Keyword::For | Keyword::Switch | Keyword::Select)
        ) {
            self.skip_control_stmt()?;
            return Ok(Stmt::Other {
                kind: StmtKind::Control,
                pos,
            });
        }

        let other = match &self.peek().kind {
            TokenKind::Keyword(Keyword::Var | Keyword::Const | Keyword::Type) => {
                Some(StmtKind::Declaration)
            }
            TokenKind::Keyword(
                Keyword::Break
                | Keyword::Continue
                | Keyword::Goto
                | Keyword::Fallthrough,
            ) => Some(StmtKind::Control),
            TokenKind::Keyword(Keyword::Return) => Some(StmtKind::Return),
            TokenKind::Keyword(Keyword::Go) => Some(StmtKind::Go),
            TokenKind::Keyword(Keyword::Defer) => Some(StmtKind::Defer),
            TokenKind::Op("{") => Some(StmtKind::Block),
            _ => None,
        };
        if let Some(kind) = other {
            self.skip_to_statement_end();
            return Ok(Stmt::Other { kind, pos });
        }

        // Simple statement: parse the leading expression, then decide what it was.
        let expr = self.parse_expr()?;
        let kind = match &self.peek().kind {
            TokenKind::Op(",")
            | TokenKind::Op("=")
            | TokenKind::Op(":=")
            | TokenKind::Op("+=")
            | TokenKind::Op("-=")
            | TokenKind::Op("*=")
            | TokenKind::Op("/=")
            | TokenKind::Op("%=")
            | TokenKind::Op("&=")
            | TokenKind::Op("|=")
            | TokenKind::Op("^=")
            | TokenKind::Op("<<=")
            | TokenKind::Op(">>=")
            | TokenKind::Op("&^=") => Some(StmtKind::Assign),
            TokenKind::Op("++") | TokenKind::Op("--") => Some(StmtKind::IncDec),
            TokenKind::Op("<-") => Some(StmtKind::Send),
            TokenKind::Op(":") => {
                self.advance();
                if !self.at_op("}") {
                    self.parse_stmt()?;
                }
                return Ok(Stmt::Other {
                    kind: StmtKind::Labeled,
                    pos,
                });
            }
            _ => None,
        };
        if let Some(kind) = kind {
            self.skip_to_statement_end();
            return Ok(Stmt::Other { kind, pos });
        }

        if !self.eat_op(";") && !self.at_op("}") {
            return Err(self.unexpected("';' or newline"));
        }
        Ok(Stmt::Expr(expr))
    }

    /// Skip an `if`, `for`, `switch` or `select` statement including any `else` chain.
    ///
    /// Headers may contain `;` (`for i := 0; i < n; i++`), so the statement ends at the body
    /// rather than at the first terminator. Go requires composite literals in headers to be
    /// parenthesized, which makes the first `{` at depth zero the body.
    fn skip_control_stmt(&mut self) -> Result<(), ParseError> {
        loop {
            self.advance();
            loop {
                match &self.peek().kind {
                    TokenKind::Op("{") => break,
                    TokenKind::Op("(" | "[") => self.skip_balanced()?,
                    TokenKind::Eof => return Err(self.unexpected("'{'")),
                    _ => {
                        self.advance();
                    }
                }
            }
            self.skip_balanced()?;
            if !self.at_keyword(Keyword::Else) {
                break;
            }
            self.advance();
            if self.at_op("{") {
                self.skip_balanced()?;
                break;
            }
            if !self.at_keyword(Keyword::If) {
                return Err(self.unexpected("'if' or '{'"));
            }
        }
        self.eat_op(";");
        Ok(())
    }

    /// Skip tokens up to and including the `;` that ends the current statement.
    ///
    /// Brackets are tracked so that nested blocks and literals are skipped whole. A `}` at
    /// depth zero closes the enclosing block and is left for the caller.
    fn skip_to_statement_end(&mut self) {
        let mut depth = 0usize;
        loop {
            match &self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::Op("(" | "[" | "{") => depth += 1,
                TokenKind::Op(")" | "]" | "}") => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Op(";") if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a bracketed group starting at the current `(`, `[` or `{`.
    pub(crate) fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let start = self.peek().pos;
        let mut stack: Vec<&'static str> = Vec::new();
        loop {
            let token = self.advance().clone();
            match token.kind {
                TokenKind::Op("(") => stack.push(")"),
                TokenKind::Op("[") => stack.push("]"),
                TokenKind::Op("{") => stack.push("}"),
                TokenKind::Op(close @ (")" | "]" | "}")) => {
                    if stack.pop() != Some(close) {
                        return Err(ParseError::syntax(format!("unbalanced '{close}'"), token.pos));
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::syntax("unclosed bracket", start));
                }
                _ => {}
            }
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        // The stream always ends in Eof and `advance` never moves past it.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn lookahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        let index = self.position.min(self.tokens.len() - 1);
        if !matches!(self.tokens[index].kind, TokenKind::Eof) {
            self.position += 1;
        }
        &self.tokens[index]
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn at_op(&self, op: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Op(o) if *o == op)
    }

    pub(crate) fn at_keyword(&self, kw: Keyword) -> bool {
        matches!(&self.peek().kind, TokenKind::Keyword(k) if *k == kw)
    }

    pub(crate) fn eat_op(&mut self, op: &str) -> bool {
        if self.at_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_op(&mut self, op: &'static str) -> Result<Position, ParseError> {
        if self.at_op(op) {
            Ok(self.advance().pos)
        } else {
            Err(self.unexpected(&format!("'{op}'")))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<Position, ParseError> {
        if self.at_keyword(kw) {
            Ok(self.advance().pos)
        } else {
            Err(self.unexpected(&format!("'{}'", format!("{kw:?}").to_lowercase())))
        }
    }

    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_op(";") || self.at_eof() {
            Ok(())
        } else {
            Err(self.unexpected("';' or newline"))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let ident = Ident {
                    name: name.clone(),
                    pos: self.peek().pos,
                };
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            position: token.pos,
        }
    }
}

/// Decode a string literal as written in source into its value.
///
/// Interpreted literals have their escape sequences resolved; raw literals are taken verbatim.
/// Returns `None` when `literal` is not a well-formed string literal.
pub fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return Some(raw.replace('\r', ""));
    }
    let body = literal.strip_prefix('"')?.strip_suffix('"')?;

    // \x and octal escapes denote bytes, so the value is assembled as UTF-8 bytes.
    let mut value = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut value, c);
            continue;
        }
        match chars.next()? {
            'a' => value.push(0x07),
            'b' => value.push(0x08),
            'f' => value.push(0x0c),
            'n' => value.push(b'\n'),
            'r' => value.push(b'\r'),
            't' => value.push(b'\t'),
            'v' => value.push(0x0b),
            '\\' => value.push(b'\\'),
            '"' => value.push(b'"'),
            'x' => value.push(u8::try_from(digits(&mut chars, 2, 16)?).ok()?),
            first @ '0'..='7' => {
                let code = first.to_digit(8)? * 64 + digits(&mut chars, 2, 8)?;
                value.push(u8::try_from(code).ok()?);
            }
            'u' => push_char(&mut value, char::from_u32(digits(&mut chars, 4, 16)?)?),
            'U' => push_char(&mut value, char::from_u32(digits(&mut chars, 8, 16)?)?),
            _ => return None,
        }
    }
    String::from_utf8(value).ok()
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buf = [0; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Read exactly `count` digits in `radix`.
fn digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}
