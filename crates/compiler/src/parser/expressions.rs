/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Expression and type parsing.
 */

use super::lexer::{Keyword, TokenKind};
use super::{ParseError, Parser};
use crate::ast::{Expr, Ident, LitKind};

fn binary_precedence(op: &str) -> Option<u8> {
    let prec = match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => return None,
    };
    Some(prec)
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut x = self.parse_unary()?;
        loop {
            let op = match &self.peek().kind {
                TokenKind::Op(op) => *op,
                _ => break,
            };
            let prec = match binary_precedence(op) {
                Some(prec) if prec >= min_prec => prec,
                _ => break,
            };
            self.advance();
            let y = self.parse_binary(prec + 1)?;
            x = Expr::Binary {
                op: op.to_string(),
                x: Box::new(x),
                y: Box::new(y),
            };
        }
        Ok(x)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Op(op @ ("+" | "-" | "!" | "^" | "&" | "<-" | "~")) => {
                self.advance();
                let x = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: op.to_string(),
                    x: Box::new(x),
                    pos: token.pos,
                })
            }
            TokenKind::Op("*") => {
                self.advance();
                let x = self.parse_unary()?;
                Ok(Expr::Star {
                    x: Box::new(x),
                    pos: token.pos,
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let mut x = self.parse_operand()?;
        loop {
            if self.eat_op(".") {
                if self.eat_op("(") {
                    let ty = if self.at_keyword(Keyword::Type) {
                        let pos = self.advance().pos;
                        Expr::Opaque { what: "type switch guard", pos }
                    } else {
                        self.parse_type()?
                    };
                    self.expect_op(")")?;
                    x = Expr::TypeAssert {
                        x: Box::new(x),
                        ty: Box::new(ty),
                    };
                } else {
                    let sel = self.expect_ident()?;
                    x = Expr::Selector {
                        x: Box::new(x),
                        sel,
                    };
                }
            } else if self.at_op("(") {
                x = self.parse_call(x)?;
            } else if self.at_op("[") {
                x = self.parse_index_or_slice(x)?;
            } else if self.at_op("{") && is_literal_type(&x) {
                x = self.parse_literal_value(Some(x))?;
            } else {
                return Ok(x);
            }
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        let literal = |kind: LitKind, value: String| Expr::BasicLit {
            kind,
            value,
            pos: token.pos,
        };
        let expr = match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Expr::Ident(Ident {
                    name,
                    pos: token.pos,
                })
            }
            TokenKind::Int(value) => {
                self.advance();
                literal(LitKind::Int, value)
            }
            TokenKind::Float(value) => {
                self.advance();
                literal(LitKind::Float, value)
            }
            TokenKind::Imag(value) => {
                self.advance();
                literal(LitKind::Imag, value)
            }
            TokenKind::Char(value) => {
                self.advance();
                literal(LitKind::Char, value)
            }
            TokenKind::String(value) => {
                self.advance();
                literal(LitKind::String, value)
            }
            TokenKind::Op("(") => {
                self.advance();
                let x = self.parse_expr()?;
                self.expect_op(")")?;
                Expr::Paren {
                    x: Box::new(x),
                    pos: token.pos,
                }
            }
            TokenKind::Op("[") | TokenKind::Keyword(Keyword::Map) => self.parse_type()?,
            TokenKind::Keyword(Keyword::Func) => self.parse_func_lit()?,
            TokenKind::Keyword(Keyword::Struct | Keyword::Interface | Keyword::Chan) => {
                self.parse_type()?
            }
            _ => return Err(self.unexpected("expression")),
        };
        Ok(expr)
    }

    fn parse_call(&mut self, fun: Expr) -> Result<Expr, ParseError> {
        self.expect_op("(")?;
        let mut args = Vec::new();
        let mut ellipsis = false;
        while !self.at_op(")") {
            args.push(self.parse_expr()?);
            if self.eat_op("...") {
                ellipsis = true;
            }
            if !self.eat_op(",") {
                break;
            }
        }
        self.expect_op(")")?;
        Ok(Expr::Call {
            fun: Box::new(fun),
            args,
            ellipsis,
        })
    }

    fn parse_index_or_slice(&mut self, x: Expr) -> Result<Expr, ParseError> {
        let open = self.peek().pos;
        if self.at_op("[") {
            // Peek for a slice colon at bracket depth one without consuming anything.
            let mut depth = 0usize;
            let mut offset = 0usize;
            let mut is_slice = false;
            while let Some(token) = self.lookahead(offset) {
                match &token.kind {
                    TokenKind::Op("(" | "[" | "{") => depth += 1,
                    TokenKind::Op(")" | "]" | "}") => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    }
                    TokenKind::Op(":") if depth == 1 => {
                        is_slice = true;
                        break;
                    }
                    TokenKind::Eof => break,
                    _ => {}
                }
                offset += 1;
            }
            if is_slice {
                self.skip_balanced()?;
                return Ok(Expr::Slice { x: Box::new(x) });
            }
        }
        self.expect_op("[")?;
        if self.at_op("]") {
            return Err(ParseError::syntax("expected operand", open));
        }
        let index = self.parse_expr()?;
        // Generic instantiations with several type arguments: keep the first one.
        while self.eat_op(",") {
            if self.at_op("]") {
                break;
            }
            self.parse_type()?;
        }
        self.expect_op("]")?;
        Ok(Expr::Index {
            x: Box::new(x),
            index: Box::new(index),
        })
    }

    /// Parse `{ elements }` for a composite literal whose type has already been parsed.
    fn parse_literal_value(&mut self, ty: Option<Expr>) -> Result<Expr, ParseError> {
        let pos = match &ty {
            Some(ty) => ty.pos(),
            None => self.peek().pos,
        };
        self.expect_op("{")?;
        let mut elts = Vec::new();
        while !self.at_op("}") {
            elts.push(self.parse_element()?);
            if !self.eat_op(",") {
                break;
            }
        }
        // The lexer inserts `;` after a final element that is not followed by a comma.
        if self.at_op(";") {
            return Err(self.unexpected("',' or '}'"));
        }
        self.expect_op("}")?;
        Ok(Expr::CompositeLit {
            ty: ty.map(Box::new),
            elts,
            pos,
        })
    }

    fn parse_element(&mut self) -> Result<Expr, ParseError> {
        let key = self.parse_element_value()?;
        if self.eat_op(":") {
            let value = self.parse_element_value()?;
            return Ok(Expr::KeyValue {
                key: Box::new(key),
                value: Box::new(value),
            });
        }
        Ok(key)
    }

    fn parse_element_value(&mut self) -> Result<Expr, ParseError> {
        if self.at_op("{") {
            self.parse_literal_value(None)
        } else {
            self.parse_expr()
        }
    }

    pub(crate) fn parse_type(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                let mut ty = Expr::Ident(Ident {
                    name,
                    pos: token.pos,
                });
                if self.eat_op(".") {
                    let sel = self.expect_ident()?;
                    ty = Expr::Selector {
                        x: Box::new(ty),
                        sel,
                    };
                }
                if self.at_op("[") {
                    ty = self.parse_index_or_slice(ty)?;
                }
                Ok(ty)
            }
            TokenKind::Op("*") => {
                self.advance();
                let x = self.parse_type()?;
                Ok(Expr::Star {
                    x: Box::new(x),
                    pos: token.pos,
                })
            }
            TokenKind::Op("(") => {
                self.advance();
                let x = self.parse_type()?;
                self.expect_op(")")?;
                Ok(Expr::Paren {
                    x: Box::new(x),
                    pos: token.pos,
                })
            }
            TokenKind::Op("[") => {
                self.advance();
                let len = if self.at_op("]") {
                    None
                } else if self.at_op("...") {
                    let pos = self.advance().pos;
                    Some(Box::new(Expr::Opaque {
                        what: "array length",
                        pos,
                    }))
                } else {
                    Some(Box::new(self.parse_expr()?))
                };
                self.expect_op("]")?;
                let elt = self.parse_type()?;
                Ok(Expr::ArrayType {
                    len,
                    elt: Box::new(elt),
                    pos: token.pos,
                })
            }
            TokenKind::Keyword(Keyword::Map) => {
                self.advance();
                self.expect_op("[")?;
                let key = self.parse_type()?;
                self.expect_op("]")?;
                let value = self.parse_type()?;
                Ok(Expr::MapType {
                    key: Box::new(key),
                    value: Box::new(value),
                    pos: token.pos,
                })
            }
            TokenKind::Keyword(kw @ (Keyword::Struct | Keyword::Interface)) => {
                self.advance();
                if !self.at_op("{") {
                    return Err(self.unexpected("'{'"));
                }
                self.skip_balanced()?;
                let what = if kw == Keyword::Struct {
                    "struct type"
                } else {
                    "interface type"
                };
                Ok(Expr::Opaque {
                    what,
                    pos: token.pos,
                })
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.advance();
                self.eat_op("<-");
                self.parse_type()?;
                Ok(Expr::Opaque {
                    what: "channel type",
                    pos: token.pos,
                })
            }
            TokenKind::Op("<-") => {
                self.advance();
                if !self.at_keyword(Keyword::Chan) {
                    return Err(self.unexpected("'chan'"));
                }
                self.parse_type()
            }
            TokenKind::Keyword(Keyword::Func) => self.parse_func_lit(),
            _ => Err(self.unexpected("type")),
        }
    }

    /// Skip a function type or literal: `func(params) results { body }`.
    fn parse_func_lit(&mut self) -> Result<Expr, ParseError> {
        let pos = self.advance().pos;
        if !self.at_op("(") {
            return Err(self.unexpected("'('"));
        }
        self.skip_balanced()?;
        loop {
            match &self.peek().kind {
                TokenKind::Op("(" | "[") => self.skip_balanced()?,
                TokenKind::Keyword(Keyword::Struct | Keyword::Interface) => {
                    self.advance();
                    if self.at_op("{") {
                        self.skip_balanced()?;
                    }
                }
                TokenKind::Op("{") => {
                    self.skip_balanced()?;
                    return Ok(Expr::Opaque {
                        what: "function literal",
                        pos,
                    });
                }
                TokenKind::Op(")" | "]" | "}" | "," | ";" | ":" | "=") | TokenKind::Eof => {
                    return Ok(Expr::Opaque {
                        what: "function type",
                        pos,
                    });
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Whether `{` after this expression opens a composite literal.
fn is_literal_type(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) | Expr::ArrayType { .. } | Expr::MapType { .. } => true,
        Expr::Selector { x, .. } => matches!(x.as_ref(), Expr::Ident(_)),
        Expr::Index { x, .. } => is_literal_type(x),
        Expr::Opaque { what, .. } => *what == "struct type",
        _ => false,
    }
}
