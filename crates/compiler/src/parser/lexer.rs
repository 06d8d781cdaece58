/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Tokenizer for Go source text.
 *
 * Produces a flat token stream with Go's automatic semicolon insertion already
 * applied, so the parser can treat `;` as the only statement terminator.
 */

use crate::ast::Position;
use crate::parser::error::ParseError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    fn lookup(word: &str) -> Option<Self> {
        let kw = match word {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(kw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Keyword(Keyword),
    Int(String),
    Float(String),
    Imag(String),
    Char(String),
    /// String literal as written, including its quotes or backticks.
    String(String),
    /// Operator or punctuation.
    Op(&'static str),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Keyword(kw) => write!(f, "keyword '{}'", format!("{kw:?}").to_lowercase()),
            TokenKind::Int(v)
            | TokenKind::Float(v)
            | TokenKind::Imag(v)
            | TokenKind::Char(v)
            | TokenKind::String(v) => write!(f, "literal {v}"),
            TokenKind::Op(";") => write!(f, "';' or newline"),
            TokenKind::Op(op) => write!(f, "'{op}'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

// Longest operators first so that greedy matching picks `<<=` over `<<` over `<`.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">", "=", "!", "~", "(", ")", "[", "]", "{", "}", ",", ";", ".", ":",
];

pub struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        // A leading byte order mark is not part of the source text.
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input. The stream always ends with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.insert_semicolon();
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                c if is_letter(c) => self.lex_word(),
                c if c.is_ascii_digit() => self.lex_number(),
                '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.lex_number(),
                '"' => self.lex_string()?,
                '`' => self.lex_raw_string()?,
                '\'' => self.lex_rune()?,
                _ => self.lex_operator()?,
            }
        }
        self.insert_semicolon();
        let pos = self.pos();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            pos,
        });
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn push(&mut self, kind: TokenKind, pos: Position) {
        self.tokens.push(Token { kind, pos });
    }

    /// Go inserts a semicolon at a line break when the line's last token could end a statement.
    fn insert_semicolon(&mut self) {
        let needed = match self.tokens.last().map(|t| &t.kind) {
            Some(TokenKind::Ident(_))
            | Some(TokenKind::Int(_))
            | Some(TokenKind::Float(_))
            | Some(TokenKind::Imag(_))
            | Some(TokenKind::Char(_))
            | Some(TokenKind::String(_)) => true,
            Some(TokenKind::Keyword(kw)) => matches!(
                kw,
                Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
            ),
            Some(TokenKind::Op(op)) => matches!(*op, "++" | "--" | ")" | "]" | "}"),
            _ => false,
        };
        if needed {
            let pos = self.pos();
            self.push(TokenKind::Op(";"), pos);
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos();
        self.bump();
        self.bump();
        let mut saw_newline = false;
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    break;
                }
                Some('\n') => saw_newline = true,
                Some(_) => {}
                None => return Err(ParseError::lexical("comment not terminated", start)),
            }
        }
        // A multi-line comment acts like a newline.
        if saw_newline {
            self.insert_semicolon();
        }
        Ok(())
    }

    fn lex_word(&mut self) {
        let pos = self.pos();
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_letter(c) || c.is_ascii_digit() {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let kind = match Keyword::lookup(&word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(word),
        };
        self.push(kind, pos);
    }

    fn lex_number(&mut self) {
        let pos = self.pos();
        let mut text = String::new();
        let mut is_float = false;

        let hex = self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        if hex {
            text.push(self.bump().unwrap_or('0'));
            text.push(self.bump().unwrap_or('x'));
        }

        while let Some(c) = self.peek() {
            let exponent = if hex {
                matches!(c, 'p' | 'P')
            } else {
                matches!(c, 'e' | 'E')
            };
            if exponent {
                is_float = true;
                text.push(c);
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
            } else if c == '.' {
                is_float = true;
                text.push(c);
                self.bump();
            } else if c.is_ascii_alphanumeric() || c == '_' {
                // Covers digits, base prefixes (0b, 0o), hex digits and the imaginary suffix.
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = if text.ends_with('i') {
            TokenKind::Imag(text)
        } else if is_float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        };
        self.push(kind, pos);
    }

    fn lex_string(&mut self) -> Result<(), ParseError> {
        let pos = self.pos();
        let text = self.lex_quoted('"', "string literal not terminated", pos)?;
        self.push(TokenKind::String(text), pos);
        Ok(())
    }

    fn lex_rune(&mut self) -> Result<(), ParseError> {
        let pos = self.pos();
        let text = self.lex_quoted('\'', "rune literal not terminated", pos)?;
        self.push(TokenKind::Char(text), pos);
        Ok(())
    }

    fn lex_quoted(&mut self, quote: char, message: &str, start: Position) -> Result<String, ParseError> {
        let mut text = String::new();
        text.push(quote);
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(ParseError::lexical(message, start)),
                Some('\\') => {
                    text.push('\\');
                    self.bump();
                    match self.bump() {
                        Some(escaped) if escaped != '\n' => text.push(escaped),
                        _ => return Err(ParseError::lexical(message, start)),
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                    if c == quote {
                        return Ok(text);
                    }
                }
            }
        }
    }

    fn lex_raw_string(&mut self) -> Result<(), ParseError> {
        let pos = self.pos();
        let mut text = String::from("`");
        self.bump();
        loop {
            match self.bump() {
                Some('`') => break,
                Some('\r') => {}
                Some(c) => text.push(c),
                None => return Err(ParseError::lexical("raw string literal not terminated", pos)),
            }
        }
        text.push('`');
        self.push(TokenKind::String(text), pos);
        Ok(())
    }

    fn lex_operator(&mut self) -> Result<(), ParseError> {
        let pos = self.pos();
        for op in OPERATORS {
            let matches = op
                .chars()
                .enumerate()
                .all(|(i, c)| self.peek_at(i) == Some(c));
            if matches {
                for _ in 0..op.chars().count() {
                    self.bump();
                }
                self.push(TokenKind::Op(op), pos);
                return Ok(());
            }
        }
        let c = self.peek().unwrap_or('\0');
        Err(ParseError::lexical(
            &format!("unexpected character {c:?}"),
            pos,
        ))
    }
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_semicolon_inserted_after_line_ending_tokens() {
        let tokens = kinds("package api\nfunc init() {\n}\n");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Keyword(Keyword::Package),
                TokenKind::Ident("api".to_string()),
                TokenKind::Op(";"),
                TokenKind::Keyword(Keyword::Func),
                TokenKind::Ident("init".to_string()),
                TokenKind::Op("("),
                TokenKind::Op(")"),
                TokenKind::Op("{"),
                TokenKind::Op("}"),
                TokenKind::Op(";"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_comma() {
        let tokens = kinds("f(a,\nb)");
        assert!(!tokens[..4].contains(&TokenKind::Op(";")));
    }

    #[test]
    fn test_string_literals_keep_quotes() {
        let tokens = kinds(r#"x := "a\"b" + `raw
text`"#);
        assert!(tokens.contains(&TokenKind::String(r#""a\"b""#.to_string())));
        assert!(tokens.contains(&TokenKind::String("`raw\ntext`".to_string())));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("1 0x1F 1.5 1e9 2i 0b1010");
        assert_eq!(tokens[0], TokenKind::Int("1".to_string()));
        assert_eq!(tokens[1], TokenKind::Int("0x1F".to_string()));
        assert_eq!(tokens[2], TokenKind::Float("1.5".to_string()));
        assert_eq!(tokens[3], TokenKind::Float("1e9".to_string()));
        assert_eq!(tokens[4], TokenKind::Imag("2i".to_string()));
        assert_eq!(tokens[5], TokenKind::Int("0b1010".to_string()));
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = kinds("a // trailing\n/* block\ncomment */ b");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Op(";"),
                TokenKind::Ident("b".to_string()),
                TokenKind::Op(";"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        let tokens = kinds("a <<= b ... c := d");
        assert!(tokens.contains(&TokenKind::Op("<<=")));
        assert!(tokens.contains(&TokenKind::Op("...")));
        assert!(tokens.contains(&TokenKind::Op(":=")));
    }

    #[test]
    fn test_positions_are_tracked() {
        let tokens = Lexer::new("a\n  bb").tokenize().unwrap();
        assert_eq!(tokens[0].pos, Position::new(1, 1));
        assert_eq!(tokens[2].pos, Position::new(2, 3));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let err = Lexer::new("\"abc\nx").tokenize().unwrap_err();
        assert!(err.to_string().contains("string literal not terminated"));
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let tokens = Lexer::new("\u{feff}package api\n").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Package));
        assert_eq!(tokens[0].pos, Position::new(1, 1));
    }

    #[test]
    fn test_byte_order_mark_inside_source_is_an_error() {
        let err = Lexer::new("package api\n\u{feff}").tokenize().unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
    }

    #[test]
    fn test_unexpected_character_is_an_error() {
        let err = Lexer::new("a $ b").tokenize().unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
    }
}
