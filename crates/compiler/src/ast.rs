/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Syntax tree for the subset of Go that declaration files are written in.
 *
 * Only the shapes the extractor inspects are modelled in detail. Declarations and
 * statements it never looks into are kept as opaque markers with their position.
 */

use std::fmt;

/// Line/column of a token or node (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl File {
    /// Find the import that is visible under `local_name` in this file.
    ///
    /// An explicit alias wins; otherwise the last path segment is used, which is
    /// how Go resolves the default package name for conventional import paths.
    pub fn import_for(&self, local_name: &str) -> Option<&ImportSpec> {
        self.imports.iter().find(|spec| spec.local_name() == local_name)
    }
}

/// One entry of an `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub alias: Option<String>,
    /// Import path with quotes removed.
    pub path: String,
    pub pos: Position,
}

impl ImportSpec {
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    /// `var`, `const` or `type` declaration; contents are not retained.
    Gen { keyword: GenKeyword, pos: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKeyword {
    Var,
    Const,
    Type,
}

impl fmt::Display for GenKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenKeyword::Var => "var",
            GenKeyword::Const => "const",
            GenKeyword::Type => "type",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// True for methods (`func (r T) name()`).
    pub has_receiver: bool,
    /// `None` for declarations without a body (assembly-backed functions).
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

/// Statement inside a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A bare expression used as a statement (usually a call).
    Expr(Expr),
    /// Any other statement shape, skipped without building a tree for it.
    Other { kind: StmtKind, pos: Position },
}

impl Stmt {
    pub fn pos(&self) -> Position {
        match self {
            Stmt::Expr(expr) => expr.pos(),
            Stmt::Other { pos, .. } => *pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    Assign,
    Declaration,
    Block,
    Control,
    Return,
    Go,
    Defer,
    Send,
    IncDec,
    Labeled,
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StmtKind::Assign => "assignment",
            StmtKind::Declaration => "declaration",
            StmtKind::Block => "block",
            StmtKind::Control => "control flow statement",
            StmtKind::Return => "return statement",
            StmtKind::Go => "go statement",
            StmtKind::Defer => "defer statement",
            StmtKind::Send => "send statement",
            StmtKind::IncDec => "increment/decrement",
            StmtKind::Labeled => "labeled statement",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl fmt::Display for LitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LitKind::Int => "integer literal",
            LitKind::Float => "float literal",
            LitKind::Imag => "imaginary literal",
            LitKind::Char => "rune literal",
            LitKind::String => "string literal",
        };
        f.write_str(s)
    }
}

/// Expression node. The variant set is closed so consumers match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    /// Literal value, kept as written in the source (quotes included).
    BasicLit {
        kind: LitKind,
        value: String,
        pos: Position,
    },
    /// `T{...}`, or `{...}` with the type elided inside another literal.
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
        pos: Position,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    Selector {
        x: Box<Expr>,
        sel: Ident,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
    Unary {
        op: String,
        x: Box<Expr>,
        pos: Position,
    },
    Binary {
        op: String,
        x: Box<Expr>,
        y: Box<Expr>,
    },
    Paren {
        x: Box<Expr>,
        pos: Position,
    },
    /// `*T` in type position.
    Star {
        x: Box<Expr>,
        pos: Position,
    },
    /// `[]T` or `[N]T`.
    ArrayType {
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
        pos: Position,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
        pos: Position,
    },
    TypeAssert {
        x: Box<Expr>,
        ty: Box<Expr>,
    },
    /// `x[lo:hi]`; bounds are not retained.
    Slice {
        x: Box<Expr>,
    },
    /// Function literals and struct, interface or channel types, skipped as a unit.
    Opaque {
        what: &'static str,
        pos: Position,
    },
}

impl Expr {
    pub fn pos(&self) -> Position {
        match self {
            Expr::Ident(ident) => ident.pos,
            Expr::BasicLit { pos, .. }
            | Expr::CompositeLit { pos, .. }
            | Expr::Unary { pos, .. }
            | Expr::Paren { pos, .. }
            | Expr::Star { pos, .. }
            | Expr::ArrayType { pos, .. }
            | Expr::MapType { pos, .. }
            | Expr::Opaque { pos, .. } => *pos,
            Expr::KeyValue { key, .. } => key.pos(),
            Expr::Selector { x, .. }
            | Expr::Call { fun: x, .. }
            | Expr::Index { x, .. }
            | Expr::Binary { x, .. }
            | Expr::TypeAssert { x, .. }
            | Expr::Slice { x } => x.pos(),
        }
    }

    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            Expr::Ident(_) => "identifier".to_string(),
            Expr::BasicLit { kind, .. } => kind.to_string(),
            Expr::CompositeLit { .. } => "composite literal".to_string(),
            Expr::KeyValue { .. } => "key/value pair".to_string(),
            Expr::Selector { .. } => "selector expression".to_string(),
            Expr::Call { .. } => "call expression".to_string(),
            Expr::Index { .. } => "index expression".to_string(),
            Expr::Unary { op, .. } => format!("unary '{op}' expression"),
            Expr::Binary { op, .. } => format!("binary '{op}' expression"),
            Expr::Paren { .. } => "parenthesized expression".to_string(),
            Expr::Star { .. } => "pointer expression".to_string(),
            Expr::ArrayType { .. } => "array type".to_string(),
            Expr::MapType { .. } => "map type".to_string(),
            Expr::TypeAssert { .. } => "type assertion".to_string(),
            Expr::Slice { .. } => "slice expression".to_string(),
            Expr::Opaque { what, .. } => (*what).to_string(),
        }
    }
}
