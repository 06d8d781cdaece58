/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Declaration extractor.
 *
 * Matches the fixed literal grammar of a declaration file:
 *
 * ```go
 * func init() {
 *     bundle.Client(
 *         bundle.ClientDef{
 *             Name: "auth",
 *             APIs: []bundle.API{
 *                 {Name: "login", Path: "/login", Method: "POST", Params: UserLogin{}, Response: LoginResp{}},
 *             },
 *         },
 *     )
 * }
 * ```
 *
 * and turns it into a [`Package`]. Any shape outside the grammar is reported as an
 * [`ExtractError`]. Two things are dropped instead: `APIs` entries that declare none of
 * `Name`, `Params` or `Response`, and unrecognized fields inside an `APIs` entry.
 */

#[cfg(test)]
mod tests;

use crate::ast::{Decl, Expr, File, Ident, LitKind, Position, Stmt};
use crate::error::ExtractError;
use crate::model::{Client, Func, Package, Param};
use crate::parser::unquote;
use tracing::{debug, warn};

/// Receiver identifier of the declaration call; also the dispatch package in generated code.
pub const DISPATCH_RECEIVER: &str = "bundle";

/// Selector of the declaration call.
pub const DECLARATION_SELECTOR: &str = "Client";

/// Name of the entry-point function.
pub const ENTRY_POINT: &str = "init";

/// Extract the client declarations from a parsed file.
///
/// # Errors
///
/// Returns `ExtractError` when the entry point is missing, when its body contains anything
/// other than call statements, when no declaration call is found, or when a declaration
/// literal does not follow the expected grammar.
pub fn extract_package(file: &File) -> Result<Package, ExtractError> {
    let stmts = find_entry_point(file)?;
    let args = find_declaration_call(stmts)?;

    let mut package = Package::new(file.package.name.clone());
    package.dispatch_import = file
        .import_for(DISPATCH_RECEIVER)
        .map(|spec| spec.path.clone());
    if package.dispatch_import.is_none() {
        warn!(
            package = %package.name,
            "declaration file does not import the {DISPATCH_RECEIVER} package"
        );
    }

    for arg in args {
        package.clients.push(extract_client(arg)?);
    }

    debug!(
        package = %package.name,
        clients = package.clients.len(),
        funcs = package.func_count(),
        "extracted client declarations"
    );
    Ok(package)
}

/// Return the statements of the first `init` function.
fn find_entry_point(file: &File) -> Result<&[Stmt], ExtractError> {
    let init = file.decls.iter().find_map(|decl| match decl {
        Decl::Func(func) if !func.has_receiver && func.name.name == ENTRY_POINT => Some(func),
        _ => None,
    });
    match init.and_then(|func| func.body.as_ref()) {
        Some(body) => Ok(body.stmts.as_slice()),
        None => Err(ExtractError::MissingEntryPoint),
    }
}

/// Find the `bundle.Client(...)` call and return its arguments.
///
/// Every statement of the entry point must be a call statement, including the ones after
/// the declaration call.
fn find_declaration_call(stmts: &[Stmt]) -> Result<&[Expr], ExtractError> {
    let mut declaration = None;
    for stmt in stmts {
        let (fun, args) = match stmt {
            Stmt::Expr(Expr::Call { fun, args, .. }) => (fun, args),
            Stmt::Expr(other) => {
                return Err(ExtractError::MalformedStatement {
                    kind: other.kind_name(),
                    position: other.pos(),
                })
            }
            Stmt::Other { kind, pos } => {
                return Err(ExtractError::MalformedStatement {
                    kind: kind.to_string(),
                    position: *pos,
                })
            }
        };

        match qualified_name(fun) {
            Some((receiver, selector))
                if receiver.name == DISPATCH_RECEIVER && selector.name == DECLARATION_SELECTOR =>
            {
                if declaration.is_none() {
                    declaration = Some(args.as_slice());
                } else {
                    debug!(position = %stmt.pos(), "ignoring repeated declaration call");
                }
            }
            _ => debug!(position = %stmt.pos(), "skipping unrelated call in {ENTRY_POINT}"),
        }
    }

    declaration.ok_or_else(|| {
        ExtractError::NoClientDeclaration(format!("{DISPATCH_RECEIVER}.{DECLARATION_SELECTOR}"))
    })
}

/// `receiver.Selector` with a plain identifier receiver.
fn qualified_name(fun: &Expr) -> Option<(&Ident, &Ident)> {
    match fun {
        Expr::Selector { x, sel } => match x.as_ref() {
            Expr::Ident(receiver) => Some((receiver, sel)),
            _ => None,
        },
        _ => None,
    }
}

fn extract_client(arg: &Expr) -> Result<Client, ExtractError> {
    let (elts, pos) = composite_elements(arg, "client declaration")?;

    let mut name = None;
    let mut funcs = Vec::new();
    for elt in elts {
        let (key, value) = key_value(elt, "client declaration")?;
        match key.name.as_str() {
            "Name" => name = Some(string_value(value, "Name")?),
            "APIs" => funcs = extract_apis(value)?,
            _ => {
                return Err(ExtractError::UnknownField {
                    name: key.name.clone(),
                    position: key.pos,
                })
            }
        }
    }

    let name = name.ok_or_else(|| missing("Name", "client declaration", pos))?;
    debug!(client = %name, funcs = funcs.len(), "extracted client");
    Ok(Client { name, funcs })
}

fn extract_apis(value: &Expr) -> Result<Vec<Func>, ExtractError> {
    let (elts, _) = composite_elements(value, "APIs")?;
    let mut funcs = Vec::with_capacity(elts.len());
    for elt in elts {
        if let Some(func) = extract_func(elt)? {
            funcs.push(func);
        }
    }
    Ok(funcs)
}

/// Build one `Func` from an `APIs` entry, or `None` when the entry declares nothing.
fn extract_func(entry: &Expr) -> Result<Option<Func>, ExtractError> {
    let (elts, pos) = composite_elements(entry, "APIs entry")?;

    let mut found = false;
    let mut name = None;
    let mut param = None;
    let mut response = None;
    for elt in elts {
        let (key, value) = key_value(elt, "APIs entry")?;
        match key.name.as_str() {
            "Name" => {
                name = Some(string_value(value, "Name")?);
                found = true;
            }
            "Path" | "Method" => {}
            "Params" => {
                param = Some(Param {
                    type_name: type_name(value, "Params")?,
                });
                found = true;
            }
            "Response" => {
                response = Some(type_name(value, "Response")?);
                found = true;
            }
            other => debug!(field = other, position = %key.pos, "ignoring APIs field"),
        }
    }

    if !found {
        debug!(position = %pos, "dropping APIs entry without Name, Params or Response");
        return Ok(None);
    }

    let name = name.ok_or_else(|| missing("Name", "APIs entry", pos))?;
    let response_type = response.ok_or_else(|| missing("Response", &format!("API {name}"), pos))?;
    Ok(Some(Func {
        name,
        params: param.into_iter().collect(),
        response_type,
    }))
}

fn composite_elements<'a>(expr: &'a Expr, what: &str) -> Result<(&'a [Expr], Position), ExtractError> {
    match expr {
        Expr::CompositeLit { elts, pos, .. } => Ok((elts.as_slice(), *pos)),
        other => Err(mismatch(what, "a composite literal", other)),
    }
}

fn key_value<'a>(elt: &'a Expr, what: &str) -> Result<(&'a Ident, &'a Expr), ExtractError> {
    match elt {
        Expr::KeyValue { key, value } => match key.as_ref() {
            Expr::Ident(ident) => Ok((ident, value.as_ref())),
            other => Err(mismatch(&format!("{what} key"), "a field name", other)),
        },
        other => Err(mismatch(&format!("{what} element"), "a Field: value pair", other)),
    }
}

/// Decoded value of a non-empty string literal.
fn string_value(value: &Expr, field: &str) -> Result<String, ExtractError> {
    match value {
        Expr::BasicLit {
            kind: LitKind::String,
            value: literal,
            pos,
        } => {
            let text = unquote(literal).ok_or_else(|| ExtractError::TypeMismatch {
                field: field.to_string(),
                expected: "a valid string literal".to_string(),
                found: "a malformed escape sequence".to_string(),
                position: *pos,
            })?;
            if text.is_empty() {
                return Err(ExtractError::TypeMismatch {
                    field: field.to_string(),
                    expected: "a non-empty string literal".to_string(),
                    found: "an empty string".to_string(),
                    position: *pos,
                });
            }
            Ok(text)
        }
        other => Err(mismatch(field, "a string literal", other)),
    }
}

/// Type name of a literal such as `UserLogin{}`.
fn type_name(value: &Expr, field: &str) -> Result<String, ExtractError> {
    if let Expr::CompositeLit { ty: Some(ty), .. } = value {
        if let Expr::Ident(ident) = ty.as_ref() {
            return Ok(ident.name.clone());
        }
        return Err(mismatch(field, "a literal of a locally named type", ty));
    }
    Err(mismatch(field, "a literal of a locally named type", value))
}

fn mismatch(field: &str, expected: &str, found: &Expr) -> ExtractError {
    ExtractError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        found: found.kind_name(),
        position: found.pos(),
    }
}

fn missing(field: &str, context: &str, position: Position) -> ExtractError {
    ExtractError::MissingField {
        field: field.to_string(),
        context: context.to_string(),
        position,
    }
}
