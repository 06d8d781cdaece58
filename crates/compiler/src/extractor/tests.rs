/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use super::*;
use crate::model::Param;
use crate::parser::parse_file;

fn extract(source: &str) -> Result<Package, ExtractError> {
    let file = parse_file(source).expect("source should parse");
    extract_package(&file)
}

fn declaration(body: &str) -> String {
    format!(
        r#"package api

import (
	"github.com/damonchen/shu/bundle"
)

func init() {{
{body}
}}
"#
    )
}

#[test]
fn test_extract_single_client() {
    let source = declaration(
        r#"	bundle.Client(
		bundle.ClientDef{
			Name: "auth",
			APIs: []bundle.API{
				{Name: "login", Path: "/login", Method: "POST", Params: UserLogin{}, Response: LoginResp{}},
				{Name: "logout", Response: Empty{}},
			},
		},
	)"#,
    );
    let pkg = extract(&source).unwrap();

    assert_eq!(pkg.name, "api");
    assert_eq!(pkg.dispatch_import.as_deref(), Some("github.com/damonchen/shu/bundle"));
    assert_eq!(pkg.clients.len(), 1);

    let auth = &pkg.clients[0];
    assert_eq!(auth.name, "auth");
    assert_eq!(
        auth.funcs,
        vec![
            Func {
                name: "login".to_string(),
                params: vec![Param {
                    type_name: "UserLogin".to_string()
                }],
                response_type: "LoginResp".to_string(),
            },
            Func::new("logout", "Empty"),
        ]
    );
}

#[test]
fn test_client_order_is_declaration_order() {
    let source = declaration(
        r#"	bundle.Client(
		bundle.ClientDef{Name: "zeta"},
		bundle.ClientDef{Name: "alpha"},
		bundle.ClientDef{Name: "mid"},
	)"#,
    );
    let pkg = extract(&source).unwrap();
    let names: Vec<&str> = pkg.clients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_unrelated_calls_before_declaration_are_skipped() {
    let source = declaration(
        r#"	log.SetFlags(0)
	setup()
	bundle.Register(x)
	bundle.Client(bundle.ClientDef{Name: "auth"})
	log.Println("done")"#,
    );
    let pkg = extract(&source).unwrap();
    assert_eq!(pkg.clients.len(), 1);
}

#[test]
fn test_missing_init() {
    let err = extract("package api\n\nfunc main() {}\n").unwrap_err();
    assert_eq!(err, ExtractError::MissingEntryPoint);
}

#[test]
fn test_init_without_body() {
    let err = extract("package api\n\nfunc init()\n").unwrap_err();
    assert_eq!(err, ExtractError::MissingEntryPoint);
}

#[test]
fn test_init_method_is_not_an_entry_point() {
    let err = extract("package api\n\nfunc (s Server) init() { bundle.Client() }\n").unwrap_err();
    assert_eq!(err, ExtractError::MissingEntryPoint);
}

#[test]
fn test_no_client_declaration() {
    let err = extract(&declaration("\tsetup()\n\tbundle.Register()")).unwrap_err();
    assert_eq!(
        err,
        ExtractError::NoClientDeclaration("bundle.Client".to_string())
    );
}

#[test]
fn test_non_call_statement_is_rejected() {
    let source = declaration(
        r#"	x := 1
	bundle.Client(bundle.ClientDef{Name: "auth"})"#,
    );
    let err = extract(&source).unwrap_err();
    match err {
        ExtractError::MalformedStatement { kind, position } => {
            assert_eq!(kind, "assignment");
            assert_eq!(position.line, 8);
        }
        other => panic!("Expected MalformedStatement, got {other:?}"),
    }
}

#[test]
fn test_non_call_statement_after_declaration_is_rejected() {
    let source = declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth"})
	if debug {
		println("x")
	}"#,
    );
    let err = extract(&source).unwrap_err();
    assert!(matches!(err, ExtractError::MalformedStatement { ref kind, .. } if kind == "control flow statement"));
}

#[test]
fn test_non_call_expression_statement_is_rejected() {
    let err = extract(&declaration("\t<-done")).unwrap_err();
    assert!(matches!(err, ExtractError::MalformedStatement { .. }));
}

#[test]
fn test_unknown_client_field() {
    let source = declaration(r#"	bundle.Client(bundle.ClientDef{Name: "auth", Timeout: 5})"#);
    let err = extract(&source).unwrap_err();
    match err {
        ExtractError::UnknownField { name, .. } => assert_eq!(name, "Timeout"),
        other => panic!("Expected UnknownField, got {other:?}"),
    }
}

#[test]
fn test_client_argument_must_be_composite_literal() {
    let err = extract(&declaration("\tbundle.Client(authDef)")).unwrap_err();
    match err {
        ExtractError::TypeMismatch { field, found, .. } => {
            assert_eq!(field, "client declaration");
            assert_eq!(found, "identifier");
        }
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_client_name_must_be_string() {
    let err = extract(&declaration("\tbundle.Client(bundle.ClientDef{Name: 42})")).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::TypeMismatch { ref field, ref found, .. } if field == "Name" && found == "integer literal"
    ));
}

#[test]
fn test_apis_must_be_composite_literal() {
    let err = extract(&declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth", APIs: apis})"#,
    ))
    .unwrap_err();
    assert!(matches!(err, ExtractError::TypeMismatch { ref field, .. } if field == "APIs"));
}

#[test]
fn test_positional_client_elements_are_rejected() {
    let err = extract(&declaration(r#"	bundle.Client(bundle.ClientDef{"auth"})"#)).unwrap_err();
    assert!(matches!(err, ExtractError::TypeMismatch { .. }));
}

#[test]
fn test_params_must_name_a_type() {
    let err = extract(&declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth", APIs: []bundle.API{
		{Name: "login", Params: &UserLogin{}, Response: LoginResp{}},
	}})"#,
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::TypeMismatch { ref field, ref found, .. } if field == "Params" && found == "unary '&' expression"
    ));
}

#[test]
fn test_response_from_other_package_is_rejected() {
    let err = extract(&declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth", APIs: []bundle.API{
		{Name: "login", Response: types.LoginResp{}},
	}})"#,
    ))
    .unwrap_err();
    assert!(matches!(err, ExtractError::TypeMismatch { ref field, .. } if field == "Response"));
}

#[test]
fn test_empty_api_entries_are_dropped() {
    let source = declaration(
        r#"	bundle.Client(bundle.ClientDef{
		Name: "auth",
		APIs: []bundle.API{
			{Name: "login", Params: UserLogin{}, Response: LoginResp{}},
			{Path: "/unused", Method: "GET"},
			{Name: "logout", Response: Empty{}},
		},
	})"#,
    );
    let pkg = extract(&source).unwrap();
    let names: Vec<&str> = pkg.clients[0].funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["login", "logout"]);
}

#[test]
fn test_unknown_api_fields_are_ignored() {
    let source = declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth", APIs: []bundle.API{
		{Name: "login", Response: LoginResp{}, Doc: "sign in"},
	}})"#,
    );
    let pkg = extract(&source).unwrap();
    assert_eq!(pkg.clients[0].funcs, vec![Func::new("login", "LoginResp")]);
}

#[test]
fn test_api_without_response_is_rejected() {
    let err = extract(&declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "auth", APIs: []bundle.API{
		{Name: "login", Params: UserLogin{}},
	}})"#,
    ))
    .unwrap_err();
    match err {
        ExtractError::MissingField { field, context, .. } => {
            assert_eq!(field, "Response");
            assert_eq!(context, "API login");
        }
        other => panic!("Expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_client_without_name_is_rejected() {
    let err = extract(&declaration("\tbundle.Client(bundle.ClientDef{})")).unwrap_err();
    assert!(matches!(err, ExtractError::MissingField { ref field, .. } if field == "Name"));
}

#[test]
fn test_empty_name_is_rejected() {
    let err = extract(&declaration(r#"	bundle.Client(bundle.ClientDef{Name: ""})"#)).unwrap_err();
    assert!(matches!(err, ExtractError::TypeMismatch { .. }));
}

#[test]
fn test_raw_string_names() {
    let pkg = extract(&declaration("\tbundle.Client(bundle.ClientDef{Name: `auth`})")).unwrap();
    assert_eq!(pkg.clients[0].name, "auth");
}

#[test]
fn test_names_are_decoded() {
    let source = declaration(
        r#"	bundle.Client(bundle.ClientDef{
		Name: `legacy\auth`,
		APIs: []bundle.API{
			{Name: "say \"hi\"", Response: Greeting{}},
		},
	})"#,
    );
    let pkg = extract(&source).unwrap();
    assert_eq!(pkg.clients[0].name, r"legacy\auth");
    assert_eq!(pkg.clients[0].funcs[0].name, "say \"hi\"");
}

#[test]
fn test_malformed_escape_in_name_is_rejected() {
    let err = extract(&declaration(r#"	bundle.Client(bundle.ClientDef{Name: "a\qb"})"#)).unwrap_err();
    assert!(matches!(err, ExtractError::TypeMismatch { ref field, .. } if field == "Name"));
    assert!(err.to_string().contains("malformed escape sequence"));
}

#[test]
fn test_missing_bundle_import_leaves_dispatch_import_empty() {
    let source = "package api\n\nfunc init() {\n\tbundle.Client(bundle.ClientDef{Name: \"auth\"})\n}\n";
    let pkg = extract(source).unwrap();
    assert_eq!(pkg.dispatch_import, None);
}

#[test]
fn test_first_declaration_call_wins() {
    let source = declaration(
        r#"	bundle.Client(bundle.ClientDef{Name: "first"})
	bundle.Client(bundle.ClientDef{Name: "second"})"#,
    );
    let pkg = extract(&source).unwrap();
    assert_eq!(pkg.clients.len(), 1);
    assert_eq!(pkg.clients[0].name, "first");
}
